use std::sync::Arc;

use crate::{Context, EnabledParameters, FilterProcessor, LogRecord, Processor, ProcessorError};

lazy_static::lazy_static! {
    static ref NOOP: Arc<dyn Processor> = Arc::new(NoopProcessor::new());
}

/// The shared processor used wherever a downstream is missing.
pub fn noop_processor() -> Arc<dyn Processor> {
    NOOP.clone()
}

/// Accepts and discards everything. Never enabled.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoopProcessor {}

impl NoopProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Processor for NoopProcessor {
    fn on_emit(&self, _ctx: &Context, _record: &mut LogRecord) -> Result<(), ProcessorError> {
        Ok(())
    }

    fn enabled(&self, _ctx: &Context, _params: &EnabledParameters) -> bool {
        false
    }

    fn shutdown(&self, _ctx: &Context) -> Result<(), ProcessorError> {
        Ok(())
    }

    fn force_flush(&self, _ctx: &Context) -> Result<(), ProcessorError> {
        Ok(())
    }

    fn as_filter(&self) -> Option<&dyn FilterProcessor> {
        Some(self)
    }
}

impl FilterProcessor for NoopProcessor {}
