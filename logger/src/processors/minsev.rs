use std::sync::Arc;

use crate::{
    Context, EnabledParameters, FilterProcessor, LogRecord, LogSeverity, Processor,
    ProcessorError, SeverityProvider, processors::noop::noop_processor,
};

/// Wraps a downstream [`Processor`] and drops every record whose severity is below a minimum.
///
/// The minimum is read from the [`SeverityProvider`] on every `on_emit` and `enabled` call,
/// so a [`crate::SeverityVar`] can move the threshold without rebuilding the processor.
/// `shutdown` and `force_flush` are passed straight through.
pub struct MinSeverityProcessor {
    downstream: Arc<dyn Processor>,
    severity: Arc<dyn SeverityProvider>,
    // Whether the downstream is a FilterProcessor, decided once in `build`.
    downstream_filters: bool,
}

impl MinSeverityProcessor {
    pub fn new<P, S>(downstream: P, severity: S) -> Self
    where
        P: Processor + 'static,
        S: SeverityProvider + 'static,
    {
        Self::builder().downstream(downstream).severity(severity).build()
    }

    pub fn builder() -> MinSeverityProcessorBuilder {
        MinSeverityProcessorBuilder::default()
    }

    /// The minimum severity as of this call.
    pub fn minimum(&self) -> LogSeverity {
        self.severity.severity()
    }
}

impl Default for MinSeverityProcessor {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Collects the optional parts of a [`MinSeverityProcessor`]. Building never fails:
/// a missing downstream becomes the shared no-op processor and a missing severity becomes
/// [`LogSeverity::Info`].
#[derive(Default)]
pub struct MinSeverityProcessorBuilder {
    downstream: Option<Arc<dyn Processor>>,
    severity: Option<Arc<dyn SeverityProvider>>,
}

impl MinSeverityProcessorBuilder {
    pub fn downstream<P: Processor + 'static>(self, downstream: P) -> Self {
        self.shared_downstream(Arc::new(downstream))
    }

    /// Use a downstream that is also held elsewhere.
    pub fn shared_downstream(mut self, downstream: Arc<dyn Processor>) -> Self {
        self.downstream = Some(downstream);
        self
    }

    pub fn severity<S: SeverityProvider + 'static>(mut self, severity: S) -> Self {
        self.severity = Some(Arc::new(severity));
        self
    }

    pub fn build(self) -> MinSeverityProcessor {
        let downstream = self.downstream.unwrap_or_else(|| {
            tracing::debug!("no downstream processor given, records will be discarded");
            noop_processor()
        });
        let severity: Arc<dyn SeverityProvider> = match self.severity {
            Some(severity) => severity,
            None => Arc::new(LogSeverity::Info),
        };
        let downstream_filters = downstream.as_filter().is_some();
        MinSeverityProcessor {
            downstream,
            severity,
            downstream_filters,
        }
    }
}

impl Processor for MinSeverityProcessor {
    fn on_emit(&self, ctx: &Context, record: &mut LogRecord) -> Result<(), ProcessorError> {
        if record.severity >= self.severity.severity() {
            self.downstream.on_emit(ctx, record)
        } else {
            Ok(())
        }
    }

    fn enabled(&self, ctx: &Context, params: &EnabledParameters) -> bool {
        let passes = params.severity >= self.severity.severity();
        if self.downstream_filters {
            passes && self.downstream.enabled(ctx, params)
        } else {
            passes
        }
    }

    fn shutdown(&self, ctx: &Context) -> Result<(), ProcessorError> {
        self.downstream.shutdown(ctx)
    }

    fn force_flush(&self, ctx: &Context) -> Result<(), ProcessorError> {
        self.downstream.force_flush(ctx)
    }

    fn as_filter(&self) -> Option<&dyn FilterProcessor> {
        Some(self)
    }
}

impl FilterProcessor for MinSeverityProcessor {}
