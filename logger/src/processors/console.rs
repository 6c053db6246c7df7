use std::{
    io::Write,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{Context, EnabledParameters, LogRecord, Processor, ProcessorError};

/// Writes one line per record to stdout, or to the writer given to
/// [`ConsoleProcessor::with_writer`].
pub struct ConsoleProcessor {
    out: Mutex<Box<dyn Write + Send>>,
    shut_down: AtomicBool,
}

impl Default for ConsoleProcessor {
    fn default() -> Self {
        Self::with_writer(std::io::stdout())
    }
}

impl ConsoleProcessor {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
            shut_down: AtomicBool::new(false),
        }
    }

    fn flush_writer(&self) -> Result<(), ProcessorError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| ProcessorError::Failed("console writer mutex poisoned".into()))?;
        out.flush()?;
        Ok(())
    }
}

impl Processor for ConsoleProcessor {
    fn on_emit(&self, _ctx: &Context, record: &mut LogRecord) -> Result<(), ProcessorError> {
        if self.shut_down.load(Ordering::Acquire) {
            return Err(ProcessorError::Shutdown);
        }
        let mut line = format!(
            "({}) {} : {}",
            record.time.format("%I:%M:%S%p"),
            record.severity,
            record.body
        );
        for (key, value) in &record.attributes {
            line.push_str(&format!(" {key}={value}"));
        }
        let mut out = self
            .out
            .lock()
            .map_err(|_| ProcessorError::Failed("console writer mutex poisoned".into()))?;
        writeln!(out, "{line}")?;
        Ok(())
    }

    fn enabled(&self, _ctx: &Context, _params: &EnabledParameters) -> bool {
        !self.shut_down.load(Ordering::Acquire)
    }

    fn shutdown(&self, ctx: &Context) -> Result<(), ProcessorError> {
        if ctx.is_expired() {
            return Err(ProcessorError::DeadlineExceeded);
        }
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return Err(ProcessorError::Shutdown);
        }
        tracing::debug!("console processor shut down");
        self.flush_writer()
    }

    fn force_flush(&self, ctx: &Context) -> Result<(), ProcessorError> {
        if ctx.is_expired() {
            return Err(ProcessorError::DeadlineExceeded);
        }
        self.flush_writer()
    }
}
