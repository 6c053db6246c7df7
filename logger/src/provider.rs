use std::{
    fmt::Display,
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicU8, Ordering},
    },
};

use crate::severity::{LogSeverity, SeverityParseError};

/// Reports the current minimum severity. Implementations must be safe to read
/// while another thread updates them.
pub trait SeverityProvider: Send + Sync {
    fn severity(&self) -> LogSeverity;
}

impl SeverityProvider for LogSeverity {
    fn severity(&self) -> LogSeverity {
        *self
    }
}

impl<T: SeverityProvider + ?Sized> SeverityProvider for Arc<T> {
    fn severity(&self) -> LogSeverity {
        (**self).severity()
    }
}

impl<T: SeverityProvider + ?Sized> SeverityProvider for &T {
    fn severity(&self) -> LogSeverity {
        (**self).severity()
    }
}

/// A severity that can be changed while it is in use.
///
/// Share it through an `Arc` with a processor and keep a clone to call [`SeverityVar::set`].
#[derive(Debug)]
pub struct SeverityVar {
    value: AtomicU8,
}

impl SeverityVar {
    pub fn new(severity: LogSeverity) -> Self {
        Self {
            value: AtomicU8::new(severity.value()),
        }
    }

    pub fn set(&self, severity: LogSeverity) {
        self.value.store(severity.value(), Ordering::Relaxed);
    }
}

impl SeverityProvider for SeverityVar {
    fn severity(&self) -> LogSeverity {
        // Only `new` and `set` store, and both store a valid level.
        LogSeverity::try_from(self.value.load(Ordering::Relaxed)).unwrap_or_default()
    }
}

impl Default for SeverityVar {
    fn default() -> Self {
        Self::new(LogSeverity::Info)
    }
}

impl From<LogSeverity> for SeverityVar {
    fn from(value: LogSeverity) -> Self {
        Self::new(value)
    }
}

impl Display for SeverityVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.severity())
    }
}

impl FromStr for SeverityVar {
    type Err = SeverityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<LogSeverity>().map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_severity_reports_itself() {
        assert_eq!(LogSeverity::Warn.severity(), LogSeverity::Warn);
        let shared: Arc<dyn SeverityProvider> = Arc::new(LogSeverity::Error2);
        assert_eq!(shared.severity(), LogSeverity::Error2);
    }

    #[test]
    fn var_defaults_to_info() {
        assert_eq!(SeverityVar::default().severity(), LogSeverity::Info);
    }

    #[test]
    fn var_set_is_visible_through_clones() {
        let var = Arc::new(SeverityVar::new(LogSeverity::Debug));
        let handle = var.clone();
        handle.set(LogSeverity::Fatal);
        assert_eq!(var.severity(), LogSeverity::Fatal);
    }

    #[test]
    fn var_parse_and_display() {
        let var: SeverityVar = "warn+1".parse().unwrap();
        assert_eq!(var.severity(), LogSeverity::Warn2);
        assert_eq!(var.to_string(), "WARN2");
        assert!("loud".parse::<SeverityVar>().is_err());
    }

    #[test]
    fn var_concurrent_updates() {
        let var = Arc::new(SeverityVar::default());
        let writers = [LogSeverity::Trace, LogSeverity::Error]
            .into_iter()
            .map(|sev| {
                let var = var.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        var.set(sev);
                    }
                })
            })
            .collect::<Vec<_>>();
        for _ in 0..1000 {
            let seen = var.severity();
            assert!(matches!(
                seen,
                LogSeverity::Info | LogSeverity::Trace | LogSeverity::Error
            ));
        }
        for writer in writers {
            writer.join().unwrap();
        }
    }
}
