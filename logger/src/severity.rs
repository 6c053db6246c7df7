use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Record severity on the OpenTelemetry scale, where a higher value is more severe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogSeverity {
    Trace = 1,
    Trace2,
    Trace3,
    Trace4,
    Debug,
    Debug2,
    Debug3,
    Debug4,
    #[default]
    Info,
    Info2,
    Info3,
    Info4,
    Warn,
    Warn2,
    Warn3,
    Warn4,
    Error,
    Error2,
    Error3,
    Error4,
    Fatal,
    Fatal2,
    Fatal3,
    Fatal4,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeverityParseError {
    #[error("Severity value {0} is outside the range 1..=24")]
    OutOfRange(i64),
    #[error("Unknown severity name \"{0}\"")]
    UnknownName(String),
    #[error("Invalid severity offset in \"{0}\"")]
    InvalidOffset(String),
}

const ALL: [LogSeverity; 24] = [
    LogSeverity::Trace,
    LogSeverity::Trace2,
    LogSeverity::Trace3,
    LogSeverity::Trace4,
    LogSeverity::Debug,
    LogSeverity::Debug2,
    LogSeverity::Debug3,
    LogSeverity::Debug4,
    LogSeverity::Info,
    LogSeverity::Info2,
    LogSeverity::Info3,
    LogSeverity::Info4,
    LogSeverity::Warn,
    LogSeverity::Warn2,
    LogSeverity::Warn3,
    LogSeverity::Warn4,
    LogSeverity::Error,
    LogSeverity::Error2,
    LogSeverity::Error3,
    LogSeverity::Error4,
    LogSeverity::Fatal,
    LogSeverity::Fatal2,
    LogSeverity::Fatal3,
    LogSeverity::Fatal4,
];

impl LogSeverity {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// The base level of this severity's family, e.g. `Warn3` -> `Warn`.
    pub fn family(self) -> LogSeverity {
        ALL[usize::from((self.value() - 1) / 4 * 4)]
    }

    fn family_name(self) -> &'static str {
        match self.family() {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO",
            LogSeverity::Warn => "WARN",
            LogSeverity::Error => "ERROR",
            _ => "FATAL",
        }
    }

    fn from_value(value: i64) -> Result<Self, SeverityParseError> {
        if (1..=24).contains(&value) {
            Ok(ALL[(value - 1) as usize])
        } else {
            Err(SeverityParseError::OutOfRange(value))
        }
    }
}

impl TryFrom<u8> for LogSeverity {
    type Error = SeverityParseError;

    fn try_from(value: u8) -> Result<Self, SeverityParseError> {
        Self::from_value(i64::from(value))
    }
}

impl From<LogSeverity> for u8 {
    fn from(value: LogSeverity) -> Self {
        value.value()
    }
}

impl Display for LogSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let step = (self.value() - 1) % 4;
        if step == 0 {
            write!(f, "{}", self.family_name())
        } else {
            write!(f, "{}{}", self.family_name(), step + 1)
        }
    }
}

/// Accepts `info`, `INFO3`, `warning`, `info+2` and `error-1`. Names are case-insensitive.
impl FromStr for LogSeverity {
    type Err = SeverityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let split = text
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(text.len());
        let (name, rest) = text.split_at(split);

        let base = match name {
            "trace" => LogSeverity::Trace,
            "debug" => LogSeverity::Debug,
            "info" => LogSeverity::Info,
            "warn" | "warning" => LogSeverity::Warn,
            "error" => LogSeverity::Error,
            "fatal" => LogSeverity::Fatal,
            _ => return Err(SeverityParseError::UnknownName(s.to_string())),
        };
        let base = i64::from(base.value());

        if rest.is_empty() {
            return Self::from_value(base);
        }
        if rest.starts_with('+') || rest.starts_with('-') {
            let offset: i64 = rest
                .parse()
                .map_err(|_| SeverityParseError::InvalidOffset(s.to_string()))?;
            let value = base
                .checked_add(offset)
                .ok_or_else(|| SeverityParseError::InvalidOffset(s.to_string()))?;
            return Self::from_value(value);
        }

        // Numbered variant within a family: info2..info4
        match rest.parse::<i64>() {
            Ok(step @ 1..=4) => Self::from_value(base + step - 1),
            _ => Err(SeverityParseError::InvalidOffset(s.to_string())),
        }
    }
}

impl Serialize for LogSeverity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogSeverity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_numeric_value() {
        assert!(LogSeverity::Debug < LogSeverity::Info);
        assert!(LogSeverity::Info < LogSeverity::Warn);
        assert!(LogSeverity::Warn4 < LogSeverity::Error);
        assert_eq!(LogSeverity::Info.value(), 9);
        assert_eq!(LogSeverity::Fatal4.value(), 24);
    }

    #[test]
    fn display_names() {
        assert_eq!(LogSeverity::Info.to_string(), "INFO");
        assert_eq!(LogSeverity::Warn3.to_string(), "WARN3");
        assert_eq!(LogSeverity::Trace.to_string(), "TRACE");
        assert_eq!(LogSeverity::Fatal4.to_string(), "FATAL4");
    }

    #[test]
    fn parse_names_and_offsets() {
        assert_eq!("info".parse::<LogSeverity>(), Ok(LogSeverity::Info));
        assert_eq!("WARNING".parse::<LogSeverity>(), Ok(LogSeverity::Warn));
        assert_eq!("Error2".parse::<LogSeverity>(), Ok(LogSeverity::Error2));
        assert_eq!("info+2".parse::<LogSeverity>(), Ok(LogSeverity::Info3));
        assert_eq!("error-1".parse::<LogSeverity>(), Ok(LogSeverity::Warn4));
        assert_eq!(" debug ".parse::<LogSeverity>(), Ok(LogSeverity::Debug));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            "verbose".parse::<LogSeverity>(),
            Err(SeverityParseError::UnknownName(_))
        ));
        assert!(matches!(
            "info5".parse::<LogSeverity>(),
            Err(SeverityParseError::InvalidOffset(_))
        ));
        assert!(matches!(
            "trace-1".parse::<LogSeverity>(),
            Err(SeverityParseError::OutOfRange(0))
        ));
        assert!(matches!(
            "fatal+4".parse::<LogSeverity>(),
            Err(SeverityParseError::OutOfRange(25))
        ));
    }

    #[test]
    fn huge_offsets_are_rejected() {
        assert!(matches!(
            "info+9223372036854775807".parse::<LogSeverity>(),
            Err(SeverityParseError::InvalidOffset(_))
        ));
        assert!(matches!(
            "fatal-9223372036854775807".parse::<LogSeverity>(),
            Err(SeverityParseError::OutOfRange(_))
        ));
        assert!(matches!(
            "info+99999999999999999999".parse::<LogSeverity>(),
            Err(SeverityParseError::InvalidOffset(_))
        ));
    }

    #[test]
    fn display_parses_back() {
        for sev in ALL {
            assert_eq!(sev.to_string().parse::<LogSeverity>(), Ok(sev));
        }
    }

    #[test]
    fn try_from_u8_bounds() {
        assert_eq!(LogSeverity::try_from(13u8), Ok(LogSeverity::Warn));
        assert!(LogSeverity::try_from(0u8).is_err());
        assert!(LogSeverity::try_from(25u8).is_err());
    }

    #[test]
    fn family_of_numbered_variants() {
        assert_eq!(LogSeverity::Debug3.family(), LogSeverity::Debug);
        assert_eq!(LogSeverity::Fatal.family(), LogSeverity::Fatal);
    }
}
