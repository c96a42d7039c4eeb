use serde::{Deserialize, Serialize};

use crate::notify::Severity;

/// How much diagnostic logging reaches the log output.
///
/// * 0 - No logs
/// * 1 - Errors only
/// * 2 - Info & warnings
/// * 3 - Info, warnings & errors
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum DebugLevel {
    #[default]
    Off,
    Errors,
    InfoAndWarnings,
    All,
}

impl DebugLevel {
    pub fn allows(self, severity: Severity) -> bool {
        match self {
            DebugLevel::Off => false,
            DebugLevel::Errors => severity == Severity::Error,
            DebugLevel::InfoAndWarnings => matches!(severity, Severity::Info | Severity::Warning),
            DebugLevel::All => true,
        }
    }

    /// Parses a configured value, falling back to `Off` (with a warning) for
    /// anything that is not 0 through 3.
    pub fn from_value(value: &str) -> Self {
        match value.trim().parse::<u8>().ok().and_then(|n| Self::try_from(n).ok()) {
            Some(level) => level,
            None => {
                tracing::warn!("Invalid debugLevel value {:?}. Resetting to 0.", value);
                DebugLevel::Off
            }
        }
    }
}

impl TryFrom<u8> for DebugLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DebugLevel::Off),
            1 => Ok(DebugLevel::Errors),
            2 => Ok(DebugLevel::InfoAndWarnings),
            3 => Ok(DebugLevel::All),
            other => Err(format!("debug level must be between 0 and 3, got {}", other)),
        }
    }
}

impl From<DebugLevel> for u8 {
    fn from(level: DebugLevel) -> Self {
        match level {
            DebugLevel::Off => 0,
            DebugLevel::Errors => 1,
            DebugLevel::InfoAndWarnings => 2,
            DebugLevel::All => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        let severities = [Severity::Info, Severity::Warning, Severity::Error];
        let allowed = |level: DebugLevel| severities.map(|s| level.allows(s));

        assert_eq!(allowed(DebugLevel::Off), [false, false, false]);
        assert_eq!(allowed(DebugLevel::Errors), [false, false, true]);
        assert_eq!(allowed(DebugLevel::InfoAndWarnings), [true, true, false]);
        assert_eq!(allowed(DebugLevel::All), [true, true, true]);
    }

    #[test]
    fn test_from_value() {
        assert_eq!(DebugLevel::from_value("3"), DebugLevel::All);
        assert_eq!(DebugLevel::from_value(" 1 "), DebugLevel::Errors);
        assert_eq!(DebugLevel::from_value("7"), DebugLevel::Off);
        assert_eq!(DebugLevel::from_value("verbose"), DebugLevel::Off);
    }

    #[test]
    fn test_serde_as_number() {
        let level: DebugLevel = serde_json::from_str("2").unwrap();
        assert_eq!(level, DebugLevel::InfoAndWarnings);
        assert_eq!(serde_json::to_string(&DebugLevel::All).unwrap(), "3");
        assert!(serde_json::from_str::<DebugLevel>("4").is_err());
    }
}
