use std::fmt;
use std::io;

use crate::rule::RuleKind;

#[derive(Debug)]
pub enum ScanError {
    Io(io::Error),
    ResourceNotFound { path: String, source: io::Error },
    PatternInvalid { pattern: String, source: regex::Error },
    EmptyTarget { kind: RuleKind },
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Io(e) => Some(e),
            ScanError::ResourceNotFound { source, .. } => Some(source),
            ScanError::PatternInvalid { source, .. } => Some(source),
            ScanError::EmptyTarget { .. } => None,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Io(e) => write!(f, "I/O error: {}", e),
            ScanError::ResourceNotFound { path, source } => {
                write!(f, "Cannot open {}: {}", path, source)
            }
            ScanError::PatternInvalid { pattern, source } => {
                write!(f, "Invalid pattern '{}': {}", pattern, source)
            }
            ScanError::EmptyTarget { kind } => write!(f, "Empty {} target", kind),
        }
    }
}

impl From<io::Error> for ScanError {
    fn from(err: io::Error) -> Self {
        ScanError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_not_found_display_and_source() {
        let err = ScanError::ResourceNotFound {
            path: "people.txt".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(format!("{}", err), "Cannot open people.txt: no such file");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_empty_target_display() {
        let err = ScanError::EmptyTarget { kind: RuleKind::Contains };
        assert_eq!(format!("{}", err), "Empty contains target");
        assert!(err.source().is_none());
    }
}
