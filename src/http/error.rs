//! Error representations

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The arguments given to a status constructor do not form an accepted
    /// shape, or a bulk update names an unrecognized key.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading a status field under an unrecognized key.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),

    /// Writing a status field under an unrecognized key.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// Structural mutation of the fixed status field set.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("field {field} expects {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(..))
    }

    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(..))
    }

    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Self::InvalidKey(..))
    }

    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::KeyNotFound("comment".to_string()).to_string(),
            r#"key not found: "comment""#
        );
        assert_eq!(
            Error::TypeMismatch {
                field: "status_code",
                expected: "an integer"
            }
            .to_string(),
            "field status_code expects an integer"
        );
    }

    #[test]
    fn test_kind_predicates() {
        assert!(Error::InvalidArgument(String::new()).is_invalid_argument());
        assert!(Error::InvalidKey(String::new()).is_invalid_key());
        assert!(!Error::InvalidKey(String::new()).is_key_not_found());
        assert!(Error::InvalidOperation("pop").is_invalid_operation());
    }
}
