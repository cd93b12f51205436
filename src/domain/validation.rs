use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    ClientReferenceTooLong { max: usize, actual: usize },
    InvalidCallbackUrl { input: String },
    InvalidScheduleTime { input: String },
    MissingRecipient,
    MissingMessage,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::ClientReferenceTooLong { max, actual } => {
                write!(f, "client reference too long: {actual} (max {max})")
            }
            Self::InvalidCallbackUrl { input } => write!(f, "invalid callback url: {input}"),
            Self::InvalidScheduleTime { input } => write!(f, "invalid schedule time: {input}"),
            Self::MissingRecipient => write!(f, "message has no recipient"),
            Self::MissingMessage => write!(f, "message body is empty after conversion"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "recipient" };
        assert_eq!(err.to_string(), "recipient must not be empty");

        let err = ValidationError::ClientReferenceTooLong {
            max: 40,
            actual: 41,
        };
        assert_eq!(err.to_string(), "client reference too long: 41 (max 40)");

        let err = ValidationError::InvalidCallbackUrl {
            input: "not a url".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid callback url: not a url");

        let err = ValidationError::InvalidScheduleTime {
            input: "tomorrow-ish".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid schedule time: tomorrow-ish");

        assert_eq!(
            ValidationError::MissingRecipient.to_string(),
            "message has no recipient"
        );
        assert_eq!(
            ValidationError::MissingMessage.to_string(),
            "message body is empty after conversion"
        );
    }
}
