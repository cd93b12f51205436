//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod response;
mod validation;
mod value;

pub use message::{Message, MessageKind};
pub use response::{ApiResponse, ResponseKind};
pub use validation::ValidationError;
pub use value::{
    AccountType, ApiKey, ApiSecret, CallbackUrl, ClientReference, Credentials, MessageId,
    ScheduleTime,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_rejects_empty() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn api_secret_rejects_empty() {
        assert!(matches!(
            ApiSecret::new(""),
            Err(ValidationError::Empty { field: "secret" })
        ));
    }

    #[test]
    fn client_reference_limit_is_enforced() {
        let err = ClientReference::new("r".repeat(ClientReference::MAX_LEN + 1)).unwrap_err();
        assert!(matches!(err, ValidationError::ClientReferenceTooLong { .. }));
    }

    #[test]
    fn message_builder_keeps_metadata() {
        let message = Message::new("+40700000000", "INFO", "hello")
            .with_kind(MessageKind::Unicode)
            .with_displayed_message("shown instead")
            .with_client_reference(ClientReference::new("ref-1").unwrap())
            .with_schedule(ScheduleTime::parse("2024-06-01 09:30:00").unwrap())
            .with_delivery_receipt_callback(CallbackUrl::new("https://example.com/dlr").unwrap());

        assert_eq!(message.kind(), MessageKind::Unicode);
        assert_eq!(message.displayed_message(), Some("shown instead"));
        assert_eq!(message.client_reference().unwrap().as_str(), "ref-1");
        assert_eq!(
            message.schedule().unwrap().to_wire(),
            "2024-06-01 09:30:00"
        );
        assert_eq!(
            message.delivery_receipt_callback().unwrap().as_str(),
            "https://example.com/dlr"
        );
    }
}
