use serde_json::Value;

/// Which API call produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    Send,
    Status,
    Delete,
    Balance,
}

#[derive(Debug, Clone, PartialEq)]
/// Decoded Web2SMS API response.
///
/// Every endpoint shares the same envelope: a data object plus an error
/// code/message pair, with `error_code == 0` meaning success. The kind tag
/// selects which accessor is meaningful.
pub struct ApiResponse {
    pub kind: ResponseKind,
    pub data: Value,
    pub error_code: i64,
    pub error_message: String,
}

impl ApiResponse {
    /// Whether the platform accepted the request.
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }

    /// Platform-assigned message id (send responses only).
    pub fn message_id(&self) -> Option<&str> {
        match self.kind {
            ResponseKind::Send => self.data.get("id").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Delivery status string (status responses only).
    pub fn delivery_status(&self) -> Option<&str> {
        match self.kind {
            ResponseKind::Status => self.data.get("status").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Whether the message was deleted (delete responses only).
    pub fn is_deleted(&self) -> bool {
        self.kind == ResponseKind::Delete
            && self.is_success()
            && self.data.get("result").and_then(Value::as_str) == Some("DELETED")
    }

    /// Account balance (balance responses only).
    ///
    /// The platform reports the balance inside the error message with code
    /// zero and `result` set to `BALANCE`.
    pub fn balance(&self) -> Option<&str> {
        if self.kind == ResponseKind::Balance
            && self.is_success()
            && self.data.get("result").and_then(Value::as_str) == Some("BALANCE")
        {
            Some(&self.error_message)
        } else {
            None
        }
    }
}
