use chrono::NaiveDateTime;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Web2SMS API key, the public half of the credential pair.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Payload field name used by Web2SMS (`apiKey`).
    pub const FIELD: &'static str = "apiKey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Web2SMS API secret, used only for request signing and never transmitted.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct ApiSecret(String);

impl ApiSecret {
    /// Create a validated [`ApiSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: "secret" });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Web2SMS account type; selects which message endpoint is used.
pub enum AccountType {
    #[default]
    Prepaid,
    Postpaid,
}

impl AccountType {
    /// Message endpoint path for this account type.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Self::Prepaid => "/prepaid/message",
            Self::Postpaid => "/send/message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// API credential set: key, secret, and account type, validated at
/// construction.
pub struct Credentials {
    api_key: ApiKey,
    api_secret: ApiSecret,
    account_type: AccountType,
}

impl Credentials {
    /// Create a credential set from raw key/secret strings.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        account_type: AccountType,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            api_secret: ApiSecret::new(api_secret)?,
            account_type,
        })
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn api_secret(&self) -> &ApiSecret {
        &self.api_secret
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Caller-supplied reference echoed back in delivery reports (`userData`).
///
/// Invariant: at most 40 characters.
pub struct ClientReference(String);

impl ClientReference {
    /// Payload field name used by Web2SMS (`userData`).
    pub const FIELD: &'static str = "userData";

    /// Maximum accepted length in characters.
    pub const MAX_LEN: usize = 40;

    /// Create a validated [`ClientReference`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let actual = value.chars().count();
        if actual > Self::MAX_LEN {
            return Err(ValidationError::ClientReferenceTooLong {
                max: Self::MAX_LEN,
                actual,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the reference as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery-receipt callback URL (`callbackUrl`).
///
/// Invariant: parses as an absolute URL.
pub struct CallbackUrl(String);

impl CallbackUrl {
    /// Payload field name used by Web2SMS (`callbackUrl`).
    pub const FIELD: &'static str = "callbackUrl";

    /// Create a validated [`CallbackUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if url::Url::parse(trimmed).is_err() {
            return Err(ValidationError::InvalidCallbackUrl {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Scheduled delivery time (`scheduleDatetime`), second precision, in the
/// platform's local time.
pub struct ScheduleTime(NaiveDateTime);

impl ScheduleTime {
    /// Payload field name used by Web2SMS (`scheduleDatetime`).
    pub const FIELD: &'static str = "scheduleDatetime";

    /// Wire format expected by the platform.
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Create a schedule from an already-parsed datetime.
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Parse a schedule from its wire format (`2024-06-01 09:30:00`).
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        NaiveDateTime::parse_from_str(input.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidScheduleTime {
                input: input.to_owned(),
            })
    }

    /// The underlying datetime.
    pub fn datetime(self) -> NaiveDateTime {
        self.0
    }

    /// Render the wire representation.
    pub fn to_wire(self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Platform-assigned message id returned by send, used by status and delete.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Payload field name used by Web2SMS (`id`).
    pub const FIELD: &'static str = "id";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
