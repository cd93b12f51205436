//! Typed Rust client for the Web2SMS HTTP API.
//!
//! The crate is layered: a domain layer of strong types (messages, values,
//! responses), a charset layer implementing the GSM 03.38 alphabet and
//! segment accounting, a transport layer for wire-format quirks (payload
//! encoding, SHA-512 request signing, response decoding), and a small
//! client layer orchestrating requests.
//!
//! ```rust,no_run
//! use web2sms::{AccountType, Credentials, Message, Web2smsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), web2sms::Web2smsError> {
//!     let credentials = Credentials::new("api-key", "secret", AccountType::Prepaid)?;
//!     let client = Web2smsClient::new(credentials);
//!     let message = Message::new("+40700000000", "INFO", "Salut!");
//!     let response = client.send(&message).await?;
//!     println!("sent: {:?}", response.message_id());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod charset;
pub mod client;
pub mod domain;
mod transport;

pub use charset::{BodyEncoding, ConversionError, Converter, segment_count};
pub use client::{Web2smsClient, Web2smsClientBuilder, Web2smsError};
pub use domain::{
    AccountType, ApiKey, ApiResponse, ApiSecret, CallbackUrl, ClientReference, Credentials,
    Message, MessageId, MessageKind, ResponseKind, ScheduleTime, ValidationError,
};
