//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::charset::ConversionError;
use crate::domain::{ApiResponse, Credentials, Message, MessageId, ResponseKind, ValidationError};

const DEFAULT_PLATFORM_URL: &str = "https://www.web2sms.ro";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    /// Issue a JSON request. `auth` is the basic-auth pair the platform
    /// expects: the API key as the user and the request signature as the
    /// password.
    fn request_json<'a>(
        &'a self,
        method: &'a str,
        url: &'a str,
        auth: (&'a str, &'a str),
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn request_json<'a>(
        &'a self,
        method: &'a str,
        url: &'a str,
        auth: (&'a str, &'a str),
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            // BALANCE is a non-standard verb; reqwest accepts any token.
            let method = reqwest::Method::from_bytes(method.as_bytes())
                .map_err(|err| Box::new(err) as Box<dyn StdError + Send + Sync>)?;
            let response = self
                .client
                .request(method, url)
                .basic_auth(auth.0, Some(auth.1))
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Web2smsClient`].
pub enum Web2smsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the platform. `message`
    /// carries the platform's `error.message` when the body parses.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, message: Option<String> },

    /// The platform answered 2xx but reported a non-zero error code.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors or [`Message::verify`] rejected a value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The message body could not be converted to the GSM alphabet.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

#[derive(Debug, Clone)]
/// Builder for [`Web2smsClient`].
///
/// Use this when you need to customize the platform URL, timeout,
/// user-agent, or default sender.
pub struct Web2smsClientBuilder {
    credentials: Credentials,
    base_url: String,
    default_sender: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Web2smsClientBuilder {
    /// Create a builder with the default platform URL and no overrides.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_PLATFORM_URL.to_owned(),
            default_sender: String::new(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the platform base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sender used when a message does not carry one.
    pub fn default_sender(mut self, sender: impl Into<String>) -> Self {
        self.default_sender = sender.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`Web2smsClient`].
    pub fn build(self) -> Result<Web2smsClient, Web2smsError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| Web2smsError::Transport(Box::new(err)))?;

        Ok(Web2smsClient {
            credentials: self.credentials,
            base_url: self.base_url,
            default_sender: self.default_sender,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Web2SMS client.
///
/// The message endpoint is selected by the credential's account type:
/// `/prepaid/message` for prepaid accounts, `/send/message` for postpaid.
/// Every request is signed with a SHA-512 digest and authenticated via
/// HTTP basic auth (API key / signature).
pub struct Web2smsClient {
    credentials: Credentials,
    base_url: String,
    default_sender: String,
    http: Arc<dyn HttpTransport>,
}

impl Web2smsClient {
    /// Create a client using the default platform URL.
    ///
    /// For more customization, use [`Web2smsClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_PLATFORM_URL.to_owned(),
            default_sender: String::new(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> Web2smsClientBuilder {
        Web2smsClientBuilder::new(credentials)
    }

    /// Send an SMS message.
    ///
    /// Runs [`Message::verify`] first, converts the body when the declared
    /// type requires it, and signs the request.
    ///
    /// Errors:
    /// - [`Web2smsError::Validation`] when the message fails verification,
    /// - [`Web2smsError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`Web2smsError::Api`] when the platform reports a non-zero error code.
    pub async fn send(&self, message: &Message) -> Result<ApiResponse, Web2smsError> {
        message.verify()?;

        let sender = if message.sender().trim().is_empty() {
            self.default_sender.as_str()
        } else {
            message.sender()
        };
        let nonce = unix_nonce();
        let path = self.credentials.account_type().endpoint_path();
        let transmit_body = message.transmit_body()?;

        let signature = crate::transport::send_signature(
            &self.credentials,
            nonce,
            path,
            sender,
            message,
            &transmit_body,
        );
        let payload = crate::transport::encode_send_payload(
            message,
            self.credentials.api_key(),
            sender,
            &transmit_body,
            nonce,
        );

        self.execute("POST", ResponseKind::Send, signature, payload.to_string())
            .await
    }

    /// Query the delivery status of a previously sent message.
    pub async fn status(&self, id: &MessageId) -> Result<ApiResponse, Web2smsError> {
        let nonce = unix_nonce();
        let path = self.credentials.account_type().endpoint_path();
        let signature = crate::transport::id_signature(&self.credentials, nonce, "GET", path, id);
        let payload = crate::transport::encode_id_payload(self.credentials.api_key(), id, nonce);

        self.execute("GET", ResponseKind::Status, signature, payload.to_string())
            .await
    }

    /// Delete a scheduled message that has not been sent yet.
    pub async fn delete(&self, id: &MessageId) -> Result<ApiResponse, Web2smsError> {
        let nonce = unix_nonce();
        let path = self.credentials.account_type().endpoint_path();
        let signature =
            crate::transport::id_signature(&self.credentials, nonce, "DELETE", path, id);
        let payload = crate::transport::encode_id_payload(self.credentials.api_key(), id, nonce);

        self.execute("DELETE", ResponseKind::Delete, signature, payload.to_string())
            .await
    }

    /// Query the account balance (the platform's custom `BALANCE` verb).
    pub async fn balance(&self) -> Result<ApiResponse, Web2smsError> {
        let nonce = unix_nonce();
        let path = self.credentials.account_type().endpoint_path();
        let signature = crate::transport::balance_signature(&self.credentials, nonce, path);
        let payload = crate::transport::encode_balance_payload(self.credentials.api_key(), nonce);

        self.execute("BALANCE", ResponseKind::Balance, signature, payload.to_string())
            .await
    }

    async fn execute(
        &self,
        method: &str,
        kind: ResponseKind,
        signature: String,
        body: String,
    ) -> Result<ApiResponse, Web2smsError> {
        let url = format!(
            "{}{}",
            self.base_url,
            self.credentials.account_type().endpoint_path()
        );

        let response = self
            .http
            .request_json(
                method,
                &url,
                (self.credentials.api_key().as_str(), &signature),
                body,
            )
            .await
            .map_err(Web2smsError::Transport)?;

        if !(200..=299).contains(&response.status) {
            return Err(Web2smsError::HttpStatus {
                status: response.status,
                message: crate::transport::error_message_from_body(&response.body),
            });
        }

        let parsed = crate::transport::decode_response(kind, &response.body)
            .map_err(|err| Web2smsError::Parse(Box::new(err)))?;

        if !parsed.is_success() {
            return Err(Web2smsError::Api {
                code: parsed.error_code,
                message: parsed.error_message,
            });
        }

        Ok(parsed)
    }
}

fn unix_nonce() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::domain::AccountType;

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_method: Option<String>,
        last_url: Option<String>,
        last_auth: Option<(String, String)>,
        last_body: Option<String>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_method: None,
                    last_url: None,
                    last_auth: None,
                    last_body: None,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, Option<String>, Option<String>) {
            let state = self.state.lock().unwrap();
            (
                state.last_method.clone(),
                state.last_url.clone(),
                state.last_body.clone(),
            )
        }

        fn last_auth(&self) -> Option<(String, String)> {
            self.state.lock().unwrap().last_auth.clone()
        }
    }

    impl HttpTransport for FakeTransport {
        fn request_json<'a>(
            &'a self,
            method: &'a str,
            url: &'a str,
            auth: (&'a str, &'a str),
            body: String,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, response_body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_method = Some(method.to_owned());
                    state.last_url = Some(url.to_owned());
                    state.last_auth = Some((auth.0.to_owned(), auth.1.to_owned()));
                    state.last_body = Some(body);
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse {
                    status,
                    body: response_body,
                })
            })
        }
    }

    fn credentials(account_type: AccountType) -> Credentials {
        Credentials::new("test_key", "test_secret", account_type).unwrap()
    }

    fn make_client(credentials: Credentials, transport: FakeTransport) -> Web2smsClient {
        Web2smsClient {
            credentials,
            base_url: "https://example.invalid".to_owned(),
            default_sender: "FALLBACK".to_owned(),
            http: Arc::new(transport),
        }
    }

    fn body_json(transport: &FakeTransport) -> serde_json::Value {
        let (_, _, body) = transport.last_request();
        serde_json::from_str(&body.unwrap()).unwrap()
    }

    #[tokio::test]
    async fn send_posts_signed_payload_and_parses_response() {
        let json = r#"{"id": "msg-1", "error": {"code": 0, "message": "OK"}}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(credentials(AccountType::Prepaid), transport.clone());

        let message = Message::new("+40700000000", "INFO", "hello");
        let response = client.send(&message).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.message_id(), Some("msg-1"));

        let (method, url, _) = transport.last_request();
        assert_eq!(method.as_deref(), Some("POST"));
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/prepaid/message")
        );

        let (user, signature) = transport.last_auth().unwrap();
        assert_eq!(user, "test_key");
        assert_eq!(signature.len(), 128);

        let payload = body_json(&transport);
        assert_eq!(payload["sender"], "INFO");
        assert_eq!(payload["recipient"], "+40700000000");
        assert_eq!(payload["message"], "hello");
        assert_eq!(payload["validityDatetime"], "");
        assert_eq!(payload["apiKey"], "test_key");
        assert!(payload["nonce"].is_u64());
    }

    #[tokio::test]
    async fn send_falls_back_to_default_sender() {
        let json = r#"{"id": "msg-1", "error": {"code": 0, "message": "OK"}}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(credentials(AccountType::Prepaid), transport.clone());

        let message = Message::new("+40700000000", "", "hello");
        client.send(&message).await.unwrap();

        let payload = body_json(&transport);
        assert_eq!(payload["sender"], "FALLBACK");
    }

    #[tokio::test]
    async fn send_converts_text_bodies_before_transmission() {
        let json = r#"{"id": "msg-1", "error": {"code": 0, "message": "OK"}}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(credentials(AccountType::Prepaid), transport.clone());

        let message = Message::new("+40700000000", "INFO", "Bună ziua");
        client.send(&message).await.unwrap();

        let payload = body_json(&transport);
        assert_eq!(payload["message"], "Buna ziua");
    }

    #[tokio::test]
    async fn send_rejects_invalid_message_without_calling_transport() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(credentials(AccountType::Prepaid), transport.clone());

        let message = Message::new("", "INFO", "hello");
        let err = client.send(&message).await.unwrap_err();
        assert!(matches!(
            err,
            Web2smsError::Validation(ValidationError::MissingRecipient)
        ));

        let (method, _, _) = transport.last_request();
        assert!(method.is_none());
    }

    #[tokio::test]
    async fn send_maps_api_error_code() {
        let json = r#"{"error": {"code": 42, "message": "Insufficient credit"}}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(credentials(AccountType::Prepaid), transport);

        let message = Message::new("+40700000000", "INFO", "hello");
        let err = client.send(&message).await.unwrap_err();
        match err {
            Web2smsError::Api { code, message } => {
                assert_eq!(code, 42);
                assert_eq!(message, "Insufficient credit");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_maps_non_success_http_status_with_error_message() {
        let body = r#"{"error": {"code": 401, "message": "Invalid signature"}}"#;
        let transport = FakeTransport::new(401, body);
        let client = make_client(credentials(AccountType::Prepaid), transport);

        let message = Message::new("+40700000000", "INFO", "hello");
        let err = client.send(&message).await.unwrap_err();
        match err {
            Web2smsError::HttpStatus { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message.as_deref(), Some("Invalid signature"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_maps_invalid_json_to_parse_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(credentials(AccountType::Prepaid), transport);

        let message = Message::new("+40700000000", "INFO", "hello");
        let err = client.send(&message).await.unwrap_err();
        assert!(matches!(err, Web2smsError::Parse(_)));
    }

    #[tokio::test]
    async fn postpaid_accounts_use_the_postpaid_endpoint() {
        let json = r#"{"id": "msg-1", "error": {"code": 0, "message": "OK"}}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(credentials(AccountType::Postpaid), transport.clone());

        let message = Message::new("+40700000000", "INFO", "hello");
        client.send(&message).await.unwrap();

        let (_, url, _) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/send/message"));
    }

    #[tokio::test]
    async fn status_uses_get_with_id_payload() {
        let json = r#"{"status": "DELIVERED", "error": {"code": 0, "message": "OK"}}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(credentials(AccountType::Prepaid), transport.clone());

        let id = MessageId::new("msg-1").unwrap();
        let response = client.status(&id).await.unwrap();
        assert_eq!(response.delivery_status(), Some("DELIVERED"));

        let (method, _, _) = transport.last_request();
        assert_eq!(method.as_deref(), Some("GET"));
        let payload = body_json(&transport);
        assert_eq!(payload["id"], "msg-1");
        assert_eq!(payload["apiKey"], "test_key");
    }

    #[tokio::test]
    async fn delete_uses_delete_verb_and_checks_result() {
        let json = r#"{"result": "DELETED", "error": {"code": 0, "message": "OK"}}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(credentials(AccountType::Prepaid), transport.clone());

        let id = MessageId::new("msg-1").unwrap();
        let response = client.delete(&id).await.unwrap();
        assert!(response.is_deleted());

        let (method, _, _) = transport.last_request();
        assert_eq!(method.as_deref(), Some("DELETE"));
    }

    #[tokio::test]
    async fn balance_uses_custom_verb_and_reads_quirky_envelope() {
        let json = r#"{"result": "BALANCE", "error": {"code": 0, "message": "42.50"}}"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(credentials(AccountType::Prepaid), transport.clone());

        let response = client.balance().await.unwrap();
        assert_eq!(response.balance(), Some("42.50"));

        let (method, _, _) = transport.last_request();
        assert_eq!(method.as_deref(), Some("BALANCE"));
        let payload = body_json(&transport);
        assert!(payload.get("id").is_none());
    }

    #[test]
    fn builder_overrides_are_applied() {
        let client = Web2smsClient::builder(credentials(AccountType::Prepaid))
            .base_url("https://example.invalid")
            .default_sender("INFO")
            .timeout(Duration::from_secs(5))
            .user_agent("web2sms-test")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "https://example.invalid");
        assert_eq!(client.default_sender, "INFO");
    }
}
