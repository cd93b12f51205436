use sha2::{Digest, Sha512};

use crate::domain::{CallbackUrl, Credentials, Message, MessageId, ScheduleTime};

/// Signature for the send call: SHA-512 over the concatenation of key,
/// nonce, verb, endpoint path, the request fields, and the secret.
/// Absent optional fields contribute an empty string.
pub fn send_signature(
    credentials: &Credentials,
    nonce: u64,
    path: &str,
    sender: &str,
    message: &Message,
    transmit_body: &str,
) -> String {
    let nonce = nonce.to_string();
    let schedule = message
        .schedule()
        .map(ScheduleTime::to_wire)
        .unwrap_or_default();
    digest(&[
        credentials.api_key().as_str(),
        &nonce,
        "POST",
        path,
        sender,
        message.recipient(),
        transmit_body,
        message.displayed_message().unwrap_or(""),
        &schedule,
        message
            .delivery_receipt_callback()
            .map(CallbackUrl::as_str)
            .unwrap_or(""),
        credentials.api_secret().as_str(),
    ])
}

/// Signature for the status (`GET`) and delete (`DELETE`) calls.
pub fn id_signature(
    credentials: &Credentials,
    nonce: u64,
    verb: &str,
    path: &str,
    id: &MessageId,
) -> String {
    let nonce = nonce.to_string();
    digest(&[
        credentials.api_key().as_str(),
        &nonce,
        verb,
        path,
        id.as_str(),
        credentials.api_secret().as_str(),
    ])
}

/// Signature for the balance call (the platform's custom `BALANCE` verb).
pub fn balance_signature(credentials: &Credentials, nonce: u64, path: &str) -> String {
    let nonce = nonce.to_string();
    digest(&[
        credentials.api_key().as_str(),
        &nonce,
        "BALANCE",
        path,
        credentials.api_secret().as_str(),
    ])
}

fn digest(parts: &[&str]) -> String {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}
