use serde_json::{Map, Value, json};

use crate::domain::{ApiKey, CallbackUrl, ClientReference, Message, MessageId, ScheduleTime};

/// Build the JSON body for the send endpoint.
///
/// `transmit_body` is the already-resolved message body and `sender` the
/// effective origin address after the client's default-sender fallback.
pub fn encode_send_payload(
    message: &Message,
    api_key: &ApiKey,
    sender: &str,
    transmit_body: &str,
    nonce: u64,
) -> Value {
    let mut payload = Map::new();
    payload.insert("sender".to_owned(), json!(sender));
    payload.insert("recipient".to_owned(), json!(message.recipient()));
    payload.insert("message".to_owned(), json!(transmit_body));
    // Reserved by the platform; always sent empty.
    payload.insert("validityDatetime".to_owned(), json!(""));
    payload.insert("nonce".to_owned(), json!(nonce));
    payload.insert(ApiKey::FIELD.to_owned(), json!(api_key.as_str()));

    if let Some(callback) = message.delivery_receipt_callback() {
        payload.insert(CallbackUrl::FIELD.to_owned(), json!(callback.as_str()));
    }
    if let Some(reference) = message.client_reference() {
        payload.insert(ClientReference::FIELD.to_owned(), json!(reference.as_str()));
    }
    if let Some(displayed) = message.displayed_message() {
        payload.insert("visibleMessage".to_owned(), json!(displayed));
    }
    if let Some(schedule) = message.schedule() {
        payload.insert(ScheduleTime::FIELD.to_owned(), json!(schedule.to_wire()));
    }

    Value::Object(payload)
}

/// Build the JSON body for the status and delete endpoints.
pub fn encode_id_payload(api_key: &ApiKey, id: &MessageId, nonce: u64) -> Value {
    json!({
        ApiKey::FIELD: api_key.as_str(),
        MessageId::FIELD: id.as_str(),
        "nonce": nonce,
    })
}

/// Build the JSON body for the balance endpoint.
pub fn encode_balance_payload(api_key: &ApiKey, nonce: u64) -> Value {
    json!({
        ApiKey::FIELD: api_key.as_str(),
        "nonce": nonce,
    })
}
