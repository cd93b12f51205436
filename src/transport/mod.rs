//! Transport layer: wire-format details (payload encoding, request signing,
//! response decoding).

mod payload;
mod response;
mod signing;

pub use payload::{encode_balance_payload, encode_id_payload, encode_send_payload};
pub use response::{TransportError, decode_response, error_message_from_body};
pub use signing::{balance_signature, id_signature, send_signature};
