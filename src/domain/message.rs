use crate::charset::{
    self, BodyEncoding, ConversionError, Converter, gsm7_septet_len, is_gsm7_representable,
    ucs2_unit_len,
};
use crate::domain::validation::ValidationError;
use crate::domain::value::{CallbackUrl, ClientReference, ScheduleTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Declared message type, as named on the wire.
pub enum MessageKind {
    /// Binary-safe GSM encoding; bodies outside the GSM alphabet are
    /// transliterated before transmission.
    #[default]
    Text,
    /// UCS-2 target; the body is transmitted as-is.
    Unicode,
    /// Opaque 8-bit payload.
    Binary,
}

impl MessageKind {
    /// Wire name of this message type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Unicode => "unicode",
            Self::Binary => "binary",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One outgoing SMS.
///
/// A single-owner value object: construct it, adjust it through the
/// `with_*` setters, then hand it to the client. Addresses are opaque
/// strings; they are checked for presence by [`Message::verify`] but not
/// for telecom format. The encoded body and segment count are derived on
/// demand and never stored.
pub struct Message {
    recipient: String,
    sender: String,
    body: String,
    kind: MessageKind,
    displayed_message: Option<String>,
    client_reference: Option<ClientReference>,
    schedule: Option<ScheduleTime>,
    delivery_receipt_callback: Option<CallbackUrl>,
}

impl Message {
    /// Create a text message. The sender may be empty; the client falls
    /// back to its configured default sender when building the request.
    pub fn new(
        recipient: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            sender: sender.into(),
            body: body.into(),
            kind: MessageKind::Text,
            displayed_message: None,
            client_reference: None,
            schedule: None,
            delivery_receipt_callback: None,
        }
    }

    /// Override the declared message type.
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Text shown to the recipient in place of the body, when supported.
    pub fn with_displayed_message(mut self, displayed: impl Into<String>) -> Self {
        self.displayed_message = Some(displayed.into());
        self
    }

    /// Attach a client reference echoed back in delivery reports.
    pub fn with_client_reference(mut self, reference: ClientReference) -> Self {
        self.client_reference = Some(reference);
        self
    }

    /// Schedule delivery for a later time.
    pub fn with_schedule(mut self, schedule: ScheduleTime) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Request delivery receipts at the given callback URL.
    pub fn with_delivery_receipt_callback(mut self, callback: CallbackUrl) -> Self {
        self.delivery_receipt_callback = Some(callback);
        self
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Raw body as supplied by the caller.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn displayed_message(&self) -> Option<&str> {
        self.displayed_message.as_deref()
    }

    pub fn client_reference(&self) -> Option<&ClientReference> {
        self.client_reference.as_ref()
    }

    pub fn schedule(&self) -> Option<ScheduleTime> {
        self.schedule
    }

    pub fn delivery_receipt_callback(&self) -> Option<&CallbackUrl> {
        self.delivery_receipt_callback.as_ref()
    }

    /// On-air encoding this message will be billed under.
    ///
    /// `Text` always ends up on the GSM-7 path (non-representable bodies are
    /// converted first); `Unicode` falls back to GSM-7 when the body happens
    /// to fit the alphabet, since the cheaper encoding applies.
    pub fn encoding(&self) -> BodyEncoding {
        match self.kind {
            MessageKind::Text => BodyEncoding::Gsm7,
            MessageKind::Binary => BodyEncoding::Binary,
            MessageKind::Unicode => {
                if is_gsm7_representable(&self.body) {
                    BodyEncoding::Gsm7
                } else {
                    BodyEncoding::Ucs2
                }
            }
        }
    }

    /// The transmit-ready body.
    ///
    /// A `Text` body outside the GSM alphabet is converted with
    /// transliteration on and `?` as the fallback, yielding an unpacked
    /// septet string (each `char` is one septet value). All other bodies
    /// pass through untouched.
    pub fn transmit_body(&self) -> Result<String, ConversionError> {
        if self.kind == MessageKind::Text && !is_gsm7_representable(&self.body) {
            let septets = Converter::shared().convert(&self.body, true, Some("?"))?;
            // Septets are 7-bit, so they map one-to-one onto ASCII chars.
            return Ok(septets.into_iter().map(char::from).collect());
        }
        Ok(self.body.clone())
    }

    /// Number of physical SMS segments this message occupies.
    pub fn segment_count(&self) -> Result<usize, ConversionError> {
        let encoding = self.encoding();
        let encoded_len = match encoding {
            BodyEncoding::Binary => self.body.len(),
            BodyEncoding::Ucs2 => ucs2_unit_len(&self.body),
            BodyEncoding::Gsm7 => match gsm7_septet_len(&self.body) {
                Some(len) => len,
                // Converted bodies carry one septet per byte, escape included.
                None => {
                    Converter::shared()
                        .convert(&self.body, true, Some("?"))?
                        .len()
                }
            },
        };
        Ok(charset::segment_count(encoding, encoded_len))
    }

    /// Check the message is fit for submission. Runs before the transport
    /// layer sees it; does not mutate.
    pub fn verify(&self) -> Result<(), ValidationError> {
        if self.recipient.trim().is_empty() {
            return Err(ValidationError::MissingRecipient);
        }
        let resolved = self
            .transmit_body()
            .is_ok_and(|body| !body.is_empty());
        if !resolved {
            return Err(ValidationError::MissingMessage);
        }
        Ok(())
    }
}
