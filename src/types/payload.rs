//! Message payload variants

use serde::{Deserialize, Serialize};

/// Alphabet used to encode CBS text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterSet {
    #[default]
    #[serde(rename = "gsm")]
    Gsm,
    #[serde(rename = "ucs2")]
    Ucs2,
    #[serde(rename = "8bit")]
    EightBit,
}

wire_vocabulary!(CharacterSet, "character_set" {
    Gsm => "gsm",
    Ucs2 => "ucs2",
    EightBit => "8bit",
});

/// ETWS warning type.
///
/// `EarthquakeAndTsuname` is the spelling some CBC backends accept for the
/// combined warning; `EarthquakeAndTsunami` is the TS 23.041 name. Both are
/// sent exactly as selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    #[default]
    Earthquake,
    Tsunami,
    EarthquakeAndTsunami,
    EarthquakeAndTsuname,
    Test,
    Other,
    Rfu,
}

wire_vocabulary!(WarningType, "warning_type" {
    Earthquake => "earthquake",
    Tsunami => "tsunami",
    EarthquakeAndTsunami => "earthquake_and_tsunami",
    EarthquakeAndTsuname => "earthquake_and_tsuname",
    Test => "test",
    Other => "other",
    Rfu => "rfu",
});

/// Text content of a CBS message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPayload {
    pub character_set: CharacterSet,
    #[serde(rename = "data_utf8")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl TextPayload {
    pub fn new(character_set: CharacterSet, text: impl Into<String>) -> Self {
        Self { character_set, text: text.into(), language: None }
    }
}

/// Warning indication of an ETWS primary notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EtwsPayloadWire", into = "EtwsPayloadWire")]
pub struct EtwsPayload {
    pub warning_type: WarningType,
    pub emergency_user_alert: bool,
    pub popup_on_display: bool,
}

impl Default for EtwsPayload {
    fn default() -> Self {
        Self { warning_type: WarningType::Earthquake, emergency_user_alert: true, popup_on_display: true }
    }
}

#[derive(Serialize, Deserialize)]
struct EtwsPayloadWire {
    warning_type: WarningTypeWire,
    emergency_user_alert: bool,
    popup_on_display: bool,
}

#[derive(Serialize, Deserialize)]
struct WarningTypeWire {
    warning_type_decoded: WarningType,
}

impl From<EtwsPayloadWire> for EtwsPayload {
    fn from(wire: EtwsPayloadWire) -> Self {
        Self {
            warning_type: wire.warning_type.warning_type_decoded,
            emergency_user_alert: wire.emergency_user_alert,
            popup_on_display: wire.popup_on_display,
        }
    }
}

impl From<EtwsPayload> for EtwsPayloadWire {
    fn from(payload: EtwsPayload) -> Self {
        Self {
            warning_type: WarningTypeWire { warning_type_decoded: payload.warning_type },
            emergency_user_alert: payload.emergency_user_alert,
            popup_on_display: payload.popup_on_display,
        }
    }
}

/// Payload of an SMSCB message, tagged by kind on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    #[serde(rename = "payload_decoded")]
    Text(TextPayload),
    #[serde(rename = "payload_etws")]
    Etws(EtwsPayload),
}

impl Payload {
    pub fn as_text(&self) -> Option<&TextPayload> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Etws(_) => None,
        }
    }

    pub fn as_etws(&self) -> Option<&EtwsPayload> {
        match self {
            Payload::Etws(etws) => Some(etws),
            Payload::Text(_) => None,
        }
    }
}
