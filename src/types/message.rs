//! Message request submitted to the CBC

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::{Category, MESSAGE_CODE_MAX, MessageType, Payload, SerialNumber, UPDATE_NUMBER_MAX};

/// Minutes between repetitions accepted by the CBC.
pub const REPETITION_PERIOD_RANGE: RangeInclusive<u32> = 1..=4095;

/// Largest number of broadcasts the CBC accepts.
pub const BROADCAST_COUNT_MAX: u32 = 65535;

/// Geographic targeting of a message.
///
/// Only the whole-network scope is offered; it serializes as `{"scope_plmn": {}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "scope_plmn")]
    Plmn {},
}

impl Default for Scope {
    fn default() -> Self {
        Scope::Plmn {}
    }
}

/// SMSCB message carried inside a [`MessageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmscbBody {
    pub message_id: u16,
    #[serde(rename = "serial_nr")]
    pub serial_number: SerialNumber,
    pub payload: Payload,
}

/// Unit submitted to `POST /message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequest {
    #[serde(rename = "cbe_name")]
    pub sender_name: String,
    pub category: Category,
    pub repetition_period: u32,
    #[serde(rename = "num_of_bcast")]
    pub broadcast_count: u32,
    pub scope: Scope,
    #[serde(rename = "smscb_message")]
    pub body: SmscbBody,
}

/// A numeric field whose value lies outside its declared domain.
///
/// Advisories never block a submission; the CBC is the authority on what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAdvisory {
    pub field: &'static str,
    pub value: u32,
    pub min: u32,
    pub max: u32,
}

impl std::fmt::Display for DomainAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {} is outside [{}, {}]", self.field, self.value, self.min, self.max)
    }
}

impl MessageRequest {
    /// Message type implied by the payload variant.
    pub fn message_type(&self) -> MessageType {
        match self.body.payload {
            Payload::Text(_) => MessageType::Cbs,
            Payload::Etws(_) => MessageType::Etws,
        }
    }

    /// Lists every numeric field outside its declared domain.
    pub fn domain_advisories(&self) -> Vec<DomainAdvisory> {
        let serial = &self.body.serial_number;
        let checks = [
            ("message_code", serial.message_code, 0, MESSAGE_CODE_MAX),
            ("update_number", serial.update_number, 0, UPDATE_NUMBER_MAX),
            (
                "repetition_period",
                self.repetition_period,
                *REPETITION_PERIOD_RANGE.start(),
                *REPETITION_PERIOD_RANGE.end(),
            ),
            ("broadcast_count", self.broadcast_count, 0, BROADCAST_COUNT_MAX),
        ];

        checks
            .into_iter()
            .filter(|&(_, value, min, max)| value < min || value > max)
            .map(|(field, value, min, max)| DomainAdvisory { field, value, min, max })
            .collect()
    }
}
