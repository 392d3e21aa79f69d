//! Wire model for CBS and ETWS message submissions.
//!
//! The types in this module mirror the JSON document accepted by the CBC
//! backend's `POST /message` endpoint. Field names follow the domain
//! (`sender_name`, `broadcast_count`, ...) while serde attributes keep the
//! backend's spelling on the wire (`cbe_name`, `num_of_bcast`, ...).
//!
//! ## Structure
//!
//! - [`MessageRequest`] is the submitted unit (sender, category, repetition, scope)
//! - [`SmscbBody`] carries the message identifier, serial number and payload
//! - [`SerialNumber`] is the decoded (geographic scope, message code, update number) triple
//! - [`Payload`] is either a [`TextPayload`] (CBS) or an [`EtwsPayload`] (ETWS)
//!
//! ## Usage Example
//!
//! ```rust
//! use ecbe::types::{
//!     Category, CharacterSet, GeographicScope, MessageRequest, Payload, Scope, SerialNumber,
//!     SmscbBody, TextPayload,
//! };
//!
//! let request = MessageRequest {
//!     sender_name: "ops-desk".to_string(),
//!     category: Category::Normal,
//!     repetition_period: 5,
//!     broadcast_count: 999,
//!     scope: Scope::Plmn {},
//!     body: SmscbBody {
//!         message_id: 4370,
//!         serial_number: SerialNumber::new(GeographicScope::PlmnWide, 768, 0),
//!         payload: Payload::Text(TextPayload::new(CharacterSet::Gsm, "Test Alert")),
//!     },
//! };
//!
//! let json = serde_json::to_value(&request).unwrap();
//! assert_eq!(json["cbe_name"], "ops-desk");
//! assert_eq!(json["smscb_message"]["payload"]["payload_decoded"]["data_utf8"], "Test Alert");
//! ```

/// Generates the string vocabulary helpers shared by the wire enums:
/// `ALL`, `as_str`, `Display` and a `FromStr` that reports `InvalidField`.
macro_rules! wire_vocabulary {
    ($ty:ident, $field:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            /// Every recognized value, in presentation order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Wire spelling of this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = crate::EcbeError;

            fn from_str(s: &str) -> crate::Result<Self> {
                let wanted = s.trim();
                $ty::ALL.iter().copied().find(|value| value.as_str() == wanted).ok_or_else(|| {
                    let accepted: Vec<&str> = $ty::ALL.iter().map(|value| value.as_str()).collect();
                    crate::EcbeError::invalid_field(
                        $field,
                        s,
                        format!("expected one of: {}", accepted.join(", ")),
                    )
                })
            }
        }
    };
}

mod category;
mod message;
mod message_type;
mod payload;
mod serial;

pub use category::Category;
pub use message::{
    BROADCAST_COUNT_MAX, DomainAdvisory, MessageRequest, REPETITION_PERIOD_RANGE, Scope, SmscbBody,
};
pub use message_type::MessageType;
pub use payload::{CharacterSet, EtwsPayload, Payload, TextPayload, WarningType};
pub use serial::{GeographicScope, MESSAGE_CODE_MAX, SerialNumber, UPDATE_NUMBER_MAX};
