//! Operator form state.
//!
//! A [`FormState`] is an immutable snapshot of everything the operator has
//! entered for one message. Each edit goes through [`FormState::update`], which
//! returns a new snapshot and leaves the previous one untouched:
//!
//! ```rust
//! use ecbe::{FormField, FormState, MessageType};
//!
//! let blank = FormState::new(MessageType::Cbs);
//! let filled = blank
//!     .update(FormField::MessageId, "4370")?
//!     .update(FormField::Text, "Test Alert")?;
//!
//! assert_eq!(blank.common().message_id, None);
//! assert_eq!(filled.common().message_id, Some(4370));
//! # Ok::<(), ecbe::EcbeError>(())
//! ```

use std::str::FromStr;

use crate::types::{
    Category, CharacterSet, GeographicScope, MessageType, SerialNumber, WarningType,
};
use crate::{EcbeError, Result};

/// Sender name used when the operator leaves it blank.
pub const DEFAULT_SENDER_NAME: &str = "ecbe-console";
/// Message code preselected on new forms.
pub const DEFAULT_MESSAGE_CODE: u32 = 768;
/// Repetition period (minutes) preselected on new forms.
pub const DEFAULT_REPETITION_PERIOD: u32 = 5;
/// Broadcast count preselected on new forms.
pub const DEFAULT_BROADCAST_COUNT: u32 = 999;

/// Editable field of a message form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    SenderName,
    Category,
    MessageId,
    GeographicScope,
    MessageCode,
    UpdateNumber,
    CharacterSet,
    Text,
    Language,
    WarningType,
    EmergencyUserAlert,
    PopupOnDisplay,
    RepetitionPeriod,
    BroadcastCount,
}

impl FormField {
    pub const ALL: &'static [FormField] = &[
        FormField::SenderName,
        FormField::Category,
        FormField::MessageId,
        FormField::GeographicScope,
        FormField::MessageCode,
        FormField::UpdateNumber,
        FormField::CharacterSet,
        FormField::Text,
        FormField::Language,
        FormField::WarningType,
        FormField::EmergencyUserAlert,
        FormField::PopupOnDisplay,
        FormField::RepetitionPeriod,
        FormField::BroadcastCount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormField::SenderName => "sender_name",
            FormField::Category => "category",
            FormField::MessageId => "message_id",
            FormField::GeographicScope => "geographic_scope",
            FormField::MessageCode => "message_code",
            FormField::UpdateNumber => "update_number",
            FormField::CharacterSet => "character_set",
            FormField::Text => "text",
            FormField::Language => "language",
            FormField::WarningType => "warning_type",
            FormField::EmergencyUserAlert => "emergency_user_alert",
            FormField::PopupOnDisplay => "popup_on_display",
            FormField::RepetitionPeriod => "repetition_period",
            FormField::BroadcastCount => "broadcast_count",
        }
    }

    /// Message type the field belongs to, or `None` for fields shared by both forms.
    pub fn exclusive_to(self) -> Option<MessageType> {
        match self {
            FormField::CharacterSet | FormField::Text | FormField::Language => {
                Some(MessageType::Cbs)
            }
            FormField::WarningType | FormField::EmergencyUserAlert | FormField::PopupOnDisplay => {
                Some(MessageType::Etws)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = EcbeError;

    /// Accepts the field names above plus the backend's wire keys.
    fn from_str(s: &str) -> Result<Self> {
        let field = match s.trim() {
            "sender_name" | "cbe_name" => FormField::SenderName,
            "category" => FormField::Category,
            "message_id" => FormField::MessageId,
            "geographic_scope" | "geo_scope" => FormField::GeographicScope,
            "message_code" | "msg_code" | "serial_msg_code" => FormField::MessageCode,
            "update_number" | "update_nr" | "serial_update_nr" => FormField::UpdateNumber,
            "character_set" => FormField::CharacterSet,
            "text" | "data_utf8" | "payload_data_utf8" => FormField::Text,
            "language" => FormField::Language,
            "warning_type" => FormField::WarningType,
            "emergency_user_alert" => FormField::EmergencyUserAlert,
            "popup_on_display" => FormField::PopupOnDisplay,
            "repetition_period" => FormField::RepetitionPeriod,
            "broadcast_count" | "num_of_bcast" => FormField::BroadcastCount,
            other => return Err(EcbeError::invalid_field("field", other, "unknown form field")),
        };
        Ok(field)
    }
}

/// Fields shared by CBS and ETWS forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonFields {
    pub sender_name: Option<String>,
    pub category: Category,
    /// `None` until the operator selects an identifier.
    pub message_id: Option<u16>,
    pub geographic_scope: GeographicScope,
    pub message_code: u32,
    pub update_number: u32,
    pub repetition_period: u32,
    pub broadcast_count: u32,
}

impl Default for CommonFields {
    fn default() -> Self {
        Self {
            sender_name: None,
            category: Category::Normal,
            message_id: None,
            geographic_scope: GeographicScope::PlmnWide,
            message_code: DEFAULT_MESSAGE_CODE,
            update_number: 0,
            repetition_period: DEFAULT_REPETITION_PERIOD,
            broadcast_count: DEFAULT_BROADCAST_COUNT,
        }
    }
}

impl CommonFields {
    pub fn serial_number(&self) -> SerialNumber {
        SerialNumber::new(self.geographic_scope, self.message_code, self.update_number)
    }

    /// Sender name to put on the wire, falling back to [`DEFAULT_SENDER_NAME`].
    pub fn effective_sender_name(&self) -> &str {
        self.sender_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_SENDER_NAME)
    }
}

/// CBS form: shared fields plus text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CbsFields {
    pub common: CommonFields,
    pub character_set: CharacterSet,
    pub text: String,
    pub language: Option<String>,
}

/// ETWS form: shared fields plus warning indication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtwsFields {
    pub common: CommonFields,
    pub warning_type: WarningType,
    pub emergency_user_alert: bool,
    pub popup_on_display: bool,
}

impl Default for EtwsFields {
    fn default() -> Self {
        Self {
            common: CommonFields::default(),
            warning_type: WarningType::Earthquake,
            emergency_user_alert: true,
            popup_on_display: true,
        }
    }
}

/// Snapshot of one message form, tagged by message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Cbs(CbsFields),
    Etws(EtwsFields),
}

impl FormState {
    /// Fresh form with the defaults for `message_type`.
    pub fn new(message_type: MessageType) -> Self {
        match message_type {
            MessageType::Cbs => FormState::Cbs(CbsFields::default()),
            MessageType::Etws => FormState::Etws(EtwsFields::default()),
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            FormState::Cbs(_) => MessageType::Cbs,
            FormState::Etws(_) => MessageType::Etws,
        }
    }

    pub fn common(&self) -> &CommonFields {
        match self {
            FormState::Cbs(fields) => &fields.common,
            FormState::Etws(fields) => &fields.common,
        }
    }

    /// Return a new state with `field` set from the operator's raw `value`.
    ///
    /// Numeric values are parsed but not range checked. An empty `message_id`
    /// clears the selection.
    pub fn update(&self, field: FormField, value: &str) -> Result<FormState> {
        if let Some(owner) = field.exclusive_to() {
            if owner != self.message_type() {
                return Err(EcbeError::invalid_field(
                    field.name(),
                    value,
                    format!("not a {} form field", self.message_type()),
                ));
            }
        }

        let mut next = self.clone();
        match &mut next {
            FormState::Cbs(fields) => match field {
                FormField::CharacterSet => fields.character_set = value.parse()?,
                FormField::Text => fields.text = value.to_string(),
                FormField::Language => fields.language = non_empty(value),
                _ => apply_common(&mut fields.common, field, value)?,
            },
            FormState::Etws(fields) => match field {
                FormField::WarningType => fields.warning_type = value.parse()?,
                FormField::EmergencyUserAlert => {
                    fields.emergency_user_alert = parse_flag(field, value)?
                }
                FormField::PopupOnDisplay => fields.popup_on_display = parse_flag(field, value)?,
                _ => apply_common(&mut fields.common, field, value)?,
            },
        }
        Ok(next)
    }

    /// Apply a sequence of `(field, value)` edits, stopping at the first error.
    pub fn update_all<'a, I>(&self, edits: I) -> Result<FormState>
    where
        I: IntoIterator<Item = (FormField, &'a str)>,
    {
        edits.into_iter().try_fold(self.clone(), |state, (field, value)| state.update(field, value))
    }
}

fn apply_common(common: &mut CommonFields, field: FormField, value: &str) -> Result<()> {
    match field {
        FormField::SenderName => common.sender_name = non_empty(value),
        FormField::Category => common.category = value.parse()?,
        FormField::MessageId => {
            common.message_id = match value.trim() {
                "" => None,
                id => Some(parse_number(field, id)?),
            }
        }
        FormField::GeographicScope => common.geographic_scope = value.parse()?,
        FormField::MessageCode => common.message_code = parse_number(field, value)?,
        FormField::UpdateNumber => common.update_number = parse_number(field, value)?,
        FormField::RepetitionPeriod => common.repetition_period = parse_number(field, value)?,
        FormField::BroadcastCount => common.broadcast_count = parse_number(field, value)?,
        other => {
            return Err(EcbeError::invalid_field(other.name(), value, "not a shared form field"));
        }
    }
    Ok(())
}

fn parse_number<T>(field: FormField, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| EcbeError::invalid_field(field.name(), value, e.to_string()))
}

fn parse_flag(field: FormField, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(EcbeError::invalid_field(field.name(), value, "expected true or false")),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
