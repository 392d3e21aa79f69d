//! Payload assembly from form fields.
//!
//! Assembly is a pure transform. The only rule enforced here is that a
//! message identifier has been selected; numeric domains are reported through
//! [`MessageRequest::domain_advisories`] and left for the CBC to judge.

use tracing::trace;

use crate::form::{CbsFields, CommonFields, EtwsFields, FormState};
use crate::types::{EtwsPayload, MessageRequest, Payload, Scope, SmscbBody, TextPayload};
use crate::{EcbeError, Result};

/// Build a CBS request carrying a [`TextPayload`].
///
/// # Errors
///
/// Returns [`EcbeError::MissingRequiredField`] when no message identifier is selected.
pub fn assemble_cbs_request(fields: &CbsFields) -> Result<MessageRequest> {
    let payload = Payload::Text(TextPayload {
        character_set: fields.character_set,
        text: fields.text.clone(),
        language: fields.language.clone(),
    });
    assemble_with_payload(&fields.common, payload)
}

/// Build an ETWS request carrying an [`EtwsPayload`].
///
/// # Errors
///
/// Returns [`EcbeError::MissingRequiredField`] when no message identifier is selected.
pub fn assemble_etws_request(fields: &EtwsFields) -> Result<MessageRequest> {
    let payload = Payload::Etws(EtwsPayload {
        warning_type: fields.warning_type,
        emergency_user_alert: fields.emergency_user_alert,
        popup_on_display: fields.popup_on_display,
    });
    assemble_with_payload(&fields.common, payload)
}

/// Build the request for whichever message type `form` holds.
pub fn assemble(form: &FormState) -> Result<MessageRequest> {
    match form {
        FormState::Cbs(fields) => assemble_cbs_request(fields),
        FormState::Etws(fields) => assemble_etws_request(fields),
    }
}

fn assemble_with_payload(common: &CommonFields, payload: Payload) -> Result<MessageRequest> {
    let message_id = common.message_id.ok_or_else(|| EcbeError::missing_field("message_id"))?;

    let request = MessageRequest {
        sender_name: common.effective_sender_name().to_string(),
        category: common.category,
        repetition_period: common.repetition_period,
        broadcast_count: common.broadcast_count,
        scope: Scope::Plmn {},
        body: SmscbBody { message_id, serial_number: common.serial_number(), payload },
    };
    trace!(message_id, message_type = %request.message_type(), "Assembled message request");
    Ok(request)
}
