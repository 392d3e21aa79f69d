//! Submission flow tying form state, assembly and transport together.
//!
//! A submission moves from unsubmitted to submitted exactly once: the form is
//! assembled (validation errors return before any network call), out-of-domain
//! numbers are logged, and one request is sent. Nothing is retried, queued or
//! de-duplicated; two calls to [`Console::submit`] send two messages.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::assembler::assemble;
use crate::catalog::MessageCatalog;
use crate::config::ConsoleConfig;
use crate::form::FormState;
use crate::transport::Transport;
use crate::transports::HttpTransport;
use crate::types::{MessageRequest, MessageType};
use crate::Result;

/// Outcome of a message the backend accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub message_type: MessageType,
    pub message_id: u16,
    /// Response body as returned by the backend
    pub response: Value,
}

impl Submission {
    /// Confirmation shown to the operator.
    pub fn operator_notice(&self) -> String {
        format!("{} message submitted!", self.message_type)
    }
}

/// Operator console bound to one transport.
pub struct Console<T: Transport> {
    transport: T,
    catalog: MessageCatalog,
    sender_name: Option<String>,
}

impl Console<HttpTransport> {
    /// Build an HTTP console from configuration, loading the catalog file if one is set.
    pub fn from_config(config: ConsoleConfig) -> Result<Self> {
        let catalog = match &config.catalog {
            Some(path) => MessageCatalog::load(path)?,
            None => MessageCatalog::builtin(),
        };
        let sender_name = config.sender_name.clone();
        let transport = HttpTransport::new(config)?;
        Ok(Self { transport, catalog, sender_name })
    }
}

impl<T: Transport> Console<T> {
    /// Create a console with the built-in catalog.
    pub fn new(transport: T) -> Self {
        Self { transport, catalog: MessageCatalog::builtin(), sender_name: None }
    }

    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sender name used when a form leaves it blank.
    pub fn with_sender_name(mut self, sender_name: impl Into<String>) -> Self {
        self.sender_name = Some(sender_name.into());
        self
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Assemble the request `submit` would send, without sending it.
    pub fn preview(&self, form: &FormState) -> Result<MessageRequest> {
        let mut request = assemble(form)?;
        if form.common().sender_name.is_none() {
            if let Some(name) = &self.sender_name {
                request.sender_name = name.clone();
            }
        }

        let message_type = request.message_type();
        let message_id = request.body.message_id;
        if !self.catalog.contains(message_type, message_id) {
            warn!(%message_type, message_id, "Message identifier is not in the catalog");
        }
        for advisory in request.domain_advisories() {
            warn!(
                field = advisory.field,
                value = advisory.value,
                min = advisory.min,
                max = advisory.max,
                "Value outside declared domain, sending unchanged"
            );
        }
        Ok(request)
    }

    /// Assemble and send one message.
    ///
    /// # Errors
    ///
    /// - [`EcbeError::MissingRequiredField`](crate::EcbeError::MissingRequiredField)
    ///   when no message identifier is selected; nothing is sent
    /// - [`EcbeError::Transport`](crate::EcbeError::Transport) when the call fails
    ///   or the backend answers with a non-2xx status
    pub async fn submit(&self, form: &FormState) -> Result<Submission> {
        let request = self.preview(form)?;
        let message_type = request.message_type();
        let message_id = request.body.message_id;

        match self.transport.post_message(&request).await {
            Ok(response) => {
                info!(%message_type, message_id, "Message submitted");
                Ok(Submission { message_type, message_id, response })
            }
            Err(e) => {
                error!(%message_type, message_id, error = %e, "Error submitting message");
                Err(e)
            }
        }
    }

    /// Withdraw a previously submitted message.
    pub async fn withdraw(&self, message_id: u16) -> Result<Value> {
        let response = self.transport.delete_message(message_id).await.inspect_err(|e| {
            error!(message_id, error = %e, "Error withdrawing message");
        })?;
        info!(message_id, "Message withdrawn");
        Ok(response)
    }

    /// List the broadcasts currently known to the CBC.
    pub async fn broadcasts(&self) -> Result<Value> {
        self.transport.list_broadcasts().await.inspect_err(|e| {
            error!(error = %e, "Error listing broadcasts");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EcbeError;
    use crate::form::FormField;
    use crate::test_utils::{RecordedCall, RecordingTransport, Reply};
    use crate::types::{CharacterSet, WarningType};

    fn cbs_scenario() -> FormState {
        FormState::new(MessageType::Cbs)
            .update_all([
                (FormField::MessageId, "4370"),
                (FormField::GeographicScope, "plmn_wide"),
                (FormField::MessageCode, "768"),
                (FormField::UpdateNumber, "0"),
                (FormField::CharacterSet, "gsm"),
                (FormField::Text, "Test Alert"),
                (FormField::RepetitionPeriod, "5"),
                (FormField::BroadcastCount, "999"),
            ])
            .unwrap()
    }

    #[tokio::test]
    async fn submit_issues_exactly_one_post() {
        let _ = tracing_subscriber::fmt::try_init();

        let console = Console::new(RecordingTransport::ok(serde_json::json!({"status": "ok"})));
        let submission = console.submit(&cbs_scenario()).await.unwrap();

        assert_eq!(submission.message_id, 4370);
        assert_eq!(submission.message_type, MessageType::Cbs);
        assert_eq!(submission.response["status"], "ok");
        assert_eq!(submission.operator_notice(), "CBS message submitted!");

        let calls = console.transport().calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            RecordedCall::Post(request) => {
                assert_eq!(request.body.message_id, 4370);
                let text = request.body.payload.as_text().unwrap();
                assert_eq!(text.text, "Test Alert");
                assert_eq!(text.character_set, CharacterSet::Gsm);
            }
            other => panic!("expected POST, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_message_id_never_reaches_transport() {
        let console = Console::new(RecordingTransport::ok(Value::Null));

        for message_type in MessageType::ALL {
            let err = console.submit(&FormState::new(*message_type)).await.unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.operator_prompt(*message_type), "Please select a Message ID");
        }
        assert!(console.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn backend_errors_surface_unchanged() {
        let console = Console::new(RecordingTransport::replying(Reply::Status(
            500,
            "internal".to_string(),
        )));
        let form = FormState::new(MessageType::Etws).update(FormField::MessageId, "4352").unwrap();

        let err = console.submit(&form).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.operator_prompt(MessageType::Etws), "Error submitting ETWS message");
        assert_eq!(console.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn unreachable_backend_is_reported_once() {
        let console = Console::new(RecordingTransport::replying(Reply::Unreachable));
        let err = console.submit(&cbs_scenario()).await.unwrap_err();
        assert!(matches!(err, EcbeError::Transport { status: None, .. }));
        assert_eq!(console.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn repeated_submissions_are_not_deduplicated() {
        let console = Console::new(RecordingTransport::ok(Value::Null));
        let form = cbs_scenario();
        console.submit(&form).await.unwrap();
        console.submit(&form).await.unwrap();
        assert_eq!(console.transport().calls().len(), 2);
    }

    #[tokio::test]
    async fn configured_sender_fills_blank_forms_only() {
        let console =
            Console::new(RecordingTransport::ok(Value::Null)).with_sender_name("night-shift");

        let request = console.preview(&cbs_scenario()).unwrap();
        assert_eq!(request.sender_name, "night-shift");

        let named = cbs_scenario().update(FormField::SenderName, "ops-desk").unwrap();
        assert_eq!(console.preview(&named).unwrap().sender_name, "ops-desk");
    }

    #[tokio::test]
    async fn etws_submission_keeps_backend_spelling() {
        let console = Console::new(RecordingTransport::ok(Value::Null));
        let form = FormState::new(MessageType::Etws)
            .update_all([
                (FormField::MessageId, "4354"),
                (FormField::WarningType, "earthquake_and_tsuname"),
                (FormField::PopupOnDisplay, "false"),
            ])
            .unwrap();

        let submission = console.submit(&form).await.unwrap();
        assert_eq!(submission.operator_notice(), "ETWS message submitted!");

        match &console.transport().calls()[0] {
            RecordedCall::Post(request) => {
                let etws = request.body.payload.as_etws().unwrap();
                assert_eq!(etws.warning_type, WarningType::EarthquakeAndTsuname);
                assert!(etws.emergency_user_alert);
                assert!(!etws.popup_on_display);
            }
            other => panic!("expected POST, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn withdraw_and_list_issue_one_call_each() {
        let console = Console::new(RecordingTransport::ok(serde_json::json!([])));
        console.withdraw(4370).await.unwrap();
        let broadcasts = console.broadcasts().await.unwrap();
        assert_eq!(broadcasts, serde_json::json!([]));
        assert_eq!(
            console.transport().calls(),
            vec![RecordedCall::Delete(4370), RecordedCall::ListBroadcasts]
        );
    }

    #[test]
    fn out_of_catalog_identifiers_are_previewed() {
        let console = Console::new(RecordingTransport::ok(Value::Null));
        let form = FormState::new(MessageType::Cbs).update(FormField::MessageId, "1").unwrap();
        assert_eq!(console.preview(&form).unwrap().body.message_id, 1);
    }
}
