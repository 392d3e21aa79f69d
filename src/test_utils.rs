//! Test utilities shared by the unit test modules
//!
//! Provides an in-memory [`Transport`] that records every call instead of
//! talking to a CBC.

#![cfg(test)]

use std::sync::Mutex;

use serde_json::Value;

use crate::transport::Transport;
use crate::types::MessageRequest;
use crate::{EcbeError, Result};

/// A single call observed by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Post(MessageRequest),
    Delete(u16),
    ListBroadcasts,
}

/// Scripted response returned for every call.
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(Value),
    Status(u16, String),
    Unreachable,
}

/// Transport that records calls and answers with a fixed [`Reply`].
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingTransport {
    pub fn replying(reply: Reply) -> Self {
        Self { reply, calls: Mutex::new(Vec::new()) }
    }

    pub fn ok(body: Value) -> Self {
        Self::replying(Reply::Ok(body))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: RecordedCall) -> Result<Value> {
        self.calls.lock().unwrap().push(call);
        match &self.reply {
            Reply::Ok(body) => Ok(body.clone()),
            Reply::Status(status, body) => Err(EcbeError::transport_status(*status, body.clone())),
            Reply::Unreachable => Err(EcbeError::transport_failed("could not connect to backend")),
        }
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn post_message(&self, request: &MessageRequest) -> Result<Value> {
        self.answer(RecordedCall::Post(request.clone()))
    }

    async fn delete_message(&self, message_id: u16) -> Result<Value> {
        self.answer(RecordedCall::Delete(message_id))
    }

    async fn list_broadcasts(&self) -> Result<Value> {
        self.answer(RecordedCall::ListBroadcasts)
    }
}
