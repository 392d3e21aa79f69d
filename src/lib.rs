//! Type-safe composer and REST client for Cell Broadcast and ETWS messages.
//!
//! `ecbe` turns operator input into the JSON documents a Cell Broadcast
//! Centre (CBC) accepts on its external CBS entity API (`/api/ecbe/v1`) and
//! submits them.
//!
//! # Features
//!
//! - **Immutable form state**: every edit returns a new [`FormState`]
//! - **Typed wire model**: 3GPP TS 23.041 vocabularies as enums, serde-mapped to the CBC's JSON
//! - **Shallow validation**: only a missing message identifier blocks a submission
//! - **Pluggable transport**: [`Transport`] trait with a reqwest-based [`HttpTransport`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ecbe::{Console, ConsoleConfig, FormField, FormState, MessageType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let console = Console::from_config(ConsoleConfig::new("http://10.0.0.5:8080"))?;
//!
//!     let form = FormState::new(MessageType::Cbs)
//!         .update(FormField::MessageId, "4370")?
//!         .update(FormField::Text, "Test Alert")?;
//!
//!     let submission = console.submit(&form).await?;
//!     println!("{}", submission.operator_notice());
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
#[cfg(test)]
mod test_utils;
pub mod types;

// Composition
pub mod assembler;
pub mod catalog;
pub mod form;

// Submission
pub mod config;
pub mod console;
pub mod transport;
pub mod transports;

// Core exports
pub use error::*;
pub use types::*;

pub use assembler::{assemble, assemble_cbs_request, assemble_etws_request};
pub use catalog::{CatalogEntry, MessageCatalog};
pub use config::ConsoleConfig;
pub use console::{Console, Submission};
pub use form::{CbsFields, CommonFields, EtwsFields, FormField, FormState};
pub use transport::{API_BASE_PATH, Transport};
pub use transports::HttpTransport;
