//! Message identifier catalog keyed by message type.
//!
//! The catalog lists the 3GPP TS 23.041 (V18.4.0) message identifiers an
//! operator can pick from. It is a presentation aid: the assembler never
//! rejects an identifier because it is missing here. Deployments can replace
//! the built-in shortlist with a YAML file:
//!
//! ```yaml
//! cbs:
//!   - id: 4370
//!     label: "4370 - Presidential Alert"
//! etws:
//!   - id: 4352
//!     label: "4352 - ETWS Earthquake Warning"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{MessageType, WarningType};
use crate::{EcbeError, Result};

/// One selectable message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u16,
    pub label: String,
}

impl CatalogEntry {
    pub fn new(id: u16, label: impl Into<String>) -> Self {
        Self { id, label: label.into() }
    }
}

/// Message identifiers available per message type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCatalog {
    #[serde(default)]
    cbs: Vec<CatalogEntry>,
    #[serde(default)]
    etws: Vec<CatalogEntry>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const ETWS_ENTRIES: &[(u16, &str)] = &[
    (4352, "ETWS Earthquake Warning"),
    (4353, "ETWS Tsunami Warning"),
    (4354, "ETWS Earthquake and Tsunami Warning"),
    (4355, "ETWS Test Message"),
    (4356, "ETWS other emergency"),
];

const CBS_ENTRIES: &[(u16, &str)] = &[
    (4370, "WEA CMAS Presidential Alert (US) | EU-Alert Level 1 | (KPAS) Class 0"),
    (
        4371,
        "WEA CMAS (Severity of Extreme, Urgency of Immediate, and Certainty of Observed) | EU-Alert Level 2 | (KPAS) Class 1",
    ),
    (
        4372,
        "WEA CMAS (Severity of Extreme, Urgency of Immediate, and Certainty of Likely) | EU-Alert Level 2 | (KPAS) Class 1",
    ),
    (
        4373,
        "WEA CMAS (Severity of Extreme, Urgency of Expected, and Certainty of Observed) | EU-Alert Level 3 | (KPAS) Class 1",
    ),
    (
        4374,
        "WEA CMAS (Severity of Extreme, Urgency of Expected, and Certainty of Likely) | EU-Alert Level 3 | (KPAS) Class 1",
    ),
    (
        4375,
        "WEA CMAS (Severity of Severe, Urgency of Immediate, and Certainty of Observed) | EU-Alert Level 3 | (KPAS) Class 1",
    ),
    (
        4376,
        "WEA CMAS (Severity of Severe, Urgency of Immediate, and Certainty of Likely) | EU-Alert Level 3 | (KPAS) Class 1",
    ),
    (
        4377,
        "WEA CMAS (Severity of Severe, Urgency of Expected, and Certainty of Observed) | EU-Alert Level 3 | (KPAS) Class 1",
    ),
    (
        4378,
        "WEA CMAS (Severity of Severe, Urgency of Expected, and Certainty of Likely) | EU-Alert Level 3 | (KPAS) Class 1",
    ),
    (4379, "WEA CMAS (Child Abduction Emergency) Amber Alert | EU-Amber | (KPAS) Class 1"),
    (4380, "WEA CMAS Test | Required Monthly Test"),
    (4381, "WEA CMAS Exercise"),
    (4382, "WEA CMAS operator defined use"),
    (4396, "WEA CMAS Public Safety Alerts | EU-Alert Level 4"),
    (4398, "WEA CMAS State/Local WEA Test"),
];

fn entries_from(table: &[(u16, &str)]) -> Vec<CatalogEntry> {
    table.iter().map(|&(id, label)| CatalogEntry::new(id, format!("{id} - {label}"))).collect()
}

impl MessageCatalog {
    /// Built-in shortlist of commonly used identifiers.
    pub fn builtin() -> Self {
        Self { cbs: entries_from(CBS_ENTRIES), etws: entries_from(ETWS_ENTRIES) }
    }

    /// Build a catalog from explicit entry lists.
    pub fn new(cbs: Vec<CatalogEntry>, etws: Vec<CatalogEntry>) -> Self {
        Self { cbs, etws }
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: MessageCatalog = serde_yaml_ng::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| EcbeError::config_error(path.to_path_buf(), e))?;
        let catalog = Self::from_yaml(&yaml)?;
        debug!(
            path = %path.display(),
            cbs = catalog.cbs.len(),
            etws = catalog.etws.len(),
            "Loaded message catalog"
        );
        Ok(catalog)
    }

    /// Reject catalogs listing the same identifier twice for one type.
    fn validate(&self) -> Result<()> {
        for message_type in MessageType::ALL {
            let entries = self.entries(*message_type);
            for (index, entry) in entries.iter().enumerate() {
                if entries[..index].iter().any(|earlier| earlier.id == entry.id) {
                    return Err(EcbeError::Parse {
                        context: "message catalog".to_string(),
                        details: format!("{message_type} identifier {} listed twice", entry.id),
                    });
                }
            }
        }
        Ok(())
    }

    /// Identifiers offered for `message_type`, in presentation order.
    pub fn entries(&self, message_type: MessageType) -> &[CatalogEntry] {
        match message_type {
            MessageType::Cbs => &self.cbs,
            MessageType::Etws => &self.etws,
        }
    }

    pub fn lookup(&self, message_type: MessageType, id: u16) -> Option<&CatalogEntry> {
        self.entries(message_type).iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, message_type: MessageType, id: u16) -> bool {
        self.lookup(message_type, id).is_some()
    }

    /// Warning types offered on the ETWS form.
    ///
    /// The combined warning uses the backend spelling; the canonical spelling is
    /// still accepted as input.
    pub fn warning_types(&self) -> &'static [WarningType] {
        &[
            WarningType::Earthquake,
            WarningType::Tsunami,
            WarningType::EarthquakeAndTsuname,
            WarningType::Test,
            WarningType::Other,
        ]
    }
}
