//! Message type discriminator

use serde::{Deserialize, Serialize};

use crate::{EcbeError, Result};

/// Kind of message being composed.
///
/// Selects the payload variant: CBS messages carry text, ETWS messages carry
/// a warning type and presentation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    Cbs,
    Etws,
}

impl MessageType {
    pub const ALL: &'static [MessageType] = &[MessageType::Cbs, MessageType::Etws];

    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Cbs => "CBS",
            MessageType::Etws => "ETWS",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageType {
    type Err = EcbeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CBS" | "CBC" => Ok(MessageType::Cbs),
            "ETWS" => Ok(MessageType::Etws),
            _ => Err(EcbeError::invalid_field("message_type", s, "expected CBS or ETWS")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("cbs".parse::<MessageType>().unwrap(), MessageType::Cbs);
        assert_eq!(" ETWS ".parse::<MessageType>().unwrap(), MessageType::Etws);
        assert_eq!("cbc".parse::<MessageType>().unwrap(), MessageType::Cbs);
        assert!("sms".parse::<MessageType>().is_err());
    }
}
