//! Message serial number (TS 23.041 §9.4.1.2.1)

use serde::{Deserialize, Serialize};

/// Largest message code the serial number can carry (10 bits).
pub const MESSAGE_CODE_MAX: u32 = 1023;

/// Largest update number the serial number can carry (4 bits).
pub const UPDATE_NUMBER_MAX: u32 = 15;

/// Area over which a message code is unique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeographicScope {
    CellWideImmediate,
    #[default]
    PlmnWide,
    LacSacTacWide,
    CellWide,
}

wire_vocabulary!(GeographicScope, "geographic_scope" {
    CellWideImmediate => "cell_wide_immediate",
    PlmnWide => "plmn_wide",
    LacSacTacWide => "lac_sac_tac_wide",
    CellWide => "cell_wide",
});

/// Decoded serial number distinguishing revisions of a message.
///
/// Serialized as `{"serial_nr_decoded": {"geo_scope", "msg_code", "update_nr"}}`.
/// Values outside the 10/4-bit domains are carried as-is; see
/// [`SerialNumber::is_within_domain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SerialNumberWire", into = "SerialNumberWire")]
pub struct SerialNumber {
    pub geographic_scope: GeographicScope,
    pub message_code: u32,
    pub update_number: u32,
}

impl SerialNumber {
    pub fn new(geographic_scope: GeographicScope, message_code: u32, update_number: u32) -> Self {
        Self { geographic_scope, message_code, update_number }
    }

    /// Whether both numeric parts fit their declared domains.
    pub fn is_within_domain(&self) -> bool {
        self.message_code <= MESSAGE_CODE_MAX && self.update_number <= UPDATE_NUMBER_MAX
    }
}

#[derive(Serialize, Deserialize)]
struct SerialNumberWire {
    serial_nr_decoded: DecodedSerialWire,
}

#[derive(Serialize, Deserialize)]
struct DecodedSerialWire {
    geo_scope: GeographicScope,
    msg_code: u32,
    update_nr: u32,
}

impl From<SerialNumberWire> for SerialNumber {
    fn from(wire: SerialNumberWire) -> Self {
        let decoded = wire.serial_nr_decoded;
        Self::new(decoded.geo_scope, decoded.msg_code, decoded.update_nr)
    }
}

impl From<SerialNumber> for SerialNumberWire {
    fn from(serial: SerialNumber) -> Self {
        Self {
            serial_nr_decoded: DecodedSerialWire {
                geo_scope: serial.geographic_scope,
                msg_code: serial.message_code,
                update_nr: serial.update_number,
            },
        }
    }
}
