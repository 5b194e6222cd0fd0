//! Randomness beacon pulse
//!
//! A pulse is one timestamped unit of publicly verifiable randomness together
//! with its provenance: chain position, certificate, pre-commitment and
//! signature. This module only carries the data; fetching pulses and checking
//! their signatures happen elsewhere.
//!
//! Field names serialize in the beacon's camelCase wire form, so a pulse
//! document can be loaded directly:
//!
//! ```
//! use pulse_randomizer_core::PulseRecord;
//!
//! let json = r#"{"pulse": {
//!     "uri": "https://beacon.example/pulse/2/1",
//!     "version": "Version 2.0",
//!     "cipherSuite": 0,
//!     "period": 60000,
//!     "certificateId": "02ab",
//!     "chainIndex": 2,
//!     "pulseIndex": 1,
//!     "timeStamp": "2024-01-01T00:00:00.000Z",
//!     "localRandomValue": "AA",
//!     "external": {},
//!     "listValues": [],
//!     "precommitmentValue": "BB",
//!     "statusCode": 0,
//!     "signatureValue": "CC",
//!     "outputValue": "1A2B3C4D5E6F708192",
//!     "trimmedRandomValue": "1A2B3C"
//! }}"#;
//!
//! let pulse = PulseRecord::from_json(json).unwrap();
//! assert_eq!(pulse.pulse_index, 1);
//! assert_eq!(pulse.seed_hex(13), Some("1A2B3C4D5E6F7"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Opaque JSON object, used for the fields the beacon leaves unstructured
pub type JsonObject = Map<String, Value>;

/// Errors that can occur while reading or writing pulse documents
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Invalid pulse document: {0}")]
    Json(#[from] serde_json::Error),
}

/// One pulse of published randomness
///
/// Constructed by whoever fetched or deserialized it and read thereafter; no
/// invariants are checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseRecord {
    /// Locator of this pulse at its source service
    pub uri: String,

    /// Format/protocol version tag
    pub version: String,

    /// Cryptographic suite used to produce the pulse
    pub cipher_suite: i64,

    /// Generation interval
    pub period: i64,

    /// Identifier of the signing certificate
    pub certificate_id: String,

    /// Position of the chain this pulse belongs to
    pub chain_index: i64,

    /// Sequential index within the chain
    pub pulse_index: i64,

    /// Generation time, as published
    pub time_stamp: String,

    /// Locally generated random seed material (hex)
    pub local_random_value: String,

    /// External entropy sources and metadata
    pub external: JsonObject,

    /// Auxiliary value records
    pub list_values: Vec<JsonObject>,

    /// Commitment to the next local random value
    pub precommitment_value: String,

    /// Status/validity code
    pub status_code: i64,

    /// Signature over the pulse content (hex)
    pub signature_value: String,

    /// Final published random output (hex)
    pub output_value: String,

    /// Output value trimmed to its canonical length
    pub trimmed_random_value: String,
}

/// Beacon response wrapper: `{"pulse": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseEnvelope {
    pub pulse: PulseRecord,
}

impl From<PulseEnvelope> for PulseRecord {
    fn from(envelope: PulseEnvelope) -> Self {
        envelope.pulse
    }
}

impl PulseRecord {
    /// Parse a pulse from JSON
    ///
    /// Accepts either a bare pulse object or a `{"pulse": ...}` envelope.
    /// When neither shape matches, the error from the bare form is returned.
    pub fn from_json(json: &str) -> Result<Self, PulseError> {
        match serde_json::from_str::<PulseRecord>(json) {
            Ok(pulse) => Ok(pulse),
            Err(bare_err) => serde_json::from_str::<PulseEnvelope>(json)
                .map(PulseRecord::from)
                .map_err(|_| PulseError::Json(bare_err)),
        }
    }

    /// Serialize as pretty-printed JSON (bare form)
    pub fn to_json(&self) -> Result<String, PulseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Leading `len` hex digits of the output value
    ///
    /// This is the usual seed material for a
    /// [`Randomizer`](crate::Randomizer). Returns `None` when `len` is zero,
    /// the output value is too short, or the prefix is not all hex digits.
    pub fn seed_hex(&self, len: usize) -> Option<&str> {
        if len == 0 {
            return None;
        }
        let prefix = self.output_value.get(..len)?;
        prefix
            .bytes()
            .all(|b| b.is_ascii_hexdigit())
            .then_some(prefix)
    }
}
