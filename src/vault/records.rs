//! Demo key-vault records
//!
//! Three fixed data-key documents used to seed a demonstration key
//! vault. Key material is pre-wrapped and carried as base64; nothing
//! here unwraps or otherwise touches key bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// Whether a data key may be used
///
/// Stored as an integer in the document: 1 enabled, 0 disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum KeyStatus {
    Disabled,
    Enabled,
}

impl From<KeyStatus> for u8 {
    fn from(status: KeyStatus) -> u8 {
        match status {
            KeyStatus::Disabled => 0,
            KeyStatus::Enabled => 1,
        }
    }
}

impl TryFrom<u8> for KeyStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(KeyStatus::Disabled),
            1 => Ok(KeyStatus::Enabled),
            other => Err(format!("invalid key status: {}", other)),
        }
    }
}

/// A single key-vault record
///
/// Serializes with the vault's document field names (`_id`,
/// `keyMaterial`, `keyAltName`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultKeyRecord {
    /// Key UUID
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Alternate names this key can be looked up by (absent when empty)
    #[serde(rename = "keyAltName", default, skip_serializing_if = "Vec::is_empty")]
    pub key_alt_names: Vec<String>,

    /// Wrapped key bytes, base64-encoded
    pub key_material: String,

    pub creation_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,

    /// Whether the key may be used
    pub status: KeyStatus,

    /// Identifier of the wrapping master key, when tracked
    pub master_key: Option<String>,
}

impl VaultKeyRecord {
    /// Decode the wrapped key material
    pub fn material_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.key_material)
    }
}

/// Pre-wrapped 32-byte keys for the demo records
const DEMO_KEY_MATERIAL: [&str; 3] = [
    "AQICAHgg8xic3qACagcogG7tCsrU/az1q4j3Nt2hQcUyQRVMtQHVMeCvT16tqR4Lrx+YZZPNAAAAizCBiAYJKoZIhvcNAQcGoHsweQIBADB0BgkqhkiG9w0BBwEwHgYJYIZIAWUDBAEuMBEEDBgZBeKnJt8ciGCUvAIBEIBH8R8fYshXY1q/VrPGkiQs/+cv6gBCRR1tam+rIEGa2w2xO+Z24f/DcHfCkeVWuMSpGoyEov781YJo0iOE6Ptg0VynQNutuCw=",
    "AQICAHgg8xic3qACagcogG7tCsrU/az1q4j3Nt2hQcUyQRVMtQEEb7Fjw345bF3S/Mtl0KdVAAAAizCBiAYJKoZIhvcNAQcGoHsweQIBADB0BgkqhkiG9w0BBwEwHgYJYIZIAWUDBAEuMBEEDAm3EAPwy8J4dRanzQIBEIBHfe2CnDtIMMTy4EJ2onQ5yYxeKP2dPtZASeKxm2aQWYaWKxNgV0mXoxUXqQ5JDMTEZHAKPxouOaVR5FUVCl4jjas8+1zNFYM=",
    "AQICAHgg8xic3qACagcogG7tCsrU/az1q4j3Nt2hQcUyQRVMtQHaVfzryC4Lnu3rkL8c9gWSAAAAizCBiAYJKoZIhvcNAQcGoHsweQIBADB0BgkqhkiG9w0BBwEwHgYJYIZIAWUDBAEuMBEEDBfPk4bi+iEJ80fcWwIBEIBH5WxHC8QDjihAT3Tq242KRv9woyC2aTR/fA6BFTP8/KZOH36DEPG8v2oBUEYhgAgmRbVyDvj0cbZnis0dKIB5AGmlHdcdO1Q=",
];

/// The three demo data keys
///
/// Fixed UUIDs and key material; timestamps are set at call time.
/// The second key carries an alternate name, the third is disabled.
pub fn demo_records() -> Vec<VaultKeyRecord> {
    let now = Utc::now();
    vec![
        VaultKeyRecord {
            id: uuid!("d7e9e25d-ac72-44be-8007-ac51cd4a7f13"),
            key_alt_names: Vec::new(),
            key_material: DEMO_KEY_MATERIAL[0].to_string(),
            creation_date: now,
            updated_date: now,
            status: KeyStatus::Enabled,
            master_key: None,
        },
        VaultKeyRecord {
            id: uuid!("0e239681-7aa6-47dc-a473-8b98964bacf7"),
            key_alt_names: vec!["Todd Davis".to_string()],
            key_material: DEMO_KEY_MATERIAL[1].to_string(),
            creation_date: now,
            updated_date: now,
            status: KeyStatus::Enabled,
            master_key: None,
        },
        VaultKeyRecord {
            id: uuid!("6290d4d1-fd87-4dc5-aa03-8c7bee221a45"),
            key_alt_names: Vec::new(),
            key_material: DEMO_KEY_MATERIAL[2].to_string(),
            creation_date: now,
            updated_date: now,
            status: KeyStatus::Disabled,
            master_key: None,
        },
    ]
}
