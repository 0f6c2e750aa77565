//! Public keys a solo machine can be controlled by

use ibc_proto::google::protobuf::Any;
use prost::Message;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

use crate::{
    error::SoloMachineError,
    proto::{self, ED25519_PUB_KEY_TYPE_URL, SECP256K1_PUB_KEY_TYPE_URL},
};

/// Length of a compressed SEC1 secp256k1 public key
pub const SECP256K1_PUBLIC_KEY_LENGTH: usize = 33;

/// The verification key of a solo machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncodedPublicKey", into = "EncodedPublicKey")]
pub enum PublicKey {
    /// ECDSA over secp256k1, signatures are over the SHA-256 digest of the message
    Secp256k1(k256::ecdsa::VerifyingKey),
    /// Ed25519
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl PublicKey {
    /// Parse a compressed (33-byte) secp256k1 public key
    /// # Errors
    /// Returns an error if the bytes are not a valid point encoding
    pub fn secp256k1_from_bytes(bytes: &[u8]) -> Result<Self, SoloMachineError> {
        if bytes.len() != SECP256K1_PUBLIC_KEY_LENGTH {
            return Err(SoloMachineError::InvalidPublicKey {
                reason: format!(
                    "secp256k1 public key must be {SECP256K1_PUBLIC_KEY_LENGTH} bytes, got {}",
                    bytes.len()
                ),
            });
        }
        k256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
            .map(Self::Secp256k1)
            .map_err(|e| SoloMachineError::InvalidPublicKey {
                reason: e.to_string(),
            })
    }

    /// Parse a 32-byte ed25519 public key
    /// # Errors
    /// Returns an error if the bytes are not a valid point encoding
    pub fn ed25519_from_bytes(bytes: &[u8]) -> Result<Self, SoloMachineError> {
        let bytes: &[u8; ed25519_dalek::PUBLIC_KEY_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| SoloMachineError::InvalidPublicKey {
                    reason: format!(
                        "ed25519 public key must be {} bytes, got {}",
                        ed25519_dalek::PUBLIC_KEY_LENGTH,
                        bytes.len()
                    ),
                })?;
        ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map(Self::Ed25519)
            .map_err(|e| SoloMachineError::InvalidPublicKey {
                reason: e.to_string(),
            })
    }

    /// The protobuf type URL of this key type
    #[must_use]
    pub const fn type_url(&self) -> &'static str {
        match self {
            Self::Secp256k1(_) => SECP256K1_PUB_KEY_TYPE_URL,
            Self::Ed25519(_) => ED25519_PUB_KEY_TYPE_URL,
        }
    }

    /// Raw key bytes, compressed SEC1 for secp256k1
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Secp256k1(key) => key.to_encoded_point(true).as_bytes().to_vec(),
            Self::Ed25519(key) => key.to_bytes().to_vec(),
        }
    }
}

impl TryFrom<Any> for PublicKey {
    type Error = SoloMachineError;

    fn try_from(any: Any) -> Result<Self, Self::Error> {
        let key = proto::PubKey::decode(any.value.as_slice())?.key;
        match any.type_url.as_str() {
            SECP256K1_PUB_KEY_TYPE_URL => Self::secp256k1_from_bytes(&key),
            ED25519_PUB_KEY_TYPE_URL => Self::ed25519_from_bytes(&key),
            _ => Err(SoloMachineError::UnsupportedPublicKey {
                type_url: any.type_url,
            }),
        }
    }
}

impl From<PublicKey> for Any {
    fn from(public_key: PublicKey) -> Self {
        Self {
            type_url: public_key.type_url().to_string(),
            value: proto::PubKey {
                key: public_key.to_bytes(),
            }
            .encode_to_vec(),
        }
    }
}

/// Persisted form of a [`PublicKey`]
#[serde_as]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
enum EncodedPublicKey {
    Secp256k1 {
        #[serde_as(as = "Base64")]
        key: Vec<u8>,
    },
    Ed25519 {
        #[serde_as(as = "Base64")]
        key: Vec<u8>,
    },
}

impl TryFrom<EncodedPublicKey> for PublicKey {
    type Error = SoloMachineError;

    fn try_from(encoded: EncodedPublicKey) -> Result<Self, Self::Error> {
        match encoded {
            EncodedPublicKey::Secp256k1 { key } => Self::secp256k1_from_bytes(&key),
            EncodedPublicKey::Ed25519 { key } => Self::ed25519_from_bytes(&key),
        }
    }
}

impl From<PublicKey> for EncodedPublicKey {
    fn from(public_key: PublicKey) -> Self {
        let key = public_key.to_bytes();
        match public_key {
            PublicKey::Secp256k1(_) => Self::Secp256k1 { key },
            PublicKey::Ed25519(_) => Self::Ed25519 { key },
        }
    }
}
