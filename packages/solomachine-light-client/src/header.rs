//! Solo machine header types

use crate::{error::SoloMachineError, proto, public_key::PublicKey};

/// A signed request to rotate the solo machine key and advance its sequence.
/// Untrusted until verified against the current client state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Sequence the header is valid at, must equal the client sequence
    pub sequence: u64,
    /// Timestamp of the update
    pub timestamp: u64,
    /// Encoded signature descriptor by the current public key
    pub signature: Vec<u8>,
    /// Public key authorized to sign the next update
    pub new_public_key: PublicKey,
    /// Diversifier used from the next update on
    pub new_diversifier: String,
}

impl Header {
    /// Stateless checks on the header
    /// # Errors
    /// Returns an error if the sequence or timestamp is zero, the signature is
    /// empty or the new diversifier is blank
    pub fn validate_basic(&self) -> Result<(), SoloMachineError> {
        let reason = if self.sequence == 0 {
            "sequence cannot be 0"
        } else if self.timestamp == 0 {
            "timestamp cannot be 0"
        } else if self.signature.is_empty() {
            "signature cannot be empty"
        } else if is_blank(&self.new_diversifier) {
            "new diversifier cannot contain only spaces"
        } else {
            return Ok(());
        };

        Err(SoloMachineError::InvalidHeader {
            reason: reason.into(),
        })
    }
}

/// A non-empty string made only of whitespace
pub(crate) fn is_blank(diversifier: &str) -> bool {
    !diversifier.is_empty() && diversifier.trim().is_empty()
}

impl TryFrom<proto::Header> for Header {
    type Error = SoloMachineError;

    fn try_from(raw: proto::Header) -> Result<Self, Self::Error> {
        let new_public_key = raw
            .new_public_key
            .ok_or(SoloMachineError::MissingField("new_public_key"))?
            .try_into()?;

        Ok(Self {
            sequence: raw.sequence,
            timestamp: raw.timestamp,
            signature: raw.signature,
            new_public_key,
            new_diversifier: raw.new_diversifier,
        })
    }
}

impl From<Header> for proto::Header {
    fn from(header: Header) -> Self {
        Self {
            sequence: header.sequence,
            timestamp: header.timestamp,
            signature: header.signature,
            new_public_key: Some(header.new_public_key.into()),
            new_diversifier: header.new_diversifier,
        }
    }
}


#[cfg(test)]
mod proto_conversion {
    use super::*;

    #[test]
    fn fails_without_new_public_key() {
        let raw = proto::Header {
            sequence: 1,
            timestamp: 1,
            signature: vec![1],
            new_public_key: None,
            new_diversifier: String::new(),
        };
        assert_eq!(
            Header::try_from(raw),
            Err(SoloMachineError::MissingField("new_public_key"))
        );
    }
}
