//! Signature verification and header verification

use prost::Message;
use thiserror::Error;

use crate::{
    client_state::ClientState, error::SoloMachineError, header::Header, proto,
    public_key::PublicKey, sign_bytes::header_sign_bytes,
};

/// Signature verification failed. Malformed signatures and signatures by
/// another key are not distinguished.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid signature: {reason}")]
pub struct InvalidSignature {
    /// Reason for error
    pub reason: String,
}

impl InvalidSignature {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Verifies a signature made by a solo machine key
///
/// Hosts with a native signature precompile can provide their own
/// implementation, otherwise use [`DefaultSignatureVerifier`].
pub trait SignatureVerifier {
    /// Verify `signature` (raw signature bytes) over `message`
    /// # Errors
    /// Returns an error if the signature is malformed or does not verify
    fn verify(
        &self,
        public_key: &PublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), InvalidSignature>;
}

/// Pure Rust verifier for secp256k1 (ECDSA over SHA-256, low-S) and ed25519
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSignatureVerifier;

impl SignatureVerifier for DefaultSignatureVerifier {
    fn verify(
        &self,
        public_key: &PublicKey,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), InvalidSignature> {
        match public_key {
            PublicKey::Secp256k1(key) => {
                use k256::ecdsa::signature::Verifier;

                let signature = k256::ecdsa::Signature::from_slice(signature)
                    .map_err(|e| InvalidSignature::new(e.to_string()))?;
                key.verify(message, &signature)
                    .map_err(|e| InvalidSignature::new(e.to_string()))
            }
            PublicKey::Ed25519(key) => {
                let signature = ed25519_dalek::Signature::from_slice(signature)
                    .map_err(|e| InvalidSignature::new(e.to_string()))?;
                key.verify_strict(message, &signature)
                    .map_err(|e| InvalidSignature::new(e.to_string()))
            }
        }
    }
}

/// Decodes a single signature descriptor into the raw signature bytes
/// # Errors
/// Returns an error if the bytes are not a single signature descriptor
pub fn decode_signature_data(signature_data: &[u8]) -> Result<Vec<u8>, InvalidSignature> {
    let data = proto::SingleSignatureData::decode(signature_data)
        .map_err(|e| InvalidSignature::new(format!("malformed signature data: {e}")))?;
    if data.signature.is_empty() {
        return Err(InvalidSignature::new("empty signature"));
    }
    Ok(data.signature)
}

/// Checks an encoded signature descriptor against the sign bytes
pub(crate) fn verify_signature<V: SignatureVerifier>(
    verifier: &V,
    public_key: &PublicKey,
    sign_bytes: &[u8],
    signature_data: &[u8],
) -> Result<(), InvalidSignature> {
    let signature = decode_signature_data(signature_data)?;
    verifier.verify(public_key, sign_bytes, &signature)
}

/// Verifies the header against the current client state
///
/// # Errors
/// Returns an error if:
/// - The client is frozen
/// - The header sequence is not the client sequence
/// - The header timestamp is before the consensus state timestamp
/// - The header is not signed by the current public key
pub fn verify_header<V: SignatureVerifier>(
    client_state: &ClientState,
    header: &Header,
    verifier: &V,
) -> Result<(), SoloMachineError> {
    if client_state.is_frozen {
        return Err(SoloMachineError::ClientFrozen);
    }

    if header.sequence != client_state.sequence {
        return Err(SoloMachineError::SequenceMismatch {
            expected: client_state.sequence,
            found: header.sequence,
        });
    }

    let consensus_state = &client_state.consensus_state;
    if header.timestamp < consensus_state.timestamp {
        return Err(SoloMachineError::TimestampRegression {
            consensus_timestamp: consensus_state.timestamp,
            header_timestamp: header.timestamp,
        });
    }

    // signed under the current diversifier, verified with the current key
    let sign_bytes = header_sign_bytes(header, &consensus_state.diversifier);
    verify_signature(
        verifier,
        &consensus_state.public_key,
        &sign_bytes,
        &header.signature,
    )
    .map_err(|source| SoloMachineError::InvalidSignature {
        subject: "header",
        source,
    })
}


#[cfg(test)]
mod decode_signature_data {
    use super::*;

    #[test]
    fn fails_on_garbage() {
        assert!(super::decode_signature_data(&[0xff, 0xff, 0xff]).is_err());
    }

    #[test]
    fn fails_on_empty_signature() {
        let data = proto::SingleSignatureData {
            mode: 1,
            signature: vec![],
        }
        .encode_to_vec();
        assert!(super::decode_signature_data(&data).is_err());
    }
}
