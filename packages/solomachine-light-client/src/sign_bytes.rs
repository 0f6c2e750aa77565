//! Construction of the bytes a solo machine signs.
//!
//! All sign bytes are a protobuf [`proto::SignBytes`]. The [`DataType`] field
//! keeps header updates and statements about state apart: a signature over a
//! header never verifies as a statement and the other way around.

use ibc_proto::google::protobuf::Any;
use prost::Message;

use crate::{
    error::SoloMachineError,
    header::Header,
    misbehaviour::SignatureAndData,
    proto::{self, DataType},
};

/// Encodes the sign bytes
#[must_use]
pub fn sign_bytes(
    sequence: u64,
    timestamp: u64,
    diversifier: &str,
    data_type: DataType,
    data: Vec<u8>,
) -> Vec<u8> {
    proto::SignBytes {
        sequence,
        timestamp,
        diversifier: diversifier.to_string(),
        data_type: data_type.into(),
        data,
    }
    .encode_to_vec()
}

/// Sign bytes of a header update, under the diversifier of the consensus
/// state the header is applied to
#[must_use]
pub fn header_sign_bytes(header: &Header, diversifier: &str) -> Vec<u8> {
    let data = proto::HeaderData {
        new_pub_key: Some(Any::from(header.new_public_key)),
        new_diversifier: header.new_diversifier.clone(),
    }
    .encode_to_vec();

    sign_bytes(
        header.sequence,
        header.timestamp,
        diversifier,
        DataType::Header,
        data,
    )
}

/// Sign bytes of one half of a misbehaviour
/// # Errors
/// Returns an error if the signature is not over a statement
pub fn misbehaviour_sign_bytes(
    sequence: u64,
    signature_and_data: &SignatureAndData,
    diversifier: &str,
) -> Result<Vec<u8>, SoloMachineError> {
    statement_sign_bytes(
        sequence,
        signature_and_data.timestamp,
        diversifier,
        signature_and_data.data_type,
        signature_and_data.data.clone(),
    )
}

/// Sign bytes of a statement about counterparty state
/// # Errors
/// Returns an error if `data_type` is not a statement type
pub fn statement_sign_bytes(
    sequence: u64,
    timestamp: u64,
    diversifier: &str,
    data_type: DataType,
    data: Vec<u8>,
) -> Result<Vec<u8>, SoloMachineError> {
    if !data_type.is_statement() {
        return Err(SoloMachineError::InvalidDataType {
            found: data_type,
            reason: "only statements about state can be signed here",
        });
    }
    Ok(sign_bytes(sequence, timestamp, diversifier, data_type, data))
}

#[cfg(test)]
mod header_sign_bytes {
    use super::*;
    use crate::test_utils::TestSigner;

    fn header() -> Header {
        Header {
            sequence: 3,
            timestamp: 1_000,
            signature: vec![1; 10],
            new_public_key: TestSigner::secp256k1(0x02).public_key(),
            new_diversifier: "next".to_string(),
        }
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(
            super::header_sign_bytes(&header(), "div"),
            super::header_sign_bytes(&header(), "div")
        );
    }

    #[test]
    fn ignores_signature() {
        let mut other = header();
        other.signature = vec![2; 10];
        assert_eq!(
            super::header_sign_bytes(&header(), "div"),
            super::header_sign_bytes(&other, "div")
        );
    }

    #[test]
    fn differs_on_any_signed_field() {
        let base = super::header_sign_bytes(&header(), "div");

        let mut changed = Vec::new();
        let mut h = header();
        h.sequence += 1;
        changed.push(super::header_sign_bytes(&h, "div"));
        let mut h = header();
        h.timestamp += 1;
        changed.push(super::header_sign_bytes(&h, "div"));
        let mut h = header();
        h.new_public_key = TestSigner::ed25519(0x02).public_key();
        changed.push(super::header_sign_bytes(&h, "div"));
        let mut h = header();
        h.new_diversifier = "nexu".to_string();
        changed.push(super::header_sign_bytes(&h, "div"));
        changed.push(super::header_sign_bytes(&header(), "dix"));

        for (i, bytes) in changed.iter().enumerate() {
            assert_ne!(&base, bytes, "change {i} did not alter the sign bytes");
        }
    }

    #[test]
    fn differs_from_statement_over_same_data() {
        let h = header();
        let data = proto::HeaderData {
            new_pub_key: Some(h.new_public_key.into()),
            new_diversifier: h.new_diversifier.clone(),
        }
        .encode_to_vec();

        let statement =
            statement_sign_bytes(h.sequence, h.timestamp, "div", DataType::ClientState, data)
                .unwrap();
        assert_ne!(super::header_sign_bytes(&h, "div"), statement);
    }
}
