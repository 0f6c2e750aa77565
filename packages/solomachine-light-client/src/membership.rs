//! Membership proof verification for the solo machine client.
//!
//! A solo machine proves its state by signing it at the current sequence.
//! Every verified proof consumes that sequence.

use prost::Message;

use crate::{
    client_state::ClientState,
    error::SoloMachineError,
    proto::{self, DataType},
    sign_bytes::statement_sign_bytes,
    verify::{verify_signature, SignatureVerifier},
};

/// A value the solo machine claims to have stored at a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    /// A packet commitment
    PacketCommitment {
        /// Commitment path
        path: Vec<u8>,
        /// Packet commitment
        commitment: Vec<u8>,
    },
    /// A packet acknowledgement
    PacketAcknowledgement {
        /// Acknowledgement path
        path: Vec<u8>,
        /// Acknowledgement commitment
        acknowledgement: Vec<u8>,
    },
    /// The next receive sequence of a channel
    NextSequenceRecv {
        /// Next sequence receive path
        path: Vec<u8>,
        /// Next sequence to be received
        next_sequence_recv: u64,
    },
}

impl Membership {
    pub(crate) const fn data_type(&self) -> DataType {
        match self {
            Self::PacketCommitment { .. } => DataType::PacketCommitment,
            Self::PacketAcknowledgement { .. } => DataType::PacketAcknowledgement,
            Self::NextSequenceRecv { .. } => DataType::NextSequenceRecv,
        }
    }

    pub(crate) fn encode_data(self) -> Vec<u8> {
        match self {
            Self::PacketCommitment { path, commitment } => {
                proto::PacketCommitmentData { path, commitment }.encode_to_vec()
            }
            Self::PacketAcknowledgement {
                path,
                acknowledgement,
            } => proto::PacketAcknowledgementData {
                path,
                acknowledgement,
            }
            .encode_to_vec(),
            Self::NextSequenceRecv {
                path,
                next_sequence_recv,
            } => proto::NextSequenceRecvData {
                path,
                next_seq_recv: next_sequence_recv,
            }
            .encode_to_vec(),
        }
    }
}

/// Verify that the solo machine signed `membership` at the current sequence
///
/// Returns the client state with the sequence consumed.
/// # Errors
/// Returns an error if the client is frozen, the proof does not decode, the
/// proof timestamp is before the consensus state timestamp or the signature
/// does not verify
pub fn verify_membership<V: SignatureVerifier>(
    client_state: &ClientState,
    proof: &[u8],
    membership: Membership,
    verifier: &V,
) -> Result<ClientState, SoloMachineError> {
    let data_type = membership.data_type();
    verify_statement(
        client_state,
        proof,
        data_type,
        membership.encode_data(),
        verifier,
    )
}

/// Verify that the solo machine signed that no receipt is stored at `path`
///
/// Returns the client state with the sequence consumed.
/// # Errors
/// Same as [`verify_membership`]
pub fn verify_non_membership<V: SignatureVerifier>(
    client_state: &ClientState,
    proof: &[u8],
    path: Vec<u8>,
    verifier: &V,
) -> Result<ClientState, SoloMachineError> {
    verify_statement(
        client_state,
        proof,
        DataType::PacketReceiptAbsence,
        proto::PacketReceiptAbsenceData { path }.encode_to_vec(),
        verifier,
    )
}

fn verify_statement<V: SignatureVerifier>(
    client_state: &ClientState,
    proof: &[u8],
    data_type: DataType,
    data: Vec<u8>,
    verifier: &V,
) -> Result<ClientState, SoloMachineError> {
    if client_state.is_frozen {
        return Err(SoloMachineError::ClientFrozen);
    }

    let proof = proto::TimestampedSignatureData::decode(proof)?;

    let consensus_state = &client_state.consensus_state;
    if proof.timestamp < consensus_state.timestamp {
        return Err(SoloMachineError::ProofTimestampRegression {
            consensus_timestamp: consensus_state.timestamp,
            proof_timestamp: proof.timestamp,
        });
    }

    let sign_bytes = statement_sign_bytes(
        client_state.sequence,
        proof.timestamp,
        &consensus_state.diversifier,
        data_type,
        data,
    )?;

    verify_signature(
        verifier,
        &consensus_state.public_key,
        &sign_bytes,
        &proof.signature_data,
    )
    .map_err(|source| SoloMachineError::InvalidSignature {
        subject: "membership proof",
        source,
    })?;

    tracing::debug!(
        sequence = client_state.sequence,
        data_type = %data_type,
        "solo machine proof verified"
    );

    Ok(ClientState {
        sequence: client_state.next_sequence()?,
        ..client_state.clone()
    })
}
