//! Error types for the solo machine light client

use thiserror::Error;

use crate::{proto::DataType, verify::InvalidSignature};

/// Main error type for solo machine client operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum SoloMachineError {
    /// The client has been frozen by misbehaviour
    #[error("client is frozen")]
    ClientFrozen,

    /// Header or proof is not for the current sequence
    #[error("sequence does not match the client state sequence ({found} != {expected})")]
    SequenceMismatch {
        /// Client state sequence
        expected: u64,
        /// Sequence found in the message
        found: u64,
    },

    /// The client sequence cannot advance any further
    #[error("client sequence {sequence} cannot be incremented")]
    SequenceOverflow {
        /// Client state sequence
        sequence: u64,
    },

    /// Header timestamp is before the trusted consensus timestamp
    #[error(
        "header timestamp is less than the consensus state timestamp \
        ({header_timestamp} < {consensus_timestamp})"
    )]
    TimestampRegression {
        /// Trusted consensus state timestamp
        consensus_timestamp: u64,
        /// Header timestamp
        header_timestamp: u64,
    },

    /// Proof timestamp is before the trusted consensus timestamp
    #[error(
        "proof timestamp is less than the consensus state timestamp \
        ({proof_timestamp} < {consensus_timestamp})"
    )]
    ProofTimestampRegression {
        /// Trusted consensus state timestamp
        consensus_timestamp: u64,
        /// Proof timestamp
        proof_timestamp: u64,
    },

    /// Signature verification failed
    #[error("failed to verify {subject}: {source}")]
    InvalidSignature {
        /// What the signature was supposed to cover
        subject: &'static str,
        /// Error of the verification primitive
        #[source]
        source: InvalidSignature,
    },

    /// Both misbehaviour signatures cover the same statement
    #[error("misbehaviour signatures are over identical data, no equivocation proven")]
    NoEquivocation,

    /// Client message type url is not a solo machine header nor misbehaviour
    #[error("unsupported client message type: {type_url}")]
    UnsupportedClientMessage {
        /// Type url of the rejected message
        type_url: String,
    },

    /// Public key type url is not supported
    #[error("unsupported public key type: {type_url}")]
    UnsupportedPublicKey {
        /// Type url of the rejected key
        type_url: String,
    },

    /// Public key bytes do not decode
    #[error("invalid public key: {reason}")]
    InvalidPublicKey {
        /// Reason for error
        reason: String,
    },

    /// Data type is not allowed where it was used
    #[error("invalid data type {found}: {reason}")]
    InvalidDataType {
        /// Rejected data type
        found: DataType,
        /// Reason for error
        reason: &'static str,
    },

    /// Unknown data type value
    #[error("unknown data type value {0}")]
    UnknownDataType(i32),

    /// Header fails basic validation
    #[error("invalid header: {reason}")]
    InvalidHeader {
        /// Reason for error
        reason: String,
    },

    /// Misbehaviour fails basic validation
    #[error("invalid misbehaviour: {reason}")]
    InvalidMisbehaviour {
        /// Reason for error
        reason: String,
    },

    /// Client state fails basic validation
    #[error("invalid client state: {reason}")]
    InvalidClientState {
        /// Reason for error
        reason: String,
    },

    /// Consensus state fails basic validation
    #[error("invalid consensus state: {reason}")]
    InvalidConsensusState {
        /// Reason for error
        reason: String,
    },

    /// Required protobuf field is not set
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// Protobuf decoding failed
    #[error("protobuf decoding failed: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Error classes a dispatcher maps onto protocol error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Sequence is stale or from the future
    StaleOrFutureSequence,
    /// Header or proof timestamp went backwards
    TimestampRegression,
    /// Cryptographic verification failed
    InvalidSignature,
    /// Message is not a header nor misbehaviour. Indicates a defect upstream.
    UnsupportedProofType,
    /// Misbehaviour signatures verified but cover identical data
    NoEquivocationProven,
    /// Client is frozen
    Frozen,
    /// Message or state is malformed
    Malformed,
}

impl SoloMachineError {
    /// Classifies the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientFrozen => ErrorKind::Frozen,
            Self::SequenceMismatch { .. } | Self::SequenceOverflow { .. } => {
                ErrorKind::StaleOrFutureSequence
            }
            Self::TimestampRegression { .. } | Self::ProofTimestampRegression { .. } => {
                ErrorKind::TimestampRegression
            }
            Self::InvalidSignature { .. } => ErrorKind::InvalidSignature,
            Self::NoEquivocation => ErrorKind::NoEquivocationProven,
            Self::UnsupportedClientMessage { .. } => ErrorKind::UnsupportedProofType,
            Self::UnsupportedPublicKey { .. }
            | Self::InvalidPublicKey { .. }
            | Self::InvalidDataType { .. }
            | Self::UnknownDataType(_)
            | Self::InvalidHeader { .. }
            | Self::InvalidMisbehaviour { .. }
            | Self::InvalidClientState { .. }
            | Self::InvalidConsensusState { .. }
            | Self::MissingField(_)
            | Self::Decode(_) => ErrorKind::Malformed,
        }
    }
}
