//! Solo machine client state

use serde::{Deserialize, Serialize};

use crate::{consensus_state::ConsensusState, error::SoloMachineError, proto};

/// Client state of a solo machine. Snapshots are passed in by the caller and
/// new snapshots are returned, the caller persists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    /// Sequence the next header or proof must be signed at
    pub sequence: u64,
    /// Whether the client is frozen due to misbehaviour
    pub is_frozen: bool,
    /// The currently trusted consensus state
    pub consensus_state: ConsensusState,
}

impl ClientState {
    /// Construct an active client state
    #[must_use]
    pub const fn new(sequence: u64, consensus_state: ConsensusState) -> Self {
        Self {
            sequence,
            is_frozen: false,
            consensus_state,
        }
    }

    /// Stateless checks on the client state
    /// # Errors
    /// Returns an error if the sequence is zero or the consensus state is invalid
    pub fn validate_basic(&self) -> Result<(), SoloMachineError> {
        if self.sequence == 0 {
            return Err(SoloMachineError::InvalidClientState {
                reason: "sequence cannot be 0".into(),
            });
        }
        self.consensus_state.validate_basic()
    }

    /// The sequence after the current one is consumed
    /// # Errors
    /// Returns an error if the sequence is already `u64::MAX`
    pub const fn next_sequence(&self) -> Result<u64, SoloMachineError> {
        match self.sequence.checked_add(1) {
            Some(sequence) => Ok(sequence),
            None => Err(SoloMachineError::SequenceOverflow {
                sequence: self.sequence,
            }),
        }
    }
}

/// The client status types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The client accepts updates and proofs
    Active,
    /// The client is frozen
    Frozen,
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Frozen => write!(f, "Frozen"),
        }
    }
}

/// Status of the client
#[must_use]
pub const fn status(client_state: &ClientState) -> Status {
    if client_state.is_frozen {
        Status::Frozen
    } else {
        Status::Active
    }
}

impl TryFrom<proto::ClientState> for ClientState {
    type Error = SoloMachineError;

    fn try_from(raw: proto::ClientState) -> Result<Self, Self::Error> {
        Ok(Self {
            sequence: raw.sequence,
            is_frozen: raw.is_frozen,
            consensus_state: raw
                .consensus_state
                .ok_or(SoloMachineError::MissingField("consensus_state"))?
                .try_into()?,
        })
    }
}

impl From<ClientState> for proto::ClientState {
    fn from(client_state: ClientState) -> Self {
        Self {
            sequence: client_state.sequence,
            is_frozen: client_state.is_frozen,
            consensus_state: Some(client_state.consensus_state.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;
    use crate::test_utils::{client_state_for, TestSigner};

    #[test]
    fn status_follows_frozen_flag() {
        let mut cs = client_state_for(&TestSigner::secp256k1(0xcd), 1, 1);
        assert_eq!(status(&cs), Status::Active);
        cs.is_frozen = true;
        assert_eq!(status(&cs), Status::Frozen);
        assert_eq!(status(&cs).to_string(), "Frozen");
    }

    #[test]
    fn next_sequence_fails_on_max() {
        let cs = client_state_for(&TestSigner::ed25519(0xcd), u64::MAX, 1);
        assert_eq!(
            cs.next_sequence(),
            Err(SoloMachineError::SequenceOverflow { sequence: u64::MAX })
        );
        assert_eq!(
            cs.next_sequence().unwrap_err().kind(),
            crate::error::ErrorKind::StaleOrFutureSequence
        );

        let cs = client_state_for(&TestSigner::ed25519(0xcd), u64::MAX - 1, 1);
        assert_eq!(cs.next_sequence(), Ok(u64::MAX));
    }

    #[test]
    fn validate_basic_fails_on_zero_sequence() {
        let cs = client_state_for(&TestSigner::secp256k1(0xcd), 0, 1);
        assert!(matches!(
            cs.validate_basic(),
            Err(SoloMachineError::InvalidClientState { .. })
        ));
    }

    #[test]
    fn validate_basic_checks_consensus_state() {
        let cs = client_state_for(&TestSigner::ed25519(0xcd), 1, 0);
        assert!(matches!(
            cs.validate_basic(),
            Err(SoloMachineError::InvalidConsensusState { .. })
        ));
    }

    #[test]
    fn decodes_from_protobuf() {
        let cs = client_state_for(&TestSigner::ed25519(0xcd), 7, 42);
        let bz = proto::ClientState::from(cs.clone()).encode_to_vec();
        let decoded = proto::ClientState::decode(bz.as_slice()).unwrap();
        assert_eq!(ClientState::try_from(decoded).unwrap(), cs);
    }

    #[test]
    fn persists_as_json() {
        let cs = client_state_for(&TestSigner::secp256k1(0xcd), 7, 42);
        let json = serde_json::to_string(&cs).unwrap();
        let back: ClientState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cs);
    }

    #[test]
    fn decode_fails_without_consensus_state() {
        let raw = proto::ClientState {
            sequence: 1,
            is_frozen: false,
            consensus_state: None,
        };
        assert_eq!(
            ClientState::try_from(raw),
            Err(SoloMachineError::MissingField("consensus_state"))
        );
    }
}
