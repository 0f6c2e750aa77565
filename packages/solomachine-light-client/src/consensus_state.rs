//! This module defines [`ConsensusState`].

use serde::{Deserialize, Serialize};

use crate::{error::SoloMachineError, header::is_blank, proto, public_key::PublicKey};

/// The consensus state of the solo machine: the key that signs the next
/// update and the namespace its signatures are scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    /// The only key authorized to sign the next update
    pub public_key: PublicKey,
    /// Salt included in every sign bytes
    pub diversifier: String,
    /// Timestamp of the update that produced this state
    pub timestamp: u64,
}

impl ConsensusState {
    /// Stateless checks on the consensus state
    /// # Errors
    /// Returns an error if the timestamp is zero or the diversifier is blank
    pub fn validate_basic(&self) -> Result<(), SoloMachineError> {
        if self.timestamp == 0 {
            return Err(SoloMachineError::InvalidConsensusState {
                reason: "timestamp cannot be 0".into(),
            });
        }
        if is_blank(&self.diversifier) {
            return Err(SoloMachineError::InvalidConsensusState {
                reason: "diversifier cannot contain only spaces".into(),
            });
        }

        Ok(())
    }
}

impl TryFrom<proto::ConsensusState> for ConsensusState {
    type Error = SoloMachineError;

    fn try_from(raw: proto::ConsensusState) -> Result<Self, Self::Error> {
        Ok(Self {
            public_key: raw
                .public_key
                .ok_or(SoloMachineError::MissingField("public_key"))?
                .try_into()?,
            diversifier: raw.diversifier,
            timestamp: raw.timestamp,
        })
    }
}

impl From<ConsensusState> for proto::ConsensusState {
    fn from(consensus_state: ConsensusState) -> Self {
        Self {
            public_key: Some(consensus_state.public_key.into()),
            diversifier: consensus_state.diversifier,
            timestamp: consensus_state.timestamp,
        }
    }
}
