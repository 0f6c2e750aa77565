#![doc = "Solo machine light client for IBC"]
#![deny(clippy::nursery, clippy::pedantic, warnings, missing_docs)]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod client_message;
pub mod client_state;
pub mod consensus_state;
pub mod error;
pub mod header;
pub mod membership;
pub mod misbehaviour;
pub mod proto;
pub mod public_key;
pub mod sign_bytes;
pub mod update;
pub mod verify;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client_state::{status, ClientState, Status};
pub use consensus_state::ConsensusState;
pub use error::{ErrorKind, SoloMachineError};
pub use header::Header;
pub use misbehaviour::{Misbehaviour, SignatureAndData};
pub use public_key::PublicKey;
pub use verify::{DefaultSignatureVerifier, InvalidSignature, SignatureVerifier};
