//! Messages a dispatcher hands to the solo machine client

use ibc_proto::google::protobuf::Any;
use prost::Message;

use crate::{
    client_state::ClientState,
    consensus_state::ConsensusState,
    error::SoloMachineError,
    header::Header,
    misbehaviour::{check_misbehaviour_and_update_state, Misbehaviour},
    proto::{self, HEADER_TYPE_URL, MISBEHAVIOUR_TYPE_URL},
    update::check_header_and_update_state,
    verify::SignatureVerifier,
};

/// A client message is either a header or a misbehaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// Rotates the key of the solo machine
    Header(Header),
    /// Proof that the solo machine signed conflicting statements
    Misbehaviour(Misbehaviour),
}

impl TryFrom<Any> for ClientMessage {
    type Error = SoloMachineError;

    fn try_from(any: Any) -> Result<Self, Self::Error> {
        match any.type_url.as_str() {
            HEADER_TYPE_URL => Ok(Self::Header(
                proto::Header::decode(any.value.as_slice())?.try_into()?,
            )),
            MISBEHAVIOUR_TYPE_URL => Ok(Self::Misbehaviour(
                proto::Misbehaviour::decode(any.value.as_slice())?.try_into()?,
            )),
            _ => Err(SoloMachineError::UnsupportedClientMessage {
                type_url: any.type_url,
            }),
        }
    }
}

impl From<ClientMessage> for Any {
    fn from(message: ClientMessage) -> Self {
        match message {
            ClientMessage::Header(header) => Self {
                type_url: HEADER_TYPE_URL.to_string(),
                value: proto::Header::from(header).encode_to_vec(),
            },
            ClientMessage::Misbehaviour(misbehaviour) => Self {
                type_url: MISBEHAVIOUR_TYPE_URL.to_string(),
                value: proto::Misbehaviour::from(misbehaviour).encode_to_vec(),
            },
        }
    }
}

/// The new state snapshots after a client message was accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A header was applied
    Updated {
        /// Client state with the next sequence
        client_state: ClientState,
        /// Consensus state installed by the header
        consensus_state: ConsensusState,
    },
    /// Misbehaviour was proven
    Frozen {
        /// The frozen client state
        client_state: ClientState,
    },
}

/// Applies a client message to the client state
/// # Errors
/// Returns the error of the header or misbehaviour check
pub fn update_client<V: SignatureVerifier>(
    client_state: &ClientState,
    message: ClientMessage,
    verifier: &V,
) -> Result<UpdateOutcome, SoloMachineError> {
    match message {
        ClientMessage::Header(header) => {
            let (client_state, consensus_state) =
                check_header_and_update_state(client_state, header, verifier)?;
            Ok(UpdateOutcome::Updated {
                client_state,
                consensus_state,
            })
        }
        ClientMessage::Misbehaviour(misbehaviour) => {
            let client_state =
                check_misbehaviour_and_update_state(client_state, &misbehaviour, verifier)?;
            Ok(UpdateOutcome::Frozen { client_state })
        }
    }
}


#[cfg(test)]
mod update_client {
    use super::*;
    use crate::{
        proto::DataType,
        test_utils::{client_state_for, TestSigner},
        verify::DefaultSignatureVerifier,
    };

    #[test]
    fn header_updates() {
        let signer = TestSigner::secp256k1(0xcd);
        let cs = client_state_for(&signer, 4, 10);
        let header = signer.header(4, 11, &cs, &signer, "next");

        let outcome =
            super::update_client(&cs, ClientMessage::Header(header), &DefaultSignatureVerifier)
                .unwrap();
        let UpdateOutcome::Updated {
            client_state,
            consensus_state,
        } = outcome
        else {
            panic!("expected update, got {outcome:?}");
        };
        assert_eq!(client_state.sequence, 5);
        assert_eq!(consensus_state.timestamp, 11);
    }

    #[test]
    fn misbehaviour_freezes() {
        let signer = TestSigner::ed25519(0xcd);
        let cs = client_state_for(&signer, 4, 10);
        let misbehaviour = signer.misbehaviour(
            &cs,
            4,
            (DataType::ConnectionState, b"open"),
            (DataType::ConnectionState, b"closed"),
        );

        let outcome = super::update_client(
            &cs,
            ClientMessage::Misbehaviour(misbehaviour),
            &DefaultSignatureVerifier,
        )
        .unwrap();
        assert!(matches!(
            outcome,
            UpdateOutcome::Frozen { client_state } if client_state.is_frozen
        ));
    }
}
