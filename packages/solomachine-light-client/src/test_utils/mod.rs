//! Test utilities for the solo machine light client

#[cfg(any(test, feature = "test-utils"))]
pub use fixtures::*;

#[allow(
    missing_docs,
    clippy::missing_panics_doc,
    clippy::large_enum_variant,
    clippy::needless_pass_by_value
)]
#[cfg(any(test, feature = "test-utils"))]
mod fixtures {
    use prost::Message;

    use crate::{
        client_state::ClientState,
        consensus_state::ConsensusState,
        header::Header,
        membership::Membership,
        misbehaviour::{Misbehaviour, SignatureAndData},
        proto::{self, DataType},
        public_key::PublicKey,
        sign_bytes::{header_sign_bytes, sign_bytes, statement_sign_bytes},
    };

    pub const DIVERSIFIER: &str = "diversifier";
    pub const CLIENT_ID: &str = "06-solomachine-0";

    /// Signature mode of a direct single signer
    pub const SIGN_MODE_DIRECT: i32 = 1;

    /// A solo machine signing key
    #[derive(Clone, Debug)]
    pub enum TestSigner {
        Secp256k1(k256::ecdsa::SigningKey),
        Ed25519(ed25519_dalek::SigningKey),
    }

    impl TestSigner {
        #[must_use]
        pub fn secp256k1(seed: u8) -> Self {
            Self::Secp256k1(k256::ecdsa::SigningKey::from_slice(&[seed; 32]).expect("valid key"))
        }

        #[must_use]
        pub fn ed25519(seed: u8) -> Self {
            Self::Ed25519(ed25519_dalek::SigningKey::from_bytes(&[seed; 32]))
        }

        #[must_use]
        pub fn public_key(&self) -> PublicKey {
            match self {
                Self::Secp256k1(key) => PublicKey::Secp256k1(*key.verifying_key()),
                Self::Ed25519(key) => PublicKey::Ed25519(key.verifying_key()),
            }
        }

        /// Raw signature bytes over `message`
        #[must_use]
        pub fn sign_raw(&self, message: &[u8]) -> Vec<u8> {
            match self {
                Self::Secp256k1(key) => {
                    use k256::ecdsa::signature::Signer;
                    let signature: k256::ecdsa::Signature = key.sign(message);
                    signature.to_bytes().to_vec()
                }
                Self::Ed25519(key) => {
                    use ed25519_dalek::Signer;
                    key.sign(message).to_bytes().to_vec()
                }
            }
        }

        /// Encoded single signature descriptor over `message`
        #[must_use]
        pub fn sign(&self, message: &[u8]) -> Vec<u8> {
            proto::SingleSignatureData {
                mode: SIGN_MODE_DIRECT,
                signature: self.sign_raw(message),
            }
            .encode_to_vec()
        }

        /// A header handing authority to `new_key`, signed under the
        /// diversifier of `client_state`
        #[must_use]
        pub fn header(
            &self,
            sequence: u64,
            timestamp: u64,
            client_state: &ClientState,
            new_key: &Self,
            new_diversifier: &str,
        ) -> Header {
            let mut header = Header {
                sequence,
                timestamp,
                signature: vec![],
                new_public_key: new_key.public_key(),
                new_diversifier: new_diversifier.to_string(),
            };
            header.signature = self.sign(&header_sign_bytes(
                &header,
                &client_state.consensus_state.diversifier,
            ));
            header
        }

        #[must_use]
        pub fn signature_and_data(
            &self,
            client_state: &ClientState,
            sequence: u64,
            timestamp: u64,
            data_type: DataType,
            data: &[u8],
        ) -> SignatureAndData {
            let bytes = sign_bytes(
                sequence,
                timestamp,
                &client_state.consensus_state.diversifier,
                data_type,
                data.to_vec(),
            );
            SignatureAndData {
                signature: self.sign(&bytes),
                data_type,
                data: data.to_vec(),
                timestamp,
            }
        }

        /// Two statements signed at `sequence` and the consensus timestamp
        #[must_use]
        pub fn misbehaviour<A: AsRef<[u8]>, B: AsRef<[u8]>>(
            &self,
            client_state: &ClientState,
            sequence: u64,
            one: (DataType, A),
            two: (DataType, B),
        ) -> Misbehaviour {
            let timestamp = client_state.consensus_state.timestamp;
            Misbehaviour {
                client_id: CLIENT_ID.to_string(),
                sequence,
                signature_one: self.signature_and_data(
                    client_state,
                    sequence,
                    timestamp,
                    one.0,
                    one.1.as_ref(),
                ),
                signature_two: self.signature_and_data(
                    client_state,
                    sequence,
                    timestamp,
                    two.0,
                    two.1.as_ref(),
                ),
            }
        }

        /// Encoded timestamped proof of `membership` at the client sequence
        #[must_use]
        pub fn membership_proof(
            &self,
            client_state: &ClientState,
            timestamp: u64,
            membership: Membership,
        ) -> Vec<u8> {
            let data_type = membership.data_type();
            self.statement_proof(client_state, timestamp, data_type, membership.encode_data())
        }

        /// Encoded timestamped proof that no receipt exists at `path`
        #[must_use]
        pub fn non_membership_proof(
            &self,
            client_state: &ClientState,
            timestamp: u64,
            path: Vec<u8>,
        ) -> Vec<u8> {
            self.statement_proof(
                client_state,
                timestamp,
                DataType::PacketReceiptAbsence,
                proto::PacketReceiptAbsenceData { path }.encode_to_vec(),
            )
        }

        fn statement_proof(
            &self,
            client_state: &ClientState,
            timestamp: u64,
            data_type: DataType,
            data: Vec<u8>,
        ) -> Vec<u8> {
            let bytes = statement_sign_bytes(
                client_state.sequence,
                timestamp,
                &client_state.consensus_state.diversifier,
                data_type,
                data,
            )
            .expect("statement data type");
            proto::TimestampedSignatureData {
                signature_data: self.sign(&bytes),
                timestamp,
            }
            .encode_to_vec()
        }
    }

    /// An active client controlled by `signer`
    #[must_use]
    pub fn client_state_for(signer: &TestSigner, sequence: u64, timestamp: u64) -> ClientState {
        ClientState::new(
            sequence,
            ConsensusState {
                public_key: signer.public_key(),
                diversifier: DIVERSIFIER.to_string(),
                timestamp,
            },
        )
    }
}
