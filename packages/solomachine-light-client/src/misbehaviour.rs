//! Misbehaviour detection: the trusted key signed two different statements
//! at the same sequence

use crate::{
    client_state::ClientState,
    error::SoloMachineError,
    proto::{self, DataType},
    sign_bytes::misbehaviour_sign_bytes,
    verify::{verify_signature, SignatureVerifier},
};

/// One signed statement of a misbehaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureAndData {
    /// Encoded signature descriptor
    pub signature: Vec<u8>,
    /// What the data is
    pub data_type: DataType,
    /// Signed data
    pub data: Vec<u8>,
    /// Timestamp the statement was signed at
    pub timestamp: u64,
}

impl SignatureAndData {
    /// Stateless checks on the signed statement
    /// # Errors
    /// Returns an error if a field is empty or unset
    pub fn validate_basic(&self) -> Result<(), SoloMachineError> {
        let reason = if self.signature.is_empty() {
            "signature cannot be empty"
        } else if self.data.is_empty() {
            "data for signature cannot be empty"
        } else if self.data_type == DataType::UninitializedUnspecified {
            "data type cannot be UNSPECIFIED"
        } else if self.timestamp == 0 {
            "timestamp cannot be 0"
        } else {
            return Ok(());
        };

        Err(SoloMachineError::InvalidMisbehaviour {
            reason: reason.into(),
        })
    }
}

/// Two signatures by the same key at the same sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misbehaviour {
    /// Client the misbehaviour is submitted for
    pub client_id: String,
    /// Sequence both statements are signed at
    pub sequence: u64,
    /// First signed statement
    pub signature_one: SignatureAndData,
    /// Second signed statement
    pub signature_two: SignatureAndData,
}

impl Misbehaviour {
    /// Stateless checks on the misbehaviour
    /// # Errors
    /// Returns an error if a field is unset or the signatures over two
    /// different statements are equal
    pub fn validate_basic(&self) -> Result<(), SoloMachineError> {
        if self.client_id.trim().is_empty() {
            return Err(SoloMachineError::InvalidMisbehaviour {
                reason: "client id cannot be empty".into(),
            });
        }
        if self.sequence == 0 {
            return Err(SoloMachineError::InvalidMisbehaviour {
                reason: "sequence cannot be 0".into(),
            });
        }
        self.signature_one.validate_basic()?;
        self.signature_two.validate_basic()?;

        // identical statements sign identically and are left to the equivocation check
        if self.is_equivocation()
            && self.signature_one.signature == self.signature_two.signature
        {
            return Err(SoloMachineError::InvalidMisbehaviour {
                reason: "misbehaviour signatures over different data cannot be equal".into(),
            });
        }

        Ok(())
    }

    /// Whether the two statements differ in what was signed
    #[must_use]
    pub fn is_equivocation(&self) -> bool {
        self.signature_one.data_type != self.signature_two.data_type
            || self.signature_one.data != self.signature_two.data
    }
}

/// Verifies that the misbehaviour proves the current key equivocated
///
/// The misbehaviour timestamps are not compared to the consensus state so
/// that past misbehaviour can still be submitted.
///
/// # Errors
/// Returns an error if:
/// - The misbehaviour fails [`Misbehaviour::validate_basic`]
/// - A statement is a header
/// - Either signature does not verify against the current public key
/// - Both statements cover the same data
pub fn verify_misbehaviour<V: SignatureVerifier>(
    client_state: &ClientState,
    misbehaviour: &Misbehaviour,
    verifier: &V,
) -> Result<(), SoloMachineError> {
    misbehaviour.validate_basic()?;

    verify_signature_and_data(
        client_state,
        misbehaviour.sequence,
        &misbehaviour.signature_one,
        verifier,
        "misbehaviour signature one",
    )?;
    verify_signature_and_data(
        client_state,
        misbehaviour.sequence,
        &misbehaviour.signature_two,
        verifier,
        "misbehaviour signature two",
    )?;

    if !misbehaviour.is_equivocation() {
        return Err(SoloMachineError::NoEquivocation);
    }

    Ok(())
}

fn verify_signature_and_data<V: SignatureVerifier>(
    client_state: &ClientState,
    sequence: u64,
    signature_and_data: &SignatureAndData,
    verifier: &V,
    subject: &'static str,
) -> Result<(), SoloMachineError> {
    let consensus_state = &client_state.consensus_state;
    let sign_bytes =
        misbehaviour_sign_bytes(sequence, signature_and_data, &consensus_state.diversifier)?;

    verify_signature(
        verifier,
        &consensus_state.public_key,
        &sign_bytes,
        &signature_and_data.signature,
    )
    .map_err(|source| SoloMachineError::InvalidSignature { subject, source })
}

/// Verifies the misbehaviour and returns the frozen client state.
///
/// # Errors
/// Returns an error if the client is already frozen or the misbehaviour does
/// not verify, see [`verify_misbehaviour`]
#[tracing::instrument(skip_all, fields(client_id = %misbehaviour.client_id, sequence = misbehaviour.sequence))]
pub fn check_misbehaviour_and_update_state<V: SignatureVerifier>(
    client_state: &ClientState,
    misbehaviour: &Misbehaviour,
    verifier: &V,
) -> Result<ClientState, SoloMachineError> {
    if client_state.is_frozen {
        return Err(SoloMachineError::ClientFrozen);
    }

    verify_misbehaviour(client_state, misbehaviour, verifier)?;

    tracing::warn!("solo machine misbehaviour verified, freezing client");

    Ok(ClientState {
        is_frozen: true,
        ..client_state.clone()
    })
}

impl TryFrom<proto::SignatureAndData> for SignatureAndData {
    type Error = SoloMachineError;

    fn try_from(raw: proto::SignatureAndData) -> Result<Self, Self::Error> {
        Ok(Self {
            signature: raw.signature,
            data_type: DataType::try_from(raw.data_type)
                .map_err(|_| SoloMachineError::UnknownDataType(raw.data_type))?,
            data: raw.data,
            timestamp: raw.timestamp,
        })
    }
}

impl From<SignatureAndData> for proto::SignatureAndData {
    fn from(signature_and_data: SignatureAndData) -> Self {
        Self {
            signature: signature_and_data.signature,
            data_type: signature_and_data.data_type.into(),
            data: signature_and_data.data,
            timestamp: signature_and_data.timestamp,
        }
    }
}

impl TryFrom<proto::Misbehaviour> for Misbehaviour {
    type Error = SoloMachineError;

    fn try_from(raw: proto::Misbehaviour) -> Result<Self, Self::Error> {
        Ok(Self {
            client_id: raw.client_id,
            sequence: raw.sequence,
            signature_one: raw
                .signature_one
                .ok_or(SoloMachineError::MissingField("signature_one"))?
                .try_into()?,
            signature_two: raw
                .signature_two
                .ok_or(SoloMachineError::MissingField("signature_two"))?
                .try_into()?,
        })
    }
}

impl From<Misbehaviour> for proto::Misbehaviour {
    fn from(misbehaviour: Misbehaviour) -> Self {
        Self {
            client_id: misbehaviour.client_id,
            sequence: misbehaviour.sequence,
            signature_one: Some(misbehaviour.signature_one.into()),
            signature_two: Some(misbehaviour.signature_two.into()),
        }
    }
}

#[cfg(test)]
mod check_misbehaviour_and_update_state {
    use rstest::rstest;

    use super::*;
    use crate::{
        error::ErrorKind,
        test_utils::{client_state_for, TestSigner},
        verify::DefaultSignatureVerifier,
    };

    const SEQUENCE: u64 = 8;
    const TIMESTAMP: u64 = 500;

    fn equivocation(signer: &TestSigner, cs: &ClientState) -> Misbehaviour {
        signer.misbehaviour(
            cs,
            SEQUENCE,
            (DataType::PacketCommitment, b"commitment one"),
            (DataType::PacketCommitment, b"commitment two"),
        )
    }

    #[rstest]
    #[case::secp256k1(TestSigner::secp256k1(0xcd))]
    #[case::ed25519(TestSigner::ed25519(0xcd))]
    fn freezes_on_equivocation(#[case] signer: TestSigner) {
        let cs = client_state_for(&signer, SEQUENCE, TIMESTAMP);
        let misbehaviour = equivocation(&signer, &cs);

        let frozen = super::check_misbehaviour_and_update_state(
            &cs,
            &misbehaviour,
            &DefaultSignatureVerifier,
        )
        .unwrap();

        assert!(frozen.is_frozen);
        assert_eq!(frozen.sequence, cs.sequence);
        assert_eq!(frozen.consensus_state, cs.consensus_state);
        assert!(!cs.is_frozen);
    }

    #[test]
    fn freezes_on_different_data_types() {
        let signer = TestSigner::secp256k1(0xcd);
        let cs = client_state_for(&signer, SEQUENCE, TIMESTAMP);
        let misbehaviour = signer.misbehaviour(
            &cs,
            SEQUENCE,
            (DataType::PacketCommitment, b"same"),
            (DataType::PacketAcknowledgement, b"same"),
        );

        assert!(super::check_misbehaviour_and_update_state(
            &cs,
            &misbehaviour,
            &DefaultSignatureVerifier
        )
        .is_ok());
    }

    #[rstest]
    #[case::secp256k1(TestSigner::secp256k1(0xcd))]
    #[case::ed25519(TestSigner::ed25519(0xcd))]
    fn fails_on_identical_statements(#[case] signer: TestSigner) {
        let cs = client_state_for(&signer, SEQUENCE, TIMESTAMP);
        let misbehaviour = signer.misbehaviour(
            &cs,
            SEQUENCE,
            (DataType::PacketCommitment, b"same"),
            (DataType::PacketCommitment, b"same"),
        );
        // deterministic signing over identical sign bytes
        assert_eq!(
            misbehaviour.signature_one.signature,
            misbehaviour.signature_two.signature
        );

        let err = super::check_misbehaviour_and_update_state(
            &cs,
            &misbehaviour,
            &DefaultSignatureVerifier,
        )
        .unwrap_err();
        assert_eq!(err, SoloMachineError::NoEquivocation);
        assert_eq!(err.kind(), ErrorKind::NoEquivocationProven);
    }

    #[test]
    fn fails_on_identical_data_at_other_timestamps() {
        let signer = TestSigner::secp256k1(0xcd);
        let cs = client_state_for(&signer, SEQUENCE, TIMESTAMP);
        let mut misbehaviour = signer.misbehaviour(
            &cs,
            SEQUENCE,
            (DataType::PacketCommitment, b"same"),
            (DataType::PacketCommitment, b"same"),
        );
        misbehaviour.signature_two = signer.signature_and_data(
            &cs,
            SEQUENCE,
            TIMESTAMP + 1,
            DataType::PacketCommitment,
            b"same",
        );

        let res = super::check_misbehaviour_and_update_state(
            &cs,
            &misbehaviour,
            &DefaultSignatureVerifier,
        );
        assert_eq!(res, Err(SoloMachineError::NoEquivocation));
    }

    #[test]
    fn fails_on_identical_statements_by_rogue_key() {
        let signer = TestSigner::ed25519(0xcd);
        let rogue = TestSigner::ed25519(0x1f);
        let cs = client_state_for(&signer, SEQUENCE, TIMESTAMP);
        let misbehaviour = rogue.misbehaviour(
            &cs,
            SEQUENCE,
            (DataType::PacketCommitment, b"same"),
            (DataType::PacketCommitment, b"same"),
        );

        let res = super::check_misbehaviour_and_update_state(
            &cs,
            &misbehaviour,
            &DefaultSignatureVerifier,
        );
        assert!(matches!(
            res,
            Err(SoloMachineError::InvalidSignature {
                subject: "misbehaviour signature one",
                ..
            })
        ));
    }

    #[test]
    fn fails_on_header_data_type() {
        let signer = TestSigner::secp256k1(0xcd);
        let cs = client_state_for(&signer, SEQUENCE, TIMESTAMP);
        let mut misbehaviour = equivocation(&signer, &cs);
        misbehaviour.signature_one.data_type = DataType::Header;

        let res = super::check_misbehaviour_and_update_state(
            &cs,
            &misbehaviour,
            &DefaultSignatureVerifier,
        );
        assert!(matches!(
            res,
            Err(SoloMachineError::InvalidDataType {
                found: DataType::Header,
                ..
            })
        ));
    }

    #[test]
    fn fails_on_rogue_second_signature() {
        let signer = TestSigner::secp256k1(0xcd);
        let rogue = TestSigner::secp256k1(0x1f);
        let cs = client_state_for(&signer, SEQUENCE, TIMESTAMP);
        let mut misbehaviour = equivocation(&signer, &cs);
        misbehaviour.signature_two = rogue.signature_and_data(
            &cs,
            SEQUENCE,
            TIMESTAMP,
            DataType::PacketCommitment,
            b"commitment two",
        );

        let res = super::check_misbehaviour_and_update_state(
            &cs,
            &misbehaviour,
            &DefaultSignatureVerifier,
        );
        assert!(matches!(
            res,
            Err(SoloMachineError::InvalidSignature {
                subject: "misbehaviour signature two",
                ..
            })
        ));
    }

    #[test]
    fn fails_on_signatures_for_other_sequence() {
        let signer = TestSigner::ed25519(0xcd);
        let cs = client_state_for(&signer, SEQUENCE, TIMESTAMP);
        let mut misbehaviour = equivocation(&signer, &cs);
        misbehaviour.sequence = SEQUENCE + 1;

        let res = super::check_misbehaviour_and_update_state(
            &cs,
            &misbehaviour,
            &DefaultSignatureVerifier,
        );
        assert!(matches!(
            res,
            Err(SoloMachineError::InvalidSignature {
                subject: "misbehaviour signature one",
                ..
            })
        ));
    }

    #[test]
    fn fails_on_frozen() {
        let signer = TestSigner::secp256k1(0xcd);
        let mut cs = client_state_for(&signer, SEQUENCE, TIMESTAMP);
        let misbehaviour = equivocation(&signer, &cs);
        cs.is_frozen = true;

        let res = super::check_misbehaviour_and_update_state(
            &cs,
            &misbehaviour,
            &DefaultSignatureVerifier,
        );
        assert_eq!(res, Err(SoloMachineError::ClientFrozen));
    }

    #[test]
    fn accepts_past_misbehaviour() {
        let signer = TestSigner::secp256k1(0xcd);
        let cs = client_state_for(&signer, SEQUENCE, TIMESTAMP);
        let misbehaviour = signer.misbehaviour(
            &cs,
            SEQUENCE - 3,
            (DataType::ClientState, b"state one"),
            (DataType::ClientState, b"state two"),
        );

        assert!(super::check_misbehaviour_and_update_state(
            &cs,
            &misbehaviour,
            &DefaultSignatureVerifier
        )
        .is_ok());
    }
}
