//! Solo machine light client update logic

use crate::{
    client_state::ClientState,
    consensus_state::ConsensusState,
    error::SoloMachineError,
    header::Header,
    verify::{verify_header, SignatureVerifier},
};

/// Applies a verified header: authority moves to the new key and the
/// sequence advances by one.
///
/// Must only be called with a header accepted by [`verify_header`].
/// # Errors
/// Returns an error if the client sequence cannot advance
pub fn update_state(
    client_state: &ClientState,
    header: Header,
) -> Result<(ClientState, ConsensusState), SoloMachineError> {
    let sequence = client_state.next_sequence()?;

    let new_consensus_state = ConsensusState {
        public_key: header.new_public_key,
        diversifier: header.new_diversifier,
        timestamp: header.timestamp,
    };

    let new_client_state = ClientState {
        sequence,
        is_frozen: client_state.is_frozen,
        consensus_state: new_consensus_state.clone(),
    };

    Ok((new_client_state, new_consensus_state))
}

/// Verifies the header and returns the next client and consensus state.
///
/// Either both new states are returned or an error, the inputs are never
/// modified. The caller must persist both states atomically and serialize
/// concurrent updates of the same client.
///
/// # Errors
/// Returns an error if the header does not verify, see [`verify_header`], or
/// the client sequence cannot advance
#[tracing::instrument(skip_all, fields(sequence = client_state.sequence))]
pub fn check_header_and_update_state<V: SignatureVerifier>(
    client_state: &ClientState,
    header: Header,
    verifier: &V,
) -> Result<(ClientState, ConsensusState), SoloMachineError> {
    verify_header(client_state, &header, verifier)?;

    let (new_client_state, new_consensus_state) = update_state(client_state, header)?;
    tracing::debug!(
        new_sequence = new_client_state.sequence,
        timestamp = new_consensus_state.timestamp,
        "solo machine header accepted"
    );

    Ok((new_client_state, new_consensus_state))
}
