//! Protobuf wire types of the solo machine client.
//!
//! Field numbers follow `ibc.lightclients.solomachine.v2`, so the bytes are
//! compatible with counterparties producing that encoding.
#![allow(clippy::derive_partial_eq_without_eq, missing_docs)]

use ibc_proto::google::protobuf::Any;

/// Type URL of an encoded [`ClientState`]
pub const CLIENT_STATE_TYPE_URL: &str = "/ibc.lightclients.solomachine.v2.ClientState";
/// Type URL of an encoded [`ConsensusState`]
pub const CONSENSUS_STATE_TYPE_URL: &str = "/ibc.lightclients.solomachine.v2.ConsensusState";
/// Type URL of an encoded [`Header`]
pub const HEADER_TYPE_URL: &str = "/ibc.lightclients.solomachine.v2.Header";
/// Type URL of an encoded [`Misbehaviour`]
pub const MISBEHAVIOUR_TYPE_URL: &str = "/ibc.lightclients.solomachine.v2.Misbehaviour";
/// Type URL of a secp256k1 [`PubKey`]
pub const SECP256K1_PUB_KEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";
/// Type URL of an ed25519 [`PubKey`]
pub const ED25519_PUB_KEY_TYPE_URL: &str = "/cosmos.crypto.ed25519.PubKey";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientState {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    #[prost(bool, tag = "2")]
    pub is_frozen: bool,
    #[prost(message, optional, tag = "3")]
    pub consensus_state: ::core::option::Option<ConsensusState>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConsensusState {
    #[prost(message, optional, tag = "1")]
    pub public_key: ::core::option::Option<Any>,
    #[prost(string, tag = "2")]
    pub diversifier: ::prost::alloc::string::String,
    #[prost(uint64, tag = "3")]
    pub timestamp: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Header {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    #[prost(uint64, tag = "2")]
    pub timestamp: u64,
    #[prost(bytes = "vec", tag = "3")]
    pub signature: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "4")]
    pub new_public_key: ::core::option::Option<Any>,
    #[prost(string, tag = "5")]
    pub new_diversifier: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Misbehaviour {
    #[prost(string, tag = "1")]
    pub client_id: ::prost::alloc::string::String,
    #[prost(uint64, tag = "2")]
    pub sequence: u64,
    #[prost(message, optional, tag = "3")]
    pub signature_one: ::core::option::Option<SignatureAndData>,
    #[prost(message, optional, tag = "4")]
    pub signature_two: ::core::option::Option<SignatureAndData>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignatureAndData {
    #[prost(bytes = "vec", tag = "1")]
    pub signature: ::prost::alloc::vec::Vec<u8>,
    #[prost(enumeration = "DataType", tag = "2")]
    pub data_type: i32,
    #[prost(bytes = "vec", tag = "3")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag = "4")]
    pub timestamp: u64,
}

/// Signature over state together with the timestamp it was produced at.
/// Used as the proof of membership and non-membership checks.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TimestampedSignatureData {
    #[prost(bytes = "vec", tag = "1")]
    pub signature_data: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub timestamp: u64,
}

/// The bytes a solo machine signs.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignBytes {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    #[prost(uint64, tag = "2")]
    pub timestamp: u64,
    #[prost(string, tag = "3")]
    pub diversifier: ::prost::alloc::string::String,
    #[prost(enumeration = "DataType", tag = "4")]
    pub data_type: i32,
    #[prost(bytes = "vec", tag = "5")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HeaderData {
    #[prost(message, optional, tag = "1")]
    pub new_pub_key: ::core::option::Option<Any>,
    #[prost(string, tag = "2")]
    pub new_diversifier: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PacketCommitmentData {
    #[prost(bytes = "vec", tag = "1")]
    pub path: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub commitment: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PacketAcknowledgementData {
    #[prost(bytes = "vec", tag = "1")]
    pub path: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub acknowledgement: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PacketReceiptAbsenceData {
    #[prost(bytes = "vec", tag = "1")]
    pub path: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NextSequenceRecvData {
    #[prost(bytes = "vec", tag = "1")]
    pub path: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub next_seq_recv: u64,
}

/// `cosmos.crypto.{secp256k1,ed25519}.PubKey`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PubKey {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}

/// `cosmos.tx.signing.v1beta1.SignatureDescriptor.Data.Single`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SingleSignatureData {
    #[prost(int32, tag = "1")]
    pub mode: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub signature: ::prost::alloc::vec::Vec<u8>,
}

/// Discriminates what a signature is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum DataType {
    UninitializedUnspecified = 0,
    ClientState = 1,
    ConsensusState = 2,
    ConnectionState = 3,
    ChannelState = 4,
    PacketCommitment = 5,
    PacketAcknowledgement = 6,
    PacketReceiptAbsence = 7,
    NextSequenceRecv = 8,
    Header = 9,
}

impl DataType {
    /// Protobuf enum value name
    #[must_use]
    pub const fn as_str_name(self) -> &'static str {
        match self {
            Self::UninitializedUnspecified => "DATA_TYPE_UNINITIALIZED_UNSPECIFIED",
            Self::ClientState => "DATA_TYPE_CLIENT_STATE",
            Self::ConsensusState => "DATA_TYPE_CONSENSUS_STATE",
            Self::ConnectionState => "DATA_TYPE_CONNECTION_STATE",
            Self::ChannelState => "DATA_TYPE_CHANNEL_STATE",
            Self::PacketCommitment => "DATA_TYPE_PACKET_COMMITMENT",
            Self::PacketAcknowledgement => "DATA_TYPE_PACKET_ACKNOWLEDGEMENT",
            Self::PacketReceiptAbsence => "DATA_TYPE_PACKET_RECEIPT_ABSENCE",
            Self::NextSequenceRecv => "DATA_TYPE_NEXT_SEQUENCE_RECV",
            Self::Header => "DATA_TYPE_HEADER",
        }
    }

    /// Whether signatures of this type are statements about counterparty state,
    /// as opposed to header updates or the unset value.
    #[must_use]
    pub const fn is_statement(self) -> bool {
        !matches!(self, Self::UninitializedUnspecified | Self::Header)
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str_name())
    }
}
