use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;
use crate::registry::ServiceRegistry;

/// Numeric iPizza service code, e.g. `1002` for a payment request.
///
/// Only the constants below exist; raw strings go through [`ServiceCode::parse`].
/// `PAYMENT_CANCEL` and `PAYMENT_ERROR` carry the same literal and compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceCode(&'static str);

impl ServiceCode {
    /// IB authentication request (latvian SEB).
    pub const IB_AUTHENTICATE_REQUEST: Self = Self("0005");
    /// IB authentication success (latvian SEB).
    pub const IB_AUTHENTICATE_SUCCESS: Self = Self("0001");
    /// IB authentication denied (latvian SEB).
    pub const IB_AUTHENTICATE_DENIED: Self = Self("0008");

    pub const PAYMENT_REQUEST: Self = Self("1002");
    pub const AUTHENTICATE_REQUEST: Self = Self("4001");

    pub const PAYMENT_SUCCESS: Self = Self("1101");
    pub const PAYMENT_CANCEL: Self = Self("1901");
    pub const PAYMENT_ERROR: Self = Self("1901");
    pub const AUTHENTICATE_SUCCESS: Self = Self("3002");

    const ALL: [Self; 8] = [
        Self::IB_AUTHENTICATE_REQUEST,
        Self::IB_AUTHENTICATE_SUCCESS,
        Self::IB_AUTHENTICATE_DENIED,
        Self::PAYMENT_REQUEST,
        Self::AUTHENTICATE_REQUEST,
        Self::PAYMENT_SUCCESS,
        Self::PAYMENT_CANCEL,
        Self::AUTHENTICATE_SUCCESS,
    ];

    /// Every distinct known service code.
    pub fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// Resolve a raw code by exact match.
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.0 == raw)
            .ok_or_else(|| RegistryError::UnknownServiceCode(raw.to_string()))
    }

    /// The literal code as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Whether the merchant sends this message (as opposed to receiving it from the bank).
    pub fn is_request(&self) -> bool {
        [
            Self::PAYMENT_REQUEST,
            Self::AUTHENTICATE_REQUEST,
            Self::IB_AUTHENTICATE_REQUEST,
        ]
        .contains(self)
    }
}

impl AsRef<str> for ServiceCode {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for ServiceCode {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ServiceCode {
    type Error = RegistryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for ServiceCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for ServiceCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Base protocol fields (`VK_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ServiceId,
    ProtocolVersion,
    SellerId,
    SellerIdResponse,
    OrderId,
    TransactionId,
    Sum,
    Currency,
    SellerBankAccResponse,
    SellerNameResponse,
    SenderBankAcc,
    SenderName,
    OrderReference,
    Description,
    TransactionDate,
    /// Reply mode flag of an authentication request.
    Reply,
    /// Return URL.
    SuccessUrl,
    Date,
    Time,
    User,
    Info,
}

impl Field {
    const ALL: [Self; 21] = [
        Self::ServiceId,
        Self::ProtocolVersion,
        Self::SellerId,
        Self::SellerIdResponse,
        Self::OrderId,
        Self::TransactionId,
        Self::Sum,
        Self::Currency,
        Self::SellerBankAccResponse,
        Self::SellerNameResponse,
        Self::SenderBankAcc,
        Self::SenderName,
        Self::OrderReference,
        Self::Description,
        Self::TransactionDate,
        Self::Reply,
        Self::SuccessUrl,
        Self::Date,
        Self::Time,
        Self::User,
        Self::Info,
    ];

    /// Parameter name on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::ServiceId => "VK_SERVICE",
            Self::ProtocolVersion => "VK_VERSION",
            Self::SellerId => "VK_SND_ID",
            Self::SellerIdResponse => "VK_REC_ID",
            Self::OrderId => "VK_STAMP",
            Self::TransactionId => "VK_T_NO",
            Self::Sum => "VK_AMOUNT",
            Self::Currency => "VK_CURR",
            Self::SellerBankAccResponse => "VK_REC_ACC",
            Self::SellerNameResponse => "VK_REC_NAME",
            Self::SenderBankAcc => "VK_SND_ACC",
            Self::SenderName => "VK_SND_NAME",
            Self::OrderReference => "VK_REF",
            Self::Description => "VK_MSG",
            Self::TransactionDate => "VK_T_DATE",
            Self::Reply => "VK_REPLY",
            Self::SuccessUrl => "VK_RETURN",
            Self::Date => "VK_DATE",
            Self::Time => "VK_TIME",
            Self::User => "VK_USER",
            Self::Info => "VK_INFO",
        }
    }

    /// Parse from the wire name.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.wire_name() == name)
    }
}

/// Internet-banking authentication fields (`IB_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IbField {
    SellerId,
    ServiceId,
    UserLang,
    SellerIdResponse,
    User,
    Date,
    Time,
    UserInfo,
    ProtocolVersion,
    /// Sent by the bank but never part of the e-signature base string.
    Crc,
    /// Sent by the bank but never part of the e-signature base string.
    FromServer,
}

impl IbField {
    const ALL: [Self; 11] = [
        Self::SellerId,
        Self::ServiceId,
        Self::UserLang,
        Self::SellerIdResponse,
        Self::User,
        Self::Date,
        Self::Time,
        Self::UserInfo,
        Self::ProtocolVersion,
        Self::Crc,
        Self::FromServer,
    ];

    /// Parameter name on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::SellerId => "IB_SND_ID",
            Self::ServiceId => "IB_SERVICE",
            Self::UserLang => "IB_LANG",
            Self::SellerIdResponse => "IB_REC_ID",
            Self::User => "IB_USER",
            Self::Date => "IB_DATE",
            Self::Time => "IB_TIME",
            Self::UserInfo => "IB_USER_INFO",
            Self::ProtocolVersion => "IB_VERSION",
            Self::Crc => "IB_CRC",
            Self::FromServer => "IB_FROM_SERVER",
        }
    }

    /// Parse from the wire name.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.wire_name() == name)
    }
}

/// A field from either vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Vk(Field),
    Ib(IbField),
}

impl FieldId {
    /// Parameter name on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Vk(field) => field.wire_name(),
            Self::Ib(field) => field.wire_name(),
        }
    }

    /// Parse a `VK_*` or `IB_*` wire name.
    pub fn parse(name: &str) -> Result<Self, RegistryError> {
        Field::from_wire_name(name)
            .map(Self::Vk)
            .or_else(|| IbField::from_wire_name(name).map(Self::Ib))
            .ok_or_else(|| RegistryError::UnknownField(name.to_string()))
    }

    /// Whether this field belongs to the IB vocabulary.
    pub fn is_ib(&self) -> bool {
        matches!(self, Self::Ib(_))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for FieldId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FieldId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Functional group of service codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceGroup {
    /// Payment request and its outcomes.
    Payment,
    /// Standard and IB authentication request/success.
    Authentication,
    /// Denied IB authentication. Routed as a negative outcome.
    Declined,
}

impl ServiceGroup {
    pub const ALL: [Self; 3] = [Self::Payment, Self::Authentication, Self::Declined];

    /// Codes belonging to this group.
    pub fn codes(&self) -> BTreeSet<ServiceCode> {
        match self {
            Self::Payment => ServiceRegistry::payment_service_codes(),
            Self::Authentication => ServiceRegistry::authentication_service_codes(),
            Self::Declined => ServiceRegistry::declined_service_codes(),
        }
    }
}

impl fmt::Display for ServiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payment => write!(f, "Payment"),
            Self::Authentication => write!(f, "Authentication"),
            Self::Declined => write!(f, "Declined"),
        }
    }
}
