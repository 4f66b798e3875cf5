use std::collections::{BTreeSet, HashSet};

use crate::error::RegistryError;
use crate::types::FieldId::{Ib, Vk};
use crate::types::{Field, FieldId, IbField, ServiceCode, ServiceGroup};

const IB_AUTHENTICATE_REQUEST_FIELDS: &[FieldId] = &[
    Ib(IbField::SellerId),
    Ib(IbField::ServiceId),
    Ib(IbField::UserLang),
];

const IB_AUTHENTICATE_DENIED_FIELDS: &[FieldId] = &[
    Ib(IbField::SellerId),
    Ib(IbField::ServiceId),
    Ib(IbField::UserLang),
];

// IB_CRC, IB_LANG and IB_FROM_SERVER are not signed.
const IB_AUTHENTICATE_SUCCESS_FIELDS: &[FieldId] = &[
    Ib(IbField::SellerId),
    Ib(IbField::ServiceId),
    Ib(IbField::SellerIdResponse),
    Ib(IbField::User),
    Ib(IbField::Date),
    Ib(IbField::Time),
    Ib(IbField::UserInfo),
    Ib(IbField::ProtocolVersion),
];

const PAYMENT_REQUEST_FIELDS: &[FieldId] = &[
    Vk(Field::ServiceId),
    Vk(Field::ProtocolVersion),
    Vk(Field::SellerId),
    Vk(Field::OrderId),
    Vk(Field::Sum),
    Vk(Field::Currency),
    Vk(Field::OrderReference),
    Vk(Field::Description),
];

const PAYMENT_SUCCESS_FIELDS: &[FieldId] = &[
    Vk(Field::ServiceId),
    Vk(Field::ProtocolVersion),
    Vk(Field::SellerId),
    Vk(Field::SellerIdResponse),
    Vk(Field::OrderId),
    Vk(Field::TransactionId),
    Vk(Field::Sum),
    Vk(Field::Currency),
    Vk(Field::SellerBankAccResponse),
    Vk(Field::SellerNameResponse),
    Vk(Field::SenderBankAcc),
    Vk(Field::SenderName),
    Vk(Field::OrderReference),
    Vk(Field::Description),
    Vk(Field::TransactionDate),
];

const PAYMENT_CANCEL_FIELDS: &[FieldId] = &[
    Vk(Field::ServiceId),
    Vk(Field::ProtocolVersion),
    Vk(Field::SellerId),
    Vk(Field::SellerIdResponse),
    Vk(Field::OrderId),
    Vk(Field::OrderReference),
    Vk(Field::Description),
];

const AUTHENTICATE_REQUEST_FIELDS: &[FieldId] = &[
    Vk(Field::ServiceId),
    Vk(Field::ProtocolVersion),
    Vk(Field::SellerId),
    Vk(Field::Reply),
    Vk(Field::SuccessUrl),
    Vk(Field::Date),
    Vk(Field::Time),
];

const AUTHENTICATE_SUCCESS_FIELDS: &[FieldId] = &[
    Vk(Field::ServiceId),
    Vk(Field::ProtocolVersion),
    Vk(Field::User),
    Vk(Field::Date),
    Vk(Field::Time),
    Vk(Field::SellerId),
    Vk(Field::Info),
];

/// Service code to mandatory field list. `1901` covers both cancel and error.
const SERVICE_FIELDS: &[(ServiceCode, &[FieldId])] = &[
    (ServiceCode::IB_AUTHENTICATE_REQUEST, IB_AUTHENTICATE_REQUEST_FIELDS),
    (ServiceCode::IB_AUTHENTICATE_DENIED, IB_AUTHENTICATE_DENIED_FIELDS),
    (ServiceCode::IB_AUTHENTICATE_SUCCESS, IB_AUTHENTICATE_SUCCESS_FIELDS),
    (ServiceCode::PAYMENT_REQUEST, PAYMENT_REQUEST_FIELDS),
    (ServiceCode::PAYMENT_SUCCESS, PAYMENT_SUCCESS_FIELDS),
    (ServiceCode::PAYMENT_CANCEL, PAYMENT_CANCEL_FIELDS),
    (ServiceCode::AUTHENTICATE_REQUEST, AUTHENTICATE_REQUEST_FIELDS),
    (ServiceCode::AUTHENTICATE_SUCCESS, AUTHENTICATE_SUCCESS_FIELDS),
];

/// Lookup of mandatory fields and service groups for iPizza messages.
///
/// The field lists are compiled in and their order is the order used when
/// building the signature base string, so it must never change.
///
/// Groups:
/// - Payment: `1002`, `1101`, `1901` (cancel and error share a code)
/// - Authentication: `4001`, `3002`, `0005`, `0001`
/// - Declined: `0008`
pub struct ServiceRegistry;

impl ServiceRegistry {
    /// Fetch the mandatory fields for a service, in signature order.
    ///
    /// Accepts a [`ServiceCode`] or the raw code string. Unknown codes are an
    /// error, never an empty list.
    pub fn fields_for_service(code: impl AsRef<str>) -> Result<&'static [FieldId], RegistryError> {
        let raw = code.as_ref();
        let Some((service, fields)) = SERVICE_FIELDS
            .iter()
            .find(|(service, _)| service.as_str() == raw)
        else {
            tracing::warn!(service = raw, "unsupported service id");
            return Err(RegistryError::UnknownServiceCode(raw.to_string()));
        };

        tracing::debug!(
            service = %service,
            fields = fields.len(),
            "resolved service fields"
        );

        Ok(*fields)
    }

    /// Payment request, success, cancel and error. Cancel and error collapse
    /// into one element.
    pub fn payment_service_codes() -> BTreeSet<ServiceCode> {
        [
            ServiceCode::PAYMENT_REQUEST,
            ServiceCode::PAYMENT_SUCCESS,
            ServiceCode::PAYMENT_CANCEL,
            ServiceCode::PAYMENT_ERROR,
        ]
        .into_iter()
        .collect()
    }

    /// Standard and IB authentication request/success.
    pub fn authentication_service_codes() -> BTreeSet<ServiceCode> {
        [
            ServiceCode::AUTHENTICATE_REQUEST,
            ServiceCode::AUTHENTICATE_SUCCESS,
            ServiceCode::IB_AUTHENTICATE_SUCCESS,
            ServiceCode::IB_AUTHENTICATE_REQUEST,
        ]
        .into_iter()
        .collect()
    }

    /// Denied IB authentication.
    pub fn declined_service_codes() -> BTreeSet<ServiceCode> {
        [ServiceCode::IB_AUTHENTICATE_DENIED].into_iter().collect()
    }

    /// The group a code belongs to, if it is known.
    pub fn group_of(code: impl AsRef<str>) -> Option<ServiceGroup> {
        let service = ServiceCode::parse(code.as_ref()).ok()?;
        ServiceGroup::ALL
            .into_iter()
            .find(|group| group.codes().contains(&service))
    }

    /// Required fields of `code` whose wire names are absent from `present`,
    /// in signature order.
    pub fn missing_fields<'a, I>(code: impl AsRef<str>, present: I) -> Result<Vec<FieldId>, RegistryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields = Self::fields_for_service(code)?;
        let present: HashSet<&str> = present.into_iter().collect();

        Ok(fields
            .iter()
            .copied()
            .filter(|field| !present.contains(field.wire_name()))
            .collect())
    }
}
