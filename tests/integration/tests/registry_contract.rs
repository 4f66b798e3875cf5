//! Integration test: the registry as seen by message builders and validators.
//!
//! Builds and checks iPizza messages using only the public API of ipizza-core.

use std::collections::HashMap;

use ipizza_core::{
    Field, FieldId, RegistryConfig, RegistryError, ServiceCode, ServiceGroup, ServiceRegistry,
};

/// Helper: concatenate the values of the mandatory fields in registry order.
fn signature_base(message: &HashMap<&str, &str>) -> Result<String, RegistryError> {
    let service = message
        .get("VK_SERVICE")
        .or_else(|| message.get("IB_SERVICE"))
        .copied()
        .unwrap_or_default();
    let fields = ServiceRegistry::fields_for_service(service)?;
    Ok(fields
        .iter()
        .map(|field| message.get(field.wire_name()).copied().unwrap_or_default())
        .collect::<Vec<_>>()
        .join("|"))
}

fn payment_success_message() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("VK_SERVICE", "1101"),
        ("VK_VERSION", "008"),
        ("VK_SND_ID", "BANK"),
        ("VK_REC_ID", "SHOP"),
        ("VK_STAMP", "42"),
        ("VK_T_NO", "9001"),
        ("VK_AMOUNT", "10.50"),
        ("VK_CURR", "EUR"),
        ("VK_REC_ACC", "LV00SHOP"),
        ("VK_REC_NAME", "Shop Ltd"),
        ("VK_SND_ACC", "LV00PAYER"),
        ("VK_SND_NAME", "Payer"),
        ("VK_REF", "REF-42"),
        ("VK_MSG", "Order 42"),
        ("VK_T_DATE", "19.10.2026"),
        ("VK_MAC", "c2lnbmF0dXJl"),
        ("VK_LANG", "LAT"),
    ])
}

// =========================================================================
// Message building
// =========================================================================

#[test]
fn test_payment_success_signature_order() {
    let base = signature_base(&payment_success_message()).expect("known service");
    assert_eq!(
        base,
        "1101|008|BANK|SHOP|42|9001|10.50|EUR|LV00SHOP|Shop Ltd|LV00PAYER|Payer|REF-42|Order 42|19.10.2026"
    );
}

#[test]
fn test_payment_success_list_boundaries() {
    let fields = ServiceRegistry::fields_for_service(ServiceCode::PAYMENT_SUCCESS).unwrap();
    assert_eq!(fields.len(), 15);
    assert_eq!(
        &fields[..8],
        [
            FieldId::Vk(Field::ServiceId),
            FieldId::Vk(Field::ProtocolVersion),
            FieldId::Vk(Field::SellerId),
            FieldId::Vk(Field::SellerIdResponse),
            FieldId::Vk(Field::OrderId),
            FieldId::Vk(Field::TransactionId),
            FieldId::Vk(Field::Sum),
            FieldId::Vk(Field::Currency),
        ]
    );
    assert_eq!(fields.last(), Some(&FieldId::Vk(Field::TransactionDate)));
}

#[test]
fn test_ib_success_signature_skips_unsigned_fields() {
    let message = HashMap::from([
        ("IB_SND_ID", "SEB"),
        ("IB_SERVICE", "0001"),
        ("IB_REC_ID", "AAA"),
        ("IB_USER", "123456-12345"),
        ("IB_DATE", "19.10.2026"),
        ("IB_TIME", "12:00:00"),
        ("IB_USER_INFO", "JOHN DOE"),
        ("IB_VERSION", "001"),
        ("IB_CRC", "abc"),
        ("IB_LANG", "LAT"),
        ("IB_FROM_SERVER", "Y"),
    ]);
    let base = signature_base(&message).unwrap();
    assert_eq!(base, "SEB|0001|AAA|123456-12345|19.10.2026|12:00:00|JOHN DOE|001");
}

#[test]
fn test_unknown_service_is_not_signed() {
    let message = HashMap::from([("VK_SERVICE", "9999"), ("VK_VERSION", "008")]);
    assert_eq!(
        signature_base(&message),
        Err(RegistryError::UnknownServiceCode("9999".into()))
    );
}

// =========================================================================
// Response validation and routing
// =========================================================================

#[test]
fn test_incomplete_response_reports_missing_fields() {
    let mut message = payment_success_message();
    message.remove("VK_T_NO");
    message.remove("VK_T_DATE");

    let missing = ServiceRegistry::missing_fields("1101", message.keys().copied()).unwrap();
    assert_eq!(
        missing,
        vec![
            FieldId::Vk(Field::TransactionId),
            FieldId::Vk(Field::TransactionDate),
        ]
    );
}

#[test]
fn test_route_responses_by_group() {
    let routes: Vec<_> = ["1101", "1901", "3002", "0001", "0008", "9999"]
        .into_iter()
        .map(ServiceRegistry::group_of)
        .collect();
    assert_eq!(
        routes,
        vec![
            Some(ServiceGroup::Payment),
            Some(ServiceGroup::Payment),
            Some(ServiceGroup::Authentication),
            Some(ServiceGroup::Authentication),
            Some(ServiceGroup::Declined),
            None,
        ]
    );
}

#[test]
fn test_declined_shape_differs_from_success() {
    let denied = ServiceRegistry::fields_for_service(ServiceCode::IB_AUTHENTICATE_DENIED).unwrap();
    let success = ServiceRegistry::fields_for_service(ServiceCode::IB_AUTHENTICATE_SUCCESS).unwrap();
    assert_eq!(denied.len(), 3);
    assert_ne!(denied, success);
    assert!(ServiceGroup::Declined
        .codes()
        .is_disjoint(&ServiceGroup::Authentication.codes()));
}

#[test]
fn test_group_sizes() {
    assert_eq!(ServiceGroup::Payment.codes().len(), 3);
    assert_eq!(ServiceGroup::Authentication.codes().len(), 4);
    assert_eq!(ServiceGroup::Declined.codes().len(), 1);
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_config_restricts_services() {
    let config: RegistryConfig = serde_json::from_str(
        r#"{ "enabled_services": ["1002", "1101", "1901"], "log_level": "info" }"#,
    )
    .expect("valid config");
    config.validate().expect("non-empty services");

    for code in ServiceRegistry::payment_service_codes() {
        assert!(config.is_enabled(code));
    }
    for code in ServiceRegistry::authentication_service_codes() {
        assert!(!config.is_enabled(code));
    }
}
