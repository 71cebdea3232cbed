use areaboard::shared::ids::{AreaId, KindName, ServiceName, UserId};

#[test]
fn shared_ids_module_parses_domain_identifiers() {
    assert_eq!(ServiceName::parse("github").expect("id").as_str(), "github");
    assert_eq!(
        KindName::parse("send_message_to_channel").expect("id").as_str(),
        "send_message_to_channel"
    );
    assert_eq!(UserId::parse("auth0|42").expect("id").as_str(), "auth0|42");
    assert_eq!(AreaId::parse(" 17 ").expect("id").as_str(), "17");

    assert!(ServiceName::parse("git hub").is_err());
    assert!(KindName::parse("").is_err());
    assert!(UserId::parse("user 42").is_err());
    assert!(AreaId::parse("   ").is_err());
}

#[test]
fn shared_ids_module_area_ids_accept_numeric_wire_form() {
    let from_number: AreaId = serde_json::from_str("42").expect("numeric id");
    let from_string: AreaId = serde_json::from_str("\"42\"").expect("string id");
    assert_eq!(from_number, from_string);
    assert_eq!(serde_json::to_string(&from_number).expect("encode"), "\"42\"");
}
