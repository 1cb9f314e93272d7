use chairside_kernel::contact::{PhoneError, PhoneNumber};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatientContact {
    full_name: String,
    mobile: PhoneNumber,
    work: Option<PhoneNumber>,
}

#[test]
fn serializes_as_canonical_string() {
    let contact = PatientContact {
        full_name: "Ada Lovelace".into(),
        mobile: "(415) 555-2671".parse().unwrap(),
        work: None,
    };

    let value = serde_json::to_value(&contact).unwrap();
    assert_eq!(value, json!({ "fullName": "Ada Lovelace", "mobile": "+14155552671", "work": null }));
}

#[test]
fn deserializes_only_canonical_values() {
    let ok: PatientContact = serde_json::from_value(json!({
        "fullName": "Grace Hopper",
        "mobile": "+12222222231",
        "work": "+14155552671"
    }))
    .unwrap();
    assert_eq!(ok.mobile.display(), "(222) 222-2231");
    assert_eq!(ok.work.map(String::from).as_deref(), Some("+14155552671"));

    let err = serde_json::from_value::<PatientContact>(json!({
        "fullName": "Grace Hopper",
        "mobile": "(222) 222-2231",
        "work": null
    }))
    .unwrap_err();
    assert!(err.to_string().contains("Not a canonical phone number"));
}

#[test]
fn parse_reports_incomplete_numbers() {
    assert!(matches!("123".parse::<PhoneNumber>(), Err(PhoneError::Incomplete { .. })));
    assert!(matches!(PhoneNumber::parse(""), Err(PhoneError::Incomplete { .. })));
}
