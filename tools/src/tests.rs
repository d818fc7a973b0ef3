use crate::{decode_json, to_value, Coordinate, FamilyConfig, Invocation, KeyScopeConfig, Session};
use assert_matches::assert_matches;
use noomer::{testonly::init_logging, Error, Value};
use pretty_assertions::assert_eq;
use std::{fs, sync::Arc};
use tempfile::TempDir;

const WEB_EVENT: &str = r##"{
    "name": "WebEvent",
    "variants": [
        { "name": "PageLoad" },
        { "name": "PageUnload" },
        { "name": "Paste", "payload": "string" },
        { "name": "Click", "payload": "coordinate" },
        { "name": "Red", "discriminator": "#ff0000" }
    ],
    "constants": { "ANSWER": 42 }
}"##;

fn inv(s: &str) -> Invocation {
    s.parse().unwrap()
}

#[test]
fn read_declaration_file() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("family.json");
    fs::write(&path, WEB_EVENT).unwrap();

    let config = FamilyConfig::read(&path).unwrap();
    assert_eq!(config.name, "WebEvent");
    assert_eq!(config.key_scope, KeyScopeConfig::Variant);
    assert_eq!(config.variants.len(), 5);

    let family = config.build().unwrap();
    assert_eq!(family.constant_as::<i64>("ANSWER"), Some(&42));
    assert!(family.descriptor("ANSWER").is_none());
    assert!(family.descriptor("Click").unwrap().takes_value());
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(FamilyConfig::read(&dir.path().join("nope.json")).is_err());
}

#[test]
fn invalid_declarations_are_rejected() {
    // Unknown payload type.
    assert!(decode_json::<FamilyConfig>(
        r#"{"name": "F", "variants": [{"name": "A", "payload": "float"}]}"#
    )
    .is_err());
    // Unknown field.
    assert!(decode_json::<FamilyConfig>(r#"{"name": "F", "cases": []}"#).is_err());
    // Trailing garbage.
    assert!(decode_json::<FamilyConfig>(r#"{"name": "F"} x"#).is_err());
    // Payload and discriminator together.
    let config: FamilyConfig = decode_json(
        r#"{"name": "F", "variants": [{"name": "A", "payload": "string", "discriminator": "a"}]}"#,
    )
    .unwrap();
    assert!(config.build().is_err());
}

#[test]
fn parse_invocations() {
    assert_eq!(
        inv("PageLoad"),
        Invocation {
            variant: "PageLoad".to_owned(),
            arg: None
        }
    );
    assert_eq!(
        inv(r#"Click={"x":1,"y":2}"#).arg,
        Some(serde_json::json!({"x": 1, "y": 2}))
    );
    assert_eq!(inv(r#"Paste="a=b""#).arg, Some(serde_json::json!("a=b")));
    assert!("=1".parse::<Invocation>().is_err());
    assert!("Paste=not json".parse::<Invocation>().is_err());
}

#[test]
fn json_to_value() {
    assert_eq!(to_value(&serde_json::json!("x")).unwrap(), Value::from("x"));
    assert_eq!(to_value(&serde_json::json!(7)).unwrap(), Value::new(7_i64));
    assert_eq!(to_value(&serde_json::json!(true)).unwrap(), Value::new(true));
    assert_eq!(
        to_value(&serde_json::json!({"y": 1, "x": 0})).unwrap(),
        Value::new(Coordinate { x: 0, y: 1 })
    );
    assert!(to_value(&serde_json::json!(1.5)).is_err());
    assert!(to_value(&serde_json::json!(null)).is_err());
    assert!(to_value(&serde_json::json!([1, 2])).is_err());
    assert!(to_value(&serde_json::json!({"x": 1})).is_err());
}

#[test]
fn session_numbers_distinct_instances() {
    init_logging();
    let family = decode_json::<FamilyConfig>(WEB_EVENT)
        .unwrap()
        .build()
        .unwrap();
    let mut session = Session::new(&family);
    let mut numbers = vec![];
    for s in [
        "PageLoad",
        r#"Paste="copy""#,
        r#"Paste="copy""#,
        r#"Paste="paste""#,
        r#"Click={"x":0,"y":0}"#,
        r#"Click={"y":0,"x":0}"#,
        "Red",
        r##"Red="#000000""##,
        "PageLoad",
    ] {
        numbers.push(session.invoke(&inv(s)).unwrap().0);
    }
    assert_eq!(numbers, [0, 1, 1, 2, 3, 3, 4, 4, 0]);
    assert_eq!(session.distinct(), 5);
    assert_eq!(family.cached(), 5);
}

#[test]
fn session_reports_type_mismatch() {
    let family = decode_json::<FamilyConfig>(WEB_EVENT)
        .unwrap()
        .build()
        .unwrap();
    let mut session = Session::new(&family);
    let err = session.invoke(&inv(r#"Click="here""#)).unwrap_err();
    assert_matches!(err.downcast_ref::<Error>(), Some(Error::TypeMismatch { .. }));
    assert_eq!(session.distinct(), 0);
    assert_eq!(family.cached(), 0);

    let (_, click) = session.invoke(&inv(r#"Click={"x":1,"y":1}"#)).unwrap();
    let (_, again) = session.invoke(&inv(r#"Click={"x":1,"y":1}"#)).unwrap();
    assert!(Arc::ptr_eq(&click, &again));
    assert_eq!(click.value_as::<Coordinate>(), Some(&Coordinate { x: 1, y: 1 }));
}

#[test]
fn family_key_scope_from_file() {
    let family = decode_json::<FamilyConfig>(
        r#"{
            "name": "Subject",
            "key_scope": "family",
            "variants": [
                { "name": "Math", "payload": "string" },
                { "name": "Literature", "payload": "string" }
            ]
        }"#,
    )
    .unwrap()
    .build()
    .unwrap();
    let mut session = Session::new(&family);
    let (a, _) = session.invoke(&inv(r#"Math="Beyond Algebra""#)).unwrap();
    let (b, lit) = session.invoke(&inv(r#"Literature="Beyond Algebra""#)).unwrap();
    assert_eq!(a, b);
    assert!(lit.is_named("Math"));
}
