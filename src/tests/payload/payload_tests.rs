//! Tests for payload normalization.

use serde_json::{Number, json};

use crate::{AppendError, Encoding, IntoPayload, Payload};

#[test]
fn numeric_payload_is_written_as_decimal_string() {
    let payload = 220i32.into_payload().unwrap();

    assert_eq!(payload, Payload::Numeric(Number::from(220)));
    assert_eq!(payload.encode(Encoding::Utf8).unwrap(), b"220".to_vec());
}

#[test]
fn float_payloads() {
    assert_eq!(
        1.5f64.into_payload().unwrap().encode(Encoding::Utf8).unwrap(),
        b"1.5".to_vec()
    );
    assert_eq!(
        (-7i64).into_payload().unwrap().encode(Encoding::Utf8).unwrap(),
        b"-7".to_vec()
    );
}

#[test]
fn non_finite_numbers_are_invalid() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = Payload::numeric(value).unwrap_err();
        assert!(matches!(err, AppendError::InvalidPayload { .. }));
    }
}

#[test]
fn text_uses_requested_encoding() {
    let payload = Payload::Text("ab".into());
    assert_eq!(payload.encode(Encoding::Utf8).unwrap().len(), 2);
    assert_eq!(payload.encode(Encoding::Utf16Le).unwrap().len(), 4);
}

#[test]
fn bytes_ignore_encoding() {
    let payload = b"\xff\x00".into_payload().unwrap();
    assert_eq!(payload.kind(), "bytes");
    assert_eq!(payload.encode(Encoding::Hex).unwrap(), vec![0xff, 0x00]);
}

#[test]
fn dynamic_values_map_to_payload_kinds() {
    assert_eq!(
        Payload::from_value(json!("text")).unwrap(),
        Payload::Text("text".into())
    );
    assert_eq!(
        Payload::from_value(json!(220)).unwrap().kind(),
        "numeric"
    );
    assert_eq!(
        Payload::from_value(json!([65, 66, 255])).unwrap(),
        Payload::Bytes(vec![65, 66, 255])
    );
}

#[test]
fn unsupported_dynamic_values_are_invalid() {
    for (value, kind) in [
        (json!(null), "null"),
        (json!(true), "boolean"),
        (json!({"a": 1}), "object"),
    ] {
        let err = Payload::from_value(value).unwrap_err();
        assert!(matches!(err, AppendError::InvalidPayload { ref received } if received == kind));
    }

    let err = Payload::from_value(json!([1, 256])).unwrap_err();
    assert!(matches!(err, AppendError::InvalidPayload { .. }));
}

#[test]
fn whole_floats_are_written_without_a_fraction() {
    for (value, expected) in [(220.0f64, "220"), (-0.0, "0"), (0.0, "0"), (-3.0, "-3")] {
        let bytes = value.into_payload().unwrap().encode(Encoding::Utf8).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), expected, "{value:?}");
    }

    let bytes = Payload::from_value(json!(220.0)).unwrap().encode(Encoding::Utf8).unwrap();
    assert_eq!(bytes, b"220".to_vec());
}

#[test]
fn small_floats_use_plain_decimal_notation() {
    let bytes = 1e-6f64.into_payload().unwrap().encode(Encoding::Utf8).unwrap();
    assert_eq!(bytes, b"0.000001".to_vec());

    let bytes = Payload::numeric(0.25).unwrap().encode(Encoding::Utf8).unwrap();
    assert_eq!(bytes, b"0.25".to_vec());
}
