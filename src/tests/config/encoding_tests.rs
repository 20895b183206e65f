//! Tests for text encodings.

use crate::{AppendError, Encoding};

#[test]
fn parses_names_and_aliases() {
    assert_eq!(Encoding::parse("utf8"), Some(Encoding::Utf8));
    assert_eq!(Encoding::parse("UTF-8"), Some(Encoding::Utf8));
    assert_eq!(Encoding::parse("ucs2"), Some(Encoding::Utf16Le));
    assert_eq!(Encoding::parse("binary"), Some(Encoding::Latin1));
    assert_eq!(Encoding::parse("base64url"), Some(Encoding::Base64Url));
    assert_eq!(Encoding::parse("ebcdic"), None);
}

#[test]
fn unknown_name_is_an_unknown_encoding_error() {
    let err = "ebcdic".parse::<Encoding>().unwrap_err();
    assert!(matches!(err, AppendError::UnknownEncoding(ref name) if name == "ebcdic"));
}

#[test]
fn utf8_keeps_multibyte_length() {
    let text = "南越国";
    assert_eq!(Encoding::Utf8.encode(text).unwrap().len(), 9);
}

#[test]
fn utf16le_uses_two_bytes_per_code_unit() {
    assert_eq!(Encoding::Utf16Le.encode("ab").unwrap(), vec![b'a', 0, b'b', 0]);
}

#[test]
fn latin1_and_ascii_keep_low_byte() {
    assert_eq!(Encoding::Latin1.encode("é").unwrap(), vec![0xE9]);
    assert_eq!(Encoding::Ascii.encode("é").unwrap(), vec![0xE9]);
}

#[test]
fn base64_accepts_missing_padding_and_whitespace() {
    assert_eq!(Encoding::Base64.encode("QUI=").unwrap(), b"AB".to_vec());
    assert_eq!(Encoding::Base64.encode("QUI").unwrap(), b"AB".to_vec());
    assert_eq!(Encoding::Base64.encode("QU\nI=").unwrap(), b"AB".to_vec());
    assert_eq!(Encoding::Base64Url.encode("-_8").unwrap(), vec![0xFB, 0xFF]);
}

#[test]
fn malformed_hex_is_rejected() {
    assert_eq!(Encoding::Hex.encode("4142").unwrap(), b"AB".to_vec());

    let err = Encoding::Hex.encode("zz").unwrap_err();
    assert!(matches!(
        err,
        AppendError::InvalidEncodedText {
            encoding: Encoding::Hex,
            ..
        }
    ));
    assert_eq!(err.code(), "ERR_INVALID_ARG_VALUE");
}

#[test]
fn display_uses_canonical_name() {
    assert_eq!(Encoding::Utf16Le.to_string(), "utf16le");
    assert_eq!(Encoding::default(), Encoding::Utf8);
}
