//! Tests for open flag parsing.

use crate::{AppendError, OpenFlag};

#[test]
fn default_flag_is_append_create() {
    let flag = OpenFlag::default();
    assert_eq!(flag.as_str(), "a");
    assert!(flag.append);
    assert!(flag.create);
    assert!(!flag.truncate);
    assert!(!flag.exclusive);
}

#[test]
fn parses_append_family() {
    let plus = OpenFlag::parse("a+").unwrap();
    assert!(plus.read && plus.append && plus.create);

    let exclusive = OpenFlag::parse("xa").unwrap();
    assert_eq!(exclusive.as_str(), "ax");
    assert!(exclusive.exclusive);

    let sync = OpenFlag::parse("sa+").unwrap();
    assert_eq!(sync.as_str(), "as+");
    assert!(sync.sync && sync.read);
}

#[test]
fn parses_write_and_read_flags() {
    let w = OpenFlag::parse("w").unwrap();
    assert!(w.write && w.create && w.truncate && !w.append);

    let r = OpenFlag::parse("r").unwrap();
    assert!(r.read && !r.write);
    assert!(!r.creates());

    let rw = OpenFlag::parse("r+").unwrap();
    assert!(rw.read && rw.write && !rw.creates());
}

#[test]
fn rejects_unknown_flags() {
    assert!(OpenFlag::parse("append").is_none());

    let err = "z".parse::<OpenFlag>().unwrap_err();
    assert!(matches!(err, AppendError::InvalidFlag(ref f) if f == "z"));
}

#[test]
fn display_round_trips_through_parse() {
    for name in ["r", "rs+", "w", "wx+", "a", "ax", "as", "a+"] {
        let flag = OpenFlag::parse(name).unwrap();
        assert_eq!(flag.to_string(), name);
    }
}
