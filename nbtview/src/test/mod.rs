use std::{cell::RefCell, convert::TryFrom, sync::Once};

use log::{Level, Log, Metadata, Record};

use crate::{element_tag_of, Payload, Tag, TagType};

pub mod builder;

macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(TagType::$tag), $val);
            assert_eq!(TagType::try_from($val as u8), Ok(TagType::$tag));
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
        LongArray = 12,
    }

    assert!(TagType::try_from(0u8).is_err());
    for value in 13..=u8::MAX {
        assert!(TagType::try_from(value).is_err())
    }
}

#[test]
fn discriminants_round_trip_through_text() {
    for id in 1u8..=12 {
        let tag = TagType::try_from(id).unwrap();
        assert_eq!(tag.as_str().parse::<TagType>(), Ok(tag));
        assert_eq!(tag.to_string(), tag.as_str());
    }
    assert!("quux".parse::<TagType>().is_err());
    assert!("end".parse::<TagType>().is_err());
}

#[test]
fn element_type_strips_array_suffix() {
    assert_eq!(TagType::ByteArray.element_type(), Some(TagType::Byte));
    assert_eq!(TagType::IntArray.element_type(), Some(TagType::Int));
    assert_eq!(TagType::LongArray.element_type(), Some(TagType::Long));

    for id in 1u8..=12 {
        let tag = TagType::try_from(id).unwrap();
        assert_eq!(tag.element_type().is_some(), tag.is_array());
    }
}

#[test]
fn element_tag_of_arrays() {
    assert_eq!(
        element_tag_of(TagType::ByteArray, -5),
        Some(Tag::anonymous(Payload::Byte(-5)))
    );
    assert_eq!(
        element_tag_of(TagType::IntArray, 70_000),
        Some(Tag::anonymous(Payload::Int(70_000)))
    );
    assert_eq!(
        element_tag_of(TagType::LongArray, i64::MIN),
        Some(Tag::anonymous(Payload::Long(i64::MIN)))
    );
}

#[test]
fn element_tag_of_rejects_non_arrays_and_overflow() {
    assert_eq!(element_tag_of(TagType::List, 1), None);
    assert_eq!(element_tag_of(TagType::Int, 1), None);
    assert_eq!(element_tag_of(TagType::ByteArray, 128), None);
    assert_eq!(element_tag_of(TagType::IntArray, i64::from(i32::MAX) + 1), None);
}

#[test]
fn element_tags_are_anonymous() {
    let tag = element_tag_of(TagType::IntArray, 1).unwrap();
    assert_eq!(tag.name, None);
    assert_eq!(tag.kind(), Ok(TagType::Int));
}

#[test]
fn unknown_payload_keeps_discriminant() {
    let tag = Tag::named("q", Payload::Unknown("quux".to_owned()));
    assert_eq!(tag.kind(), Err("quux"));
    assert_eq!(tag.discriminant(), "quux");
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = RefCell::new(vec![]);
}

/// Keeps log records per thread, so each test only sees its own.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| {
            c.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Start keeping log records for this thread, dropping any kept so far.
pub fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });

    CAPTURED.with(|c| c.borrow_mut().clear());
}

pub fn take_logs() -> Vec<(Level, String)> {
    CAPTURED.with(|c| c.borrow_mut().drain(..).collect())
}

/// Run `f` and return the log records it produced on this thread.
pub fn captured_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    capture_logs();
    let result = f();
    (result, take_logs())
}
