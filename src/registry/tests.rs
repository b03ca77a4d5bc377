//! Tests for the plugin registry.

use super::*;
use crate::plugin::{Options, Writer};
use std::io;
use std::io::Write as _;
use std::sync::Arc;
use std::thread;

fn sink_writer() -> NewWriterFn {
    Arc::new(|_opts: &Options| Ok(Box::new(io::sink()) as Writer))
}

#[test]
fn test_lookup_missing() {
    let registry = Registry::new();
    assert!(matches!(registry.writer("console"), Binding::Missing));
    assert!(matches!(registry.hook("syslog"), Binding::Missing));
    assert!(matches!(registry.formatter("json"), Binding::Missing));
}

#[test]
fn test_register_and_lookup() {
    let registry = Registry::new();
    registry.register_writer("console", Some(sink_writer()));

    let Binding::Bound(ctor) = registry.writer("console") else {
        panic!("expected a bound constructor");
    };

    // Constructor is usable.
    let mut writer = ctor(&Options::new()).unwrap();
    writer.write_all(b"hello").unwrap();
}

#[test]
fn test_register_none_is_damaged() {
    let registry = Registry::new();
    registry.register_writer("console", None);

    assert!(matches!(registry.writer("console"), Binding::Damaged));
}

#[test]
fn test_last_write_wins() {
    let registry = Registry::new();

    registry.register_writer("console", None);
    registry.register_writer("console", Some(sink_writer()));
    assert!(matches!(registry.writer("console"), Binding::Bound(_)));

    registry.register_writer("console", None);
    assert!(matches!(registry.writer("console"), Binding::Damaged));
}

#[test]
fn test_namespaces_are_independent() {
    let registry = Registry::new();
    registry.register_writer("console", Some(sink_writer()));

    assert!(matches!(registry.writer("console"), Binding::Bound(_)));
    assert!(matches!(registry.hook("console"), Binding::Missing));
    assert!(matches!(registry.formatter("console"), Binding::Missing));
}

#[test]
fn test_into_constructor() {
    let registry = Registry::new();
    registry.register_writer("bound", Some(sink_writer()));
    registry.register_writer("damaged", None);

    assert!(registry.writer("bound").into_constructor().is_some());
    assert!(registry.writer("damaged").into_constructor().is_none());
    assert!(registry.writer("missing").into_constructor().is_none());
}

#[test]
fn test_concurrent_registration() {
    let registry = Registry::new();

    thread::scope(|s| {
        for i in 0..8 {
            let registry = &registry;
            s.spawn(move || {
                registry.register_writer(format!("writer-{}", i), Some(sink_writer()));
            });
        }
    });

    for i in 0..8 {
        assert!(matches!(
            registry.writer(&format!("writer-{}", i)),
            Binding::Bound(_)
        ));
    }
}
