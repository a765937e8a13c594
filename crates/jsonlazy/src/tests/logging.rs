use alloc::{sync::Arc, vec::Vec};
use std::sync::Mutex;

use tracing::{
    Event, Level, Metadata, Subscriber,
    span::{Attributes, Id, Record},
};

use super::utils::{dated, node};
use crate::ValueKind;

/// Records the level of every event and ignores spans.
#[derive(Clone, Default)]
struct LevelRecorder {
    levels: Arc<Mutex<Vec<Level>>>,
}

impl LevelRecorder {
    fn take(&self) -> Vec<Level> {
        core::mem::take(&mut *self.levels.lock().unwrap())
    }
}

impl Subscriber for LevelRecorder {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _: &Id, _: &Record<'_>) {}

    fn record_follows_from(&self, _: &Id, _: &Id) {}

    fn event(&self, event: &Event<'_>) {
        self.levels.lock().unwrap().push(*event.metadata().level());
    }

    fn enter(&self, _: &Id) {}

    fn exit(&self, _: &Id) {}
}

#[test]
fn memoization_and_detach_trace() {
    let recorder = LevelRecorder::default();
    tracing::subscriber::with_default(recorder.clone(), || {
        let mut n = node(ValueKind::Integer, "42");
        n.to_value().unwrap();
        n.to_value().unwrap();
        n.chop();
        n.chop();
    });
    assert_eq!(recorder.take(), [Level::TRACE, Level::TRACE]);
}

#[test]
fn fallbacks_log_at_debug() {
    let recorder = LevelRecorder::default();
    tracing::subscriber::with_default(recorder.clone(), || {
        node(ValueKind::Double, "3.14").float_value().unwrap();
    });
    assert!(recorder.take().is_empty());

    tracing::subscriber::with_default(recorder.clone(), || {
        node(ValueKind::Double, "1.5e3").float_value().unwrap();
        node(ValueKind::Double, "3.14159265358979").float_value().unwrap();
        dated("not a date at all!!").to_value().unwrap();
    });
    assert_eq!(recorder.take(), [Level::DEBUG, Level::DEBUG, Level::DEBUG, Level::TRACE]);
}
