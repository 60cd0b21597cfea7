//! In-memory event capture for logging assertions
//!
//! The capture layer is installed once per test binary as the global
//! subscriber. Tests in one binary share its buffer, so assertions filter on
//! an op name unique to the test.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tablediff_core_types::schema::{FIELD_EVENT, FIELD_OP};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event: its level and every field rendered as text
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    fn is(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }
}

struct FieldRecorder<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldRecorder<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Buffer = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    buffer: Buffer,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            fields,
        };
        if let Ok(mut events) = self.buffer.lock() {
            events.push(captured);
        }
    }
}

/// Handle onto the shared capture buffer
#[derive(Clone)]
pub struct TestCapture {
    buffer: Buffer,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.buffer
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Events logged for `op`, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op() == Some(op))
            .collect()
    }

    /// Value of `field` on the last `event` logged for `op`
    pub fn last_field(&self, op: &str, event: &str, field: &str) -> Option<String> {
        self.events()
            .iter()
            .rev()
            .find(|e| e.is(op, event))
            .and_then(|e| e.field(field).map(str::to_string))
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// # Panics
    ///
    /// Panics if no `event` was logged for `op`.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.buffer.lock() {
            events.clear();
        }
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer (first call only) and return its handle
///
/// # Example
///
/// ```
/// use tablediff_core::logging_facility::test_capture::init_test_capture;
/// use tablediff_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_operation");
/// capture.assert_event_exists("doc_operation", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let buffer = Buffer::default();
            tracing_subscriber::registry()
                .with(CaptureLayer {
                    buffer: buffer.clone(),
                })
                .try_init()
                .ok();
            TestCapture { buffer }
        })
        .clone()
}
