//! In-memory event capture for logging assertions in tests

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use pagegraph_core_types::schema::{FIELD_EVENT, FIELD_OP};

/// One captured event, every field rendered as text
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self {
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        }
    }

    /// A field's recorded value
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct TextFields(BTreeMap<String, String>);

impl Visit for TextFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    // Stored unquoted
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

type Buffer = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer(Buffer);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = TextFields::default();
        event.record(&mut fields);
        if let Ok(mut events) = self.0.lock() {
            events.push(CapturedEvent::from_fields(fields.0));
        }
    }
}

/// Read handle on the shared capture buffer
#[derive(Clone)]
pub struct TestCapture(Buffer);

impl TestCapture {
    fn snapshot(&self) -> Vec<CapturedEvent> {
        self.0.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events whose `op` field equals `op`
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.snapshot()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Count captured events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.snapshot().iter().filter(|e| predicate(e)).count()
    }

    /// # Panics
    ///
    /// Panics unless an event with this `op` and `event` was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let found = self.count_events(|e| e.is(op, event));
        assert!(found > 0, "no {} event captured for op={}", event, op);
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber and return its handle
///
/// Every call in one process shares one buffer, and parallel tests see each
/// other's events: filter on identifiers unique to the test.
///
/// # Example
///
/// ```
/// use pagegraph_core::logging_facility::test_capture::init_test_capture;
/// use pagegraph_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example");
/// capture.assert_event_exists("doc_example", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let buffer = Buffer::default();
            let _ = tracing_subscriber::registry()
                .with(CaptureLayer(Arc::clone(&buffer)))
                .try_init();
            TestCapture(buffer)
        })
        .clone()
}
