//! Capture of `tracing` events for assertions.
//!
//! The capturing subscriber is installed as the thread default, so it only
//! sees events from the test's own thread and never touches the global
//! subscriber.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::Level;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, SubscriberExt};

/// One recorded event.
#[derive(Debug, Clone)]
struct Event {
    level: Level,
    message: String,
    fields: Vec<(String, String)>,
}

impl Event {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Events recorded on the current thread until dropped.
pub struct TestLogCapture {
    events: Arc<Mutex<Vec<Event>>>,
    _guard: tracing::subscriber::DefaultGuard,
}

impl TestLogCapture {
    pub fn start() -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(Recorder {
            events: Arc::clone(&events),
        });
        let guard = tracing::subscriber::set_default(subscriber);
        Self {
            events,
            _guard: guard,
        }
    }

    fn events(&self) -> MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap()
    }

    fn messages(&self) -> Vec<String> {
        self.events().iter().map(|e| format!("{} {}", e.level, e.message)).collect()
    }

    pub fn assert_logged(&self, needle: &str) {
        let found = self.events().iter().any(|e| e.message.contains(needle));
        assert!(found, "no event mentions '{needle}'; saw {:#?}", self.messages());
    }

    pub fn assert_logged_at_level(&self, level: Level, needle: &str) {
        let found = self
            .events()
            .iter()
            .any(|e| e.level == level && e.message.contains(needle));
        assert!(found, "no {level} event mentions '{needle}'; saw {:#?}", self.messages());
    }

    pub fn assert_not_logged(&self, needle: &str) {
        let found = self.events().iter().any(|e| e.message.contains(needle));
        assert!(!found, "unexpected event mentioning '{needle}'; saw {:#?}", self.messages());
    }

    pub fn assert_no_errors(&self) {
        let errors: Vec<Event> = self
            .events()
            .iter()
            .filter(|e| e.level == Level::ERROR)
            .cloned()
            .collect();
        assert!(errors.is_empty(), "unexpected errors: {errors:#?}");
    }

    /// The field must be present on some event and contain `value`.
    pub fn assert_field_logged(&self, name: &str, value: &str) {
        let found = self
            .events()
            .iter()
            .any(|e| e.field(name).is_some_and(|v| v.contains(value)));
        assert!(found, "no event has {name}={value}; saw {:#?}", *self.events());
    }
}

struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Recorder {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        self.events.lock().unwrap().push(Event {
            level: *event.metadata().level(),
            message: fields.message,
            fields: fields.others,
        });
    }
}

#[derive(Default)]
struct Fields {
    message: String,
    others: Vec<(String, String)>,
}

impl Fields {
    fn put(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.others.push((field.name().to_string(), value));
        }
    }
}

impl Visit for Fields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }
}
