//! In-memory controls and error display for tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use formguard_lib::{Control, ErrorHints, ErrorProvider, Node, Subscription, ValidatingCallback};

type Callbacks = Arc<Mutex<Vec<(usize, Arc<dyn Fn() + Send + Sync>)>>>;

/// A container element (form, panel, tab page).
pub struct FakeNode {
    id: String,
    parent: Option<Arc<dyn Node>>,
    tab_index: u32,
}

impl Node for FakeNode {
    fn node_id(&self) -> String {
        self.id.clone()
    }

    fn parent(&self) -> Option<Arc<dyn Node>> {
        self.parent.clone()
    }

    fn tab_index(&self) -> u32 {
        self.tab_index
    }
}

/// A text input.
pub struct FakeControl {
    id: String,
    parent: Option<Arc<dyn Node>>,
    tab_index: u32,
    text: RwLock<String>,
    focus_count: AtomicUsize,
    callbacks: Callbacks,
    next_subscription: AtomicUsize,
}

impl FakeControl {
    pub fn set_text(&self, text: &str) {
        *self.text.write().unwrap() = text.to_string();
    }

    /// Simulate the user leaving the control.
    pub fn fire_validating(&self) {
        let callbacks: Vec<_> = self
            .callbacks
            .lock()
            .unwrap()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.callbacks.lock().unwrap().len()
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count.load(Ordering::SeqCst)
    }
}

impl Node for FakeControl {
    fn node_id(&self) -> String {
        self.id.clone()
    }

    fn parent(&self) -> Option<Arc<dyn Node>> {
        self.parent.clone()
    }

    fn tab_index(&self) -> u32 {
        self.tab_index
    }
}

impl Control for FakeControl {
    fn text(&self) -> String {
        self.text.read().unwrap().clone()
    }

    fn focus(&self) {
        self.focus_count.fetch_add(1, Ordering::SeqCst);
    }

    fn subscribe_validating(&self, callback: ValidatingCallback) -> Subscription {
        let key = self.next_subscription.fetch_add(1, Ordering::SeqCst);
        self.callbacks.lock().unwrap().push((key, Arc::from(callback)));
        let callbacks = Arc::clone(&self.callbacks);
        Subscription::new(move || {
            callbacks.lock().unwrap().retain(|(k, _)| *k != key);
        })
    }
}

pub fn form(id: &str, tab_index: u32) -> Arc<FakeNode> {
    Arc::new(FakeNode {
        id: id.to_string(),
        parent: None,
        tab_index,
    })
}

pub fn panel(id: &str, parent: &Arc<FakeNode>, tab_index: u32) -> Arc<FakeNode> {
    Arc::new(FakeNode {
        id: id.to_string(),
        parent: Some(parent.clone() as Arc<dyn Node>),
        tab_index,
    })
}

pub fn input(
    id: &str,
    parent: Option<&Arc<FakeNode>>,
    tab_index: u32,
    text: &str,
) -> Arc<FakeControl> {
    Arc::new(FakeControl {
        id: id.to_string(),
        parent: parent.map(|p| p.clone() as Arc<dyn Node>),
        tab_index,
        text: RwLock::new(text.to_string()),
        focus_count: AtomicUsize::new(0),
        callbacks: Arc::new(Mutex::new(Vec::new())),
        next_subscription: AtomicUsize::new(0),
    })
}

/// Upcast for `Validator::bind`.
pub fn dyn_control(control: &Arc<FakeControl>) -> Arc<dyn Control> {
    control.clone() as Arc<dyn Control>
}

/// Records every `set_error` call.
#[derive(Default)]
pub struct RecordingErrorProvider {
    calls: Mutex<Vec<(String, String, ErrorHints)>>,
}

impl RecordingErrorProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(String, String, ErrorHints)> {
        self.calls.lock().unwrap().clone()
    }

    /// The message currently shown for a control ("" when cleared).
    pub fn message_for(&self, control_id: &str) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(id, _, _)| id == control_id)
            .map(|(_, msg, _)| msg.clone())
    }
}

impl ErrorProvider for RecordingErrorProvider {
    fn set_error(&self, control: &dyn Control, message: &str, hints: &ErrorHints) {
        self.calls
            .lock()
            .unwrap()
            .push((control.node_id(), message.to_string(), *hints));
    }
}
