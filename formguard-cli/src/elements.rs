//! In-memory control tree built from a form file.

use std::sync::{Arc, Mutex, PoisonError};

use formguard_lib::{Control, ErrorHints, ErrorProvider, Node, Subscription, ValidatingCallback};

/// A node of the form: either a container or an input with text.
pub struct FormElement {
    id: String,
    parent: Option<Arc<dyn Node>>,
    tab_index: u32,
    text: String,
    focused: Arc<Mutex<Option<String>>>,
}

impl FormElement {
    pub fn new(
        id: String,
        parent: Option<Arc<dyn Node>>,
        tab_index: u32,
        text: String,
        focused: Arc<Mutex<Option<String>>>,
    ) -> Self {
        Self {
            id,
            parent,
            tab_index,
            text,
            focused,
        }
    }
}

impl Node for FormElement {
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

impl Control for FormElement {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn focus(&self) {
        log::info!("focus -> {}", self.id);
        *self.focused.lock().unwrap_or_else(PoisonError::into_inner) = Some(self.id.clone());
    }

    // A batch run has no edit events.
    fn subscribe_validating(&self, _callback: ValidatingCallback) -> Subscription {
        Subscription::detached()
    }
}

/// Keeps the latest message per control, in first-reported order.
#[derive(Default)]
pub struct CollectingErrorProvider {
    messages: Mutex<Vec<(String, String)>>,
}

impl CollectingErrorProvider {
    /// Controls currently showing an error, with their messages.
    pub fn shown(&self) -> Vec<(String, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, msg)| !msg.is_empty())
            .cloned()
            .collect()
    }
}

impl ErrorProvider for CollectingErrorProvider {
    fn set_error(&self, control: &dyn Control, message: &str, _hints: &ErrorHints) {
        let id = control.node_id();
        let mut guard = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.iter_mut().find(|(c, _)| *c == id) {
            Some(entry) => entry.1 = message.to_string(),
            None => guard.push((id, message.to_string())),
        }
    }
}
