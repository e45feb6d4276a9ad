//! Delegated activation handling for the activity list
//!
//! The list container has exactly one observer. Every activation inside the
//! list (a key press or click on a rendered row) goes through [`ListObserver`],
//! which inspects the row's control and only reacts to delete controls. New
//! rows produced by a later render need no registration of their own.

use crate::render::{Control, Row, DELETE_CONTROL_CLASS};

/// The action a matched control asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Unregister { activity: String, email: String },
}

impl ListAction {
    /// Text of the yes/no prompt shown before acting
    pub fn confirmation_prompt(&self) -> String {
        match self {
            ListAction::Unregister { activity, email } => {
                format!("Unregister {} from {}?", email, activity)
            }
        }
    }
}

type Matcher = fn(&Control) -> Option<ListAction>;

/// Single observer attached to the list container, holding selectors keyed
/// by control class
pub struct ListObserver {
    handlers: Vec<(&'static str, Matcher)>,
}

impl ListObserver {
    pub fn new() -> Self {
        Self {
            handlers: vec![(DELETE_CONTROL_CLASS, match_delete)],
        }
    }

    /// Resolve an activation on `target`. Rows without a control, or with a
    /// control no selector matches, yield `None`.
    pub fn on_activate(&self, target: &Row) -> Option<ListAction> {
        let control = target.control.as_ref()?;
        self.handlers
            .iter()
            .find(|(class, _)| *class == control.class)
            .and_then(|(_, matcher)| matcher(control))
    }
}

impl Default for ListObserver {
    fn default() -> Self {
        Self::new()
    }
}

fn match_delete(control: &Control) -> Option<ListAction> {
    if control.data_email.is_empty() || control.data_activity.is_empty() {
        return None;
    }
    Some(ListAction::Unregister {
        activity: control.data_activity.clone(),
        email: control.data_email.clone(),
    })
}
