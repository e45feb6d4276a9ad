//! Signup form state

use crossterm::event::{Event, KeyEvent};
use tui_input::backend::crossterm::EventHandler as _;
use tui_input::Input;

use crate::board::SignupFields;
use crate::render::SelectOption;

/// Form field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Email,
    Activity,
}

impl FormField {
    /// Get all fields in order
    pub fn all() -> [FormField; 2] {
        [FormField::Email, FormField::Activity]
    }

    pub fn next(&self) -> FormField {
        match self {
            FormField::Email => FormField::Activity,
            FormField::Activity => FormField::Email,
        }
    }

    pub fn previous(&self) -> FormField {
        // Two fields: previous and next coincide
        self.next()
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Email => "Student Email",
            FormField::Activity => "Activity",
        }
    }
}

/// The signup form: a free-text email and an activity picked from the
/// selector options of the latest render
#[derive(Debug, Clone)]
pub struct FormData {
    pub email: Input,
    /// Selected option value; empty means the placeholder is selected
    pub activity: String,
    pub current_field: FormField,
}

impl FormData {
    pub fn new() -> Self {
        Self {
            email: Input::default(),
            activity: String::new(),
            current_field: FormField::Email,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = self.current_field.next();
    }

    pub fn previous_field(&mut self) {
        self.current_field = self.current_field.previous();
    }

    /// Feed a key to the email input
    pub fn handle_email_key(&mut self, key: KeyEvent) {
        self.email.handle_event(&Event::Key(key));
    }

    /// Index of the current selection within `options`, falling back to the
    /// placeholder when the selected activity is no longer listed
    pub fn selected_index(&self, options: &[SelectOption]) -> usize {
        options
            .iter()
            .position(|o| o.value == self.activity)
            .unwrap_or(0)
    }

    pub fn select_next_activity(&mut self, options: &[SelectOption]) {
        if options.is_empty() {
            return;
        }
        let idx = (self.selected_index(options) + 1) % options.len();
        self.activity = options[idx].value.clone();
    }

    pub fn select_previous_activity(&mut self, options: &[SelectOption]) {
        if options.is_empty() {
            return;
        }
        let idx = self.selected_index(options);
        let idx = if idx == 0 { options.len() - 1 } else { idx - 1 };
        self.activity = options[idx].value.clone();
    }

    /// Label shown for the activity selector
    pub fn activity_label<'a>(&self, options: &'a [SelectOption]) -> &'a str {
        options
            .get(self.selected_index(options))
            .map(|o| o.label.as_str())
            .unwrap_or(crate::render::SELECT_PLACEHOLDER)
    }
}

impl Default for FormData {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupFields for FormData {
    fn email(&self) -> String {
        self.email.value().to_string()
    }

    fn activity(&self) -> String {
        self.activity.clone()
    }

    fn reset(&mut self) {
        self.email.reset();
        self.activity.clear();
        self.current_field = FormField::Email;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn options() -> Vec<SelectOption> {
        let mut options = vec![SelectOption::placeholder()];
        for name in ["Chess Club", "Gym Class"] {
            options.push(SelectOption {
                value: name.to_string(),
                label: name.to_string(),
            });
        }
        options
    }

    #[test]
    fn test_typing_into_email() {
        let mut form = FormData::new();
        for c in "emma@m.edu".chars() {
            form.handle_email_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        form.handle_email_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(form.email(), "emma@m.ed");
    }

    #[test]
    fn test_activity_selection_cycles_through_options() {
        let options = options();
        let mut form = FormData::new();
        assert_eq!(form.activity_label(&options), "-- Select an activity --");

        form.select_next_activity(&options);
        assert_eq!(form.activity(), "Chess Club");
        form.select_next_activity(&options);
        form.select_next_activity(&options);
        assert_eq!(form.activity(), "");

        form.select_previous_activity(&options);
        assert_eq!(form.activity(), "Gym Class");
    }

    #[test]
    fn test_vanished_activity_falls_back_to_placeholder_index() {
        let options = options();
        let mut form = FormData::new();
        form.activity = "Drama Club".to_string();
        assert_eq!(form.selected_index(&options), 0);
        assert_eq!(form.activity_label(&options), "-- Select an activity --");
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut form = FormData::new();
        form.email = Input::new("emma@m.edu".to_string());
        form.activity = "Chess Club".to_string();
        form.next_field();
        form.reset();
        assert_eq!(form.email(), "");
        assert_eq!(form.activity(), "");
        assert_eq!(form.current_field, FormField::Email);
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(FormField::Email.next(), FormField::Activity);
        assert_eq!(FormField::Activity.next(), FormField::Email);
        assert_eq!(FormField::all().len(), 2);
    }
}
