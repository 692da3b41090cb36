/// A labelled single-line text input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

impl TextField {
    pub fn new(key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            value: value.into(),
        }
    }
}

/// Vertical list of text fields with one selected.
///
/// Typing only reaches a field while it is being edited; `Enter` starts an
/// edit and `Esc` restores the value it had when the edit began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub selected: usize,
    editing: Option<String>,
}

impl Form {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self {
            fields,
            selected: 0,
            editing: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn select_next(&mut self) {
        if !self.is_editing() && !self.fields.is_empty() {
            self.selected = (self.selected + 1) % self.fields.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.is_editing() && !self.fields.is_empty() {
            self.selected = (self.selected + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn begin_edit(&mut self) {
        if let Some(field) = self.fields.get(self.selected) {
            self.editing = Some(field.value.clone());
        }
    }

    pub fn commit_edit(&mut self) {
        self.editing = None;
    }

    pub fn cancel_edit(&mut self) {
        if let Some(original) = self.editing.take() {
            if let Some(field) = self.fields.get_mut(self.selected) {
                field.value = original;
            }
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_editing() {
            if let Some(field) = self.fields.get_mut(self.selected) {
                field.value.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.is_editing() {
            if let Some(field) = self.fields.get_mut(self.selected) {
                field.value.pop();
            }
        }
    }

    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or_default()
    }

    /// `(key, value)` pairs in field order
    pub fn values(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|f| (f.key, f.value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Form {
        Form::new(vec![
            TextField::new("name", "Name", "Ada"),
            TextField::new("age", "Age", "30"),
        ])
    }

    #[test]
    fn typing_requires_edit_mode() {
        let mut f = form();
        f.push_char('x');
        assert_eq!(f.value("name"), "Ada");

        f.begin_edit();
        f.push_char('m');
        f.commit_edit();
        assert_eq!(f.value("name"), "Adam");
    }

    #[test]
    fn cancel_restores_original_value() {
        let mut f = form();
        f.select_next();
        f.begin_edit();
        f.backspace();
        f.backspace();
        f.push_char('9');
        assert_eq!(f.value("age"), "9");
        f.cancel_edit();
        assert_eq!(f.value("age"), "30");
        assert!(!f.is_editing());
    }

    #[test]
    fn selection_wraps_and_is_frozen_while_editing() {
        let mut f = form();
        f.select_prev();
        assert_eq!(f.selected, 1);
        f.select_next();
        assert_eq!(f.selected, 0);

        f.begin_edit();
        f.select_next();
        assert_eq!(f.selected, 0);
    }

    #[test]
    fn values_in_order() {
        let f = form();
        let pairs: Vec<_> = f.values().collect();
        assert_eq!(pairs, [("name", "Ada"), ("age", "30")]);
        assert_eq!(f.value("missing"), "");
    }
}
