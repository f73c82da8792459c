//! # Quick-Select / Bulk-Edit Session
//!
//! Transient UI state: which items are selected and which bulk edit is
//! staged. Nothing here is persisted.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────┐  enter   ┌───────────┐ choose_field ┌───────────────┐   │
//! │   │ Inactive │ ───────► │ Selecting │ ───────────► │ EditingField  │   │
//! │   └──────────┘          └───────────┘              └───────┬───────┘   │
//! │        ▲                  │  toggle(id)                    │           │
//! │        │                  ▼  (any active state)            │ set_value │
//! │        │                                                   ▼           │
//! │        │   take_bulk_update                    ┌───────────────────┐   │
//! │        └────────────────────────────────────── │   ReadyToApply    │   │
//! │        │                                       └───────────────────┘   │
//! │        │   exit (from anywhere): drops selection and staging           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Applying or deleting goes through `curio_db::Catalog`, which consumes the
//! session.

use crate::error::ValidationError;
use crate::types::{BulkField, BulkValue};
use crate::validation::ValidationResult;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Inactive,
    Selecting,
    EditingField(BulkField),
    ReadyToApply(BulkValue),
}

/// A bulk edit ready to hand to the item store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkUpdate {
    pub ids: Vec<String>,
    pub value: BulkValue,
}

/// Selected ids plus the staged bulk edit.
///
/// Ids are kept in selection order and never repeat.
#[derive(Debug, Clone, Default)]
pub struct SelectionSession {
    state: SessionState,
    selected: Vec<String>,
}

impl SelectionSession {
    pub fn new() -> Self {
        SelectionSession::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != SessionState::Inactive
    }

    /// Turns quick-select on. No effect if it is already on.
    pub fn enter(&mut self) {
        if !self.is_active() {
            self.selected.clear();
            self.state = SessionState::Selecting;
        }
    }

    /// Turns quick-select off, dropping the selection and any staged edit.
    pub fn exit(&mut self) {
        self.selected.clear();
        self.state = SessionState::Inactive;
    }

    /// The quick-select button.
    ///
    /// ## Returns
    /// Whether quick-select is now on.
    pub fn toggle_quick_select(&mut self) -> bool {
        if self.is_active() {
            self.exit();
        } else {
            self.enter();
        }
        self.is_active()
    }

    /// Flips membership of `id`. Ignored while inactive.
    ///
    /// ## Returns
    /// Whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.is_active() {
            return false;
        }

        match self.selected.iter().position(|selected| selected == id) {
            Some(index) => {
                self.selected.remove(index);
                false
            }
            None => {
                self.selected.push(id.to_string());
                true
            }
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|selected| selected == id)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Picks the field to bulk-edit, discarding any staged value.
    /// Ignored while inactive.
    pub fn choose_field(&mut self, field: BulkField) {
        if self.is_active() {
            self.state = SessionState::EditingField(field);
        }
    }

    /// Un-picks the field ("Select field..." in the dropdown).
    pub fn clear_field(&mut self) {
        if self.is_active() {
            self.state = SessionState::Selecting;
        }
    }

    pub fn staged_field(&self) -> Option<BulkField> {
        match self.state {
            SessionState::EditingField(field) => Some(field),
            SessionState::ReadyToApply(value) => Some(value.field()),
            _ => None,
        }
    }

    pub fn staged_value(&self) -> Option<BulkValue> {
        match self.state {
            SessionState::ReadyToApply(value) => Some(value),
            _ => None,
        }
    }

    /// Stages a value (a label) for the chosen field.
    ///
    /// A blank input un-stages the value and goes back to `EditingField`.
    ///
    /// ## Errors
    /// * `Required` - no field has been chosen
    /// * `NotAllowed` - the label is not an option of the chosen field
    pub fn set_value(&mut self, input: &str) -> ValidationResult<()> {
        let field = self.staged_field().ok_or_else(|| ValidationError::Required {
            field: "bulk edit field".to_string(),
        })?;

        self.state = match BulkValue::parse(field, input)? {
            Some(value) => SessionState::ReadyToApply(value),
            None => SessionState::EditingField(field),
        };
        Ok(())
    }

    /// Consumes a `ReadyToApply` session.
    ///
    /// The session returns to `Inactive` either way; the update is `None`
    /// when nothing was selected. Outside `ReadyToApply` this does nothing.
    pub fn take_bulk_update(&mut self) -> Option<BulkUpdate> {
        let SessionState::ReadyToApply(value) = self.state else {
            return None;
        };

        let ids = std::mem::take(&mut self.selected);
        self.exit();

        if ids.is_empty() {
            None
        } else {
            Some(BulkUpdate { ids, value })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemStatus, Rarity};

    fn selecting(ids: &[&str]) -> SelectionSession {
        let mut session = SelectionSession::new();
        session.enter();
        for id in ids {
            session.toggle(id);
        }
        session
    }

    #[test]
    fn test_toggle_has_set_semantics() {
        let mut session = selecting(&[]);

        assert!(session.toggle("a"));
        assert!(session.toggle("b"));
        assert!(!session.toggle("a"));
        assert!(session.toggle("a"));

        assert_eq!(session.selected(), &["b".to_string(), "a".to_string()]);
        assert_eq!(session.state(), SessionState::Selecting);
    }

    #[test]
    fn test_toggle_ignored_while_inactive() {
        let mut session = SelectionSession::new();
        assert!(!session.toggle("a"));
        assert_eq!(session.selected_count(), 0);
        assert!(!session.is_active());
    }

    #[test]
    fn test_full_bulk_edit_flow() {
        let mut session = selecting(&["a", "b"]);

        session.choose_field(BulkField::Status);
        assert_eq!(session.state(), SessionState::EditingField(BulkField::Status));

        session.set_value("Sold").unwrap();
        assert_eq!(
            session.state(),
            SessionState::ReadyToApply(BulkValue::Status(ItemStatus::Sold))
        );

        let update = session.take_bulk_update().unwrap();
        assert_eq!(update.ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(update.value, BulkValue::Status(ItemStatus::Sold));
        assert_eq!(session.state(), SessionState::Inactive);
        assert_eq!(session.selected_count(), 0);
    }

    #[test]
    fn test_choosing_field_resets_staged_value() {
        let mut session = selecting(&["a"]);
        session.choose_field(BulkField::Status);
        session.set_value("Owned").unwrap();

        session.choose_field(BulkField::Rarity);
        assert_eq!(session.staged_value(), None);
        assert_eq!(session.staged_field(), Some(BulkField::Rarity));

        session.set_value("Ultra Rare").unwrap();
        assert_eq!(
            session.staged_value(),
            Some(BulkValue::Rarity(Rarity::UltraRare))
        );
    }

    #[test]
    fn test_set_value_rules() {
        let mut session = selecting(&["a"]);
        assert!(matches!(
            session.set_value("Sold"),
            Err(ValidationError::Required { .. })
        ));

        session.choose_field(BulkField::Type);
        assert!(matches!(
            session.set_value("Sold"),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert_eq!(session.state(), SessionState::EditingField(BulkField::Type));

        session.set_value("Mega").unwrap();
        session.set_value("").unwrap();
        assert_eq!(session.state(), SessionState::EditingField(BulkField::Type));

        session.clear_field();
        assert_eq!(session.state(), SessionState::Selecting);
    }

    #[test]
    fn test_take_bulk_update_outside_ready_is_noop() {
        let mut session = selecting(&["a"]);
        session.choose_field(BulkField::Status);

        assert!(session.take_bulk_update().is_none());
        assert_eq!(session.state(), SessionState::EditingField(BulkField::Status));
        assert!(session.is_selected("a"));
    }

    #[test]
    fn test_apply_with_empty_selection_resets() {
        let mut session = selecting(&[]);
        session.choose_field(BulkField::Status);
        session.set_value("Wishlist").unwrap();

        assert!(session.take_bulk_update().is_none());
        assert!(!session.is_active());
    }

    #[test]
    fn test_toggling_keeps_staging() {
        let mut session = selecting(&["a"]);
        session.choose_field(BulkField::Status);
        session.set_value("Tradeable").unwrap();

        session.toggle("b");
        assert_eq!(
            session.staged_value(),
            Some(BulkValue::Status(ItemStatus::Tradeable))
        );
        assert_eq!(session.selected_count(), 2);
    }

    #[test]
    fn test_exit_discards_everything() {
        let mut session = selecting(&["a", "b"]);
        session.choose_field(BulkField::Rarity);
        session.set_value("Secret").unwrap();

        assert!(!session.toggle_quick_select());
        assert_eq!(session.state(), SessionState::Inactive);
        assert_eq!(session.selected_count(), 0);

        assert!(session.toggle_quick_select());
        assert_eq!(session.state(), SessionState::Selecting);
        assert_eq!(session.staged_field(), None);
    }
}
