//! # Item Store
//!
//! The canonical, in-memory list of catalog items and every mutation on it.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                     ┌──────────────────────┐                            │
//! │   mutations ──────► │      ItemStore       │  single writer             │
//! │   (&mut self)       │   Vec<Item> (order   │                            │
//! │                     │   = insertion order) │                            │
//! │                     └──────────┬───────────┘                            │
//! │                                │ &[Item]                                │
//! │                ┌───────────────┴───────────────┐                        │
//! │                ▼                               ▼                        │
//! │         view::apply                   SelectionSession                  │
//! │     (borrows, returns &Item)        (holds ids, never items)            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This type never touches storage. `curio_db::Catalog` wraps it and writes
//! the list out after every mutation.
//!
//! ## Not-found policy
//! | operation                        | unknown id          |
//! |----------------------------------|---------------------|
//! | `update`, `duplicate`            | `CoreError::ItemNotFound` |
//! | `delete`, `delete_many`          | silent no-op        |
//! | `set_favorite`, `bulk_update`    | silent no-op        |

use std::collections::HashSet;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::form::SaveMode;
use crate::types::{BulkValue, Item, ItemPayload};
use crate::validation::validate_uuid;
use crate::COPY_SUFFIX;

/// Generates a fresh item id.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// The authoritative item list.
///
/// ## Invariants
/// - Item ids are unique
/// - Items keep insertion order (new and duplicated items are appended)
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ItemStore { items: Vec::new() }
    }

    /// Builds a store from a previously persisted list.
    ///
    /// Later items whose id was already seen are dropped, so the uniqueness
    /// invariant holds even for hand-edited data.
    ///
    /// ## Returns
    /// The store and the number of dropped duplicates.
    pub fn from_items(items: Vec<Item>) -> (Self, usize) {
        let total = items.len();
        let mut seen: HashSet<String> = HashSet::with_capacity(total);
        let mut kept: Vec<Item> = Vec::with_capacity(total);

        for item in items {
            if seen.insert(item.id.clone()) {
                kept.push(item);
            }
        }

        let dropped = total - kept.len();
        (ItemStore { items: kept }, dropped)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items saved as drafts.
    pub fn draft_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_draft).count()
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    // =========================================================================
    // Create / Update
    // =========================================================================

    /// Adds a new, non-draft item with a fresh id.
    ///
    /// Names and series may repeat; only ids are unique.
    pub fn create(&mut self, payload: ItemPayload) -> Item {
        self.append(generate_item_id(), payload, false)
    }

    /// Adds a new, non-draft item under a caller-chosen id.
    ///
    /// ## Errors
    /// * `Validation(InvalidFormat)` - `id` is not a UUID
    /// * `Validation(Duplicate)` - `id` is already in the store
    pub fn create_with_id(&mut self, id: &str, payload: ItemPayload) -> CoreResult<Item> {
        validate_uuid(id)?;
        if self.contains(id) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: id.to_string(),
            }
            .into());
        }
        Ok(self.append(id.to_string(), payload, false))
    }

    /// Replaces every editable field of the item with `id`.
    ///
    /// `id` and `is_favorite` are preserved; the item stops being a draft.
    pub fn update(&mut self, id: &str, payload: ItemPayload) -> CoreResult<Item> {
        self.overwrite(id, payload, false)
    }

    /// Saves `payload` as a draft: a new item when `id` is `None`, otherwise
    /// an update of the existing item that marks it as a draft.
    pub fn save_as_draft(&mut self, id: Option<&str>, payload: ItemPayload) -> CoreResult<Item> {
        match id {
            Some(id) => self.overwrite(id, payload, true),
            None => Ok(self.append(generate_item_id(), payload, true)),
        }
    }

    /// Form submit: creates when `editing` is `None`, updates otherwise.
    pub fn save(
        &mut self,
        editing: Option<&str>,
        payload: ItemPayload,
        mode: SaveMode,
    ) -> CoreResult<Item> {
        match (editing, mode) {
            (_, SaveMode::Draft) => self.save_as_draft(editing, payload),
            (Some(id), SaveMode::Final) => self.update(id, payload),
            (None, SaveMode::Final) => Ok(self.create(payload)),
        }
    }

    fn append(&mut self, id: String, payload: ItemPayload, is_draft: bool) -> Item {
        let item = Item::from_payload(id, payload, is_draft);
        self.items.push(item.clone());
        item
    }

    fn overwrite(&mut self, id: &str, payload: ItemPayload, is_draft: bool) -> CoreResult<Item> {
        let item = self
            .get_mut(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;
        item.apply_payload(payload);
        item.is_draft = is_draft;
        Ok(item.clone())
    }

    // =========================================================================
    // Delete / Duplicate / Favorite
    // =========================================================================

    /// Removes the item with `id`. Idempotent.
    ///
    /// ## Returns
    /// `true` if an item was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Removes every item whose id is in `ids`.
    ///
    /// ## Returns
    /// Number of items removed.
    pub fn delete_many(&mut self, ids: &[String]) -> usize {
        let doomed: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let before = self.items.len();
        self.items.retain(|item| !doomed.contains(item.id.as_str()));
        before - self.items.len()
    }

    /// Appends a copy of the item with `id`.
    ///
    /// The copy gets a new id, `" (Copy)"` appended to its name, and starts
    /// out neither favorite nor draft.
    pub fn duplicate(&mut self, id: &str) -> CoreResult<Item> {
        let source = self
            .get(id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

        let copy = Item {
            id: generate_item_id(),
            name: format!("{}{}", source.name, COPY_SUFFIX),
            is_favorite: false,
            is_draft: false,
            ..source.clone()
        };

        self.items.push(copy.clone());
        Ok(copy)
    }

    /// Sets the favorite flag.
    ///
    /// ## Returns
    /// `true` if the item exists.
    pub fn set_favorite(&mut self, id: &str, value: bool) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.is_favorite = value;
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Bulk Update
    // =========================================================================

    /// Writes `value` into every item whose id is in `ids`.
    ///
    /// Unknown ids are skipped. Only the field carried by `value` changes.
    ///
    /// ## Returns
    /// Number of items updated.
    pub fn bulk_update(&mut self, ids: &[String], value: BulkValue) -> usize {
        let targets: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut updated = 0;
        for item in self
            .items
            .iter_mut()
            .filter(|item| targets.contains(item.id.as_str()))
        {
            value.apply_to(item);
            updated += 1;
        }
        updated
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
