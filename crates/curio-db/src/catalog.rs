//! # Catalog
//!
//! The persisted item store: an [`ItemStore`] plus the theme flag, written
//! through to the key-value table after every mutation.
//!
//! ## Write-Through
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  catalog.update(id, payload).await                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. ItemStore::update        in memory; NotFound stops here            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. kv.write_json("collectible-items", items)                          │
//! │       │                                                                 │
//! │       ├── Ok   → Ok(item)                                              │
//! │       └── Err  → Err(DbError); the in-memory change is KEPT            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations take `&mut self`, so there is exactly one writer at a time.
//! Reads (`items`, `get`, `store`) never touch the database.

use curio_core::confirm::{Confirm, DeleteOutcome, DeletePrompt};
use curio_core::form::SaveMode;
use curio_core::selection::SelectionSession;
use curio_core::{BulkValue, Item, ItemPayload, ItemStore, DARK_MODE_KEY, ITEMS_KEY};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::kv::KeyValueRepository;

/// The item store and theme flag, persisted.
#[derive(Debug)]
pub struct Catalog {
    kv: KeyValueRepository,
    store: ItemStore,
    dark_mode: bool,
}

impl Catalog {
    /// Loads the catalog from `db`.
    ///
    /// Absent keys mean a first run: an empty list and the light theme.
    /// Items sharing an id with an earlier item are dropped.
    ///
    /// ## Errors
    /// `Serialization` when the stored item list can't be decoded. Nothing is
    /// overwritten in that case.
    pub async fn open(db: &Database) -> DbResult<Self> {
        let kv = db.kv();

        let items: Vec<Item> = kv.read_json(ITEMS_KEY).await?.unwrap_or_default();
        let (store, dropped) = ItemStore::from_items(items);
        if dropped > 0 {
            warn!(dropped, "Dropped items with duplicate ids while loading");
        }

        let dark_mode = match kv.read_json::<bool>(DARK_MODE_KEY).await {
            Ok(flag) => flag.unwrap_or(false),
            Err(e @ DbError::Serialization(_)) => {
                warn!(error = %e, "Ignoring unreadable theme flag");
                false
            }
            Err(e) => return Err(e),
        };

        info!(
            items = store.len(),
            drafts = store.draft_count(),
            dark_mode,
            "Catalog loaded"
        );

        Ok(Catalog {
            kv,
            store,
            dark_mode,
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.store.get(id)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    // =========================================================================
    // Item Mutations
    // =========================================================================

    /// Adds a new item with a fresh id.
    pub async fn create(&mut self, payload: ItemPayload) -> DbResult<Item> {
        let item = self.store.create(payload);
        debug!(id = %item.id, "Item created");
        self.persist().await?;
        Ok(item)
    }

    /// Replaces an item's fields; see [`ItemStore::update`].
    pub async fn update(&mut self, id: &str, payload: ItemPayload) -> DbResult<Item> {
        let item = self.store.update(id, payload)?;
        debug!(id = %item.id, "Item updated");
        self.persist().await?;
        Ok(item)
    }

    /// Creates (`id = None`) or overwrites an item as a draft.
    pub async fn save_as_draft(
        &mut self,
        id: Option<&str>,
        payload: ItemPayload,
    ) -> DbResult<Item> {
        let item = self.store.save_as_draft(id, payload)?;
        debug!(id = %item.id, "Draft saved");
        self.persist().await?;
        Ok(item)
    }

    /// Form submit; see [`ItemStore::save`].
    pub async fn save(
        &mut self,
        editing: Option<&str>,
        payload: ItemPayload,
        mode: SaveMode,
    ) -> DbResult<Item> {
        let item = self.store.save(editing, payload, mode)?;
        debug!(id = %item.id, draft = mode.is_draft(), "Item saved");
        self.persist().await?;
        Ok(item)
    }

    /// Removes an item without asking. Unknown ids are a no-op.
    pub async fn delete(&mut self, id: &str) -> DbResult<bool> {
        let removed = self.store.delete(id);
        debug!(id = %id, removed, "Item delete");
        self.persist().await?;
        Ok(removed)
    }

    /// Asks `confirm`, then removes the item.
    pub async fn delete_confirmed(
        &mut self,
        id: &str,
        confirm: &mut impl Confirm,
    ) -> DbResult<DeleteOutcome> {
        if !confirm.confirm(&DeletePrompt::Single.message()) {
            debug!(id = %id, "Delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let removed = self.delete(id).await?;
        Ok(DeleteOutcome::Deleted(usize::from(removed)))
    }

    /// Removes every listed item without asking.
    pub async fn delete_many(&mut self, ids: &[String]) -> DbResult<usize> {
        let removed = self.store.delete_many(ids);
        debug!(requested = ids.len(), removed, "Items deleted");
        self.persist().await?;
        Ok(removed)
    }

    /// Asks `confirm`, then removes every selected item and ends the
    /// quick-select session. Declining keeps the session as it was.
    pub async fn delete_selected(
        &mut self,
        session: &mut SelectionSession,
        confirm: &mut impl Confirm,
    ) -> DbResult<DeleteOutcome> {
        let prompt = DeletePrompt::Many(session.selected_count()).message();
        if !confirm.confirm(&prompt) {
            debug!(selected = session.selected_count(), "Bulk delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let ids = session.selected().to_vec();
        session.exit();

        let removed = self.delete_many(&ids).await?;
        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Copies an item; see [`ItemStore::duplicate`].
    pub async fn duplicate(&mut self, id: &str) -> DbResult<Item> {
        let copy = self.store.duplicate(id)?;
        debug!(source = %id, id = %copy.id, "Item duplicated");
        self.persist().await?;
        Ok(copy)
    }

    /// Sets the favorite flag. Unknown ids are a no-op.
    pub async fn set_favorite(&mut self, id: &str, value: bool) -> DbResult<bool> {
        let matched = self.store.set_favorite(id, value);
        debug!(id = %id, value, matched, "Favorite set");
        self.persist().await?;
        Ok(matched)
    }

    /// The heart button.
    ///
    /// ## Returns
    /// The new flag, or `None` if the id is unknown (nothing is written).
    pub async fn toggle_favorite(&mut self, id: &str) -> DbResult<Option<bool>> {
        let Some(current) = self.store.get(id).map(|item| item.is_favorite) else {
            return Ok(None);
        };

        self.set_favorite(id, !current).await?;
        Ok(Some(!current))
    }

    /// Writes `value` into every listed item. Unknown ids are skipped.
    pub async fn bulk_update(&mut self, ids: &[String], value: BulkValue) -> DbResult<usize> {
        let updated = self.store.bulk_update(ids, value);
        debug!(field = ?value.field(), requested = ids.len(), updated, "Bulk update");
        self.persist().await?;
        Ok(updated)
    }

    /// Applies a `ReadyToApply` session.
    ///
    /// ## Returns
    /// Number of items updated; `0` with nothing written when the session
    /// had nothing to apply.
    pub async fn apply_bulk_edit(&mut self, session: &mut SelectionSession) -> DbResult<usize> {
        match session.take_bulk_update() {
            Some(update) => self.bulk_update(&update.ids, update.value).await,
            None => Ok(0),
        }
    }

    // =========================================================================
    // Theme
    // =========================================================================

    pub async fn set_dark_mode(&mut self, enabled: bool) -> DbResult<()> {
        self.dark_mode = enabled;
        self.kv.write_json(DARK_MODE_KEY, &enabled).await.map_err(|e| {
            warn!(error = %e, "Failed to persist theme flag");
            e
        })
    }

    /// ## Returns
    /// The new flag.
    pub async fn toggle_dark_mode(&mut self) -> DbResult<bool> {
        let enabled = !self.dark_mode;
        self.set_dark_mode(enabled).await?;
        Ok(enabled)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    async fn persist(&self) -> DbResult<()> {
        self.kv
            .write_json(ITEMS_KEY, self.store.items())
            .await
            .map_err(|e| {
                warn!(error = %e, items = self.store.len(), "Failed to persist items");
                e
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use curio_core::types::{BulkField, ItemStatus};

    async fn open_empty() -> (Database, Catalog) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = Catalog::open(&db).await.unwrap();
        (db, catalog)
    }

    fn payload(name: &str) -> ItemPayload {
        ItemPayload {
            name: name.to_string(),
            ..ItemPayload::default()
        }
    }

    #[tokio::test]
    async fn test_first_run_is_empty_and_light() {
        let (_db, catalog) = open_empty().await;
        assert!(catalog.items().is_empty());
        assert!(!catalog.dark_mode());
    }

    #[tokio::test]
    async fn test_mutations_survive_reopen() {
        let (db, mut catalog) = open_empty().await;

        let a = catalog.create(payload("Labubu")).await.unwrap();
        let b = catalog.create(payload("Crybaby")).await.unwrap();
        catalog.set_favorite(&b.id, true).await.unwrap();
        catalog.delete(&a.id).await.unwrap();
        let copy = catalog.duplicate(&b.id).await.unwrap();

        let reopened = Catalog::open(&db).await.unwrap();
        assert_eq!(reopened.items(), catalog.items());
        assert_eq!(reopened.items().len(), 2);
        assert_eq!(reopened.get(&copy.id).unwrap().name, "Crybaby (Copy)");
        assert!(reopened.get(&b.id).unwrap().is_favorite);
    }

    #[tokio::test]
    async fn test_not_found_surfaces_and_writes_nothing() {
        let (db, mut catalog) = open_empty().await;

        let err = catalog.update("missing", payload("x")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = catalog.duplicate("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        assert_eq!(db.kv().read(ITEMS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_in_memory_change() {
        let (db, mut catalog) = open_empty().await;
        catalog.create(payload("Saved")).await.unwrap();

        db.close().await;

        let err = catalog.create(payload("Unsaved")).await.unwrap_err();
        assert!(err.is_storage_failure());
        assert_eq!(catalog.items().len(), 2);
        assert_eq!(catalog.items()[1].name, "Unsaved");
    }

    #[tokio::test]
    async fn test_declined_delete_changes_nothing() {
        let (_db, mut catalog) = open_empty().await;
        let item = catalog.create(payload("Keep me")).await.unwrap();

        let mut prompts = Vec::new();
        let mut decline = |prompt: &str| {
            prompts.push(prompt.to_string());
            false
        };
        let outcome = catalog.delete_confirmed(&item.id, &mut decline).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(prompts, vec!["Are you sure you want to delete this item?"]);
        assert!(catalog.get(&item.id).is_some());

        let mut accept = |_: &str| true;
        let outcome = catalog.delete_confirmed(&item.id, &mut accept).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted(1));
        assert!(catalog.items().is_empty());
    }

    #[tokio::test]
    async fn test_delete_selected() {
        let (_db, mut catalog) = open_empty().await;
        let a = catalog.create(payload("A")).await.unwrap();
        let b = catalog.create(payload("B")).await.unwrap();
        let c = catalog.create(payload("C")).await.unwrap();

        let mut session = SelectionSession::new();
        session.enter();
        session.toggle(&a.id);
        session.toggle(&c.id);

        let mut decline = |_: &str| false;
        let outcome = catalog
            .delete_selected(&mut session, &mut decline)
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(catalog.items().len(), 3);
        assert_eq!(session.selected_count(), 2);

        let mut seen = String::new();
        let mut accept = |prompt: &str| {
            seen = prompt.to_string();
            true
        };
        let outcome = catalog
            .delete_selected(&mut session, &mut accept)
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted(2));
        assert_eq!(seen, "Are you sure you want to delete 2 item(s)?");
        assert_eq!(catalog.items(), &[b]);
        assert!(!session.is_active());
    }

    #[tokio::test]
    async fn test_apply_bulk_edit() {
        let (db, mut catalog) = open_empty().await;
        let a = catalog.create(payload("A")).await.unwrap();
        let b = catalog.create(payload("B")).await.unwrap();

        let mut session = SelectionSession::new();
        session.enter();
        session.toggle(&a.id);
        session.toggle("ghost");
        session.choose_field(BulkField::Status);
        session.set_value("Sold").unwrap();

        let updated = catalog.apply_bulk_edit(&mut session).await.unwrap();
        assert_eq!(updated, 1);
        assert!(!session.is_active());
        assert_eq!(catalog.get(&a.id).unwrap().status, ItemStatus::Sold);
        assert_eq!(catalog.get(&b.id).unwrap().status, ItemStatus::Owned);

        let reopened = Catalog::open(&db).await.unwrap();
        assert_eq!(reopened.get(&a.id).unwrap().status, ItemStatus::Sold);

        // Not ready: nothing happens.
        session.enter();
        assert_eq!(catalog.apply_bulk_edit(&mut session).await.unwrap(), 0);
        assert!(session.is_active());
    }

    #[tokio::test]
    async fn test_draft_then_final_save() {
        let (_db, mut catalog) = open_empty().await;

        let draft = catalog.save(None, payload(""), SaveMode::Draft).await.unwrap();
        assert!(draft.is_draft);
        assert_eq!(catalog.store().draft_count(), 1);

        let saved = catalog
            .save(Some(&draft.id), payload("Finished"), SaveMode::Final)
            .await
            .unwrap();
        assert_eq!(saved.id, draft.id);
        assert!(!saved.is_draft);
        assert_eq!(catalog.store().draft_count(), 0);
    }

    #[tokio::test]
    async fn test_toggle_favorite() {
        let (_db, mut catalog) = open_empty().await;
        let item = catalog.create(payload("Fav")).await.unwrap();

        assert_eq!(catalog.toggle_favorite(&item.id).await.unwrap(), Some(true));
        assert_eq!(catalog.toggle_favorite(&item.id).await.unwrap(), Some(false));
        assert_eq!(catalog.toggle_favorite("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_dark_mode_persists() {
        let (db, mut catalog) = open_empty().await;

        assert!(catalog.toggle_dark_mode().await.unwrap());
        assert_eq!(
            db.kv().read(DARK_MODE_KEY).await.unwrap().as_deref(),
            Some("true")
        );

        let reopened = Catalog::open(&db).await.unwrap();
        assert!(reopened.dark_mode());
    }

    #[tokio::test]
    async fn test_corrupted_items_refuse_to_load() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().write(ITEMS_KEY, "[{\"id\": 3").await.unwrap();

        let err = Catalog::open(&db).await.unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));

        // Left untouched for recovery.
        assert_eq!(
            db.kv().read(ITEMS_KEY).await.unwrap().as_deref(),
            Some("[{\"id\": 3")
        );
    }

    #[tokio::test]
    async fn test_too_many_tags_refuse_to_load() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let item = Item::from_payload("id-1".to_string(), payload("Tagged"), false);
        let mut value = serde_json::to_value(vec![item]).unwrap();
        value[0]["tags"] = serde_json::json!(["a", "b", "c", "d", "e", "f", "g"]);
        db.kv().write(ITEMS_KEY, &value.to_string()).await.unwrap();

        let err = Catalog::open(&db).await.unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_duplicate_ids_dropped_on_load() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let first = Item::from_payload("same".to_string(), payload("First"), false);
        let second = Item::from_payload("same".to_string(), payload("Second"), false);
        db.kv()
            .write_json(ITEMS_KEY, &vec![first, second])
            .await
            .unwrap();

        let catalog = Catalog::open(&db).await.unwrap();
        assert_eq!(catalog.items().len(), 1);
        assert_eq!(catalog.items()[0].name, "First");
    }

    #[tokio::test]
    async fn test_loads_records_with_decimal_prices() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let raw = r#"[{
            "id": "1712345678901", "name": "Labubu", "brand": "POP MART",
            "series": "Have a Seat", "description": "", "acquiredDate": "2024-03-01",
            "purchasePrice": 12.5, "soldPrice": 0, "estimatedValue": 0,
            "imageUrl": "", "status": "Owned", "type": "Blind Box Single",
            "rarity": "Common", "totalBoxesInSet": "", "condition": "Mint",
            "authenticity": "Real", "tags": [], "isFavorite": false
        }]"#;
        db.kv().write(ITEMS_KEY, raw).await.unwrap();

        let mut catalog = Catalog::open(&db).await.unwrap();
        let item = catalog.items()[0].clone();
        assert_eq!(item.purchase_price_cents, 1250);
        assert_eq!(item.quantity, 1);

        catalog.set_favorite(&item.id, true).await.unwrap();
        let stored: serde_json::Value = db.kv().read_json(ITEMS_KEY).await.unwrap().unwrap();
        assert_eq!(stored[0]["purchasePrice"], 12.5);
        assert_eq!(stored[0]["quantity"], 1);
        assert_eq!(stored[0]["isFavorite"], true);
    }

    #[tokio::test]
    async fn test_unreadable_theme_flag_defaults_to_light() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().write(DARK_MODE_KEY, "maybe").await.unwrap();

        let catalog = Catalog::open(&db).await.unwrap();
        assert!(!catalog.dark_mode());
    }
}
