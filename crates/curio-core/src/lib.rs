//! # curio-core: Pure Collection Logic for Curio
//!
//! This crate is the **heart** of the Curio collectibles catalog. It owns the
//! item model, the in-memory collection state machine, the view pipeline and
//! the bulk-edit session, all with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Curio Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI (external collaborator)                   │   │
//! │  │    Item Form ──► Item Grid ──► Quick Select ──► Theme Toggle    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ curio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │   view    │  │ selection │  │   form    │  │   │
//! │  │   │ ItemStore │  │  filter   │  │ bulk edit │  │ ItemForm  │  │   │
//! │  │   │ mutations │  │  + sort   │  │  session  │  │ payloads  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    curio-db (Storage Layer)                     │   │
//! │  │         Key-value store, Catalog (persisted item store)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Item and its closed enumerations
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`form`] - Form contract: editable form state to validated payload
//! - [`store`] - The canonical item list and its mutations
//! - [`view`] - Draft/search/status filters and sorting
//! - [`selection`] - Quick-select and bulk-edit state machine
//! - [`confirm`] - Confirmation seam for destructive operations
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use curio_core::form::{ItemForm, SaveMode};
//! use curio_core::store::ItemStore;
//! use curio_core::view::{self, ViewQuery};
//!
//! let mut store = ItemStore::new();
//!
//! let mut form = ItemForm::default();
//! form.name = "Labubu".to_string();
//! let payload = form.into_payload(SaveMode::Final).unwrap();
//!
//! let item = store.create(payload);
//! assert!(!item.is_favorite);
//!
//! let visible = view::apply(store.items(), &ViewQuery::default());
//! assert_eq!(visible.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod confirm;
pub mod error;
pub mod form;
pub mod money;
pub mod selection;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use store::ItemStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key holding the serialized item list.
pub const ITEMS_KEY: &str = "collectible-items";

/// Storage key holding the serialized dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Maximum number of tags on a single item.
pub const MAX_TAGS: usize = 6;

/// Suffix appended to the name of a duplicated item.
pub const COPY_SUFFIX: &str = " (Copy)";
