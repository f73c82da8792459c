//! # curio-db: Storage Layer for Curio
//!
//! This crate persists the Curio catalog. It stores the item list and the
//! theme flag as JSON values in a local SQLite key-value table, using sqlx
//! for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Curio Data Flow                                  │
//! │                                                                         │
//! │  UI action (save, delete, favorite, bulk edit)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     curio-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Catalog     │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │ (catalog.rs)  │───►│   (kv.rs)     │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ ItemStore +   │    │ read / write  │    │ 001_kv_store │  │   │
//! │  │   │ write-through │    │ JSON values   │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                                │   │
//! │  │                       Database (pool.rs)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file: kv_store("collectible-items", "darkMode")                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Key-value repository
//! - [`catalog`] - The persisted item store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use curio_db::{Catalog, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("curio.db")).await?;
//! let mut catalog = Catalog::open(&db).await?;
//!
//! let item = catalog.create(payload).await?;
//! catalog.set_favorite(&item.id, true).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::Catalog;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::kv::KeyValueRepository;
