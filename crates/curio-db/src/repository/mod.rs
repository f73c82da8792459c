//! # Repository Module
//!
//! Storage repositories for Curio.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Catalog (catalog.rs)                                                  │
//! │       │                                                                 │
//! │       │  db.kv().write_json(ITEMS_KEY, items)                          │
//! │       ▼                                                                 │
//! │  KeyValueRepository                                                    │
//! │  ├── read(&self, key)          → Option<String>                        │
//! │  ├── write(&self, key, value)  → upsert                                │
//! │  └── remove(&self, key)                                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  kv_store table                                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`KeyValueRepository`](kv::KeyValueRepository) - Opaque key → value store

pub mod kv;
