//! Storage layer for the ledger. Provides the [`AccountRegistry`], the sole
//! owner of every account.
//!
//! The registry lives for as long as its owner keeps it: it starts empty and
//! nothing is persisted.

mod accounts;

pub use accounts::AccountRegistry;
