//! In-memory banking ledger: checking and savings accounts held in an
//! [`AccountRegistry`] and driven through a small command interface.

mod account;
mod command;
pub mod csv_utils;
pub mod dto;
mod error;
mod runner;
mod stores;

pub use account::{Account, AccountKind, Posting, Validation, DEFAULT_INTEREST_RATE};
pub use command::{AccountInfo, Command, Response};
pub use error::Error;
pub use runner::{run, run_async};
pub use stores::AccountRegistry;
