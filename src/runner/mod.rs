//! The runner is responsible for setting up a file stream for reading command
//! rows from CSV, applying them to an [`AccountRegistry`], and writing one
//! outcome row per command to a writer.
//!
//! This module provides both a synchronous and an asynchronous runner implementations.
//!
mod async_runner;
mod sync_runner;

pub use async_runner::run as run_async;
pub use sync_runner::run;

use tracing::{debug, info};

use crate::command::Command;
use crate::dto::{CommandRow, OutcomeRow};
use crate::stores::AccountRegistry;

/// Applies a single command row and renders its outcome.
/// Command failures become outcome rows; they never stop the run.
fn process_row(registry: &AccountRegistry, row: CommandRow) -> OutcomeRow {
    let command_type = row.command;
    let account = row.account.clone();
    let result = Command::try_from(row).and_then(|command| registry.execute(command));
    if let Err(err) = &result {
        debug!(account = %account, ?command_type, %err, "command rejected");
    }
    OutcomeRow::new(command_type, account, &result)
}

/// Logs a summary of the run, then the final state of every account.
fn report(registry: &AccountRegistry, commands: usize) {
    let accounts = registry.snapshot();
    info!(commands, accounts = accounts.len(), "finished processing");
    for account in &accounts {
        debug!(
            account = %account.account,
            holder = %account.holder,
            kind = account.kind,
            balance = %account.balance.normalize(),
            "final balance"
        );
    }
}

#[cfg(test)]
pub(crate) const EXAMPLE_OUTPUT: &str = "command,account,status,message
create,A1,ok,Account A1 created successfully.
create,C1,ok,Account C1 created successfully.
interest,A1,ok,Interest: 10. New balance: 1010
withdraw,C1,error,Insufficient funds. Available balance: 50
deposit,C1,invalid,Deposit amount must be positive.
balance,C1,ok,Balance: 50
balance,Z9,error,Account not found!
create,C1,error,Account already exists!
create,X1,error,Invalid account type!
interest,C1,error,Interest calculation only applies to savings accounts!
deposit,A1,ok,Deposited 25.5. New balance: 1035.5
withdraw,A1,invalid,Withdrawal amount must be positive.
info,A1,ok,\"Account Number: A1, Account Holder: Alice, Balance: 1035.5\"
";
