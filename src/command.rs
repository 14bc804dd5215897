//! Command-style interface consumed by front ends.
//!
//! A front end builds a [`Command`], hands it to
//! [`AccountRegistry::execute`] and renders the returned [`Response`] or
//! [`Error`] through their `Display` impls.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::account::{Account, Posting, Validation};
use crate::stores::AccountRegistry;
use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateAccount {
        account: String,
        holder: String,
        kind: String,
        initial_balance: Decimal,
        interest_rate: Option<Decimal>,
    },
    Deposit {
        account: String,
        amount: Decimal,
    },
    Withdraw {
        account: String,
        amount: Decimal,
    },
    GetBalance {
        account: String,
    },
    GetInfo {
        account: String,
    },
    AccrueInterest {
        account: String,
    },
}

/// Descriptive record of one account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountInfo {
    pub account: String,
    pub holder: String,
    pub kind: &'static str,
    pub balance: Decimal,
    pub interest_rate: Option<Decimal>,
}

impl From<&Account> for AccountInfo {
    fn from(account: &Account) -> Self {
        Self {
            account: account.id().to_owned(),
            holder: account.holder().to_owned(),
            kind: account.kind().label(),
            balance: account.balance(),
            interest_rate: account.kind().interest_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Created { account: String },
    Deposited { amount: Decimal, balance: Decimal },
    Withdrew { amount: Decimal, balance: Decimal },
    Balance(Decimal),
    Info(AccountInfo),
    InterestAccrued { interest: Decimal, balance: Decimal },
    /// The request was understood but its amount cannot be posted.
    Rejected(Validation),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Created { account } => write!(f, "Account {} created successfully.", account),
            Response::Deposited { amount, balance } => write!(
                f,
                "Deposited {}. New balance: {}",
                amount.normalize(),
                balance.normalize()
            ),
            Response::Withdrew { amount, balance } => write!(
                f,
                "Withdrew {}. New balance: {}",
                amount.normalize(),
                balance.normalize()
            ),
            Response::Balance(balance) => write!(f, "Balance: {}", balance.normalize()),
            Response::Info(info) => write!(
                f,
                "Account Number: {}, Account Holder: {}, Balance: {}",
                info.account,
                info.holder,
                info.balance.normalize()
            ),
            Response::InterestAccrued { interest, balance } => write!(
                f,
                "Interest: {}. New balance: {}",
                interest.normalize(),
                balance.normalize()
            ),
            Response::Rejected(validation) => fmt::Display::fmt(validation, f),
        }
    }
}

fn posted(posting: Posting, amount: Decimal, build: fn(Decimal, Decimal) -> Response) -> Response {
    match posting {
        Posting::Posted(balance) => build(amount, balance),
        Posting::Rejected(validation) => Response::Rejected(validation),
    }
}

impl AccountRegistry {
    /// Dispatches a command to the matching registry operation.
    pub fn execute(&self, command: Command) -> Result<Response, Error> {
        match command {
            Command::CreateAccount {
                account,
                holder,
                kind,
                initial_balance,
                interest_rate,
            } => {
                self.create_account(&account, &holder, &kind, initial_balance, interest_rate)?;
                Ok(Response::Created { account })
            }
            Command::Deposit { account, amount } => {
                let posting = self.deposit(&account, amount)?;
                Ok(posted(posting, amount, |amount, balance| {
                    Response::Deposited { amount, balance }
                }))
            }
            Command::Withdraw { account, amount } => {
                let posting = self.withdraw(&account, amount)?;
                Ok(posted(posting, amount, |amount, balance| {
                    Response::Withdrew { amount, balance }
                }))
            }
            Command::GetBalance { account } => self.balance(&account).map(Response::Balance),
            Command::GetInfo { account } => self.info(&account).map(Response::Info),
            Command::AccrueInterest { account } => {
                let (interest, balance) = self.accrue_interest(&account)?;
                Ok(Response::InterestAccrued { interest, balance })
            }
        }
    }
}
