use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};
use tracing::debug;

use crate::account::{Account, AccountKind, Posting};
use crate::command::AccountInfo;
use crate::Error;

/// Exclusive owner of every account, keyed by identifier.
///
/// Creation takes the map's write lock; every other operation takes the
/// read lock plus the target account's own mutex, so requests against
/// different accounts never wait on each other.
#[derive(Default)]
pub struct AccountRegistry {
    accounts: RwLock<HashMap<String, Mutex<Account>>>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an account under `id`.
    /// An existing account with the same identifier is left untouched.
    pub fn create_account(
        &self,
        id: &str,
        holder: &str,
        kind: &str,
        initial_balance: Decimal,
        interest_rate: Option<Decimal>,
    ) -> Result<(), Error> {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(id) {
            return Err(Error::DuplicateAccount);
        }
        let kind = AccountKind::from_label(kind, interest_rate)?;
        accounts.insert(
            id.to_owned(),
            Mutex::new(Account::new(id, holder, kind, initial_balance)),
        );
        debug!(account = id, kind = kind.label(), %initial_balance, "account created");
        Ok(())
    }

    pub fn deposit(&self, id: &str, amount: Decimal) -> Result<Posting, Error> {
        let posting = self.with_account(id, |account| account.deposit(amount))?;
        debug!(account = id, %amount, ?posting, "deposit");
        Ok(posting)
    }

    pub fn withdraw(&self, id: &str, amount: Decimal) -> Result<Posting, Error> {
        let posting = self.with_account(id, |account| account.withdraw(amount))?;
        debug!(account = id, %amount, ?posting, "withdrawal");
        Ok(posting)
    }

    pub fn balance(&self, id: &str) -> Result<Decimal, Error> {
        self.with_account(id, |account| Ok(account.balance()))
    }

    pub fn info(&self, id: &str) -> Result<AccountInfo, Error> {
        self.with_account(id, |account| Ok(AccountInfo::from(&*account)))
    }

    /// Returns `(interest, new_balance)`.
    pub fn accrue_interest(&self, id: &str) -> Result<(Decimal, Decimal), Error> {
        let (interest, balance) = self.with_account(id, |account| match account.kind() {
            AccountKind::Savings { interest_rate } => account.accrue_interest(interest_rate),
            AccountKind::Checking => Err(Error::NotInterestBearing),
        })?;
        debug!(account = id, %interest, %balance, "interest accrued");
        Ok((interest, balance))
    }

    /// All accounts, sorted by identifier.
    pub fn snapshot(&self) -> Vec<AccountInfo> {
        let accounts = self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut infos: Vec<_> = accounts
            .values()
            .map(|account| AccountInfo::from(&*lock(account)))
            .collect();
        infos.sort_by(|a, b| a.account.cmp(&b.account));
        infos
    }

    pub fn len(&self) -> usize {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` against the account under `id` while holding its lock.
    fn with_account<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Account) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let accounts = self
            .accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let account = accounts.get(id).ok_or(Error::AccountNotFound)?;
        let mut account = lock(account);
        f(&mut account)
    }
}

fn lock(account: &Mutex<Account>) -> MutexGuard<'_, Account> {
    account.lock().unwrap_or_else(PoisonError::into_inner)
}
