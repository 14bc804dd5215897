//! Account model: balance arithmetic and its validation, independent of how
//! an account is found.
//!
//! The two account kinds are a closed variant ([`AccountKind`]). Interest
//! accrual exists only on the savings variant, so the registry decides
//! whether to offer it by matching on the kind.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Interest rate applied to savings accounts when none is given.
pub const DEFAULT_INTEREST_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Checking,
    Savings { interest_rate: Decimal },
}

impl AccountKind {
    /// Builds a kind from its label. The rate is only kept for savings accounts.
    pub fn from_label(label: &str, interest_rate: Option<Decimal>) -> Result<Self, Error> {
        match label.parse::<KindLabel>()? {
            KindLabel::Checking => Ok(AccountKind::Checking),
            KindLabel::Savings => Ok(AccountKind::Savings {
                interest_rate: interest_rate.unwrap_or(DEFAULT_INTEREST_RATE),
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings { .. } => "savings",
        }
    }

    pub fn interest_rate(&self) -> Option<Decimal> {
        match self {
            AccountKind::Checking => None,
            AccountKind::Savings { interest_rate } => Some(*interest_rate),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KindLabel {
    Checking,
    Savings,
}

impl FromStr for KindLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.eq_ignore_ascii_case("checking") {
            Ok(KindLabel::Checking)
        } else if label.eq_ignore_ascii_case("savings") {
            Ok(KindLabel::Savings)
        } else {
            Err(Error::InvalidAccountType)
        }
    }
}

/// Soft validation outcome. Not an error: the request was understood but
/// carries an amount that cannot be posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    DepositNotPositive,
    WithdrawalNotPositive,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::DepositNotPositive => write!(f, "Deposit amount must be positive."),
            Validation::WithdrawalNotPositive => write!(f, "Withdrawal amount must be positive."),
        }
    }
}

/// Result of a balance-changing request that passed the identity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posting {
    /// Applied; carries the new balance.
    Posted(Decimal),
    Rejected(Validation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: String,
    holder: String,
    kind: AccountKind,
    balance: Decimal,
}

impl Account {
    /// The initial balance is taken as given, negative values included.
    pub fn new(
        id: impl Into<String>,
        holder: impl Into<String>,
        kind: AccountKind,
        initial_balance: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            holder: holder.into(),
            kind,
            balance: initial_balance,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Posting, Error> {
        if amount <= Decimal::ZERO {
            return Ok(Posting::Rejected(Validation::DepositNotPositive));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(Error::AmountOverflow)?;
        Ok(Posting::Posted(self.balance))
    }

    /// Funds are checked before the sign of the amount, so a non-positive
    /// amount only reaches the validation outcome when it does not exceed
    /// the balance.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Posting, Error> {
        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                available: self.balance,
            });
        }
        if amount <= Decimal::ZERO {
            return Ok(Posting::Rejected(Validation::WithdrawalNotPositive));
        }
        self.balance -= amount;
        Ok(Posting::Posted(self.balance))
    }

    /// Adds `balance * interest_rate` to the balance and returns
    /// `(interest, new_balance)`. Only reachable with a savings rate; the
    /// registry matches on the kind before calling it.
    pub(crate) fn accrue_interest(
        &mut self,
        interest_rate: Decimal,
    ) -> Result<(Decimal, Decimal), Error> {
        let interest = self
            .balance
            .checked_mul(interest_rate)
            .ok_or(Error::AmountOverflow)?;
        self.balance = self
            .balance
            .checked_add(interest)
            .ok_or(Error::AmountOverflow)?;
        Ok((interest, self.balance))
    }
}
