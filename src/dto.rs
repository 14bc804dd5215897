use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use crate::command::{Command, Response};
use crate::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Create,
    Deposit,
    Withdraw,
    Balance,
    Info,
    Interest,
}

/// One input row: `command,account,holder,kind,amount,rate`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CommandRow {
    pub command: CommandType,
    pub account: String,
    pub holder: Option<String>,
    pub kind: Option<String>,
    #[serde(deserialize_with = "deserialize_decimal_4dp")]
    pub amount: Option<Decimal>,
    pub rate: Option<Decimal>,
}

fn deserialize_decimal_4dp<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Decimal>::deserialize(deserializer)
        .map(|opt_dec| opt_dec.map(|dec| dec.round_dp_with_strategy(4, RoundingStrategy::ToZero)))
}

impl TryFrom<CommandRow> for Command {
    type Error = Error;

    fn try_from(row: CommandRow) -> Result<Self, Self::Error> {
        let account = row.account;
        match row.command {
            CommandType::Create => Ok(Command::CreateAccount {
                account,
                holder: row.holder.ok_or(Error::InvalidCommand("holder"))?,
                kind: row.kind.ok_or(Error::InvalidCommand("kind"))?,
                initial_balance: row.amount.unwrap_or(Decimal::ZERO),
                interest_rate: row.rate,
            }),
            CommandType::Deposit => Ok(Command::Deposit {
                account,
                amount: row.amount.ok_or(Error::InvalidCommand("amount"))?,
            }),
            CommandType::Withdraw => Ok(Command::Withdraw {
                account,
                amount: row.amount.ok_or(Error::InvalidCommand("amount"))?,
            }),
            CommandType::Balance => Ok(Command::GetBalance { account }),
            CommandType::Info => Ok(Command::GetInfo { account }),
            CommandType::Interest => Ok(Command::AccrueInterest { account }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Invalid,
    Error,
}

/// One output row: `command,account,status,message`.
#[derive(Debug, Serialize, PartialEq)]
pub struct OutcomeRow {
    pub command: CommandType,
    pub account: String,
    pub status: Status,
    pub message: String,
}

impl OutcomeRow {
    pub fn new(command: CommandType, account: String, result: &Result<Response, Error>) -> Self {
        let (status, message) = match result {
            Ok(Response::Rejected(validation)) => (Status::Invalid, validation.to_string()),
            Ok(response) => (Status::Ok, response.to_string()),
            Err(err) => (Status::Error, err.to_string()),
        };
        Self {
            command,
            account,
            status,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse_csv_row(row: &str) -> Result<CommandRow, csv::Error> {
        let data_with_header = format!("command,account,holder,kind,amount,rate\n{}", row);
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data_with_header.as_bytes());
        reader.deserialize().next().unwrap()
    }

    #[test]
    fn test_parse_create() {
        assert_eq!(
            parse_csv_row("create,A1,Alice,savings,1000,0.02").unwrap(),
            CommandRow {
                command: CommandType::Create,
                account: "A1".to_owned(),
                holder: Some("Alice".to_owned()),
                kind: Some("savings".to_owned()),
                amount: Some(dec!(1000)),
                rate: Some(dec!(0.02)),
            }
        );
    }

    #[test]
    fn test_parse_balance_with_empty_fields() {
        assert_eq!(
            parse_csv_row("balance, Z9 ,,,,").unwrap(),
            CommandRow {
                command: CommandType::Balance,
                account: "Z9".to_owned(),
                holder: None,
                kind: None,
                amount: None,
                rate: None,
            }
        );
    }

    #[test]
    fn test_parse_invalid_command() {
        assert!(parse_csv_row("transfer,A1,,,1,").is_err());
    }

    #[test]
    fn test_parse_invalid_amount_format() {
        assert!(parse_csv_row("deposit,A1,,,abc,").is_err());
    }

    #[test]
    fn test_rounds_amount_to_4_decimal_places() {
        let row = parse_csv_row("deposit,A1,,,0.12345,").unwrap();
        assert_eq!(row.amount, Some(dec!(0.1234)));

        let row = parse_csv_row("withdraw,A1,,,-0.123499999,").unwrap();
        assert_eq!(row.amount, Some(dec!(-0.1234)));
    }

    #[test]
    fn test_create_defaults() {
        let command = Command::try_from(parse_csv_row("create,C1,Bob,checking,,").unwrap()).unwrap();
        assert_eq!(
            command,
            Command::CreateAccount {
                account: "C1".to_owned(),
                holder: "Bob".to_owned(),
                kind: "checking".to_owned(),
                initial_balance: Decimal::ZERO,
                interest_rate: None,
            }
        );
    }

    #[test]
    fn test_missing_fields() {
        let missing_kind = Command::try_from(parse_csv_row("create,C1,Bob,,10,").unwrap());
        assert_eq!(missing_kind, Err(Error::InvalidCommand("kind")));

        let missing_amount = Command::try_from(parse_csv_row("deposit,C1,,,,").unwrap());
        assert_eq!(missing_amount, Err(Error::InvalidCommand("amount")));
    }

    #[test]
    fn test_outcome_status() {
        use crate::account::Validation;

        let ok = OutcomeRow::new(
            CommandType::Balance,
            "A1".to_owned(),
            &Ok(Response::Balance(dec!(10.00))),
        );
        assert_eq!(ok.status, Status::Ok);
        assert_eq!(ok.message, "Balance: 10");

        let invalid = OutcomeRow::new(
            CommandType::Deposit,
            "A1".to_owned(),
            &Ok(Response::Rejected(Validation::DepositNotPositive)),
        );
        assert_eq!(invalid.status, Status::Invalid);

        let error = OutcomeRow::new(CommandType::Info, "Z9".to_owned(), &Err(Error::AccountNotFound));
        assert_eq!(error.status, Status::Error);
        assert_eq!(error.message, "Account not found!");
    }
}
