use std::error::Error;
use std::io::{self, Write};
use std::path::Path;

use chrono::SecondsFormat;
use csv::Writer;
use rust_decimal::Decimal;

use crate::manager::account_manager::AccountManager;
use crate::transactions::transaction::Transaction;

/// The interactive shell shows a longer tail of history than the
/// default statement.
const STATEMENT_ROWS: usize = 20;

/// Run the interactive shell over the ledger file at `path`. Returns
/// when the user picks Exit or stdin reaches end of input.
pub fn run(path: &Path) -> Result<(), Box<dyn Error>> {
    let mut manager = AccountManager::new(path);

    println!("=== Simple Bank Ledger ===");
    loop {
        println!();
        println!("[1] Create account  [2] Login  [3] Exit");
        let Some(choice) = prompt("> ")? else {
            break;
        };
        match choice.as_str() {
            "1" => create_flow(&mut manager)?,
            "2" => login_flow(&mut manager)?,
            "3" => {
                println!("Goodbye.");
                break;
            }
            _ => println!("Unknown option."),
        }
    }
    Ok(())
}

/// Print a label, flush, and read one trimmed line. `None` means the
/// input stream is finished.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn create_flow(manager: &mut AccountManager) -> Result<(), Box<dyn Error>> {
    let Some(username) = prompt("Choose username: ")? else {
        return Ok(());
    };
    let Some(pin) = prompt("Choose 4-digit PIN: ")? else {
        return Ok(());
    };
    let Some(raw) = prompt("Initial deposit (0 if none): ")? else {
        return Ok(());
    };
    let Some(initial) = parse_amount_or_zero(&raw) else {
        println!("Not a valid amount.");
        return Ok(());
    };
    match manager.create_account(&username, &pin, initial) {
        Ok(account) => println!("Account '{}' created.", account.username()),
        Err(err) => println!("Error: {}", err),
    }
    Ok(())
}

fn login_flow(manager: &mut AccountManager) -> Result<(), Box<dyn Error>> {
    let Some(username) = prompt("Username: ")? else {
        return Ok(());
    };
    let Some(pin) = prompt("PIN: ")? else {
        return Ok(());
    };
    match manager.login(&username, &pin) {
        Ok(account) => {
            println!(
                "Welcome, {}. Balance: {}",
                account.username(),
                account.balance()
            );
        }
        Err(err) => {
            println!("Error: {}", err);
            return Ok(());
        }
    }
    session_loop(manager)
}

/// Inner menu for a logged-in user. Leaves the session cleared on
/// every way out, including end of input.
fn session_loop(manager: &mut AccountManager) -> Result<(), Box<dyn Error>> {
    loop {
        println!();
        println!("[1] Balance  [2] Deposit  [3] Withdraw  [4] Statement  [5] Logout");
        let Some(choice) = prompt("> ")? else {
            manager.logout();
            return Ok(());
        };
        match choice.as_str() {
            "1" => match manager.balance() {
                Ok(balance) => println!("Balance: {}", balance),
                Err(err) => println!("Error: {}", err),
            },
            "2" => deposit_flow(manager)?,
            "3" => withdraw_flow(manager)?,
            "4" => statement_flow(manager)?,
            "5" => {
                manager.logout();
                println!("Logged out.");
                return Ok(());
            }
            _ => println!("Unknown option."),
        }
    }
}

fn deposit_flow(manager: &mut AccountManager) -> Result<(), Box<dyn Error>> {
    let Some(raw) = prompt("Amount to deposit: ")? else {
        return Ok(());
    };
    let Ok(amount) = raw.parse::<Decimal>() else {
        println!("Not a valid amount.");
        return Ok(());
    };
    match manager.deposit(amount, None) {
        Ok(tx) => println!("Deposited {}. Balance: {}", tx.amount, tx.balance_after),
        Err(err) => println!("Error: {}", err),
    }
    Ok(())
}

fn withdraw_flow(manager: &mut AccountManager) -> Result<(), Box<dyn Error>> {
    let Some(raw) = prompt("Amount to withdraw: ")? else {
        return Ok(());
    };
    let Ok(amount) = raw.parse::<Decimal>() else {
        println!("Not a valid amount.");
        return Ok(());
    };
    match manager.withdraw(amount, None) {
        Ok(tx) => println!("Withdrew {}. Balance: {}", tx.amount, tx.balance_after),
        Err(err) => println!("Error: {}", err),
    }
    Ok(())
}

fn statement_flow(manager: &mut AccountManager) -> Result<(), Box<dyn Error>> {
    match manager.statement(Some(STATEMENT_ROWS)) {
        Ok(transactions) => write_statement(io::stdout(), &transactions)?,
        Err(err) => println!("Error: {}", err),
    }
    Ok(())
}

/// Render statement rows as CSV with a header, newest first, in the
/// order the caller passed them.
fn write_statement<W: io::Write>(
    out: W,
    transactions: &[Transaction],
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(&["timestamp", "type", "amount", "balance_after", "note"])?;

    for tx in transactions {
        wtr.serialize((
            tx.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            tx.kind.as_str(),
            tx.amount.to_string(),
            tx.balance_after.to_string(),
            tx.note.as_deref().unwrap_or(""),
        ))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Blank input counts as zero, matching the "0 if none" prompt.
fn parse_amount_or_zero(input: &str) -> Option<Decimal> {
    if input.is_empty() {
        return Some(Decimal::ZERO);
    }
    input.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::transaction::TransactionKind;

    fn decimal(amount: i64) -> Decimal {
        Decimal::new(amount, 0)
    }

    fn record(
        kind: TransactionKind,
        amount: i64,
        balance_after: i64,
        note: Option<&str>,
    ) -> Transaction {
        Transaction {
            timestamp: "2026-01-10T09:30:00Z".parse().unwrap(),
            kind,
            amount: decimal(amount),
            balance_after: decimal(balance_after),
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_amount_or_zero() {
        assert_eq!(parse_amount_or_zero(""), Some(Decimal::ZERO));
        assert_eq!(parse_amount_or_zero("12.50"), Some(Decimal::new(1250, 2)));
        assert_eq!(parse_amount_or_zero("abc"), None);
    }

    #[test]
    fn test_write_statement_renders_csv() {
        let transactions = vec![
            record(TransactionKind::Withdraw, 30, 70, None),
            record(TransactionKind::Deposit, 100, 100, Some("initial_deposit")),
        ];

        let mut out = Vec::new();
        write_statement(&mut out, &transactions).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,type,amount,balance_after,note")
        );
        assert_eq!(
            lines.next(),
            Some("2026-01-10T09:30:00Z,withdraw,30,70,")
        );
        assert_eq!(
            lines.next(),
            Some("2026-01-10T09:30:00Z,deposit,100,100,initial_deposit")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_statement_empty_log_has_only_header() {
        let mut out = Vec::new();
        write_statement(&mut out, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.trim_end(), "timestamp,type,amount,balance_after,note");
    }
}
