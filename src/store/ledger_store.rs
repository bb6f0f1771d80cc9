use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::account::Account;
use crate::error::BankResult;
use crate::transactions::transaction::Transaction;

/// On-disk form of one account. The username is the key of the
/// enclosing map, so it is not repeated inside the record. Older
/// ledger files may omit `balance` or `transaction_log`; both fill
/// with empty defaults on load.
#[derive(Debug, Serialize, Deserialize)]
struct AccountRecord {
    credential_digest: String,
    #[serde(default)]
    balance: Decimal,
    #[serde(default)]
    transaction_log: Vec<Transaction>,
}

impl AccountRecord {
    fn from_account(account: &Account) -> Self {
        Self {
            credential_digest: account.pin_hash().to_string(),
            balance: account.balance(),
            transaction_log: account.transactions().to_vec(),
        }
    }

    /// Balance implied by the log: the newest `balance_after`, or zero
    /// for an empty log.
    fn derived_balance(&self) -> Decimal {
        self.transaction_log
            .last()
            .map(|tx| tx.balance_after)
            .unwrap_or(Decimal::ZERO)
    }

    /// Turn the record back into a live account. When the stored
    /// balance disagrees with the log, the log wins and the mismatch
    /// is logged.
    fn into_account(self, username: &str) -> Account {
        let derived = self.derived_balance();
        if derived != self.balance {
            warn!(
                "stored balance for '{}' ({}) disagrees with its transaction log ({}); using the log",
                username, self.balance, derived
            );
        }
        Account::from_parts(
            username.to_string(),
            self.credential_digest,
            derived,
            self.transaction_log,
        )
    }
}

/// Reads and writes the whole account map as a single JSON document.
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every account from the ledger file. A missing file is a
    /// fresh ledger and yields an empty map; an unreadable or
    /// malformed file is an error for the caller to decide on.
    pub fn load(&self) -> BankResult<HashMap<String, Account>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let records: HashMap<String, AccountRecord> = serde_json::from_str(&content)?;
        Ok(records
            .into_iter()
            .map(|(username, record)| {
                let account = record.into_account(&username);
                (username, account)
            })
            .collect())
    }

    /// Write the full account map as pretty-printed JSON. The document
    /// goes to a sibling temp file first and is renamed over the
    /// target, so a crash mid-write never leaves a truncated ledger.
    pub fn save(&self, accounts: &HashMap<String, Account>) -> BankResult<()> {
        let records: HashMap<&str, AccountRecord> = accounts
            .iter()
            .map(|(username, account)| (username.as_str(), AccountRecord::from_account(account)))
            .collect();
        let json = serde_json::to_string_pretty(&records)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
