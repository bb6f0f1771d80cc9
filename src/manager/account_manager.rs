use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, warn};
use rust_decimal::Decimal;

use crate::accounts::account::Account;
use crate::auth::pin::{hash_pin, validate_pin_format};
use crate::error::{BankError, BankResult};
use crate::store::ledger_store::LedgerStore;
use crate::transactions::transaction::Transaction;

/// How many records a statement shows when the caller does not ask
/// for a specific count.
pub const DEFAULT_STATEMENT_LIMIT: usize = 10;

/// The account directory. Owns every account, the single login
/// session and the persistence policy: every successful mutation is
/// written back to the ledger file before it returns.
pub struct AccountManager {
    accounts: HashMap<String, Account>,
    logged_in: Option<String>,
    store: LedgerStore,
}

impl AccountManager {
    /// Open the directory over the ledger file at `path`. A missing
    /// file starts an empty directory; a broken one is downgraded to
    /// a warning and an empty directory, so startup always succeeds.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let store = LedgerStore::new(path);
        let accounts = match store.load() {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(
                    "could not load ledger {}: {}; starting with no accounts",
                    store.path().display(),
                    err
                );
                HashMap::new()
            }
        };
        debug!("loaded {} account(s)", accounts.len());
        Self {
            accounts,
            logged_in: None,
            store,
        }
    }

    /// Register a new account and persist the directory. The username
    /// must be free, the PIN well-formed and the initial deposit
    /// non-negative; a positive initial deposit is logged like any
    /// other deposit. The session is left untouched.
    pub fn create_account(
        &mut self,
        username: &str,
        pin: &str,
        initial_deposit: Decimal,
    ) -> BankResult<&Account> {
        if self.accounts.contains_key(username) {
            return Err(BankError::DuplicateUsername(username.to_string()));
        }
        validate_pin_format(pin)?;
        if initial_deposit < Decimal::ZERO {
            return Err(BankError::InvalidAmount(initial_deposit));
        }

        let mut account = Account::new(username.to_string(), hash_pin(pin));
        if initial_deposit > Decimal::ZERO {
            account.deposit(initial_deposit, Some("initial_deposit".to_string()))?;
        }
        self.accounts.insert(username.to_string(), account);
        self.save()?;
        Ok(self
            .accounts
            .get(username)
            .expect("account was inserted above"))
    }

    /// Authenticate and start a session, replacing any previous one.
    /// Failures leave the current session as it was.
    pub fn login(&mut self, username: &str, pin: &str) -> BankResult<&Account> {
        let account = self
            .accounts
            .get(username)
            .ok_or_else(|| BankError::AccountNotFound(username.to_string()))?;
        if !account.check_pin(pin) {
            return Err(BankError::IncorrectPin);
        }
        self.logged_in = Some(username.to_string());
        Ok(account)
    }

    /// End the session. Logging out while logged out is a no-op.
    pub fn logout(&mut self) {
        self.logged_in = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.is_some()
    }

    pub fn current_username(&self) -> Option<&str> {
        self.logged_in.as_deref()
    }

    /// Deposit into the logged-in account, persisting before return.
    pub fn deposit(&mut self, amount: Decimal, note: Option<String>) -> BankResult<Transaction> {
        let tx = self.current_account_mut()?.deposit(amount, note)?;
        self.save()?;
        Ok(tx)
    }

    /// Withdraw from the logged-in account, persisting before return.
    pub fn withdraw(&mut self, amount: Decimal, note: Option<String>) -> BankResult<Transaction> {
        let tx = self.current_account_mut()?.withdraw(amount, note)?;
        self.save()?;
        Ok(tx)
    }

    /// Balance of the logged-in account.
    pub fn balance(&self) -> BankResult<Decimal> {
        Ok(self.current_account()?.balance())
    }

    /// Most recent records of the logged-in account, newest first.
    /// `None` asks for the default count.
    pub fn statement(&self, limit: Option<usize>) -> BankResult<Vec<Transaction>> {
        let account = self.current_account()?;
        Ok(account.statement(limit.unwrap_or(DEFAULT_STATEMENT_LIMIT)))
    }

    /// Look up an account by name without touching the session.
    pub fn account(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn current_account(&self) -> BankResult<&Account> {
        let username = self.logged_in.as_ref().ok_or(BankError::NotLoggedIn)?;
        Ok(self
            .accounts
            .get(username)
            .expect("session always names an existing account"))
    }

    fn current_account_mut(&mut self) -> BankResult<&mut Account> {
        let username = self.logged_in.as_ref().ok_or(BankError::NotLoggedIn)?;
        Ok(self
            .accounts
            .get_mut(username)
            .expect("session always names an existing account"))
    }

    fn save(&self) -> BankResult<()> {
        self.store.save(&self.accounts)
    }
}
