pub mod accounts;
pub mod auth;
pub mod cli;
pub mod error;
pub mod manager;
pub mod store;
pub mod transactions;

pub use accounts::account::Account;
pub use cli::run;
pub use error::{BankError, BankResult};
pub use manager::account_manager::{AccountManager, DEFAULT_STATEMENT_LIMIT};
pub use store::ledger_store::LedgerStore;
pub use transactions::transaction::{Transaction, TransactionKind};
