use rust_decimal::Decimal;

use crate::auth::pin::verify_pin;
use crate::error::{BankError, BankResult};
use crate::transactions::transaction::{Transaction, TransactionKind};

/// A single named account: credential digest, current balance and the
/// append-only log backing it. Balance only changes through `deposit`
/// and `withdraw`, which keep the log in step.
#[derive(Debug, Clone)]
pub struct Account {
    username: String,
    pin_hash: String,
    balance: Decimal,
    transactions: Vec<Transaction>,
}

impl Account {
    /// Fresh account with a zero balance and an empty log.
    pub fn new(username: String, pin_hash: String) -> Self {
        Self {
            username,
            pin_hash,
            balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    /// Reassemble an account from stored state. The caller is expected
    /// to pass a balance consistent with the log.
    pub fn from_parts(
        username: String,
        pin_hash: String,
        balance: Decimal,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            username,
            pin_hash,
            balance,
            transactions,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn pin_hash(&self) -> &str {
        &self.pin_hash
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Full log, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Check a candidate PIN against the stored digest.
    pub fn check_pin(&self, pin: &str) -> bool {
        verify_pin(pin, &self.pin_hash)
    }

    /// Add funds. The amount must be strictly positive; on success the
    /// appended record is returned.
    pub fn deposit(&mut self, amount: Decimal, note: Option<String>) -> BankResult<Transaction> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount(amount));
        }
        self.balance += amount;
        let tx = Transaction::new(TransactionKind::Deposit, amount, self.balance, note);
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// Remove funds. The amount must be strictly positive and covered
    /// by the current balance; overdrafts are rejected outright.
    pub fn withdraw(&mut self, amount: Decimal, note: Option<String>) -> BankResult<Transaction> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        let tx = Transaction::new(TransactionKind::Withdraw, amount, self.balance, note);
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// The most recent records, newest first, at most `limit` of them.
    pub fn statement(&self, limit: usize) -> Vec<Transaction> {
        self.transactions
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::pin::hash_pin;

    fn decimal(amount: i64) -> Decimal {
        Decimal::new(amount, 0)
    }

    fn account() -> Account {
        Account::new("alice".to_string(), hash_pin("1234"))
    }

    #[test]
    fn test_new_account_is_empty() {
        let acc = account();
        assert_eq!(acc.username(), "alice");
        assert_eq!(acc.balance(), Decimal::ZERO);
        assert!(acc.transactions().is_empty());
    }

    #[test]
    fn test_deposit() {
        let mut acc = account();
        let tx = acc.deposit(decimal(100), None).unwrap();
        assert_eq!(acc.balance(), decimal(100));
        assert_eq!(tx.kind, TransactionKind::Deposit);
        assert_eq!(tx.amount, decimal(100));
        assert_eq!(tx.balance_after, decimal(100));
        assert_eq!(acc.transactions().len(), 1);
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut acc = account();
        assert!(matches!(
            acc.deposit(Decimal::ZERO, None),
            Err(BankError::InvalidAmount(_))
        ));
        assert!(matches!(
            acc.deposit(decimal(-5), None),
            Err(BankError::InvalidAmount(_))
        ));
        // Rejected operations leave no trace.
        assert_eq!(acc.balance(), Decimal::ZERO);
        assert!(acc.transactions().is_empty());
    }

    #[test]
    fn test_withdraw() {
        let mut acc = account();
        acc.deposit(decimal(100), None).unwrap();
        let tx = acc.withdraw(decimal(40), None).unwrap();
        assert_eq!(acc.balance(), decimal(60));
        assert_eq!(tx.kind, TransactionKind::Withdraw);
        assert_eq!(tx.balance_after, decimal(60));
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let mut acc = account();
        acc.deposit(decimal(70), None).unwrap();
        let err = acc.withdraw(decimal(100), None).unwrap_err();
        match err {
            BankError::InsufficientFunds {
                requested,
                available,
            } => {
                assert_eq!(requested, decimal(100));
                assert_eq!(available, decimal(70));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(acc.balance(), decimal(70));
        assert_eq!(acc.transactions().len(), 1);
    }

    #[test]
    fn test_withdraw_rejects_non_positive() {
        let mut acc = account();
        acc.deposit(decimal(10), None).unwrap();
        assert!(matches!(
            acc.withdraw(Decimal::ZERO, None),
            Err(BankError::InvalidAmount(_))
        ));
        assert_eq!(acc.balance(), decimal(10));
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let mut acc = account();
        acc.deposit(decimal(55), None).unwrap();
        acc.withdraw(decimal(55), None).unwrap();
        assert_eq!(acc.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_check_pin() {
        let acc = account();
        assert!(acc.check_pin("1234"));
        assert!(!acc.check_pin("4321"));
    }

    #[test]
    fn test_balance_tracks_last_record() {
        let mut acc = account();
        acc.deposit(decimal(100), None).unwrap();
        acc.withdraw(decimal(30), None).unwrap();
        acc.deposit(decimal(5), None).unwrap();
        let last = acc.transactions().last().unwrap();
        assert_eq!(acc.balance(), last.balance_after);
        assert_eq!(acc.balance(), decimal(75));
    }

    #[test]
    fn test_statement_is_newest_first() {
        let mut acc = account();
        for amount in [10, 20, 30, 40, 50] {
            acc.deposit(decimal(amount), None).unwrap();
        }
        let recent = acc.statement(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].amount, decimal(50));
        assert_eq!(recent[1].amount, decimal(40));
    }

    #[test]
    fn test_statement_limit_beyond_log() {
        let mut acc = account();
        acc.deposit(decimal(10), None).unwrap();
        acc.deposit(decimal(20), None).unwrap();
        assert_eq!(acc.statement(10).len(), 2);
        assert!(acc.statement(0).is_empty());
    }
}
