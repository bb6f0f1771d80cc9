use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in an account's transaction log. Records are immutable
/// once created and the log is strictly append-only, so the position
/// in the log is also the chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance_after: Decimal,
    #[serde(default)]
    pub note: Option<String>,
}

impl Transaction {
    /// Stamp a new record at the current instant.
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        balance_after: Decimal,
        note: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            amount,
            balance_after,
            note,
        }
    }
}
