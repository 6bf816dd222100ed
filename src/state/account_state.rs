//! Account state.

use crate::feed::AccountRecord;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Latest account snapshot.
#[derive(Debug, Clone, Default)]
pub struct AccountState {
    /// Most recent record, if any arrived yet.
    pub record: Option<AccountRecord>,
    /// Whether the account is loading.
    pub loading: bool,
    /// Last update timestamp.
    pub last_updated: Option<DateTime<Utc>>,
    /// Number of records received.
    pub updates: u64,
}

impl AccountState {
    /// Replace the snapshot.
    pub fn update(&mut self, record: AccountRecord) {
        self.record = Some(record);
        self.loading = false;
        self.last_updated = Some(Utc::now());
        self.updates += 1;
    }

    /// Balance minus exposure, if an account is known.
    pub fn available(&self) -> Option<Decimal> {
        self.record.as_ref().map(AccountRecord::available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::AccountStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_update_replaces_record() {
        let mut state = AccountState {
            loading: true,
            ..Default::default()
        };
        assert_eq!(state.available(), None);

        state.update(AccountRecord {
            account_id: "NDL-ABC".to_string(),
            balance: dec!(2000.00),
            exposure: dec!(150.50),
            currency: "GBP".to_string(),
            status: AccountStatus::Active,
        });

        assert!(!state.loading);
        assert_eq!(state.updates, 1);
        assert_eq!(state.available(), Some(dec!(1849.50)));
        assert!(state.last_updated.is_some());
    }
}
