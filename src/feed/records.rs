//! Account and connection records pushed by the feed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    #[default]
    Active,
    Suspended,
    Closed,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Suspended => write!(f, "Suspended"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

/// Snapshot of the trading account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// Account identifier.
    pub account_id: String,
    /// Account balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    /// Funds currently tied up in open bets.
    #[serde(with = "rust_decimal::serde::float")]
    pub exposure: Decimal,
    /// ISO currency code (e.g., "GBP").
    pub currency: String,
    /// Account status.
    pub status: AccountStatus,
}

impl AccountRecord {
    /// Funds not tied up in exposure.
    ///
    /// Exposure is not capped by the balance, so this can be negative.
    pub fn available(&self) -> Decimal {
        self.balance - self.exposure
    }

    /// Check if the account can trade.
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

/// Snapshot of the exchange connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    /// Whether the exchange is reachable.
    pub connected: bool,
    /// When this snapshot was taken.
    pub last_update: DateTime<Utc>,
    /// Round-trip latency in milliseconds.
    #[serde(rename = "latency")]
    pub latency_ms: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal, exposure: Decimal) -> AccountRecord {
        AccountRecord {
            account_id: "NDL-TEST".to_string(),
            balance,
            exposure,
            currency: "GBP".to_string(),
            status: AccountStatus::Active,
        }
    }

    #[test]
    fn test_available_funds() {
        assert_eq!(account(dec!(1234.56), dec!(34.56)).available(), dec!(1200.00));
    }

    #[test]
    fn test_available_funds_can_go_negative() {
        assert_eq!(account(dec!(100.00), dec!(150.25)).available(), dec!(-50.25));
    }

    #[test]
    fn test_account_wire_format() {
        let json = serde_json::to_value(account(dec!(1234.56), dec!(0))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "accountId": "NDL-TEST",
                "balance": 1234.56,
                "exposure": 0.0,
                "currency": "GBP",
                "status": "ACTIVE",
            })
        );
    }

    #[test]
    fn test_connection_wire_format() {
        let record = ConnectionRecord {
            connected: true,
            last_update: "2024-05-01T12:00:00Z".parse().unwrap(),
            latency_ms: 42,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["connected"], true);
        assert_eq!(json["latency"], 42);
        assert_eq!(json["lastUpdate"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AccountStatus::Suspended.to_string(), "Suspended");
        assert_eq!(
            serde_json::to_string(&AccountStatus::Closed).unwrap(),
            "\"CLOSED\""
        );
    }
}
