//! Request handlers exposed to the presentation layer.
//!
//! These are pull-based and independent of the mock feed. They return
//! canned or randomized data; there is no retry or timeout logic.

use crate::error::{Error, Result};
use crate::feed::{
    AccountRecord, AccountStatus, Clock, ConnectionRecord, RandomSource, RngSource, SystemClock,
    uniform_int,
};
use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex, PoisonError};

/// Channel returning the application version.
pub const GET_APP_VERSION: &str = "get-app-version";
/// Channel returning the account record.
pub const GET_ACCOUNT_INFO: &str = "api:get-account-info";
/// Channel returning the connection record.
pub const GET_CONNECTION_STATUS: &str = "api:get-connection-status";
/// Push channel carrying the startup message.
pub const MAIN_PROCESS_MESSAGE: &str = "main-process-message";

const DISCONNECTED_THRESHOLD: f64 = 0.2;
const LATENCY_MIN_MS: u32 = 50;
const LATENCY_SPAN_MS: f64 = 100.0;

/// Request/response boundary between host and presentation.
#[async_trait]
pub trait HostApi: Send + Sync {
    /// The host application version.
    async fn get_app_version(&self) -> Result<String>;

    /// The account record.
    async fn get_account_info(&self) -> Result<AccountRecord>;

    /// The connection record.
    async fn get_connection_status(&self) -> Result<ConnectionRecord>;

    /// Dispatch a request by channel name, returning its JSON payload.
    async fn invoke(&self, channel: &str) -> Result<serde_json::Value> {
        match channel {
            GET_APP_VERSION => Ok(serde_json::to_value(self.get_app_version().await?)?),
            GET_ACCOUNT_INFO => Ok(serde_json::to_value(self.get_account_info().await?)?),
            GET_CONNECTION_STATUS => {
                Ok(serde_json::to_value(self.get_connection_status().await?)?)
            }
            other => Err(Error::invalid_input(format!("Unknown channel: {}", other))),
        }
    }
}

/// Host handlers serving synthetic data.
pub struct MockHost {
    version: String,
    random: Mutex<Box<dyn RandomSource>>,
    clock: Arc<dyn Clock>,
}

impl MockHost {
    /// Create handlers using OS entropy and the system clock.
    pub fn new() -> Self {
        Self::with_sources(RngSource::from_entropy(), Arc::new(SystemClock))
    }

    /// Create handlers with explicit randomness and clock.
    pub fn with_sources(random: impl RandomSource + 'static, clock: Arc<dyn Clock>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            random: Mutex::new(Box::new(random)),
            clock,
        }
    }

    /// The fixed account returned by [`HostApi::get_account_info`].
    pub fn static_account() -> AccountRecord {
        AccountRecord {
            account_id: "mock-account-123".to_string(),
            balance: dec!(1234.56),
            exposure: dec!(0.00),
            currency: "GBP".to_string(),
            status: AccountStatus::Active,
        }
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostApi for MockHost {
    async fn get_app_version(&self) -> Result<String> {
        Ok(self.version.clone())
    }

    async fn get_account_info(&self) -> Result<AccountRecord> {
        Ok(Self::static_account())
    }

    async fn get_connection_status(&self) -> Result<ConnectionRecord> {
        let (connected, latency_ms) = {
            let mut random = self.random.lock().unwrap_or_else(PoisonError::into_inner);
            let connected = random.next_f64() > DISCONNECTED_THRESHOLD;
            let latency_ms = uniform_int(random.next_f64(), LATENCY_SPAN_MS, LATENCY_MIN_MS);
            (connected, latency_ms)
        };

        Ok(ConnectionRecord {
            connected,
            last_update: self.clock.now(),
            latency_ms,
        })
    }
}
