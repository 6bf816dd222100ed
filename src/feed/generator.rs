//! Synthetic record generation.
//!
//! Every function draws from a [`RandomSource`] in a fixed order, so a
//! scripted source reproduces a record exactly.

use super::clock::Clock;
use super::random::RandomSource;
use super::records::{AccountRecord, AccountStatus, ConnectionRecord};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Prefix of generated account identifiers.
pub const ACCOUNT_ID_PREFIX: &str = "NDL-";

/// Currency of generated accounts.
pub const CURRENCY: &str = "GBP";

/// Leading base-36 digits dropped from the identifier suffix.
const SKIPPED_ID_DIGITS: usize = 5;

/// Maximum base-36 digits rendered for a sample.
const MAX_ID_DIGITS: usize = 11;

const BALANCE_MIN: Decimal = dec!(1000);
const BALANCE_SPAN: Decimal = dec!(5000);
const EXPOSURE_SPAN: Decimal = dec!(200);

const SUSPENDED_THRESHOLD: f64 = 0.1;
const DISCONNECTED_THRESHOLD: f64 = 0.15;
const LATENCY_MIN_MS: u32 = 25;
const LATENCY_SPAN_MS: f64 = 150.0;

/// Generate a fresh account record.
///
/// Draws, in order: identifier, balance, exposure, status.
pub fn generate_account(random: &mut dyn RandomSource) -> AccountRecord {
    let account_id = format!("{}{}", ACCOUNT_ID_PREFIX, id_suffix(random.next_f64()));
    let balance = scaled_amount(random.next_f64(), BALANCE_SPAN, BALANCE_MIN);
    let exposure = scaled_amount(random.next_f64(), EXPOSURE_SPAN, Decimal::ZERO);
    let status = if random.next_f64() > SUSPENDED_THRESHOLD {
        AccountStatus::Active
    } else {
        AccountStatus::Suspended
    };

    AccountRecord {
        account_id,
        balance,
        exposure,
        currency: CURRENCY.to_string(),
        status,
    }
}

/// Generate a fresh connection record.
///
/// Draws, in order: connected flag, latency.
pub fn generate_connection(random: &mut dyn RandomSource, clock: &dyn Clock) -> ConnectionRecord {
    let connected = random.next_f64() > DISCONNECTED_THRESHOLD;
    let last_update = clock.now();
    let latency_ms = uniform_int(random.next_f64(), LATENCY_SPAN_MS, LATENCY_MIN_MS);

    ConnectionRecord {
        connected,
        last_update,
        latency_ms,
    }
}

/// `floor(sample * span) + min`.
pub(crate) fn uniform_int(sample: f64, span: f64, min: u32) -> u32 {
    (sample * span).floor() as u32 + min
}

/// `sample * span + min` rounded to pennies, kept below `min + span`.
pub(crate) fn scaled_amount(sample: f64, span: Decimal, min: Decimal) -> Decimal {
    let sample = Decimal::from_f64_retain(sample).unwrap_or_default();
    let amount = (sample * span + min)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.min(min + span - dec!(0.01))
}

/// Upper-case base-36 digits of a unit sample, minus the leading ones.
fn id_suffix(sample: f64) -> String {
    let mut fraction = sample;
    let mut digits = String::with_capacity(MAX_ID_DIGITS);
    while fraction > 0.0 && digits.len() < MAX_ID_DIGITS {
        fraction *= 36.0;
        let digit = fraction.floor();
        fraction -= digit;
        if let Some(c) = char::from_digit(digit as u32, 36) {
            digits.push(c.to_ascii_uppercase());
        }
    }
    digits.chars().skip(SKIPPED_ID_DIGITS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::clock::MockClock;
    use crate::feed::random::{RngSource, SequenceSource};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn fixed_clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(|| Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        clock
    }

    #[test]
    fn test_account_from_scripted_draws() {
        let mut random = SequenceSource::new([0.5, 0.25, 0.5, 0.95]);
        let account = generate_account(&mut random);

        // 0.5 in base 36 is 0.I, so nothing is left after skipping.
        assert_eq!(account.account_id, "NDL-");
        assert_eq!(account.balance, dec!(2250.00));
        assert_eq!(account.exposure, dec!(100.00));
        assert_eq!(account.currency, "GBP");
        assert_eq!(account.status, AccountStatus::Active);
        assert_eq!(random.draws(), 4);
    }

    #[test]
    fn test_low_status_draw_suspends() {
        let mut random = SequenceSource::new([0.5, 0.5, 0.5, 0.05]);
        assert_eq!(
            generate_account(&mut random).status,
            AccountStatus::Suspended
        );
    }

    #[test]
    fn test_account_id_suffix() {
        let mut random = RngSource::seeded(3);
        let account = generate_account(&mut random);
        let suffix = account.account_id.strip_prefix(ACCOUNT_ID_PREFIX).unwrap();
        assert!(!suffix.is_empty());
        assert!(suffix.len() <= MAX_ID_DIGITS - SKIPPED_ID_DIGITS);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_amount_ranges_across_samples() {
        let mut random = RngSource::seeded(1234);
        for _ in 0..1000 {
            let account = generate_account(&mut random);
            assert!(account.balance >= dec!(1000.00) && account.balance < dec!(6000.00));
            assert!(account.exposure >= dec!(0.00) && account.exposure < dec!(200.00));
            assert!(account.balance.scale() <= 2);
            assert!(account.exposure.scale() <= 2);
        }
    }

    #[test]
    fn test_amounts_at_upper_edge_stay_in_range() {
        let mut random = SequenceSource::new([0.5, 0.999_999_9, 0.999_999_9, 0.5]);
        let account = generate_account(&mut random);
        assert_eq!(account.balance, dec!(5999.99));
        assert_eq!(account.exposure, dec!(199.99));
    }

    #[test]
    fn test_active_ratio_is_about_ninety_percent() {
        let mut random = RngSource::seeded(99);
        let active = (0..1000)
            .filter(|_| generate_account(&mut random).is_active())
            .count();
        assert!((850..=950).contains(&active), "active = {}", active);
    }

    #[test]
    fn test_connection_from_scripted_draws() {
        let clock = fixed_clock();
        let mut random = SequenceSource::new([0.9, 0.5]);
        let connection = generate_connection(&mut random, &clock);

        assert!(connection.connected);
        assert_eq!(connection.latency_ms, 100);
        assert_eq!(
            connection.last_update,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_low_connected_draw_disconnects() {
        let clock = fixed_clock();
        let mut random = SequenceSource::new([0.15, 0.0]);
        let connection = generate_connection(&mut random, &clock);
        assert!(!connection.connected);
        assert_eq!(connection.latency_ms, 25);
    }

    #[test]
    fn test_latency_range_across_samples() {
        let clock = fixed_clock();
        let mut random = RngSource::seeded(5);
        for _ in 0..1000 {
            let latency = generate_connection(&mut random, &clock).latency_ms;
            assert!((25..175).contains(&latency));
        }
    }
}
