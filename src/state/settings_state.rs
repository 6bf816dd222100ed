//! Global settings.
//!
//! Settings live in memory only and reset on restart.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How often data auto-refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RefreshInterval {
    OneSecond,
    ThreeSeconds,
    #[default]
    FiveSeconds,
    TenSeconds,
    ThirtySeconds,
}

impl RefreshInterval {
    /// All options, shortest first.
    pub const ALL: [RefreshInterval; 5] = [
        Self::OneSecond,
        Self::ThreeSeconds,
        Self::FiveSeconds,
        Self::TenSeconds,
        Self::ThirtySeconds,
    ];

    /// Interval in seconds.
    pub fn seconds(self) -> u64 {
        match self {
            Self::OneSecond => 1,
            Self::ThreeSeconds => 3,
            Self::FiveSeconds => 5,
            Self::TenSeconds => 10,
            Self::ThirtySeconds => 30,
        }
    }

    /// Interval as a duration.
    pub fn duration(self) -> Duration {
        Duration::from_secs(self.seconds())
    }

    /// The next option, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|i| *i == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for RefreshInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.seconds() {
            1 => write!(f, "1 second"),
            n => write!(f, "{} seconds", n),
        }
    }
}

/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Dark,
    #[default]
    NeonDark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::NeonDark,
            Self::NeonDark => Self::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "Dark"),
            Self::NeonDark => write!(f, "Neon Dark"),
        }
    }
}

/// Risk thresholds, in account currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Maximum amount per bet.
    pub max_stake: Decimal,
    /// Maximum loss before stopping.
    pub stop_loss: Decimal,
    /// Total exposure limit.
    pub max_exposure: Decimal,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_stake: dec!(100.00),
            stop_loss: dec!(50.00),
            max_exposure: dec!(500.00),
        }
    }
}

/// Which events raise a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationToggles {
    pub wins: bool,
    pub losses: bool,
    pub system_alerts: bool,
}

impl Default for NotificationToggles {
    fn default() -> Self {
        Self {
            wins: true,
            losses: true,
            system_alerts: true,
        }
    }
}

/// The global settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub auto_refresh: bool,
    pub refresh_interval: RefreshInterval,
    pub sound_alerts: bool,
    pub theme: Theme,
    pub risk_limits: RiskLimits,
    pub notifications: NotificationToggles,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_refresh: true,
            refresh_interval: RefreshInterval::default(),
            sound_alerts: true,
            theme: Theme::default(),
            risk_limits: RiskLimits::default(),
            notifications: NotificationToggles::default(),
        }
    }
}

/// Partial update to [`RiskLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskLimitsPatch {
    pub max_stake: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    pub max_exposure: Option<Decimal>,
}

/// Partial update to [`NotificationToggles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotificationsPatch {
    pub wins: Option<bool>,
    pub losses: Option<bool>,
    pub system_alerts: Option<bool>,
}

/// Partial update to [`Settings`]. Unset fields keep their value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsPatch {
    pub auto_refresh: Option<bool>,
    pub refresh_interval: Option<RefreshInterval>,
    pub sound_alerts: Option<bool>,
    pub theme: Option<Theme>,
    pub risk_limits: RiskLimitsPatch,
    pub notifications: NotificationsPatch,
}

impl Settings {
    /// Merge a patch into these settings, nested records included.
    pub fn apply(&mut self, patch: SettingsPatch) {
        fn set<T>(target: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut self.auto_refresh, patch.auto_refresh);
        set(&mut self.refresh_interval, patch.refresh_interval);
        set(&mut self.sound_alerts, patch.sound_alerts);
        set(&mut self.theme, patch.theme);

        set(&mut self.risk_limits.max_stake, patch.risk_limits.max_stake);
        set(&mut self.risk_limits.stop_loss, patch.risk_limits.stop_loss);
        set(&mut self.risk_limits.max_exposure, patch.risk_limits.max_exposure);

        set(&mut self.notifications.wins, patch.notifications.wins);
        set(&mut self.notifications.losses, patch.notifications.losses);
        set(
            &mut self.notifications.system_alerts,
            patch.notifications.system_alerts,
        );
    }
}

/// Group a setting is displayed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingGroup {
    General,
    RiskManagement,
    Notifications,
}

impl SettingGroup {
    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            Self::General => "General Settings",
            Self::RiskManagement => "Risk Management",
            Self::Notifications => "Notifications",
        }
    }
}

/// An editable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    AutoRefresh,
    RefreshInterval,
    SoundAlerts,
    Theme,
    MaxStake,
    StopLoss,
    MaxExposure,
    NotifyWins,
    NotifyLosses,
    NotifySystemAlerts,
}

/// Rendered value of a setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Toggle(bool),
    Choice(String),
    Amount(Decimal),
}

impl SettingField {
    /// Fields in display order.
    pub const ALL: [SettingField; 10] = [
        Self::AutoRefresh,
        Self::RefreshInterval,
        Self::SoundAlerts,
        Self::Theme,
        Self::MaxStake,
        Self::StopLoss,
        Self::MaxExposure,
        Self::NotifyWins,
        Self::NotifyLosses,
        Self::NotifySystemAlerts,
    ];

    pub fn group(self) -> SettingGroup {
        match self {
            Self::AutoRefresh | Self::RefreshInterval | Self::SoundAlerts | Self::Theme => {
                SettingGroup::General
            }
            Self::MaxStake | Self::StopLoss | Self::MaxExposure => SettingGroup::RiskManagement,
            Self::NotifyWins | Self::NotifyLosses | Self::NotifySystemAlerts => {
                SettingGroup::Notifications
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AutoRefresh => "Auto Refresh Data",
            Self::RefreshInterval => "Refresh Interval",
            Self::SoundAlerts => "Sound Alerts",
            Self::Theme => "Theme",
            Self::MaxStake => "Maximum Stake",
            Self::StopLoss => "Stop Loss Limit",
            Self::MaxExposure => "Maximum Exposure",
            Self::NotifyWins => "Wins",
            Self::NotifyLosses => "Losses",
            Self::NotifySystemAlerts => "System Alerts",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AutoRefresh => "Automatically update market data",
            Self::RefreshInterval => "How often to update data",
            Self::SoundAlerts => "Play sounds for important events",
            Self::Theme => "Colour scheme",
            Self::MaxStake => "Maximum amount per bet",
            Self::StopLoss => "Maximum loss before stopping",
            Self::MaxExposure => "Total exposure limit",
            Self::NotifyWins => "Notify when wins occur",
            Self::NotifyLosses => "Notify when losses occur",
            Self::NotifySystemAlerts => "Notify when system alerts occur",
        }
    }

    /// Current value in `settings`.
    pub fn value(self, settings: &Settings) -> SettingValue {
        match self {
            Self::AutoRefresh => SettingValue::Toggle(settings.auto_refresh),
            Self::RefreshInterval => SettingValue::Choice(settings.refresh_interval.to_string()),
            Self::SoundAlerts => SettingValue::Toggle(settings.sound_alerts),
            Self::Theme => SettingValue::Choice(settings.theme.to_string()),
            Self::MaxStake => SettingValue::Amount(settings.risk_limits.max_stake),
            Self::StopLoss => SettingValue::Amount(settings.risk_limits.stop_loss),
            Self::MaxExposure => SettingValue::Amount(settings.risk_limits.max_exposure),
            Self::NotifyWins => SettingValue::Toggle(settings.notifications.wins),
            Self::NotifyLosses => SettingValue::Toggle(settings.notifications.losses),
            Self::NotifySystemAlerts => SettingValue::Toggle(settings.notifications.system_alerts),
        }
    }

    /// The refresh interval is locked while auto refresh is off.
    pub fn is_disabled(self, settings: &Settings) -> bool {
        self == Self::RefreshInterval && !settings.auto_refresh
    }

    /// Patch produced by toggling or cycling this field.
    pub fn activate(self, settings: &Settings) -> Option<SettingsPatch> {
        if self.is_disabled(settings) {
            return None;
        }

        let mut patch = SettingsPatch::default();
        match self {
            Self::AutoRefresh => patch.auto_refresh = Some(!settings.auto_refresh),
            Self::RefreshInterval => {
                patch.refresh_interval = Some(settings.refresh_interval.next());
            }
            Self::SoundAlerts => patch.sound_alerts = Some(!settings.sound_alerts),
            Self::Theme => patch.theme = Some(settings.theme.toggled()),
            Self::NotifyWins => patch.notifications.wins = Some(!settings.notifications.wins),
            Self::NotifyLosses => {
                patch.notifications.losses = Some(!settings.notifications.losses);
            }
            Self::NotifySystemAlerts => {
                patch.notifications.system_alerts = Some(!settings.notifications.system_alerts);
            }
            Self::MaxStake | Self::StopLoss | Self::MaxExposure => return None,
        }
        Some(patch)
    }

    /// Patch produced by moving an amount by `delta`, floored at zero.
    pub fn adjust(self, settings: &Settings, delta: Decimal) -> Option<SettingsPatch> {
        let adjusted = |current: Decimal| Some((current + delta).max(Decimal::ZERO));

        let mut patch = SettingsPatch::default();
        match self {
            Self::MaxStake => patch.risk_limits.max_stake = adjusted(settings.risk_limits.max_stake),
            Self::StopLoss => patch.risk_limits.stop_loss = adjusted(settings.risk_limits.stop_loss),
            Self::MaxExposure => {
                patch.risk_limits.max_exposure = adjusted(settings.risk_limits.max_exposure);
            }
            _ => return None,
        }
        Some(patch)
    }
}

/// Settings plus the editor cursor.
#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    /// Current settings.
    pub settings: Settings,
    /// Index into [`SettingField::ALL`].
    pub selected: usize,
}

impl SettingsState {
    /// The field under the cursor.
    pub fn selected_field(&self) -> SettingField {
        SettingField::ALL[self.selected.min(SettingField::ALL.len() - 1)]
    }

    /// Move the cursor, clamped to the list.
    pub fn move_selection(&mut self, delta: i32) {
        let max = SettingField::ALL.len() as i32 - 1;
        self.selected = (self.selected as i32 + delta).clamp(0, max) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.auto_refresh);
        assert_eq!(settings.refresh_interval.seconds(), 5);
        assert_eq!(settings.theme, Theme::NeonDark);
        assert_eq!(settings.risk_limits.max_exposure, dec!(500.00));
        assert!(settings.notifications.system_alerts);
    }

    #[test]
    fn test_patch_merges_nested_records() {
        let mut settings = Settings::default();
        settings.apply(SettingsPatch {
            sound_alerts: Some(false),
            risk_limits: RiskLimitsPatch {
                stop_loss: Some(dec!(75.00)),
                ..Default::default()
            },
            notifications: NotificationsPatch {
                losses: Some(false),
                ..Default::default()
            },
            ..Default::default()
        });

        assert!(!settings.sound_alerts);
        assert!(settings.auto_refresh);
        assert_eq!(settings.risk_limits.stop_loss, dec!(75.00));
        assert_eq!(settings.risk_limits.max_stake, dec!(100.00));
        assert!(!settings.notifications.losses);
        assert!(settings.notifications.wins);
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut settings = Settings::default();
        settings.apply(SettingsPatch::default());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_refresh_interval_cycles() {
        assert_eq!(RefreshInterval::FiveSeconds.next(), RefreshInterval::TenSeconds);
        assert_eq!(RefreshInterval::ThirtySeconds.next(), RefreshInterval::OneSecond);
        assert_eq!(RefreshInterval::OneSecond.to_string(), "1 second");
        assert_eq!(RefreshInterval::ThirtySeconds.to_string(), "30 seconds");
    }

    #[test]
    fn test_refresh_interval_locked_without_auto_refresh() {
        let mut settings = Settings::default();
        settings.auto_refresh = false;
        assert!(SettingField::RefreshInterval.is_disabled(&settings));
        assert_eq!(SettingField::RefreshInterval.activate(&settings), None);
    }

    #[test]
    fn test_activate_toggles() {
        let mut settings = Settings::default();
        for field in [SettingField::AutoRefresh, SettingField::NotifyWins, SettingField::Theme] {
            let patch = field.activate(&settings).unwrap();
            settings.apply(patch);
        }
        assert!(!settings.auto_refresh);
        assert!(!settings.notifications.wins);
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn test_adjust_floors_at_zero() {
        let mut settings = Settings::default();
        let patch = SettingField::StopLoss
            .adjust(&settings, dec!(-80.00))
            .unwrap();
        settings.apply(patch);
        assert_eq!(settings.risk_limits.stop_loss, Decimal::ZERO);

        assert_eq!(SettingField::SoundAlerts.adjust(&settings, dec!(1)), None);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut state = SettingsState::default();
        state.move_selection(-3);
        assert_eq!(state.selected_field(), SettingField::AutoRefresh);
        state.move_selection(100);
        assert_eq!(state.selected_field(), SettingField::NotifySystemAlerts);
    }
}
