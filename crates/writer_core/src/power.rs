/// Battery charge at or below which an unplugged machine gets the slowest factor.
pub const LOW_BATTERY_PERCENT: u8 = 35;

/// Multiplier stretching debounce delays; never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdaptiveFactor(u32);

impl AdaptiveFactor {
    pub const NORMAL: AdaptiveFactor = AdaptiveFactor(1);

    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_power_saving(self) -> bool {
        self.0 > 1
    }
}

impl Default for AdaptiveFactor {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<u32> for AdaptiveFactor {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryStatus {
    pub percent: u8,
    pub plugged_in: bool,
}

/// Factor chosen by the power saver toggle.
///
/// Disabled: 1. Enabled without battery information: 2. Enabled on battery:
/// 6 when low and unplugged, 4 otherwise.
pub fn power_saver_factor(enabled: bool, battery: Option<BatteryStatus>) -> AdaptiveFactor {
    if !enabled {
        return AdaptiveFactor::NORMAL;
    }
    match battery {
        Some(status) if status.percent <= LOW_BATTERY_PERCENT && !status.plugged_in => {
            AdaptiveFactor::new(6)
        }
        Some(_) => AdaptiveFactor::new(4),
        None => AdaptiveFactor::new(2),
    }
}
