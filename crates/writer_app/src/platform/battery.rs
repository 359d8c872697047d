//! Battery state from the Linux power-supply class.

use std::fs;
use std::path::Path;

use writer_core::BatteryStatus;
use writer_logging::writer_debug;

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// Current battery state, or `None` on machines without a readable battery.
pub fn read_battery() -> Option<BatteryStatus> {
    read_battery_from(Path::new(POWER_SUPPLY_DIR))
}

pub(crate) fn read_battery_from(root: &Path) -> Option<BatteryStatus> {
    let entries = fs::read_dir(root).ok()?;
    for entry in entries.flatten() {
        let dir = entry.path();
        let is_battery = fs::read_to_string(dir.join("type"))
            .map(|kind| kind.trim() == "Battery")
            .unwrap_or(false);
        if !is_battery {
            continue;
        }
        let Some(percent) = fs::read_to_string(dir.join("capacity"))
            .ok()
            .and_then(|text| text.trim().parse::<u8>().ok())
        else {
            continue;
        };
        let status = fs::read_to_string(dir.join("status")).unwrap_or_default();
        let plugged_in = matches!(status.trim(), "Charging" | "Full" | "Not charging");
        writer_debug!(
            "battery {:?}: {}% plugged_in={}",
            dir.file_name(),
            percent,
            plugged_in
        );
        return Some(BatteryStatus {
            percent: percent.min(100),
            plugged_in,
        });
    }
    None
}
