//! HID game-control enumeration (`hid` feature).
//!
//! Used by `--list-all` to show every HID interface that looks like a game
//! control, including devices the native gamepad library does not map.

use crate::device::DeviceInfo;
use crate::error::{Error, Result};
use crate::metadata::DeviceMeta;
use hidapi::{DeviceInfo as HidDeviceInfo, HidApi};
use tracing::debug;

/// Decide whether a HID usage looks like a game control.
///
/// Rules:
/// - Accept usage pages commonly used for game controls:
///   - `0x01` Generic Desktop
///   - `0x02` Simulation Controls
///   - `0x0F` Physical Interface
///   - `0xFFxx` Vendor-defined
/// - Reject plain mouse/keyboard endpoints on Generic Desktop.
pub fn is_game_control(usage_page: u16, usage: u16) -> bool {
    let is_generic_desktop = usage_page == 0x01;
    let is_simulation = usage_page == 0x02;
    let is_physical_iface = usage_page == 0x0F;
    let is_vendor_defined = (usage_page & 0xFF00) == 0xFF00;

    if !(is_generic_desktop || is_simulation || is_physical_iface || is_vendor_defined) {
        return false;
    }

    // Mouse = 0x02, Keyboard = 0x06 on Usage Page 0x01.
    !(is_generic_desktop && matches!(usage, 0x02 | 0x06))
}

/// Enumerate HID game-control interfaces.
pub fn list_devices() -> Result<Vec<DeviceInfo>> {
    let api = HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;
    let mut out = Vec::new();
    for info in api.device_list() {
        if !is_game_control(info.usage_page(), info.usage()) {
            debug!(
                vid = info.vendor_id(),
                pid = info.product_id(),
                usage_page = info.usage_page(),
                usage = info.usage(),
                "skipping non game-control HID interface"
            );
            continue;
        }
        out.push(DeviceInfo {
            id: format!("hid:{:04x}:{:04x}", info.vendor_id(), info.product_id()),
            name: info.product_string().unwrap_or("Unknown").to_string(),
            meta: meta(info),
        });
    }
    Ok(out)
}

/// Build a lightweight [`DeviceMeta`] for a `hidapi` device entry.
fn meta(info: &HidDeviceInfo) -> DeviceMeta {
    let interface_number = {
        let n = info.interface_number();
        if n >= 0 {
            Some(n)
        } else {
            None
        }
    };
    DeviceMeta {
        bus: Some("usb".into()),
        vid: Some(info.vendor_id()),
        pid: Some(info.product_id()),
        product_string: info.product_string().map(|s| s.to_string()),
        serial_number: info.serial_number().map(|s| s.to_string()),
        usage_page: Some(info.usage_page()),
        usage: Some(info.usage()),
        interface_number,
        path: Some(info.path().to_string_lossy().to_string()),
        channels: None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_game_control_filter() {
        // Joystick, gamepad, multi-axis.
        assert!(is_game_control(0x01, 0x04));
        assert!(is_game_control(0x01, 0x05));
        assert!(is_game_control(0x01, 0x08));
        // Pedals and vendor endpoints.
        assert!(is_game_control(0x02, 0xBA));
        assert!(is_game_control(0x0F, 0x21));
        assert!(is_game_control(0xFF00, 0x01));
        // Mouse and keyboard.
        assert!(!is_game_control(0x01, 0x02));
        assert!(!is_game_control(0x01, 0x06));
        // Consumer controls.
        assert!(!is_game_control(0x0C, 0x01));
    }
}
