//! Windows XInput slot source.
//!
//! Exposes the four XInput slots (`0..4`) as [`SnapshotSource`]s. XInput gives
//! every Xbox-style controller the same fixed layout, so the snapshot length
//! only changes on connect/disconnect.
//!
//! ## Axes (6)
//! - `0`: Left stick X (LX)
//! - `1`: Left stick Y (LY) **inverted** (up = -1, down = +1)
//! - `2`: Right stick X (RX)
//! - `3`: Right stick Y (RY) **inverted**
//! - `4`: Left trigger (LT) mapped to `[-1..1]`
//! - `5`: Right trigger (RT) mapped to `[-1..1]`
//!
//! ## Buttons (14)
//! `A, B, X, Y, LB, RB, Back, Start, LThumb, RThumb, DPadUp, DPadDown, DPadLeft, DPadRight`,
//! at indices `6..20` of the snapshot.

use crate::device::SnapshotSource;
use crate::error::Result;
use crate::metadata::{ChannelCounts, DeviceMeta};
use crate::snapshot::Snapshot;
use tracing::info;

use windows_sys::Win32::UI::Input::XboxController::*;

/// Number of XInput slots.
pub const SLOTS: u32 = 4;

const BUTTON_MAP: [u16; 14] = [
    XINPUT_GAMEPAD_A,
    XINPUT_GAMEPAD_B,
    XINPUT_GAMEPAD_X,
    XINPUT_GAMEPAD_Y,
    XINPUT_GAMEPAD_LEFT_SHOULDER,
    XINPUT_GAMEPAD_RIGHT_SHOULDER,
    XINPUT_GAMEPAD_BACK,
    XINPUT_GAMEPAD_START,
    XINPUT_GAMEPAD_LEFT_THUMB,
    XINPUT_GAMEPAD_RIGHT_THUMB,
    XINPUT_GAMEPAD_DPAD_UP,
    XINPUT_GAMEPAD_DPAD_DOWN,
    XINPUT_GAMEPAD_DPAD_LEFT,
    XINPUT_GAMEPAD_DPAD_RIGHT,
];

const AXIS_COUNT: usize = 6;

/// XInput-backed source (slot 0–3).
#[derive(Debug)]
pub struct XInputSource {
    index: u32,
    id: String,
    name: String,
    connected: bool,
}

impl XInputSource {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            id: format!("xinput:{index}"),
            name: format!("XInput Controller {index}"),
            connected: false,
        }
    }

    /// One source per slot.
    pub fn all_slots() -> Vec<Self> {
        (0..SLOTS).map(Self::new).collect()
    }

    /// Whether the slot had a controller at the last poll.
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Map a signed thumbstick axis into `[-1, 1]`.
#[inline]
fn normalize_thumb(v: i16) -> f32 {
    if v >= 0 {
        (v as f32) / 32767.0
    } else {
        (v as f32) / 32768.0
    }
}

/// Map an 8-bit trigger into `[-1, 1]`: `0 -> -1.0` (released), `255 -> +1.0`.
#[inline]
fn normalize_trigger(v: u8) -> f32 {
    (v as f32) / 255.0 * 2.0 - 1.0
}

fn read_snapshot(gp: &XINPUT_GAMEPAD) -> Snapshot {
    let axes = vec![
        normalize_thumb(gp.sThumbLX),
        -normalize_thumb(gp.sThumbLY),
        normalize_thumb(gp.sThumbRX),
        -normalize_thumb(gp.sThumbRY),
        normalize_trigger(gp.bLeftTrigger),
        normalize_trigger(gp.bRightTrigger),
    ];
    let buttons = BUTTON_MAP
        .iter()
        .map(|&mask| if gp.wButtons & mask != 0 { 1.0 } else { 0.0 })
        .collect();
    Snapshot::with_layout(axes, buttons)
}

impl SnapshotSource for XInputSource {
    fn poll(&mut self) -> Result<Snapshot> {
        // FFI struct: must be manually zeroed
        let mut state: XINPUT_STATE = unsafe { std::mem::zeroed() };

        // XInputGetState returns 0 on success.
        let res = unsafe { XInputGetState(self.index, &mut state) };

        if res != 0 {
            if self.connected {
                info!(slot = self.index, "xinput controller disconnected");
                self.connected = false;
            }
            return Ok(Snapshot::empty());
        }
        if !self.connected {
            info!(slot = self.index, id = %self.id, "xinput controller connected");
            self.connected = true;
        }

        Ok(read_snapshot(&state.Gamepad))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn metadata(&self) -> DeviceMeta {
        DeviceMeta {
            bus: Some("xinput".into()),
            vid: Some(0x045e),
            product_string: Some(self.name.clone()),
            path: Some(self.id.clone()),
            channels: Some(ChannelCounts {
                axes: AXIS_COUNT,
                buttons: BUTTON_MAP.len(),
            }),
            ..Default::default()
        }
    }
}
