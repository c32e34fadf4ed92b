//! Native gamepad backend built on [gilrs](https://gitlab.com/gilrs-project/gilrs).
//!
//! # Lifecycle
//! The native library is process-wide state. [`InputContext::init`] brings it
//! up at most once at a time: a second live context fails with
//! [`Error::AlreadyInitialized`]. Dropping the context tears the library down
//! and allows a new one to be created.
//!
//! # Channel layout
//! [`NativeSource`] reports the axes the gamepad exposes, in [`AXES`] order,
//! followed by the buttons it exposes, in [`BUTTONS`] order. Axes are in
//! `[-1.0, 1.0]`; buttons are `0.0`/`1.0`. The layout only depends on the
//! device, so it stays fixed while the same gamepad is connected.

use crate::device::{DeviceInfo, SnapshotSource};
use crate::error::{Error, Result};
use crate::metadata::{ChannelCounts, DeviceMeta};
use crate::snapshot::Snapshot;
use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, trace, warn};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Axis probe order.
pub const AXES: [Axis; 8] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::LeftZ,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::RightZ,
    Axis::DPadX,
    Axis::DPadY,
];

/// Button probe order.
pub const BUTTONS: [Button; 19] = [
    Button::South,
    Button::East,
    Button::North,
    Button::West,
    Button::C,
    Button::Z,
    Button::LeftTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

const NO_NAME: &str = "[no name]";

/// Handle to the native input library.
pub struct InputContext {
    gilrs: Gilrs,
}

impl std::fmt::Debug for InputContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputContext").finish_non_exhaustive()
    }
}

impl InputContext {
    /// Initialize the native library.
    pub fn init() -> Result<Self> {
        if INITIALIZED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::AlreadyInitialized);
        }

        let gilrs = match Gilrs::new() {
            Ok(gilrs) => gilrs,
            Err(gilrs::Error::NotImplemented(dummy)) => {
                warn!("gamepad input is not supported on this platform");
                dummy
            }
            Err(e) => {
                INITIALIZED.store(false, Ordering::Release);
                return Err(Error::Backend(e.to_string()));
            }
        };
        debug!("native input context initialized");

        let mut ctx = Self { gilrs };
        ctx.pump();
        Ok(ctx)
    }

    /// Whether a context is currently alive in this process.
    pub fn is_initialized() -> bool {
        INITIALIZED.load(Ordering::Acquire)
    }

    /// Drain pending library events so gamepad state is current.
    pub fn pump(&mut self) {
        while let Some(ev) = self.gilrs.next_event() {
            match ev.event {
                EventType::Connected => debug!(id = usize::from(ev.id), "gamepad connected"),
                EventType::Disconnected => {
                    debug!(id = usize::from(ev.id), "gamepad disconnected")
                }
                other => trace!(id = usize::from(ev.id), ?other, "gamepad event"),
            }
        }
    }

    /// First connected gamepad, or the one with id `wanted`.
    pub fn select(&self, wanted: Option<usize>) -> Option<GamepadId> {
        self.gilrs
            .gamepads()
            .map(|(id, _)| id)
            .find(|&id| wanted.map_or(true, |w| usize::from(id) == w))
    }

    /// Name of the first connected gamepad, or `"[no name]"`.
    pub fn first_controller_name(&self) -> String {
        first_name(self.all_controller_names())
    }

    /// Names of every connected gamepad.
    pub fn all_controller_names(&self) -> Vec<String> {
        self.gilrs
            .gamepads()
            .map(|(_, pad)| pad.name().to_string())
            .collect()
    }

    /// Id of the first connected gamepad.
    pub fn first_controller_id(&self) -> Option<usize> {
        self.select(None).map(usize::from)
    }

    /// Every connected gamepad.
    pub fn controllers(&self) -> Vec<DeviceInfo> {
        self.gilrs
            .gamepads()
            .map(|(id, pad)| DeviceInfo {
                id: device_id(usize::from(id)),
                name: pad.name().to_string(),
                meta: meta(&pad),
            })
            .collect()
    }

    fn snapshot(&self, id: GamepadId) -> Option<Snapshot> {
        let pad = self.gilrs.connected_gamepad(id)?;
        let axes = AXES
            .iter()
            .filter(|&&axis| pad.axis_code(axis).is_some())
            .map(|&axis| axis_value(pad.value(axis)))
            .collect();
        let buttons = BUTTONS
            .iter()
            .filter(|&&button| pad.button_code(button).is_some())
            .map(|&button| button_value(pad.is_pressed(button)))
            .collect();
        Some(Snapshot::with_layout(axes, buttons))
    }
}

impl Drop for InputContext {
    fn drop(&mut self) {
        INITIALIZED.store(false, Ordering::Release);
        info!("native input context terminated");
    }
}

/// Gamepad polled through an [`InputContext`].
#[derive(Debug)]
pub struct NativeSource {
    ctx: InputContext,
    wanted: Option<usize>,
    active: Option<GamepadId>,
    id: String,
    name: String,
    meta: DeviceMeta,
}

impl NativeSource {
    /// Poll the first connected gamepad, or the gamepad with id `wanted`.
    pub fn new(ctx: InputContext, wanted: Option<usize>) -> Self {
        let id = match wanted {
            Some(n) => device_id(n),
            None => "native:first".to_string(),
        };
        Self {
            ctx,
            wanted,
            active: None,
            id,
            name: NO_NAME.to_string(),
            meta: DeviceMeta {
                bus: Some("native".into()),
                ..Default::default()
            },
        }
    }

    pub fn context(&self) -> &InputContext {
        &self.ctx
    }

    fn track_connection(&mut self, found: Option<GamepadId>) {
        if found == self.active {
            return;
        }
        if let Some(old) = self.active {
            info!(id = usize::from(old), name = %self.name, "controller lost");
        }
        self.active = found;
        match found.and_then(|id| self.ctx.gilrs.connected_gamepad(id)) {
            Some(pad) => {
                self.name = pad.name().to_string();
                self.meta = meta(&pad);
                info!(id = usize::from(pad.id()), name = %self.name, "controller connected");
            }
            None => {
                self.name = NO_NAME.to_string();
                self.meta = DeviceMeta {
                    bus: Some("native".into()),
                    ..Default::default()
                };
            }
        }
    }
}

impl SnapshotSource for NativeSource {
    fn poll(&mut self) -> Result<Snapshot> {
        self.ctx.pump();
        let found = self.ctx.select(self.wanted);
        self.track_connection(found);
        Ok(found
            .and_then(|id| self.ctx.snapshot(id))
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn metadata(&self) -> DeviceMeta {
        self.meta.clone()
    }
}

/// First non-empty name, or `"[no name]"` when there is none.
pub fn first_name<I>(names: I) -> String
where
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| NO_NAME.to_string())
}

fn device_id(n: usize) -> String {
    format!("native:{n}")
}

fn meta(pad: &gilrs::Gamepad<'_>) -> DeviceMeta {
    let axes = AXES.iter().filter(|&&a| pad.axis_code(a).is_some()).count();
    let buttons = BUTTONS
        .iter()
        .filter(|&&b| pad.button_code(b).is_some())
        .count();
    DeviceMeta {
        bus: Some("native".into()),
        vid: pad.vendor_id(),
        pid: pad.product_id(),
        product_string: Some(pad.name().to_string()),
        channels: Some(ChannelCounts { axes, buttons }),
        ..Default::default()
    }
}

/// Axis reading as stored in a snapshot: clamped to `[-1, 1]`, with a NaN
/// reading stored as centered (`0.0`).
#[inline]
fn axis_value(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, 1.0)
    }
}

#[inline]
fn button_value(pressed: bool) -> f32 {
    if pressed {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_probe_orders_have_no_duplicates() {
        assert_eq!(AXES.iter().collect::<HashSet<_>>().len(), AXES.len());
        assert_eq!(BUTTONS.iter().collect::<HashSet<_>>().len(), BUTTONS.len());
    }

    #[test]
    fn test_channel_values() {
        assert_eq!(axis_value(f32::NAN), 0.0);
        assert_eq!(axis_value(1.5), 1.0);
        assert_eq!(axis_value(-0.25), -0.25);
        assert_eq!(button_value(true), 1.0);
        assert_eq!(button_value(false), 0.0);
    }

    #[test]
    fn test_first_name() {
        assert_eq!(first_name(Vec::new()), "[no name]");
        assert_eq!(first_name(vec![String::new()]), "[no name]");
        assert_eq!(
            first_name(vec![String::new(), "Pad A".into(), "Pad B".into()]),
            "Pad A"
        );
    }

    #[test]
    fn test_context_is_init_once() {
        // Hosts without input support may refuse to initialize at all.
        let Ok(ctx) = InputContext::init() else {
            assert!(!InputContext::is_initialized());
            return;
        };
        assert!(InputContext::is_initialized());
        assert!(matches!(
            InputContext::init(),
            Err(Error::AlreadyInitialized)
        ));
        drop(ctx);
        assert!(!InputContext::is_initialized());
    }
}
