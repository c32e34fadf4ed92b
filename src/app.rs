//! Commands behind the `padwatch` binary.

use crate::backends::native::{first_name, InputContext, NativeSource};
use crate::config::{BackendKind, Config, OutputFormat};
use crate::device::DeviceInfo;
use crate::error::Result;
use crate::event::ChangeEvent;
use crate::eventbus::ChangeBus;
use crate::logger::{JsonLines, Logger};
use crate::manager::Manager;
use crate::snapshot::ChannelKind;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbosity` (0 = info, 1 = debug, 2+ = trace).
pub fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed (tests, embedding hosts).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// `--list-all`: native controllers, connected XInput slots and, with the `hid`
/// feature, HID game controls. A backend that cannot be opened is skipped.
pub fn list_all<W: Write>(out: &mut W, json: bool) -> Result<()> {
    let native = InputContext::init().map(|ctx| ctx.controllers());
    #[allow(unused_mut)]
    let mut sections = vec![("native", native), ("xinput", connected_xinput())];
    #[cfg(feature = "hid")]
    sections.push(("hid", crate::backends::hid::list_devices()));

    write_listing(out, &merge_listing(sections), json)
}

/// Concatenate per-backend listings, logging and dropping the ones that failed.
pub fn merge_listing<'a, I>(sections: I) -> Vec<DeviceInfo>
where
    I: IntoIterator<Item = (&'a str, Result<Vec<DeviceInfo>>)>,
{
    let mut devices = Vec::new();
    for (backend, section) in sections {
        match section {
            Ok(found) => devices.extend(found),
            Err(e) => warn!(backend, "skipping {} enumeration: {}", backend, e),
        }
    }
    devices
}

#[cfg(all(windows, feature = "xinput"))]
fn connected_xinput() -> Result<Vec<DeviceInfo>> {
    use crate::device::SnapshotSource;
    let mut found = Vec::new();
    for mut slot in crate::backends::windows::XInputSource::all_slots() {
        if !slot.poll()?.is_empty() {
            found.push(DeviceInfo::of(&slot));
        }
    }
    Ok(found)
}

#[cfg(not(all(windows, feature = "xinput")))]
fn connected_xinput() -> Result<Vec<DeviceInfo>> {
    Ok(Vec::new())
}

/// Render a device listing as text or pretty JSON.
pub fn write_listing<W: Write>(out: &mut W, devices: &[DeviceInfo], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, devices)?;
        writeln!(out)?;
        return Ok(());
    }
    if devices.is_empty() {
        writeln!(out, "No controllers found.")?;
        return Ok(());
    }
    for d in devices {
        let bus = d.meta.bus.as_deref().unwrap_or("-");
        write!(out, "{:<8} {}", bus, d)?;
        if let Some(c) = d.meta.channels {
            write!(out, " axes={} buttons={}", c.axes, c.buttons)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// One human-readable line per change, e.g. `native:0 #03 digital = 1.000`.
pub fn format_change(device: &str, event: &ChangeEvent) -> String {
    let kind = match event.kind {
        Some(ChannelKind::Analog) => "analog",
        Some(ChannelKind::Digital) => "digital",
        None => "-",
    };
    format!("{} #{:02} {} = {:.3}", device, event.index, kind, event.value)
}

/// `--test`: open the configured backend, print the first controller name and
/// stream changes. Returns the number of changes.
pub fn test_app<W: Write>(config: &Config, out: &mut W) -> Result<usize> {
    config.validate()?;
    let (mut manager, controller) = match config.backend {
        BackendKind::Native => {
            let source = NativeSource::new(InputContext::init()?, config.gamepad);
            let ctx = source.context();
            let controller = ctx.first_controller_name();
            debug!(
                first = ?ctx.first_controller_id(),
                all = ?ctx.all_controller_names(),
                "native controllers"
            );
            let mut manager = Manager::new();
            manager.add_source(source);
            (manager, controller)
        }
        BackendKind::XInput => {
            let connected = connected_xinput()?;
            let manager = Manager::discover(config)?;
            (manager, first_name(connected.into_iter().map(|d| d.name)))
        }
    };
    run_test(&mut manager, config, &controller, out)
}

/// Print `Testing <controller>`, then every change until
/// `config.test_duration()` has elapsed. Returns the number of changes.
pub fn run_test<W: Write>(
    manager: &mut Manager,
    config: &Config,
    controller: &str,
    out: &mut W,
) -> Result<usize> {
    let deadline = Instant::now() + config.test_duration();
    writeln!(out, "Testing {}", controller)?;
    for d in manager.devices() {
        debug!("polling {}", d);
    }

    let mut count = 0;
    loop {
        for (id, event) in manager.poll_events()? {
            writeln!(out, "{}", format_change(&id, &event))?;
            count += 1;
        }
        if Instant::now() >= deadline {
            break;
        }
        std::thread::sleep(config.poll_interval());
    }
    debug!(count, "test finished");
    Ok(count)
}

/// Build the listener set the config asks for.
pub fn build_bus(config: &Config) -> ChangeBus {
    let mut bus = ChangeBus::new();
    match config.output {
        OutputFormat::Log => {
            bus.add_listener(Logger::new(), config.channels.into(), None);
        }
        OutputFormat::Json => {
            bus.add_listener(
                JsonLines::new(std::io::stdout()),
                config.channels.into(),
                None,
            );
        }
    }
    bus
}

/// Poll loop: one tick every `poll_interval` until `max_ticks` (forever when unset).
/// Returns the number of ticks run.
pub fn run_loop(manager: &mut Manager, bus: &mut ChangeBus, config: &Config) -> Result<u64> {
    let mut ticks = 0;
    while config.max_ticks.map_or(true, |max| ticks < max) {
        manager.tick(bus)?;
        ticks += 1;
        if config.max_ticks != Some(ticks) {
            std::thread::sleep(config.poll_interval());
        }
    }
    Ok(ticks)
}

/// Default run mode.
pub fn run_app(config: &Config) -> Result<()> {
    let mut manager = Manager::discover(config)?;
    for d in manager.devices() {
        info!("polling {}", d);
    }
    let mut bus = build_bus(config);
    let ticks = run_loop(&mut manager, &mut bus, config)?;
    info!(ticks, "stopped");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use crate::metadata::{ChannelCounts, DeviceMeta};

    #[test]
    fn test_format_change() {
        let e = ChangeEvent::new(3, 1.0).with_kind(Some(ChannelKind::Digital));
        assert_eq!(format_change("native:0", &e), "native:0 #03 digital = 1.000");
        let e = ChangeEvent::new(12, -0.5);
        assert_eq!(format_change("v", &e), "v #12 - = -0.500");
    }

    fn info(id: &str, name: &str) -> DeviceInfo {
        DeviceInfo {
            id: id.into(),
            name: name.into(),
            meta: DeviceMeta::default(),
        }
    }

    #[test]
    fn test_failed_backend_does_not_hide_others() {
        let devices = merge_listing(vec![
            ("native", Err(Error::Backend("no udev".into()))),
            ("xinput", Ok(Vec::new())),
            ("hid", Ok(vec![info("hid:046d:c215", "Extreme 3D")])),
        ]);
        let mut out = Vec::new();
        write_listing(&mut out, &devices, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "-        Extreme 3D (hid:046d:c215)\n"
        );

        let devices = merge_listing(vec![
            ("native", Ok(vec![info("native:0", "Pad")])),
            ("hid", Err(Error::Hid("denied".into()))),
        ]);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "native:0");
    }

    #[test]
    fn test_write_listing() {
        let mut out = Vec::new();
        write_listing(&mut out, &[], false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No controllers found.\n");

        let devices = vec![DeviceInfo {
            id: "native:0".into(),
            name: "Pad".into(),
            meta: DeviceMeta {
                bus: Some("native".into()),
                vid: Some(0x045e),
                pid: Some(0x028e),
                channels: Some(ChannelCounts {
                    axes: 6,
                    buttons: 15,
                }),
                ..Default::default()
            },
        }];
        let mut out = Vec::new();
        write_listing(&mut out, &devices, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "native   Pad (native:0) [045e:028e] axes=6 buttons=15\n"
        );

        let mut out = Vec::new();
        write_listing(&mut out, &devices, true).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v[0]["id"], "native:0");
        assert_eq!(v[0]["meta"]["vid"], 0x045e);
        assert!(v[0]["meta"].get("serial_number").is_none());
    }
}
