use padwatch::backends::virtual_input::VirtualDevice;
use padwatch::logger::Logger;
use padwatch::{ChangeBus, EventFilter, Manager};

fn main() -> padwatch::Result<()> {
    tracing_subscriber::fmt::init();

    // A two-axis, three-button device moving through a few states.
    let mut device = VirtualDevice::new("virtual:demo", "Demo Virtual Device");
    device.feed_state(&[0.0, 0.0], &[false, false, false]);
    device.feed_state(&[0.75, 0.0], &[false, true, false]);
    device.feed_state(&[0.75, -0.5], &[false, false, false]);
    device.unplug();
    device.feed_state(&[0.0, 0.0], &[false, false, false]);

    let mut mgr = Manager::new();
    mgr.add_source(device);

    let mut bus = ChangeBus::new();
    bus.add_listener(Logger::new(), EventFilter::All, None);

    for tick in 0..5 {
        let n = mgr.tick(&mut bus)?;
        println!("(Virtual) tick {tick}: {n} change(s)");
    }
    Ok(())
}
