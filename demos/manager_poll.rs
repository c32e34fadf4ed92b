use padwatch::{app, Config, Manager};

fn main() -> padwatch::Result<()> {
    app::init_tracing(0);
    let mut mgr = Manager::discover(&Config::default())?;
    loop {
        for (id, ev) in mgr.poll_events()? {
            println!("{}", app::format_change(&id, &ev));
        }
        // Sleep a touch to avoid pegging the CPU in the demo
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
}
