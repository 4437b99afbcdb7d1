use ls8_cpu::loader;
use ls8_cpu::monitor::run_monitor;
use ls8_cpu::{Machine, StdoutSink};
use std::env;
use std::error::Error;

// see tests.rs
fn main() -> Result<(), Box<dyn Error>> {
    let mut monitor_mode = false;
    let mut path:Option<String> = None;
    for arg in env::args().skip(1) {
        if arg == "--monitor" {
            monitor_mode = true;
        } else {
            path = Some(arg);
        }
    }
    let path = path.unwrap_or_else(|| String::from("demos/print8.ls8"));

    let program = loader::load_file(&path)?;

    let mut m0 = Machine::new();
    m0.load(&program)?;

    if monitor_mode {
        run_monitor(&mut m0);
    } else {
        let mut out = StdoutSink;
        m0.run(&mut out)?;
    }

    Ok(())
}
