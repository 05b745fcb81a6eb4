use std::error::Error;
use std::thread;

use bicolor_matrix_emu::config::Config;
use bicolor_matrix_emu::trace::load_trace;
use bicolor_matrix_emu::{get_i2c_device, Device, I2cBus, LogBus, MatrixEmulator};
use getch::Getch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// stdout carries the matrix, so logs go to stderr
fn initialize_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_env_filter(filter)
        .init();
}

fn play<B: I2cBus>(
    mut device: Device<B>,
    writes: Vec<(u32, u32)>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let keys = config.step.then(Getch::new);

    for (register, value) in writes {
        device.write8(register, value);

        if let Some(keys) = &keys {
            keys.getch()?;
        } else if !config.delay.is_zero() {
            thread::sleep(config.delay);
        }
    }
    Ok(())
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let writes = match &config.trace_path {
        Some(path) => load_trace(path)?,
        None => config.pattern.writes(config.count, config.seed),
    };
    info!(
        display = ?config.display,
        log_only = config.log_only,
        writes = writes.len(),
        "starting matrix emulator"
    );

    let busnum = Some(config.busnum);
    if config.log_only {
        let device = get_i2c_device(config.address, busnum, LogBus::new());
        play(device, writes, &config)
    } else {
        let emu = MatrixEmulator::new(config.display.build(config.glyphs));
        let device = get_i2c_device(config.address, busnum, emu);
        play(device, writes, &config)
    }
}

fn main() {
    let config = Config::build().unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });

    // the log bus has nothing to show above debug
    initialize_logging(if config.log_only { "debug" } else { "warn" });

    if let Err(err) = run(config) {
        error!(%err, "emulator stopped");
        std::process::exit(1);
    }
}
