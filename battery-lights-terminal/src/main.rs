use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use battery_lights_core::hardware::{SampleSource, mcp3008};
use battery_lights_core::{BatteryMonitor, Config, NUM_LEVELS, Settings, ShutdownOutputs};
use battery_lights_terminal::{
    DischargeSimulator, InterruptibleDelay, StdinSource, TerminalLights, TerminalReport,
};
use clap::{Parser, ValueEnum};
use log::*;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Source {
    /// A battery that discharges and recharges forever
    Simulate,
    /// One raw count per line
    Stdin,
}

#[derive(Parser)]
#[command(
    name = "battery-lights",
    about = "Show a battery's charge level on red/yellow/green lamps"
)]
struct Cli {
    #[arg(long, value_enum, default_value_t = Source::Simulate)]
    source: Source,

    /// Converter channel the battery is wired to
    #[arg(long)]
    channel: Option<u8>,

    /// Seconds between samples (1-5)
    #[arg(long)]
    interval_secs: Option<u16>,

    /// Seven ascending raw counts, comma separated
    #[arg(long, value_delimiter = ',')]
    thresholds: Option<Vec<u16>>,

    /// Counts a reading has to clear a boundary by before the lamps change
    #[arg(long)]
    hysteresis_margin: Option<u16>,

    /// Largest count the converter returns
    #[arg(long)]
    full_scale_count: Option<u16>,

    /// Volts at full scale
    #[arg(long)]
    reference_voltage: Option<f32>,

    /// Level to show before the first reading (0-6)
    #[arg(long)]
    initial_state: Option<u8>,

    /// Light every lamp on exit instead of turning them all off
    #[arg(long)]
    shutdown_all_on: bool,

    /// Print each status record as a hex COBS frame on stdout
    #[arg(long)]
    frames: bool,

    /// Simulated battery's highest count
    #[arg(long, default_value_t = 900)]
    sim_start: u16,

    /// Simulated battery's lowest count
    #[arg(long, default_value_t = 600)]
    sim_floor: u16,

    /// Counts the simulated battery moves per sample
    #[arg(long, default_value_t = 2)]
    sim_step: u16,
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::default();

        if let Some(x) = self.channel {
            config.channel = x;
        }
        if let Some(x) = self.interval_secs {
            config.interval_secs = x;
        }
        if let Some(x) = &self.thresholds {
            config.thresholds = x.as_slice().try_into().with_context(|| {
                format!("expected {} thresholds, got {}", NUM_LEVELS, x.len())
            })?;
        }
        if let Some(x) = self.hysteresis_margin {
            config.hysteresis_margin = x;
        }
        if let Some(x) = self.full_scale_count {
            config.full_scale_count = x;
        }
        if let Some(x) = self.reference_voltage {
            config.reference_voltage = x;
        }
        if let Some(x) = self.initial_state {
            config.initial_state = x;
        }
        if self.shutdown_all_on {
            config.shutdown_outputs = ShutdownOutputs::AllOn;
        }

        Ok(config)
    }
}

fn run<S: SampleSource>(
    source: S,
    settings: Settings,
    frames: bool,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let mut monitor = BatteryMonitor::new(source, TerminalLights::default(), settings);

    let mut delay = InterruptibleDelay::new(running.clone());
    let mut report = TerminalReport::new(frames);

    monitor.run(&mut delay, &mut report, || running.load(Ordering::SeqCst))?;

    info!("final level {}", monitor.state());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_nanos()
        .init();

    let cli = Cli::parse();

    let settings = cli
        .config()?
        .validate()
        .context("invalid configuration")?;

    debug!("{settings:?}");

    if settings.calibration.full_scale_count != mcp3008::FULL_SCALE_COUNT {
        warn!(
            "full scale of {} does not match a 10 bit converter",
            settings.calibration.full_scale_count
        );
    }

    let running = Arc::new(AtomicBool::new(true));

    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            info!("stop requested. finishing this tick");
            running.store(false, Ordering::SeqCst);
        })
        .context("unable to install ctrl-c handler")?;
    }

    match cli.source {
        Source::Simulate => {
            let simulator = DischargeSimulator::new(
                cli.sim_start,
                cli.sim_floor,
                cli.sim_step,
                settings.calibration.full_scale_count,
            );

            run(simulator, settings, cli.frames, running)
        }
        Source::Stdin => {
            let source = StdinSource::new(io::stdin().lock(), running.clone());

            run(source, settings, cli.frames, running)
        }
    }
}
