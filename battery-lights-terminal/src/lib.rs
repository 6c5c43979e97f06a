//! Host-side pieces for running the battery indicator without a converter or lamps attached.
pub mod delay;
pub mod lights;
pub mod report;
pub mod simulator;
pub mod stdin_source;

pub use delay::InterruptibleDelay;
pub use lights::TerminalLights;
pub use report::TerminalReport;
pub use simulator::DischargeSimulator;
pub use stdin_source::StdinSource;
