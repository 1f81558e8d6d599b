use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod encode;
pub mod list;
pub mod run;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start channels and drive them from stdin commands.
    Run(RunArgs),
    /// Print the signal table.
    List(ListArgs),
    /// Encode one signal value and print the frame without sending.
    Encode(EncodeArgs),
    /// Encode one signal value and transmit a single frame.
    Send(SendArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args),
        Command::List(args) => list::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Send(args) => send::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// CAN interface to transmit on.
    #[arg(long, short = 'i', default_value = "can0", env = "CANTX_INTERFACE")]
    pub interface: String,

    /// Signals to start immediately (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub signals: Vec<String>,

    /// Start every defined signal.
    #[arg(long, conflicts_with = "signals")]
    pub all: bool,

    /// Cycle period in milliseconds.
    #[arg(long, default_value_t = 100)]
    pub cycle_ms: u64,

    /// Record frames in memory instead of opening SocketCAN.
    #[arg(long)]
    pub dry_run: bool,

    /// Run for a fixed time then shut down instead of reading commands.
    #[arg(long, value_name = "MS")]
    pub duration_ms: Option<u64>,

    /// Initial parameter values, e.g. --param engine-rpm=1500.
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Signal name (see `cantx list`).
    pub signal: String,

    /// Value(s) for the signal's parameter(s), in table order.
    pub values: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Signal name (see `cantx list`).
    pub signal: String,

    /// Value(s) for the signal's parameter(s), in table order.
    pub values: Vec<String>,

    /// CAN interface to transmit on.
    #[arg(long, short = 'i', default_value = "can0", env = "CANTX_INTERFACE")]
    pub interface: String,

    /// Record the frame in memory instead of opening SocketCAN.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
