use cantx_bus::{BoxedBus, BusTransport, MemoryBus};
use cantx_engine::Registry;

use crate::cmd::SendArgs;
use crate::exit::{bus_error, config_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let signal = Registry::resolve(&args.signal)
        .map_err(|err| config_error("cannot send", err))?;
    let frame = super::encode::encode_with_values(signal, &args.values)?;

    let mut bus = open_bus(&args)?;
    bus.send(&frame)
        .map_err(|err| bus_error("send failed", err))?;

    print_frame(&frame, format);
    Ok(SUCCESS)
}

fn open_bus(args: &SendArgs) -> CliResult<BoxedBus> {
    if args.dry_run {
        return Ok(Box::new(MemoryBus::new()));
    }
    open_socketcan(&args.interface)
}

#[cfg(target_os = "linux")]
fn open_socketcan(interface: &str) -> CliResult<BoxedBus> {
    let bus = cantx_bus::SocketCanBus::open(interface)
        .map_err(|err| bus_error("open failed", err))?;
    Ok(Box::new(bus))
}

#[cfg(not(target_os = "linux"))]
fn open_socketcan(_interface: &str) -> CliResult<BoxedBus> {
    Err(crate::exit::CliError::new(
        crate::exit::USAGE,
        "SocketCAN is only available on Linux; use --dry-run",
    ))
}
