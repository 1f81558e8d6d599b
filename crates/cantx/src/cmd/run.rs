use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cantx_bus::{BoxedBus, MemoryBus};
use cantx_engine::{ParamKey, ParamTable, ParameterSource, Registry, TransportOpener};
use cantx_frame::SignalId;
use tracing::info;

use crate::cmd::RunArgs;
use crate::exit::{
    config_error, engine_error, io_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE,
};

pub fn run(args: RunArgs) -> CliResult<i32> {
    let table = Arc::new(ParamTable::new());
    for pair in &args.params {
        apply_param(&table, pair)?;
    }

    let (opener, capture) = make_opener(&args)?;
    let registry = Arc::new(Registry::with_cycle(
        args.interface.as_str(),
        Arc::clone(&table) as Arc<dyn ParameterSource>,
        opener,
        Duration::from_millis(args.cycle_ms),
    ));

    let shutdown = Arc::clone(&registry);
    ctrlc::set_handler(move || {
        shutdown.shutdown_all();
        std::process::exit(SUCCESS);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("failed to install Ctrl-C handler: {err}")))?;

    for signal in initial_signals(&args)? {
        registry
            .start(signal)
            .map_err(|err| engine_error("start failed", err))?;
    }

    match args.duration_ms {
        Some(ms) => thread::sleep(Duration::from_millis(ms)),
        None => control_loop(&registry, &table)?,
    }

    registry.shutdown_all();
    if let Some(bus) = capture {
        info!(frames = bus.sent().len(), "dry run complete");
    }
    Ok(SUCCESS)
}

fn initial_signals(args: &RunArgs) -> CliResult<Vec<SignalId>> {
    if args.all {
        return Ok(SignalId::ALL.to_vec());
    }
    args.signals
        .iter()
        .map(|name| Registry::resolve(name).map_err(|err| config_error("cannot start", err)))
        .collect()
}

fn apply_param(table: &ParamTable, pair: &str) -> CliResult<()> {
    let (name, value) = pair.split_once('=').ok_or_else(|| {
        CliError::new(USAGE, format!("--param expects KEY=VALUE, got {pair:?}"))
    })?;
    let key = ParamKey::parse(name)
        .ok_or_else(|| CliError::new(USAGE, format!("unknown parameter {name:?}")))?;
    table.set(key, value);
    Ok(())
}

fn make_opener(args: &RunArgs) -> CliResult<(TransportOpener, Option<MemoryBus>)> {
    if args.dry_run {
        let bus = MemoryBus::new();
        let handle = bus.clone();
        let opener: TransportOpener =
            Box::new(move |_iface: &str| Ok(Box::new(bus.clone()) as BoxedBus));
        return Ok((opener, Some(handle)));
    }
    socketcan_opener()
}

#[cfg(target_os = "linux")]
fn socketcan_opener() -> CliResult<(TransportOpener, Option<MemoryBus>)> {
    let opener: TransportOpener =
        Box::new(|iface: &str| Ok(Box::new(cantx_bus::SocketCanBus::open(iface)?) as BoxedBus));
    Ok((opener, None))
}

#[cfg(not(target_os = "linux"))]
fn socketcan_opener() -> CliResult<(TransportOpener, Option<MemoryBus>)> {
    Err(CliError::new(
        USAGE,
        "SocketCAN is only available on Linux; use --dry-run",
    ))
}

/// Line-oriented control surface. Reads commands until EOF or `quit`,
/// echoing each channel's status the way the old operator panel did.
fn control_loop(registry: &Registry, table: &ParamTable) -> CliResult<()> {
    println!("commands: start|stop|restart <signal>, set <param> <value>, status, quit");
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|err| io_error("failed reading command", err))?;
        if read == 0 {
            break;
        }

        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "start" | "stop" | "restart" => {
                let Some(name) = parts.next() else {
                    eprintln!("usage: {command} <signal>");
                    continue;
                };
                match Registry::resolve(name) {
                    Ok(signal) => {
                        let result = match command {
                            "start" => registry.start(signal),
                            "restart" => registry.restart(signal),
                            _ => {
                                registry.stop(signal);
                                Ok(())
                            }
                        };
                        match result {
                            Ok(()) => println!("{signal}: {}", registry.status(signal)),
                            Err(err) => eprintln!("error: {err}"),
                        }
                    }
                    Err(err) => eprintln!("error: {err}"),
                }
            }
            "set" => {
                let Some(name) = parts.next() else {
                    eprintln!("usage: set <param> <value>");
                    continue;
                };
                let value = parts.collect::<Vec<_>>().join(" ");
                if value.is_empty() {
                    eprintln!("usage: set <param> <value>");
                    continue;
                }
                match ParamKey::parse(name) {
                    Some(key) => {
                        table.set(key, value);
                        // A selector change while sending restarts the
                        // channel so the new value starts a fresh cycle.
                        if key == ParamKey::IvtStatus && registry.is_active(SignalId::IvtStatus) {
                            if let Err(err) = registry.restart(SignalId::IvtStatus) {
                                eprintln!("error: {err}");
                            }
                        }
                    }
                    None => eprintln!("error: unknown parameter {name:?}"),
                }
            }
            "status" => {
                for signal in SignalId::ALL {
                    println!("{signal}: {}", registry.status(signal));
                }
            }
            "quit" | "exit" => break,
            other => eprintln!("unknown command {other:?}"),
        }
        let _ = io::stdout().flush();
    }

    Ok(())
}
