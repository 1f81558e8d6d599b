use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use cantx_engine::{channel_specs, params_for, DEFAULT_CYCLE};
use cantx_frame::TxFrame;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Text
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput {
    can_id: String,
    extended: bool,
    data: Vec<u8>,
    display: String,
}

pub fn print_frame(frame: &TxFrame, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{frame}"),
        OutputFormat::Json => {
            let out = FrameOutput {
                can_id: format!("{:08X}", frame.can_id),
                extended: frame.extended,
                data: frame.data.to_vec(),
                display: frame.to_string(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
    }
}

#[derive(Serialize)]
struct SignalRow {
    signal: &'static str,
    label: &'static str,
    can_id: String,
    cycle_ms: u64,
    parameters: Vec<ParamRow>,
}

#[derive(Serialize)]
struct ParamRow {
    name: &'static str,
    default: &'static str,
}

pub fn print_signal_table(format: OutputFormat) {
    let rows: Vec<SignalRow> = channel_specs(DEFAULT_CYCLE)
        .iter()
        .map(|spec| SignalRow {
            signal: spec.id.as_str(),
            label: spec.id.label(),
            can_id: format!("{:08X}", spec.can_id),
            cycle_ms: spec.cycle.as_millis() as u64,
            parameters: params_for(spec.id)
                .iter()
                .map(|key| ParamRow {
                    name: key.as_str(),
                    default: key.default_value(),
                })
                .collect(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Text => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SIGNAL", "CAN ID", "CYCLE", "PARAMETERS"]);
            for row in rows {
                let params = row
                    .parameters
                    .iter()
                    .map(|p| format!("{}={}", p.name, p.default))
                    .collect::<Vec<_>>()
                    .join(", ");
                table.add_row(vec![
                    row.label.to_string(),
                    row.can_id,
                    format!("{} ms", row.cycle_ms),
                    params,
                ]);
            }
            println!("{table}");
        }
    }
}
