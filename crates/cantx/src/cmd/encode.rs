use cantx_engine::{channel_specs, params_for, ParamTable, Registry, DEFAULT_CYCLE};
use cantx_frame::{SignalId, TxFrame};

use crate::cmd::EncodeArgs;
use crate::exit::{config_error, encode_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let signal = Registry::resolve(&args.signal)
        .map_err(|err| config_error("cannot encode", err))?;
    let frame = encode_with_values(signal, &args.values)?;
    print_frame(&frame, format);
    Ok(SUCCESS)
}

/// Encode one frame from positional values, falling back to each
/// parameter's default where no value was given.
pub(crate) fn encode_with_values(signal: SignalId, values: &[String]) -> CliResult<TxFrame> {
    let keys = params_for(signal);
    if values.len() > keys.len() {
        return Err(CliError::new(
            USAGE,
            format!(
                "{signal} takes at most {} value(s), got {}",
                keys.len(),
                values.len()
            ),
        ));
    }

    let table = ParamTable::new();
    for (key, value) in keys.iter().zip(values) {
        table.set(*key, value.clone());
    }

    let spec = channel_specs(DEFAULT_CYCLE)[signal.index()];
    (spec.encode)(&table).map_err(|err| encode_error("encode failed", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn encodes_reference_rpm_payload() {
        let frame = encode_with_values(SignalId::EngineRpm, &values(&["1000"])).unwrap();
        assert_eq!(frame.data, [0, 0, 0, 0x40, 0x1F, 0, 0, 0]);
    }

    #[test]
    fn missing_values_use_defaults() {
        let frame = encode_with_values(SignalId::SetSpeed, &[]).unwrap();
        assert_eq!(frame.data, [0x20, 0x6E, 0x1F, 0x70, 0x61, 0, 0, 0]);
    }

    #[test]
    fn partial_values_fill_leading_parameters() {
        // F1 given, F2 keeps its 31.0 default.
        let frame = encode_with_values(SignalId::SetSpeed, &values(&["10.0"])).unwrap();
        assert_eq!(frame.data[3..5], [0x70, 0x61]);
    }

    #[test]
    fn surplus_values_are_a_usage_error() {
        let err = encode_with_values(SignalId::EngineRpm, &values(&["1", "2"])).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn bad_text_maps_to_data_invalid() {
        let err = encode_with_values(SignalId::EngineRpm, &values(&["fast"])).unwrap_err();
        assert_eq!(err.code, crate::exit::DATA_INVALID);
    }
}
