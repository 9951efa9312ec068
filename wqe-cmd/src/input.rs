//! Measurement sources that feed the form: `--set` flags, a CSV file, and
//! terminal prompts.

use crate::error::InputError;
use csv::{ReaderBuilder, Trim};
use std::io::{BufRead, Write};
use wqe_core::{FormState, Parameter};

/// Header row every measurement CSV must start with.
pub const CSV_HEADER: [&str; 2] = ["parameter", "value"];

/// Resolve a wire key, rejecting anything outside the schema.
pub fn lookup_parameter(key: &str) -> Result<Parameter, InputError> {
    Parameter::from_key(key).ok_or_else(|| InputError::UnknownParameter(key.to_string()))
}

/// Parse one `KEY=VALUE` argument. The value is kept as raw text and may be
/// empty.
pub fn parse_assignment(arg: &str) -> Result<(Parameter, String), InputError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| InputError::MalformedAssignment(arg.to_string()))?;
    let parameter = lookup_parameter(key.trim())?;
    Ok((parameter, value.to_string()))
}

/// Parse a measurement CSV with a `parameter,value` header.
///
/// A missing or blank value cell means "not measured".
pub fn parse_measurement_csv(csv_object: &str) -> Result<Vec<(Parameter, String)>, InputError> {
    let mut measurements = Vec::new();
    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(csv_object.as_bytes());
    let headers = rdr.headers()?;
    if headers.iter().ne(CSV_HEADER) {
        return Err(InputError::MissingHeader(
            headers.iter().collect::<Vec<_>>().join(","),
        ));
    }
    for row in rdr.records() {
        let record = row?;
        let key = record.get(0).unwrap_or("");
        if key.is_empty() {
            continue;
        }
        let parameter = lookup_parameter(key)?;
        let value = record.get(1).unwrap_or("").to_string();
        measurements.push((parameter, value));
    }
    Ok(measurements)
}

/// Apply measurements to the form in order; later entries win.
pub fn apply_measurements(form: &mut FormState, measurements: Vec<(Parameter, String)>) {
    for (parameter, value) in measurements {
        form.apply_field_change(parameter, value);
    }
}

fn prompt_label(parameter: Parameter) -> String {
    if parameter.unit().is_empty() {
        parameter.label().to_string()
    } else {
        format!("{} ({})", parameter.label(), parameter.unit())
    }
}

/// Prompt for each of `parameters` in turn.
///
/// A blank line leaves the field as it is. Returns the number of fields the
/// user changed; stops early at end of input.
pub fn prompt_fields<R: BufRead, W: Write>(
    form: &mut FormState,
    parameters: &[Parameter],
    reader: &mut R,
    writer: &mut W,
) -> Result<usize, InputError> {
    let mut changed = 0;
    for parameter in parameters {
        write!(writer, "{}: ", prompt_label(*parameter))?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            writeln!(writer)?;
            break;
        }
        let raw = line.trim();
        if !raw.is_empty() {
            form.apply_field_change(*parameter, raw);
            changed += 1;
        }
    }
    Ok(changed)
}
