//! The `evaluate` command: fill the form, submit once, present the outcome.

use crate::error::InputError;
use crate::input::{apply_measurements, parse_assignment, parse_measurement_csv, prompt_fields};
use crate::present::{render_result, write_graph};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::Path;
use wqe_core::{
    ClientConfig, Evaluate, EvaluationClient, FormEvent, FormState, Parameter, SubmitError,
};

/// Options for a single evaluation run.
#[derive(Debug, Clone, Default)]
pub struct EvaluateOptions {
    /// `KEY=VALUE` assignments, applied after the CSV
    pub set: Vec<String>,
    /// Measurement CSV path
    pub input: Option<String>,
    /// Prompt for every parameter before submitting
    pub interactive: bool,
    /// Chart image output path
    pub graph: String,
    /// Print the raw result as JSON instead of the rendered report
    pub json: bool,
}

/// Build the form from the CSV file and `--set` arguments.
pub fn collect_form(options: &EvaluateOptions) -> Result<FormState, InputError> {
    let mut form = FormState::new();
    if let Some(path) = &options.input {
        let csv_object = std::fs::read_to_string(path)?;
        let measurements = parse_measurement_csv(&csv_object)?;
        info!("Loaded {} measurements from {}", measurements.len(), path);
        apply_measurements(&mut form, measurements);
    }
    for arg in &options.set {
        let (parameter, value) = parse_assignment(arg)?;
        form.apply_field_change(parameter, value);
    }
    Ok(form)
}

/// Submit the form. When interactive, a field that fails validation is
/// reported on `writer` and asked for again from `reader`; a blank answer or
/// end of input gives up with the validation error.
pub async fn submit_form<E: Evaluate, R: BufRead, W: Write>(
    form: &mut FormState,
    evaluator: &E,
    interactive: bool,
    reader: &mut R,
    writer: &mut W,
) -> anyhow::Result<FormEvent> {
    loop {
        match form.submit(evaluator).await {
            Ok(event) => return Ok(event),
            Err(SubmitError::Validation(e)) if interactive => {
                writeln!(writer, "{}", e)?;
                let changed = prompt_fields(form, &[e.parameter], reader, writer)?;
                if changed == 0 {
                    return Err(e.into());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn present(event: FormEvent, options: &EvaluateOptions) -> anyhow::Result<()> {
    let result = match event {
        FormEvent::Evaluated(result) => result,
        FormEvent::Failed(message) => anyhow::bail!(message),
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print!("{}", render_result(&result));
    match write_graph(&result.graph, Path::new(&options.graph)) {
        Ok(_) => println!("Chart written to {}", options.graph),
        Err(e) => {
            warn!("Chart not written: {}", e);
            eprintln!("{}", e);
        }
    }
    Ok(())
}

pub async fn run_evaluate(config: ClientConfig, options: EvaluateOptions) -> anyhow::Result<()> {
    let mut form = collect_form(&options)?;
    let mut reader = io::stdin().lock();
    let mut writer = io::stdout();
    if options.interactive {
        prompt_fields(&mut form, &Parameter::ALL, &mut reader, &mut writer)?;
    }

    info!("Submitting to {}", config.endpoint());
    let client = EvaluationClient::new(config)?;
    let event = submit_form(
        &mut form,
        &client,
        options.interactive,
        &mut reader,
        &mut writer,
    )
    .await?;
    present(event, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wqe_core::error::Result;
    use wqe_core::{EvaluationRequest, EvaluationResult, RawValue};

    #[derive(Default)]
    struct FixedEvaluator {
        calls: AtomicUsize,
    }

    impl FixedEvaluator {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Evaluate for FixedEvaluator {
        async fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(EvaluationResult {
                quality_score: request.get(Parameter::Ph).unwrap_or_default() * 10.0,
                report: "Good".to_string(),
                graph: "iVBORw0KGgo=".to_string(),
            })
        }
    }

    #[test]
    fn test_set_overrides_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "parameter,value\npH,6.5\nIron,0.2\n").unwrap();
        let options = EvaluateOptions {
            set: vec!["pH=7.2".to_string(), "Iron=".to_string()],
            input: Some(file.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        let form = collect_form(&options).unwrap();
        assert_eq!(
            form.raw_value(Parameter::Ph),
            Some(&RawValue::Text("7.2".to_string()))
        );
        assert_eq!(form.raw_value(Parameter::Iron), Some(&RawValue::Empty));
    }

    #[test]
    fn test_missing_csv_is_io_error() {
        let options = EvaluateOptions {
            input: Some("/nonexistent/measurements.csv".to_string()),
            ..Default::default()
        };
        assert!(matches!(collect_form(&options), Err(InputError::Io(_))));
    }

    #[tokio::test]
    async fn test_submit_form_success() {
        let evaluator = FixedEvaluator::default();
        let mut form = FormState::new();
        form.apply_field_change(Parameter::Ph, "7.2");
        let mut output = Vec::new();
        let event = submit_form(&mut form, &evaluator, false, &mut Cursor::new(""), &mut output)
            .await
            .unwrap();
        match event {
            FormEvent::Evaluated(result) => assert!((result.quality_score - 72.0).abs() < 1e-9),
            FormEvent::Failed(message) => panic!("unexpected failure: {message}"),
        }
        assert_eq!(evaluator.calls(), 1);
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_submit_form_validation_error_non_interactive() {
        let evaluator = FixedEvaluator::default();
        let mut form = FormState::new();
        form.apply_field_change(Parameter::Ph, "abc");
        let err = submit_form(&mut form, &evaluator, false, &mut Cursor::new("7\n"), &mut Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for pH: \"abc\" is not a number.");
        assert_eq!(evaluator.calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_form_reprompts_rejected_field() {
        let evaluator = FixedEvaluator::default();
        let mut form = FormState::new();
        form.apply_field_change(Parameter::Ph, "abc");
        let mut output = Vec::new();
        let event = submit_form(&mut form, &evaluator, true, &mut Cursor::new("7.2\n"), &mut output)
            .await
            .unwrap();

        assert!(matches!(event, FormEvent::Evaluated(_)));
        assert_eq!(evaluator.calls(), 1);
        assert_eq!(
            form.raw_value(Parameter::Ph),
            Some(&RawValue::Text("7.2".to_string()))
        );
        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(
            transcript,
            "Invalid value for pH: \"abc\" is not a number.\npH: "
        );
    }

    #[tokio::test]
    async fn test_submit_form_reprompts_until_valid() {
        let evaluator = FixedEvaluator::default();
        let mut form = FormState::new();
        form.apply_field_change(Parameter::Ph, "abc");
        let event = submit_form(
            &mut form,
            &evaluator,
            true,
            &mut Cursor::new("7.2.1\n6.5\n"),
            &mut Vec::new(),
        )
        .await
        .unwrap();
        match event {
            FormEvent::Evaluated(result) => assert!((result.quality_score - 65.0).abs() < 1e-9),
            FormEvent::Failed(message) => panic!("unexpected failure: {message}"),
        }
        assert_eq!(evaluator.calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_form_gives_up_on_blank_or_eof() {
        for input in ["\n", ""] {
            let evaluator = FixedEvaluator::default();
            let mut form = FormState::new();
            form.apply_field_change(Parameter::Turbidity, "cloudy");
            let err = submit_form(&mut form, &evaluator, true, &mut Cursor::new(input), &mut Vec::new())
                .await
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid value for Turbidity: \"cloudy\" is not a number.",
                "input: {input:?}"
            );
            assert_eq!(evaluator.calls(), 0);
            assert_eq!(
                form.error(),
                Some("Invalid value for Turbidity: \"cloudy\" is not a number.")
            );
        }
    }

    #[test]
    fn test_present_failure_is_error() {
        let err = present(
            FormEvent::Failed("Invalid pH value".to_string()),
            &EvaluateOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid pH value");
    }
}
