//! Map command handler

use super::utils::{load_document, load_schema, save_to};
use crate::cli::{MapArgs, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputFormatter, OutputWriter};
use hookup_core::{hookup_detailed_async, MissingValue, Resolution};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Handle the map command
#[instrument(
    skip(config, output),
    fields(schema = %args.schema.display(), source = %args.source.display())
)]
pub async fn handle_map(args: MapArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("map_command", &args.source.display().to_string());
    output.info(&format!(
        "Mapping {} through {}",
        args.source.display(),
        args.schema.display()
    ))?;

    let schema = load_schema(&args.schema)?;
    let source = load_document(&args.source)?;

    let mut resolver_config = config.resolver.clone();
    if args.omit_missing {
        resolver_config.missing = MissingValue::Omit;
    }
    debug!(config = ?resolver_config, "Resolving");

    let resolutions = hookup_detailed_async(&schema, &source, resolver_config).await;
    let mapped = mapped_document(&source, &resolutions);
    let invalid = resolutions.iter().filter(|r| !r.is_valid()).count();
    info!(
        documents = resolutions.len(),
        invalid,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Mapping finished"
    );

    // Machine formats carry the report alongside each target
    let with_report = args.errors && output.format() != OutputFormat::Human;

    if let Some(path) = &args.save_to {
        let content = if with_report {
            output.format().format(&resolutions)?
        } else {
            output.format().format(&mapped)?
        };
        save_to(path, &content)?;
        output.success(&format!("✓ Saved mapped output to {}", path.display()))?;
    } else if with_report {
        output.data(&resolutions)?;
    } else {
        output.data(&mapped)?;
    }

    if args.errors && output.format() == OutputFormat::Human {
        output.section("Validation Report")?;
        output.report(&resolutions)?;
    } else if invalid > 0 && !args.errors {
        output.warning(&format!(
            "{} document(s) have invalid fields; rerun with --errors for details",
            invalid
        ))?;
    }

    if invalid > 0 {
        warn!(invalid, "Mapped output contains invalid fields");
        if args.strict {
            return Err(Error::ValidationFailed {
                invalid,
                total: resolutions.len(),
            });
        }
    }

    Ok(())
}

/// Reassemble targets in the shape of the source: an array for an array
fn mapped_document(source: &Value, resolutions: &[Resolution]) -> Value {
    match (source, resolutions) {
        (Value::Array(_), _) => {
            Value::Array(resolutions.iter().map(|r| r.target.clone()).collect())
        }
        (_, [single]) => single.target.clone(),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookup_core::{hookup_detailed, ResolverConfig, Schema};
    use serde_json::json;
    use std::io::Write;
    use tempfile::Builder;

    fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn args(schema: &tempfile::NamedTempFile, source: &tempfile::NamedTempFile) -> MapArgs {
        MapArgs {
            schema: schema.path().to_path_buf(),
            source: source.path().to_path_buf(),
            errors: false,
            strict: false,
            omit_missing: false,
            save_to: None,
        }
    }

    fn quiet_writer() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()))
    }

    #[test]
    fn test_mapped_document_keeps_source_shape() {
        let schema = Schema::from_value(&json!({"n": "n"})).unwrap();

        let single = json!({"n": 1});
        let resolutions = hookup_detailed(&schema, &single, ResolverConfig::default());
        assert_eq!(mapped_document(&single, &resolutions), json!({"n": 1}));

        let many = json!([{"n": 1}]);
        let resolutions = hookup_detailed(&schema, &many, ResolverConfig::default());
        assert_eq!(mapped_document(&many, &resolutions), json!([{"n": 1}]));
    }

    #[tokio::test]
    async fn test_map_saves_output() {
        let schema = write_file(
            ".yaml",
            "name: _firstName\nzip:\n  path: address.zipcode\n  transform: number_to_string\n",
        );
        let source = write_file(
            ".json",
            r#"{"_firstName": "Miro", "address": {"zipcode": 11103}}"#,
        );
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("mapped.json");

        let mut map_args = args(&schema, &source);
        map_args.save_to = Some(target.clone());
        handle_map(map_args, &Config::default(), &mut quiet_writer())
            .await
            .unwrap();

        let saved: Value = serde_json::from_str(&std::fs::read_to_string(target).unwrap()).unwrap();
        assert_eq!(saved, json!({"name": "Miro", "zip": "11103"}));
    }

    #[tokio::test]
    async fn test_map_strict_fails_on_invalid_fields() {
        let schema = write_file(
            ".json",
            r#"{"age": {"path": "Age", "validators": [{"min": 12}]}}"#,
        );
        let source = write_file(".json", r#"[{"Age": 30}, {"Age": 10}]"#);

        let mut map_args = args(&schema, &source);
        map_args.strict = true;
        let err = handle_map(map_args, &Config::default(), &mut quiet_writer())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationFailed { invalid: 1, total: 2 }));

        let lenient = args(&schema, &source);
        assert!(handle_map(lenient, &Config::default(), &mut quiet_writer())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_map_omit_missing_and_report() {
        let schema = write_file(".json", r#"{"name": "name", "nick": "nick"}"#);
        let source = write_file(".json", r#"{"name": "Ann"}"#);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("report.json");

        let mut map_args = args(&schema, &source);
        map_args.omit_missing = true;
        map_args.errors = true;
        map_args.save_to = Some(target.clone());
        handle_map(map_args, &Config::default(), &mut quiet_writer())
            .await
            .unwrap();

        let saved: Value = serde_json::from_str(&std::fs::read_to_string(target).unwrap()).unwrap();
        assert_eq!(
            saved,
            json!([{"target": {"name": "Ann"}, "status": "VALID", "errors": []}])
        );
    }
}
