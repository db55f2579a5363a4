// Tests for output formatting
//
// These tests check mapped documents, validation reports and schema listings
// in every output format.

use super::*;
use hookup_core::{hookup_detailed, ResolverConfig, Schema};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

/// A writer whose contents stay readable after it is boxed
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn writer(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, false, Box::new(buffer.clone()));
    (writer, buffer)
}

fn resolutions() -> Vec<Resolution> {
    let schema = Schema::from_value(&json!({
        "name": "name",
        "age": {"path": "age", "validators": [{"min": 18}]}
    }))
    .unwrap();
    let source = json!([{"name": "Ann", "age": 30}, {"name": "Kid", "age": 5}]);
    hookup_detailed(&schema, &source, ResolverConfig::default())
}

#[test]
fn test_format_machine_readable() {
    let value = json!({"name": "Ann", "age": 30});
    assert_eq!(
        OutputFormat::Json.format(&value).unwrap(),
        r#"{"name":"Ann","age":30}"#
    );
    assert!(OutputFormat::JsonPretty.format(&value).unwrap().contains("\n  \"name\": \"Ann\""));
    assert_eq!(OutputFormat::Yaml.format(&value).unwrap(), "name: Ann\nage: 30\n");
}

#[test]
fn test_report_human() {
    let formatted = format_report(&resolutions());
    assert!(formatted.contains("❌ 1 of 2 document(s) have invalid fields"));
    assert!(formatted.contains("📄 Document 1: INVALID"));
    assert!(formatted.contains("📍 age"));
    assert!(formatted.contains("• min: {min: 18, actual: 5}"));
    assert!(!formatted.contains("Document 0"));
}

#[test]
fn test_report_all_valid() {
    let valid: Vec<Resolution> = resolutions().into_iter().take(1).collect();
    let formatted = format_report(&valid);
    assert_eq!(formatted, "✅ All 1 document(s) valid\n");
}

#[test]
fn test_report_written_through_writer() {
    let (mut output, buffer) = writer(OutputFormat::Human);
    output.report(&resolutions()).unwrap();
    let written = buffer.contents();
    assert!(written.starts_with("❌ 1 of 2 document(s) have invalid fields"));
    assert!(written.ends_with("\n"));
}

#[test]
fn test_field_kinds_table() {
    let (mut output, buffer) = writer(OutputFormat::Human);
    output
        .field_kinds(&[
            ("name".to_string(), AccessorKind::Path),
            ("address".to_string(), AccessorKind::NestedSchema),
        ])
        .unwrap();

    let contents = buffer.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "FIELD   │ KIND");
    assert!(lines[1].starts_with("────────┼─"));
    assert_eq!(lines[2], "name    │ Path");
    assert_eq!(lines[3], "address │ NestedSchema");
}

#[test]
fn test_field_kinds_json() {
    let (mut output, buffer) = writer(OutputFormat::Json);
    output
        .field_kinds(&[("name".to_string(), AccessorKind::Path)])
        .unwrap();
    let listing: Value = serde_json::from_str(buffer.contents().trim()).unwrap();
    assert_eq!(listing, json!([{"field": "name", "kind": "Path"}]));
}

#[test]
fn test_messages_only_in_human_format() {
    let (mut output, buffer) = writer(OutputFormat::Json);
    output.info("loading").unwrap();
    output.success("done").unwrap();
    output.section("Report").unwrap();
    assert!(buffer.contents().is_empty());

    let (mut output, buffer) = writer(OutputFormat::Human);
    output.info("loading").unwrap();
    output.warning("careful").unwrap();
    assert_eq!(buffer.contents(), "INFO: loading\nWARNING: careful\n");
}

#[test]
fn test_quiet_suppresses_info() {
    let buffer = SharedBuffer::default();
    let mut output =
        OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));
    output.info("hidden").unwrap();
    output.data(&json!({"shown": true})).unwrap();
    assert_eq!(buffer.contents(), "{\n  \"shown\": true\n}\n");
}

#[test]
fn test_format_value_compact() {
    assert_eq!(format_value_compact(&json!("x")), "\"x\"");
    assert_eq!(format_value_compact(&json!([1, 2, 3, 4])), "[4 items]");
    assert_eq!(
        format_value_compact(&json!({"a": 1, "b": [true]})),
        "{a: 1, b: [true]}"
    );
}
