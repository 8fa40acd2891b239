//! JSON I/O handling for CLI
//!
//! - Input: one JSON document from a file or stdin
//! - Output: one JSON object per response on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};
use crate::schema::Violation;

/// Read a JSON document from `file`, or from stdin when `file` is `None`
pub fn read_document(file: Option<&Path>) -> CliResult<Value> {
    let text = match file {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read '{}': {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    parse_document(&text)
}

/// Parse document text, rejecting empty input
pub fn parse_document(text: &str) -> CliResult<Value> {
    if text.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(serde_json::from_str(text)?)
}

/// Success envelope
pub fn ok_envelope(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope; `violations` is present only for rejected documents
pub fn error_envelope(code: &str, message: &str, violations: &[Violation]) -> Value {
    let mut response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    if !violations.is_empty() {
        response["violations"] = json!(violations);
    }
    response
}

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&mut io::stdout(), &ok_envelope(data))
}

/// Write an error response to stdout
pub fn write_error(err: &CliError) -> CliResult<()> {
    let response = error_envelope(err.code_str(), err.message(), err.violations());
    write_line(&mut io::stdout(), &response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ViolationKind;

    #[test]
    fn test_empty_input_rejected() {
        let err = parse_document("  \n").unwrap_err();
        assert_eq!(err.code_str(), "CLI_IO_ERROR");
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(parse_document("{ nope").is_err());
    }

    #[test]
    fn test_error_envelope_with_violations() {
        let violations = vec![Violation::new(
            "message",
            ViolationKind::StringTooShort { min_length: 5, actual_length: 2 },
        )];
        let response = error_envelope("CLI_DOCUMENT_REJECTED", "rejected", &violations);
        assert_eq!(response["status"], "error");
        assert_eq!(response["violations"][0]["field"], "message");
        assert_eq!(response["violations"][0]["code"], "STRING_TOO_SHORT");
    }

    #[test]
    fn test_error_envelope_without_violations() {
        let response = error_envelope("CLI_IO_ERROR", "Empty input", &[]);
        assert!(response.get("violations").is_none());
    }

    #[test]
    fn test_write_line_is_single_line() {
        let mut out = Vec::new();
        write_line(&mut out, &ok_envelope(json!({"a": 1}))).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\"data\":{\"a\":1},\"status\":\"ok\"}\n");
    }
}
