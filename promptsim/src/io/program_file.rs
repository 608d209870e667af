//! Loading program files for the standalone `exec` command.
//!
//! Program files are JSON. They are validated against the bundled
//! schema before typed deserialization so malformed files produce one
//! readable error instead of a serde trace.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;

use crate::core::program::Program;

const V1_SCHEMA: &str = include_str!("../../schemas/program/v1.schema.json");

/// Load and validate a program from disk.
pub fn load_program(path: &Path) -> Result<Program> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read program {}", path.display()))?;
    parse_program(&contents).with_context(|| format!("in program {}", path.display()))
}

/// Parse and validate a program from JSON text.
pub fn parse_program(contents: &str) -> Result<Program> {
    let value: Value = serde_json::from_str(contents).context("parse program JSON")?;
    validate_schema(&value)?;
    let program: Program = serde_json::from_value(value).context("deserialize program")?;
    Ok(program)
}

fn validate_schema(program: &Value) -> Result<()> {
    let schema_value: Value =
        serde_json::from_str(V1_SCHEMA).expect("bundled schema should be valid JSON");
    let compiled =
        validator_for(&schema_value).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(program) {
        let messages = compiled
            .iter_errors(program)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "program schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_program_parses() {
        let json = r#"{
            "id": "hello",
            "name": "Hello",
            "code": [
                { "op": "PRINT", "parts": [ { "expr": "str", "value": "hi" } ] }
            ]
        }"#;
        let program = parse_program(json).unwrap();
        assert_eq!(program.id, "hello");
        assert_eq!(program.code.len(), 1);
    }

    #[test]
    fn missing_required_field_fails_schema_validation() {
        let json = r#"{ "id": "x", "code": [] }"#;
        let err = parse_program(json).unwrap_err();
        assert!(err.to_string().contains("schema validation failed"));
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        let json = r#"{
            "id": "x",
            "name": "X",
            "code": [ { "op": "JUMP", "target": 0 } ]
        }"#;
        assert!(parse_program(json).is_err());
    }

    #[test]
    fn load_reports_the_file_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_program(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }
}
