use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::SourceError;

/// Read a JSON array of raw transaction records from `path`.
///
/// A missing file and unusable content are reported as distinct [`SourceError`]s.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Value>, SourceError> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            SourceError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            SourceError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let records = parse_records(&content).map_err(|e| match e {
        ParseFailure::Json(source) => SourceError::NotParseable {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::NotAnArray => SourceError::NotAnArray {
            path: path.to_path_buf(),
        },
    })?;

    info!(
        "[Loader] 📂 Loaded {} raw records from {}",
        records.len(),
        path.display()
    );

    Ok(records)
}

#[derive(Debug)]
enum ParseFailure {
    Json(serde_json::Error),
    NotAnArray,
}

fn parse_records(content: &str) -> Result<Vec<Value>, ParseFailure> {
    match serde_json::from_str::<Value>(content).map_err(ParseFailure::Json)? {
        Value::Array(records) => Ok(records),
        _ => Err(ParseFailure::NotAnArray),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_source(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_records() {
        let file = write_source(r#"[{"userWallet": "0xa"}, {"userWallet": "0xb"}]"#);
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["userWallet"], "0xb");
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(dir.path().join("nope.json")).unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_not_parseable());
    }

    #[test]
    fn test_unparseable_source() {
        let file = write_source("[{\"userWallet\": ");
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::NotParseable { .. }));
        assert!(err.is_not_parseable());
    }

    #[test]
    fn test_source_must_be_an_array() {
        let file = write_source(r#"{"userWallet": "0xa"}"#);
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::NotAnArray { .. }));
        assert!(err.is_not_parseable());
    }
}
