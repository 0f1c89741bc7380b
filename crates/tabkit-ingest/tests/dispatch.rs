use std::fs;
use std::path::PathBuf;

use tabkit_ingest::{FileFormat, IngestError, ReadOptions, ReaderError, read_file};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn unknown_extension_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.txt", "a,b\n1,2\n");

    let err = read_file(&path, &ReadOptions::default()).unwrap_err();
    match err {
        IngestError::UnsupportedFormat { extension } => assert_eq!(extension, ".txt"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn extension_match_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "SALES.CSV", "a,b\n1,2\n");

    let err = read_file(&path, &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn missing_extension_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Makefile", "all:\n");

    let err = read_file(&path, &ReadOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::UnsupportedFormat { ref extension } if extension.is_empty()
    ));
}

#[test]
fn formats_without_backend_fail_to_read() {
    let dir = TempDir::new().unwrap();
    for format in FileFormat::ALL.into_iter().filter(|f| !f.has_backend()) {
        let path = write_file(&dir, &format!("data{}", format.extension()), "payload");

        let err = read_file(&path, &ReadOptions::default()).unwrap_err();
        assert_eq!(err.format(), Some(format));
        assert!(matches!(
            err,
            IngestError::ReadFailed {
                source: ReaderError::Unavailable { .. },
                ..
            }
        ));
    }
}

#[test]
fn reader_failure_carries_path_and_format() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.sas", "not a transport file");

    let err = read_file(&path, &ReadOptions::default()).unwrap_err();
    match &err {
        IngestError::ReadFailed {
            path: failed,
            format,
            source,
        } => {
            assert_eq!(failed, &path);
            assert_eq!(*format, FileFormat::Sas);
            assert!(matches!(source, ReaderError::Sas(_)));
        }
        other => panic!("expected ReadFailed, got {other:?}"),
    }
    assert!(err.to_string().starts_with("failed to read SAS file"));
}

#[test]
fn missing_file_fails_with_io_cause() {
    let err = read_file("/nonexistent/tabkit/orders.json", &ReadOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::ReadFailed {
            format: FileFormat::Json,
            source: ReaderError::Io(_),
            ..
        }
    ));
}
