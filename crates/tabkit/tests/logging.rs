//! Installs the global subscriber, so this file holds a single test.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tabkit::logging::{LogConfig, LogFormat, LoggingError, init_logging_with_writer};
use tabkit::{Frame, ReadOptions};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn json_events_reach_the_writer() {
    let captured = Captured::default();
    let config = LogConfig::default()
        .with_level(Level::DEBUG)
        .with_format(LogFormat::Json);
    init_logging_with_writer(&config, captured.clone()).unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "x").unwrap();
    assert!(Frame::read_file(&path, &ReadOptions::default()).is_err());

    let output = captured.contents();
    let event: serde_json::Value = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .find(|event: &serde_json::Value| event["fields"]["message"] == "no reader for file")
        .expect("warn event logged");
    assert_eq!(event["level"], "WARN");
    assert_eq!(event["fields"]["path"], path.display().to_string());

    let again = init_logging_with_writer(&config, captured);
    assert!(matches!(again, Err(LoggingError::AlreadyInitialized(_))));
}
