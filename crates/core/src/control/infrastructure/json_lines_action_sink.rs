use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::control::domain::action::Action;
use crate::control::domain::action_sink::ActionSink;

/// Writes each action as one JSON object per line.
pub struct JsonLinesActionSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonLinesActionSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl JsonLinesActionSink<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, std::io::Error> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write + Send> ActionSink for JsonLinesActionSink<W> {
    fn apply(&mut self, action: &Action) -> Result<(), Box<dyn std::error::Error>> {
        serde_json::to_writer(&mut self.out, action)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::domain::action::MouseButton;

    #[test]
    fn test_writes_one_line_per_action() {
        let mut sink = JsonLinesActionSink::new(Vec::new());
        sink.apply(&Action::Click {
            button: MouseButton::Right,
        })
        .unwrap();
        sink.apply(&Action::Scroll { amount: -14 }).unwrap();
        sink.flush().unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "{\"type\":\"click\",\"button\":\"right\"}\n{\"type\":\"scroll\",\"amount\":-14}\n"
        );
    }

    #[test]
    fn test_create_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.jsonl");
        {
            let mut sink = JsonLinesActionSink::create(&path).unwrap();
            sink.apply(&Action::SetVolume { level: 0.5 }).unwrap();
            sink.flush().unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Action = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(parsed, Action::SetVolume { level: 0.5 });
    }

    #[test]
    fn test_write_failure_is_reported() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut sink = JsonLinesActionSink::new(Broken);
        assert!(sink.apply(&Action::Scroll { amount: 1 }).is_err());
    }
}
