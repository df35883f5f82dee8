// Fan-out of rendered lines to every destination (console, stats file, ...)

use crate::models::OutputFormat;
use crate::render;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct Sink {
    writers: Vec<Box<dyn Write + Send>>,
}

impl Sink {
    pub fn new(writers: Vec<Box<dyn Write + Send>>) -> Self {
        Self { writers }
    }

    /// A freshly created (truncated) `stats.<format>` file in `dir`, then stdout.
    /// The file comes first so a broken console never costs the file a row.
    pub fn console_and_file(dir: &Path, format: OutputFormat) -> io::Result<(Self, PathBuf)> {
        let path = dir.join(format.file_name());
        let file = File::create(&path)?;
        let sink = Self::new(vec![Box::new(file), Box::new(io::stdout())]);
        Ok((sink, path))
    }

    /// Write the CSV header; no-op for formats without one.
    pub fn write_header(&mut self, format: OutputFormat) -> io::Result<()> {
        match render::header(format) {
            Some(h) => self.write_line(h),
            None => Ok(()),
        }
    }

    /// Write one complete line (newline appended) to every writer, in order, and flush.
    /// Each destination gets the whole line in one `write_all`; the first failing
    /// destination stops the fan-out and later writers do not receive the line.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        for w in &mut self.writers {
            w.write_all(buf.as_bytes())?;
            w.flush()?;
        }
        Ok(())
    }
}
