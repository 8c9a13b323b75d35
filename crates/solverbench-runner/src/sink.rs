//! Destinations for the human-readable result log.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// An append-only, line-oriented result log.
///
/// The log is passed explicitly to whatever writes results, so nothing in the
/// benchmark depends on ambient global state.
pub trait LogSink {
    /// Appends one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be written.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

impl<T> LogSink for &mut T
where
    T: LogSink + ?Sized,
{
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// Writes every line to a writer and optionally echoes it to standard output.
///
/// Each line is flushed immediately so partial results survive an interrupted run.
#[derive(Debug)]
pub struct TeeSink<W> {
    writer: W,
    echo: bool,
}

impl TeeSink<BufWriter<File>> {
    /// Creates (or truncates) the log file at `path`, echoing to standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?), true))
    }
}

impl<W> TeeSink<W>
where
    W: Write,
{
    /// Creates a sink over `writer`.
    #[must_use]
    pub fn new(writer: W, echo: bool) -> Self {
        Self { writer, echo }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> LogSink for TeeSink<W>
where
    W: Write,
{
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        if self.echo {
            println!("{line}");
        }
        Ok(())
    }
}

/// Collects lines in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lines written so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns everything written so far, one line per row.
    #[must_use]
    pub fn contents(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

impl LogSink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

/// Returns the first line of a result log: `"<label> at <local time>"`.
#[must_use]
pub fn run_banner(label: &str) -> String {
    let now = chrono::Local::now();
    format!("{label} at {}", now.format("%a %b %e %H:%M:%S %Y"))
}
