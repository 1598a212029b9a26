//! Output formatting for normalization results and API responses.
//!
//! Raw output is the bare base64 payload, one per line, which is what a
//! shell pipeline into an upload tool wants. JSON output carries the full
//! report alongside the payload.

use serde::Serialize;
use std::io::{self, Write};

use crate::types::NormalizeRecord;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Base64 payload only
    Raw,
    /// Report and payload as a JSON object
    Json,
}

/// A writer that serializes results to raw or JSON output.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects JSON output.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
        }
    }

    /// Write one normalization result in the configured format.
    pub fn write_record(&mut self, record: &NormalizeRecord) -> io::Result<()> {
        match self.format {
            OutputFormat::Raw => writeln!(self.writer, "{}", record.image),
            OutputFormat::Json => self.write_json(record),
        }
    }

    /// Write any serializable value as JSON, regardless of format.
    pub fn write_json<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
        }
        writeln!(self.writer)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
