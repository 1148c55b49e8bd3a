//! CSV rendering for community listings.
//!
//! Every record is written and flushed on its own, so a failing sink leaves a
//! valid CSV prefix behind and the error surfaces before the next row.

use std::io::Write;

use crate::cancel::Cancellation;
use crate::error::{ManagerError, ManagerResult};
use crate::model::Community;

/// Column names, in output order.
pub const CSV_HEADER: [&str; 3] = ["id", "clients", "persistent"];

/// Row-at-a-time CSV writer over any output sink.
#[derive(Debug)]
pub struct CsvWriter<W: Write> {
    sink: W,
}

impl<W: Write> CsvWriter<W> {
    /// Wrap an output sink.
    #[must_use]
    pub const fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Write and flush the header row.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Write`] if the sink rejects the write or flush.
    pub fn write_header(&mut self) -> ManagerResult<()> {
        self.write_record(&CSV_HEADER)
    }

    /// Write and flush one community row.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Write`] if the sink rejects the write or flush.
    pub fn write_row(&mut self, community: &Community) -> ManagerResult<()> {
        let clients = community.clients.to_string();
        let persistent = community.persistent.to_string();
        self.write_record(&[community.id.as_str(), clients.as_str(), persistent.as_str()])
    }

    /// Release the underlying sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_record(&mut self, fields: &[&str]) -> ManagerResult<()> {
        let mut line = String::new();
        for (index, field) in fields.iter().enumerate() {
            if index > 0 {
                line.push(',');
            }
            push_field(&mut line, field);
        }
        line.push('\n');

        self.sink
            .write_all(line.as_bytes())
            .map_err(ManagerError::write)?;
        self.sink.flush().map_err(ManagerError::write)
    }
}

/// Render communities as CSV: header first, then one row each in input order.
///
/// # Errors
///
/// Returns [`ManagerError::Write`] on the first failed write or flush; rows
/// already flushed stay in the sink.
pub fn render_csv<W: Write>(communities: &[Community], sink: W) -> ManagerResult<()> {
    render_csv_with_cancel(communities, sink, &Cancellation::never())
}

/// Like [`render_csv`], but checks `cancel` before every record.
///
/// # Errors
///
/// Returns a cancelled [`ManagerError::Network`] once `cancel` has fired, or
/// [`ManagerError::Write`] on the first failed write or flush.
pub fn render_csv_with_cancel<W: Write>(
    communities: &[Community],
    sink: W,
    cancel: &Cancellation,
) -> ManagerResult<()> {
    let mut writer = CsvWriter::new(sink);
    if cancel.is_cancelled() {
        return Err(ManagerError::cancelled());
    }
    writer.write_header()?;
    for community in communities {
        if cancel.is_cancelled() {
            return Err(ManagerError::cancelled());
        }
        writer.write_row(community)?;
    }
    Ok(())
}

fn push_field(line: &mut String, field: &str) {
    if !needs_quotes(field) {
        line.push_str(field);
        return;
    }
    line.push('"');
    for ch in field.chars() {
        if ch == '"' {
            line.push('"');
        }
        line.push(ch);
    }
    line.push('"');
}

fn needs_quotes(field: &str) -> bool {
    if field.is_empty() {
        return false;
    }
    // A lone `\.` terminates input for some bulk loaders.
    field == r"\."
        || field.starts_with([' ', '\t'])
        || field.contains([',', '"', '\r', '\n'])
}
