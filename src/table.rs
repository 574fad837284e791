use csv::{ReaderBuilder, WriterBuilder};

/// The header line of a source, split into fields and kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub fields: Vec<String>,
    /// Exact text of the first line, without its line terminator.
    pub line: String,
}

/// An in-memory delimited table. Field text is kept exactly as read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// First line of the source, when the caller declared one.
    pub header: Option<Header>,
    /// Data rows in file order (or permuted order after a shuffle).
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse delimited `bytes`. Every record, header included, must have the
    /// same number of fields; blank lines are skipped.
    pub fn parse(bytes: &[u8], has_header: bool, delimiter: u8) -> csv::Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(has_header)
            .delimiter(delimiter)
            .flexible(false)
            .from_reader(bytes);

        let header = if has_header {
            let fields: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
            // the reader now sits just past the header record
            let end = (rdr.position().byte() as usize).min(bytes.len());
            let line = String::from_utf8_lossy(&bytes[..end])
                .trim_matches(|c| c == '\r' || c == '\n')
                .to_string();
            // an empty source has no header line at all
            (!fields.is_empty()).then_some(Header { fields, line })
        } else {
            None
        };

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { header, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize the header line as read, then the rows, quoting fields only
    /// where needed. Every record ends with `\n`.
    pub fn to_bytes(&self, delimiter: u8) -> csv::Result<Vec<u8>> {
        let mut out = Vec::new();
        if let Some(header) = &self.header {
            out.extend_from_slice(header.line.as_bytes());
            out.push(b'\n');
        }

        let mut wtr = WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(out);
        for row in &self.rows {
            wtr.write_record(row)?;
        }

        wtr.into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}
