// src/tokenize/mod.rs

/// One logical row: its fields in order.
pub type Record = Vec<String>;

/// Single-pass scanner state for the quoted, comma-delimited dialect.
///
/// - `"` toggles the quoted span and is never kept (no `""` escape).
/// - `,` outside quotes ends a field.
/// - CR or LF outside quotes ends the record, but only when the field buffer
///   is non-empty; otherwise the character is dropped and the record keeps
///   accumulating fields.
/// - A record still open at end of input is discarded by [`Tokenizer::finish`].
#[derive(Debug, Default)]
pub struct Tokenizer {
    in_quotes: bool,
    field: String,
    record: Record,
    records: Vec<Record>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one character.
    pub fn push(&mut self, c: char) {
        match c {
            '"' => self.in_quotes = !self.in_quotes,
            ',' if !self.in_quotes => {
                self.record.push(std::mem::take(&mut self.field));
            }
            '\r' | '\n' if !self.in_quotes => {
                if !self.field.is_empty() {
                    self.record.push(std::mem::take(&mut self.field));
                    self.records.push(std::mem::take(&mut self.record));
                }
            }
            _ => self.field.push(c),
        }
    }

    /// Feed a whole chunk of text.
    pub fn push_str(&mut self, text: &str) {
        text.chars().for_each(|c| self.push(c));
    }

    /// Close the scan. Anything not terminated by a line break is dropped.
    pub fn finish(self) -> Vec<Record> {
        if !self.field.is_empty() || !self.record.is_empty() {
            tracing::trace!(
                fields = self.record.len() + usize::from(!self.field.is_empty()),
                "dropping unterminated trailing record"
            );
        }
        self.records
    }
}

/// Split `text` into records. Record 0 is the header.
pub fn tokenize(text: &str) -> Vec<Record> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.push_str(text);
    tokenizer.finish()
}

/// The header row, if the input produced any record at all.
pub fn header(records: &[Record]) -> Option<&Record> {
    records.first()
}

/// Every record after the header.
pub fn data_rows(records: &[Record]) -> &[Record] {
    records.get(1..).unwrap_or(&[])
}
