pub mod tokens;

use tracing::{debug, info};

use crate::contact::{Contact, ContactField};
pub use tokens::TokenizerPolicy;

/// Literal marker that identifies the header row.
pub const HEADER_MARKER: &str = "First Name";

/// Column layout taken from the header row.
#[derive(Debug, Clone)]
pub struct Header {
    pub columns: Vec<String>,
    fields: Vec<Option<ContactField>>,
}

impl Header {
    /// Literal comma split; each name is trimmed and loses one pair of
    /// surrounding quotes.
    pub fn parse(line: &str) -> Self {
        let columns: Vec<String> = line.split(',').map(tokens::clean_cell).collect();
        let fields = columns.iter().map(|c| ContactField::from_header(c)).collect();
        Header { columns, fields }
    }

    pub fn mapped_columns(&self) -> usize {
        self.fields.iter().filter(|f| f.is_some()).count()
    }

    /// Build a contact from positional cells. Missing cells read as empty,
    /// and a later column overwrites an earlier one mapped to the same field.
    pub fn build(&self, cells: &[String]) -> Contact {
        let mut contact = Contact::default();
        for (i, field) in self.fields.iter().enumerate() {
            if let Some(field) = field {
                contact.set(*field, cells.get(i).cloned().unwrap_or_default());
            }
        }
        contact
    }
}

/// Parse the full text of an export into contacts, in file order.
///
/// Blank lines are skipped, everything above the first line containing
/// [`HEADER_MARKER`] is ignored, and rows without a company are dropped.
/// Text with no header yields an empty list.
pub fn parse_connections(text: &str, policy: TokenizerPolicy) -> Vec<Contact> {
    let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let Some(header_idx) = rows.iter().position(|r| r.contains(HEADER_MARKER)) else {
        info!("No header row containing {:?}; nothing to parse", HEADER_MARKER);
        return Vec::new();
    };

    let header = Header::parse(rows[header_idx]);
    debug!(
        line = header_idx,
        columns = header.columns.len(),
        mapped = header.mapped_columns(),
        "Located header row"
    );

    let data = &rows[header_idx + 1..];
    let contacts: Vec<Contact> = data
        .iter()
        .map(|row| header.build(&policy.split_row(row)))
        .filter(|c| !c.company.is_empty())
        .collect();

    info!(
        rows = data.len(),
        kept = contacts.len(),
        dropped = data.len() - contacts.len(),
        ?policy,
        "Parsed connections"
    );
    contacts
}
