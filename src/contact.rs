use serde::Serialize;

/// One row of a connections export.
///
/// Only `company` is required; every other field defaults to an empty string
/// when the column is absent or the row runs short.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub url: String,
    pub email: String,
    pub company: String,
    pub position: String,
    /// Kept verbatim, e.g. "07 Mar 2024".
    pub connected_on: String,
}

impl Contact {
    /// "<first> <last>", joined with a single space and not trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::FirstName => self.first_name = value,
            ContactField::LastName => self.last_name = value,
            ContactField::Company => self.company = value,
            ContactField::Position => self.position = value,
            ContactField::ConnectedOn => self.connected_on = value,
            ContactField::Url => self.url = value,
            ContactField::Email => self.email = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    FirstName,
    LastName,
    Company,
    Position,
    ConnectedOn,
    Url,
    Email,
}

/// Normalized-header substrings, checked in order. The first hit wins, so a
/// column maps to at most one field.
const HEADER_KEYS: &[(&str, ContactField)] = &[
    ("firstname", ContactField::FirstName),
    ("lastname", ContactField::LastName),
    ("company", ContactField::Company),
    ("position", ContactField::Position),
    ("occupation", ContactField::Position),
    ("connectedon", ContactField::ConnectedOn),
    ("url", ContactField::Url),
    ("email", ContactField::Email),
];

impl ContactField {
    /// Match a column name case-insensitively with all whitespace removed.
    pub fn from_header(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        HEADER_KEYS
            .iter()
            .find(|(needle, _)| key.contains(needle))
            .map(|(_, field)| *field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linkedin_headers() {
        assert_eq!(ContactField::from_header("First Name"), Some(ContactField::FirstName));
        assert_eq!(ContactField::from_header("Last Name"), Some(ContactField::LastName));
        assert_eq!(ContactField::from_header("URL"), Some(ContactField::Url));
        assert_eq!(ContactField::from_header("Email Address"), Some(ContactField::Email));
        assert_eq!(ContactField::from_header("Company"), Some(ContactField::Company));
        assert_eq!(ContactField::from_header("Position"), Some(ContactField::Position));
        assert_eq!(ContactField::from_header("Connected On"), Some(ContactField::ConnectedOn));
    }

    #[test]
    fn occupation_and_spacing() {
        assert_eq!(ContactField::from_header("Occupation"), Some(ContactField::Position));
        assert_eq!(ContactField::from_header("  FIRST   name "), Some(ContactField::FirstName));
        assert_eq!(ContactField::from_header("Notes"), None);
    }

    #[test]
    fn one_field_per_column() {
        // Contains both "company" and "url"; company is listed first.
        assert_eq!(ContactField::from_header("Company URL"), Some(ContactField::Company));
    }

    #[test]
    fn display_name_keeps_spaces() {
        let c = Contact {
            first_name: "Ana".into(),
            ..Default::default()
        };
        assert_eq!(c.display_name(), "Ana ");
    }
}
