use serde::{Deserialize, Serialize};

// -- Field names --

pub const FULLNAME: &str = "fullname";
pub const ITEMNAME: &str = "itemname";
pub const LOCATION: &str = "location";
pub const DATELOST: &str = "datelost";
pub const DESCRIPTION: &str = "description";
pub const CONTACT: &str = "contact";
pub const REG_NUMBER: &str = "regNumber";
pub const PASSWORD: &str = "password";

// -- Request body --

/// Submitted form fields, kept in the order the client sent them.
///
/// Handlers never deserialize straight into a struct: every field goes
/// through validation first, including ones the endpoint does not use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// -- Errors --

/// Body of every non-redirect failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
