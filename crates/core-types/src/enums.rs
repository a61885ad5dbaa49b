use serde::{Deserialize, Serialize};
use std::fmt;

/// The selector value that disables the company filter.
pub const ALL_COMPANIES: &str = "All";

/// The company picked in the company selector.
///
/// Serialized as a plain string so `"All"` round-trips through query strings
/// and config files exactly as the selector shows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanySelection {
    #[default]
    All,
    Company(String),
}

impl CompanySelection {
    /// Returns the selected company name, or `None` for `All`.
    pub fn company(&self) -> Option<&str> {
        match self {
            CompanySelection::All => None,
            CompanySelection::Company(name) => Some(name),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CompanySelection::All)
    }

    /// Whether a row belonging to `company_name` passes this selection.
    pub fn matches(&self, company_name: &str) -> bool {
        match self {
            CompanySelection::All => true,
            CompanySelection::Company(name) => name == company_name,
        }
    }
}

impl From<&str> for CompanySelection {
    fn from(value: &str) -> Self {
        if value == ALL_COMPANIES {
            CompanySelection::All
        } else {
            CompanySelection::Company(value.to_string())
        }
    }
}

impl From<String> for CompanySelection {
    fn from(value: String) -> Self {
        if value == ALL_COMPANIES {
            CompanySelection::All
        } else {
            CompanySelection::Company(value)
        }
    }
}

impl From<CompanySelection> for String {
    fn from(value: CompanySelection) -> Self {
        match value {
            CompanySelection::All => ALL_COMPANIES.to_string(),
            CompanySelection::Company(name) => name,
        }
    }
}

impl fmt::Display for CompanySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanySelection::All => f.write_str(ALL_COMPANIES),
            CompanySelection::Company(name) => f.write_str(name),
        }
    }
}
