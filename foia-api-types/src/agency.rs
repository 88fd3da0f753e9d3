use serde::{Deserialize, Serialize};

/// A single entry of the agency directory, as served by `/api/agency/`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Agency {
    pub name: String,
    /// Not every agency has one, the directory sends `null`.
    #[serde(default)]
    pub abbreviation: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub common_requests: Option<Vec<String>>,
}

impl Agency {
    pub fn new(name: impl Into<String>, abbreviation: Option<&str>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.map(str::to_string),
            slug: slug.into(),
            ..Default::default()
        }
    }
}

/// List envelope for the agency endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AgencyList {
    #[serde(default)]
    pub objects: Vec<Agency>,
}
