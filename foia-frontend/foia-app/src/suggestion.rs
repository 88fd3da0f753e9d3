use std::sync::Arc;

use foia_api_types::Agency;

use crate::agency_index::AgencyIndex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Suggestion {
    Agency(Agency),
    /// Search the whole site for the typed text.
    Footer { query: String },
}

impl Suggestion {
    pub fn is_footer(&self) -> bool {
        matches!(self, Suggestion::Footer { .. })
    }
}

/// One dataset of the dropdown.
#[derive(Clone, Debug)]
pub enum SuggestionSource {
    Agencies(Arc<AgencyIndex>),
    Footer,
}

impl SuggestionSource {
    /// Used for the dataset's css class, `tt-dataset-<name>`.
    pub fn name(&self) -> &'static str {
        match self {
            SuggestionSource::Agencies(_) => "agencies",
            SuggestionSource::Footer => "footer",
        }
    }

    pub fn suggestions<'a>(&'a self, query: &'a str) -> Box<dyn Iterator<Item = Suggestion> + 'a> {
        match self {
            SuggestionSource::Agencies(index) => Box::new(
                index
                    .search(query)
                    .into_iter()
                    .cloned()
                    .map(Suggestion::Agency),
            ),
            SuggestionSource::Footer => Box::new(
                (!query.is_empty())
                    .then(|| Suggestion::Footer {
                        query: query.to_string(),
                    })
                    .into_iter(),
            ),
        }
    }
}
