use crate::suggestion::{Suggestion, SuggestionSource};

/// Rendered suggestions of one dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub name: &'static str,
    pub suggestions: Vec<Suggestion>,
}

/// The open suggestion list and its keyboard cursor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dropdown {
    datasets: Vec<Dataset>,
    cursor: Option<usize>,
}

impl Dropdown {
    /// Queries every source in order. Nothing is shown below `min_length`
    /// characters.
    pub fn render(sources: &[SuggestionSource], query: &str, min_length: usize) -> Self {
        if query.chars().count() < min_length.max(1) {
            return Self::default();
        }
        let datasets = sources
            .iter()
            .map(|source| Dataset {
                name: source.name(),
                suggestions: source.suggestions(query).collect(),
            })
            .collect();
        Self {
            datasets,
            cursor: None,
        }
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn len(&self) -> usize {
        self.datasets.iter().map(|d| d.suggestions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Index into the flattened list of a dataset's first row.
    pub fn offset_of(&self, dataset: usize) -> usize {
        self.datasets[..dataset]
            .iter()
            .map(|d| d.suggestions.len())
            .sum()
    }

    fn row(&self, mut index: usize) -> Option<&Suggestion> {
        for dataset in &self.datasets {
            if index < dataset.suggestions.len() {
                return dataset.suggestions.get(index);
            }
            index -= dataset.suggestions.len();
        }
        None
    }

    pub fn cursor_suggestion(&self) -> Option<&Suggestion> {
        self.row(self.cursor?)
    }

    /// Down from the last row goes back to the input.
    pub fn move_down(&mut self) {
        let len = self.len();
        self.cursor = match self.cursor {
            _ if len == 0 => None,
            None => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            Some(_) => None,
        };
    }

    /// Up from the input wraps to the last row.
    pub fn move_up(&mut self) {
        let len = self.len();
        self.cursor = match self.cursor {
            _ if len == 0 => None,
            None => Some(len - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor.filter(|i| *i < self.len());
    }

    /// Whether the cursor sits on the first row of the agencies dataset.
    pub fn first_agency_active(&self) -> bool {
        let Some(position) = self.datasets.iter().position(|d| d.name == "agencies") else {
            return false;
        };
        !self.datasets[position].suggestions.is_empty()
            && self.cursor == Some(self.offset_of(position))
    }
}
