use leptos::prelude::*;

use crate::{agency_index::highlight_segments, suggestion::Suggestion};

/// Agency name with the typed words in bold.
#[component]
fn Highlighted(text: String, query: String) -> impl IntoView {
    highlight_segments(&text, &query)
        .into_iter()
        .map(|segment| {
            if segment.matched {
                view! { <strong class="tt-highlight">{segment.text}</strong> }.into_any()
            } else {
                segment.text.into_any()
            }
        })
        .collect_view()
}

#[component]
pub fn SuggestionRow(suggestion: Suggestion, query: String) -> impl IntoView {
    match suggestion {
        Suggestion::Agency(agency) => view! {
            <p class="agency-name">
                <Highlighted text=agency.name query />
            </p>
        }
        .into_any(),
        Suggestion::Footer { query } => view! {
            <p class="search-prompt">
                <strong class="return">"⏎"</strong>
                " Search for \"" {query} "\" in keywords and descriptions"
            </p>
        }
        .into_any(),
    }
}
