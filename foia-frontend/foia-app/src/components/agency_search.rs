use std::rc::Rc;

use cfg_if::cfg_if;
use gloo_timers::future::TimeoutFuture;
use icondata as i;
use leptos::{
    ev::{Event, KeyboardEvent},
    html::{Form, Input},
    prelude::*,
    task::spawn_local,
};
use leptos_icons::*;
use log::info;
use send_wrapper::SendWrapper;

use crate::{
    components::suggestion_row::*,
    config::SearchConfig,
    controller::{Page, SearchController},
    dropdown::Dropdown,
    global_state::AgencyData,
    suggestion::{Suggestion, SuggestionSource},
};

cfg_if! {
    if #[cfg(feature = "csr")] {
        use crate::{analytics::GoogleAnalytics, navigation::BrowserTimers};
        type PageAnalytics = GoogleAnalytics;
        type PageTimers = BrowserTimers;
    } else {
        use crate::{analytics::LogAnalytics, navigation::NoTimers};
        type PageAnalytics = LogAnalytics;
        type PageTimers = NoTimers;
    }
}

/// How long the dropdown stays open after the input loses focus, so a click
/// on a row still lands.
const BLUR_DELAY_MS: u32 = 250;

#[derive(Clone, Copy)]
struct LeptosPage {
    text: RwSignal<String>,
    filled: RwSignal<bool>,
    cursor_first: RwSignal<bool>,
    input_ref: NodeRef<Input>,
    form_ref: NodeRef<Form>,
}

impl Page for LeptosPage {
    fn input_value(&self) -> String {
        self.text.get_untracked()
    }

    fn reset_input(&self) {
        self.text.set(String::new());
        if let Some(input) = self.input_ref.get_untracked() {
            input.set_value("");
            let _ = input.focus();
        }
    }

    fn set_filled(&self, filled: bool) {
        self.filled.set(filled);
    }

    fn set_cursor_first(&self, active: bool) {
        self.cursor_first.set(active);
    }

    fn submit_form(&self) {
        if let Some(form) = self.form_ref.get_untracked() {
            if let Err(e) = form.request_submit() {
                log::error!("Unable to submit search {e:?}");
            }
        }
    }

    fn redirect(&self, url: &str) {
        cfg_if! {
            if #[cfg(feature = "csr")] {
                if let Err(e) = window().location().set_href(url) {
                    log::error!("Unable to navigate to {url} {e:?}");
                }
            } else {
                info!("would navigate to {url}");
            }
        }
    }
}

#[component]
pub fn AgencySearch(#[prop(optional)] config: SearchConfig) -> impl IntoView {
    let input_ref = NodeRef::<Input>::new();
    let form_ref = NodeRef::<Form>::new();
    let text = RwSignal::new(String::new());
    let filled = RwSignal::new(false);
    let cursor_first = RwSignal::new(false);
    let open = RwSignal::new(false);
    let dropdown = RwSignal::new(Dropdown::default());
    let agencies = AgencyData::prefetch(&config);

    let page = LeptosPage {
        text,
        filled,
        cursor_first,
        input_ref,
        form_ref,
    };
    let controller = SendWrapper::new(Rc::new(SearchController::new(
        page,
        PageAnalytics::default(),
        PageTimers::default(),
        config.clone(),
    )));
    info!("agency search mounted, directory at {}", config.agency_url());

    let min_length = config.min_length;
    Effect::new({
        let controller = controller.clone();
        move |_| {
            let query = text.get();
            let sources = [
                SuggestionSource::Agencies(agencies.index.get()),
                SuggestionSource::Footer,
            ];
            let rendered = Dropdown::render(&sources, &query, min_length);
            controller.on_rendered(rendered.len());
            controller.on_cursor_changed(false);
            dropdown.set(rendered);
        }
    });

    let on_input = {
        let controller = controller.clone();
        move |ev: Event| {
            text.set(event_target_value(&ev));
            open.set(true);
            controller.on_change();
        }
    };

    let move_cursor = {
        let controller = controller.clone();
        move |change: &dyn Fn(&mut Dropdown)| {
            dropdown.update(|d| change(d));
            controller.on_cursor_changed(dropdown.with_untracked(Dropdown::first_agency_active));
        }
    };

    let select = {
        let controller = controller.clone();
        move |suggestion: Suggestion| {
            open.set(false);
            controller.on_selected(&suggestion);
        }
    };

    let keydown = {
        let move_cursor = move_cursor.clone();
        let select = select.clone();
        move |e: KeyboardEvent| match e.key().as_str() {
            "ArrowDown" => {
                e.prevent_default();
                open.set(true);
                move_cursor(&Dropdown::move_down);
            }
            "ArrowUp" => {
                e.prevent_default();
                open.set(true);
                move_cursor(&Dropdown::move_up);
            }
            "Enter" => {
                // without a cursor row the browser submits the form
                if let Some(suggestion) =
                    dropdown.with_untracked(|d| d.cursor_suggestion().cloned())
                {
                    e.prevent_default();
                    select(suggestion);
                }
            }
            "Escape" => {
                open.set(false);
                move_cursor(&|d: &mut Dropdown| d.set_cursor(None));
            }
            _ => {}
        }
    };

    let focus_in = move |_| open.set(true);
    let focus_out = move |_| {
        spawn_local(async move {
            TimeoutFuture::new(BLUR_DELAY_MS).await;
            open.set(false);
        })
    };

    let clear = {
        let controller = controller.clone();
        move |_| controller.on_clear()
    };

    // rows only rebuild when the results change, not when the cursor moves
    let datasets = Memo::new(move |_| dropdown.with(|d| d.datasets().to_vec()));
    let menu = move || {
        let query = text.get();
        let mut offset = 0;
        datasets
            .get()
            .into_iter()
            .map(|dataset| {
                let first_row = offset;
                offset += dataset.suggestions.len();
                let rows = dataset
                    .suggestions
                    .into_iter()
                    .enumerate()
                    .map(|(i, suggestion)| {
                        let row = first_row + i;
                        let move_cursor = move_cursor.clone();
                        let select = select.clone();
                        let picked = suggestion.clone();
                        view! {
                            <div
                                class="tt-suggestion"
                                class:tt-cursor=move || dropdown.with(|d| d.cursor() == Some(row))
                                on:mouseenter=move |_| move_cursor(&|d: &mut Dropdown| d.set_cursor(Some(row)))
                                on:click=move |_| select(picked.clone())
                            >
                                <SuggestionRow suggestion query=query.clone() />
                            </div>
                        }
                    })
                    .collect_view();
                view! { <div class=format!("tt-dataset-{}", dataset.name)>{rows}</div> }
            })
            .collect_view()
    };

    view! {
        <form
            node_ref=form_ref
            class="agency-search relative"
            class:tt-filled=move || filled.get()
            action=config.search_action.clone()
            method=config.search_method.clone()
            role="search"
        >
            <div class="scrollable-dropdown-menu relative">
                <div class="absolute left-3 top-1/2 -translate-y-1/2">
                    <Icon icon=i::AiSearchOutlined />
                </div>
                <input
                    node_ref=input_ref
                    class="typeahead tt-input input w-full pl-10"
                    type="text"
                    name=config.query_param.clone()
                    autocomplete="off"
                    spellcheck="false"
                    placeholder=config.placeholder.clone()
                    prop:value=text
                    on:input=on_input
                    on:keydown=keydown
                    on:focusin=focus_in
                    on:focusout=focus_out
                />
                <div
                    class="tt-dropdown-menu absolute w-full mt-2 z-50"
                    class:tt-cursor-first=move || cursor_first.get()
                    class:hidden=move || !open.get() || dropdown.with(Dropdown::is_empty)
                >
                    {menu}
                </div>
            </div>
            <button type="button" class="clear" aria-label="Clear search" on:click=clear>
                <Icon icon=i::AiCloseOutlined />
            </button>
        </form>
    }
    .into_any()
}
