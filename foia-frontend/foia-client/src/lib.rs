use anyhow::{anyhow, Result};
use foia_app::{AgencySearch, SearchConfig};
use leptos::prelude::*;
use wasm_bindgen::{prelude::wasm_bindgen, JsCast};
use web_sys::HtmlElement;

/// Where the page wants the search box.
const MOUNT_SELECTOR: &str = "[data-agency-search]";

fn mount_point() -> Result<HtmlElement> {
    let element = document()
        .query_selector(MOUNT_SELECTOR)
        .map_err(|e| anyhow!("bad selector {MOUNT_SELECTOR}: {e:?}"))?
        .ok_or_else(|| anyhow!("no element matches {MOUNT_SELECTOR}"))?;
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow!("{MOUNT_SELECTOR} is not an html element"))
}

#[wasm_bindgen(start)]
pub fn mount() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    match mount_point() {
        Ok(host) => {
            let config = SearchConfig::from_element(&host);
            log::info!("mounting agency search with {config:?}");
            leptos::mount::mount_to(host, move || view! { <AgencySearch config /> }).forget();
        }
        Err(e) => log::warn!("agency search not mounted: {e}"),
    }
}
