use std::sync::Arc;

use codee::string::JsonSerdeCodec;
use foia_api_types::Agency;
use leptos::{prelude::*, task::spawn_local};
use leptos_use::storage::use_local_storage;
use log::{info, warn};

use crate::{agency_index::AgencyIndex, api::get_agencies, config::SearchConfig};

/// The agency directory, fetched once when the search box mounts.
#[derive(Clone, Copy)]
pub(crate) struct AgencyData {
    pub index: RwSignal<Arc<AgencyIndex>>,
}

impl AgencyData {
    /// Drops whatever a previous page load cached, then fetches the
    /// directory. Until the fetch lands the index is empty.
    pub fn prefetch(config: &SearchConfig) -> Self {
        let index = RwSignal::new(Arc::new(AgencyIndex::default()));
        let (_, set_cached, clear_cached) =
            use_local_storage::<Vec<Agency>, JsonSerdeCodec>(config.cache_key.clone());
        clear_cached();

        let url = config.agency_url();
        let limit = config.suggestion_limit;
        spawn_local(async move {
            match get_agencies(&url).await {
                Ok(list) => {
                    set_cached.set(list.objects.clone());
                    let agencies = AgencyIndex::new(list.objects, limit);
                    if agencies.is_empty() {
                        warn!("Agency directory at {url} is empty");
                    } else {
                        info!("prefetched {} agencies", agencies.len());
                    }
                    index.set(Arc::new(agencies));
                }
                Err(e) => warn!("Agency prefetch from {url} failed: {e}"),
            }
        });
        Self { index }
    }
}
