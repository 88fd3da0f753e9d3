use log::debug;

pub const CATEGORY: &str = "contacts";

/// Called once the analytics backend has recorded a hit.
pub type HitCallback = Box<dyn FnOnce()>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub category: &'static str,
    pub action: String,
    pub label: String,
}

impl AnalyticsEvent {
    /// The user typed something and then blanked the field.
    pub fn did_not_want(abandoned: impl Into<String>) -> Self {
        Self {
            category: CATEGORY,
            action: "did-not-want".to_string(),
            label: abandoned.into(),
        }
    }

    pub fn select_agency(slug: &str, typed: impl Into<String>) -> Self {
        Self {
            category: CATEGORY,
            action: format!("select-{slug}"),
            label: typed.into(),
        }
    }
}

/// Fire-and-forget event sink.
pub trait Analytics {
    /// Sends the event. The callback may run later, right away, or never.
    fn send_event(&self, event: AnalyticsEvent, hit_callback: Option<HitCallback>);
}

/// Logs events instead of sending them. Used where there is no browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAnalytics;

impl Analytics for LogAnalytics {
    fn send_event(&self, event: AnalyticsEvent, hit_callback: Option<HitCallback>) {
        debug!("analytics event {event:?}");
        if let Some(callback) = hit_callback {
            callback();
        }
    }
}

#[cfg(feature = "csr")]
mod google {
    use js_sys::{Object, Reflect};
    use log::{debug, warn};
    use wasm_bindgen::{closure::Closure, prelude::*};

    use super::{Analytics, AnalyticsEvent, HitCallback};

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_name = ga)]
        fn ga_send(
            command: &str,
            hit_type: &str,
            category: &str,
            action: &str,
            label: &str,
            fields: &JsValue,
        ) -> Result<(), JsValue>;
    }

    /// Sends events through the page's global `ga` function.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct GoogleAnalytics;

    impl Analytics for GoogleAnalytics {
        fn send_event(&self, event: AnalyticsEvent, hit_callback: Option<HitCallback>) {
            let fields = match hit_callback {
                Some(callback) => {
                    let fields = Object::new();
                    let callback = Closure::once_into_js(move || callback());
                    if let Err(e) = Reflect::set(&fields, &JsValue::from_str("hitCallback"), &callback) {
                        warn!("Unable to attach hit callback {e:?}");
                    }
                    fields.into()
                }
                None => JsValue::UNDEFINED,
            };
            debug!("ga event {event:?}");
            // a missing `ga` throws, the callback then never runs
            if let Err(e) = ga_send(
                "send",
                "event",
                event.category,
                &event.action,
                &event.label,
                &fields,
            ) {
                warn!("Analytics unavailable {e:?}");
            }
        }
    }
}

#[cfg(feature = "csr")]
pub use google::GoogleAnalytics;
