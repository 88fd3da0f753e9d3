use std::cell::{Cell, RefCell};

use log::{debug, warn};

use crate::{
    analytics::{Analytics, AnalyticsEvent},
    config::SearchConfig,
    navigation::{NavigationRace, Timers, Trigger},
    suggestion::Suggestion,
    tracker::InputTracker,
};

/// The parts of the page the search box drives.
pub trait Page {
    fn input_value(&self) -> String;
    /// Empties the input and gives it focus.
    fn reset_input(&self);
    /// `tt-filled` on the form.
    fn set_filled(&self, filled: bool);
    /// `tt-cursor-first` on the dropdown.
    fn set_cursor_first(&self, active: bool);
    fn submit_form(&self);
    fn redirect(&self, url: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    SuggestionsShown,
    Selected,
}

/// Search box state and event handlers. Built once per mounted widget.
pub struct SearchController<P, A, T> {
    page: P,
    analytics: A,
    timers: T,
    config: SearchConfig,
    tracker: RefCell<InputTracker>,
    state: Cell<SelectionState>,
}

impl<P, A, T> SearchController<P, A, T>
where
    P: Page + Clone + 'static,
    A: Analytics,
    T: Timers,
{
    pub fn new(page: P, analytics: A, timers: T, config: SearchConfig) -> Self {
        Self {
            page,
            analytics,
            timers,
            config,
            tracker: RefCell::new(InputTracker::default()),
            state: Cell::new(SelectionState::Idle),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn state(&self) -> SelectionState {
        self.state.get()
    }

    pub fn current_text(&self) -> String {
        self.tracker.borrow().current_text().to_string()
    }

    /// Runs after every edit of the field.
    pub fn on_change(&self) {
        let value = self.page.input_value();
        let change = self.tracker.borrow_mut().observe(&value);
        if let Some(abandoned) = change.abandoned {
            self.analytics
                .send_event(AnalyticsEvent::did_not_want(abandoned), None);
        }
        self.page.set_filled(change.filled);
    }

    /// The dropdown was rendered with `rows` suggestions.
    pub fn on_rendered(&self, rows: usize) {
        self.state.set(if rows > 0 {
            SelectionState::SuggestionsShown
        } else {
            SelectionState::Idle
        });
    }

    pub fn on_cursor_changed(&self, first_agency_active: bool) {
        self.page.set_cursor_first(first_agency_active);
    }

    /// Each selection navigates once. A blocked submit or a page restored
    /// from history leaves the box usable for the next one.
    pub fn on_selected(&self, suggestion: &Suggestion) {
        self.state.set(SelectionState::Selected);
        match suggestion {
            Suggestion::Footer { query } => {
                debug!("searching the site for {query:?}");
                self.page.submit_form();
            }
            Suggestion::Agency(agency) => {
                let url = self.config.detail_url(&agency.slug);
                let page = self.page.clone();
                let race = NavigationRace::new(move || page.redirect(&url));
                let armed = race.arm(&self.timers, self.config.analytics_timeout);
                if !armed {
                    warn!("No timer for analytics, navigating right away");
                }
                let event = AnalyticsEvent::select_agency(&agency.slug, self.current_text());
                self.analytics
                    .send_event(event, armed.then(|| race.hit_callback()));
                if !armed {
                    race.finish(Trigger::Unarmed);
                }
            }
        }
    }

    /// The clear button was clicked.
    pub fn on_clear(&self) {
        self.page.reset_input();
        self.on_change();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, time::Duration};

    use foia_api_types::Agency;

    use super::*;
    use crate::{
        analytics::HitCallback,
        navigation::{test_timers::ManualTimers, NoTimers},
    };

    #[derive(Clone, Debug, PartialEq)]
    enum PageCall {
        Reset,
        Filled(bool),
        CursorFirst(bool),
        Submit,
        Redirect(String),
    }

    #[derive(Clone, Default)]
    struct FakePage {
        value: Rc<RefCell<String>>,
        calls: Rc<RefCell<Vec<PageCall>>>,
    }

    impl FakePage {
        fn type_text(&self, text: &str) {
            *self.value.borrow_mut() = text.to_string();
        }

        fn calls(&self) -> Vec<PageCall> {
            self.calls.borrow().clone()
        }

        fn redirects(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    PageCall::Redirect(url) => Some(url),
                    _ => None,
                })
                .collect()
        }
    }

    impl Page for FakePage {
        fn input_value(&self) -> String {
            self.value.borrow().clone()
        }

        fn reset_input(&self) {
            self.value.borrow_mut().clear();
            self.calls.borrow_mut().push(PageCall::Reset);
        }

        fn set_filled(&self, filled: bool) {
            self.calls.borrow_mut().push(PageCall::Filled(filled));
        }

        fn set_cursor_first(&self, active: bool) {
            self.calls.borrow_mut().push(PageCall::CursorFirst(active));
        }

        fn submit_form(&self) {
            self.calls.borrow_mut().push(PageCall::Submit);
        }

        fn redirect(&self, url: &str) {
            self.calls.borrow_mut().push(PageCall::Redirect(url.to_string()));
        }
    }

    /// Records events and keeps hit callbacks for the test to run.
    #[derive(Clone, Default)]
    struct FakeAnalytics {
        events: Rc<RefCell<Vec<AnalyticsEvent>>>,
        callbacks: Rc<RefCell<Vec<HitCallback>>>,
    }

    impl FakeAnalytics {
        fn events(&self) -> Vec<AnalyticsEvent> {
            self.events.borrow().clone()
        }

        fn acknowledge(&self) {
            let callbacks: Vec<HitCallback> = self.callbacks.borrow_mut().drain(..).collect();
            for callback in callbacks {
                callback();
            }
        }
    }

    impl Analytics for FakeAnalytics {
        fn send_event(&self, event: AnalyticsEvent, hit_callback: Option<HitCallback>) {
            self.events.borrow_mut().push(event);
            if let Some(callback) = hit_callback {
                self.callbacks.borrow_mut().push(callback);
            }
        }
    }

    type Controller = SearchController<FakePage, FakeAnalytics, ManualTimers>;

    fn controller() -> (Controller, FakePage, FakeAnalytics, ManualTimers) {
        let page = FakePage::default();
        let analytics = FakeAnalytics::default();
        let timers = ManualTimers::default();
        let controller = SearchController::new(
            page.clone(),
            analytics.clone(),
            timers.clone(),
            SearchConfig::default(),
        );
        (controller, page, analytics, timers)
    }

    fn type_keys(controller: &Controller, page: &FakePage, keys: &[&str]) {
        for text in keys {
            page.type_text(text);
            controller.on_change();
        }
    }

    fn doe() -> Suggestion {
        Suggestion::Agency(Agency::new("Department of Example", Some("DOE"), "doe"))
    }

    #[test]
    fn typing_toggles_filled() {
        let (controller, page, analytics, _) = controller();
        type_keys(&controller, &page, &["d", "do"]);
        assert_eq!(controller.current_text(), "do");
        assert_eq!(page.calls(), vec![PageCall::Filled(true), PageCall::Filled(true)]);
        assert!(analytics.events().is_empty());
    }

    #[test]
    fn blanking_reports_abandoned_text_once() {
        let (controller, page, analytics, _) = controller();
        type_keys(&controller, &page, &["e", "en", "ene", "en", ""]);
        assert_eq!(analytics.events(), vec![AnalyticsEvent::did_not_want("ene")]);
        assert_eq!(page.calls().last(), Some(&PageCall::Filled(false)));

        type_keys(&controller, &page, &[""]);
        assert_eq!(analytics.events().len(), 1);
    }

    #[test]
    fn clear_resets_synchronously() {
        let (controller, page, analytics, _) = controller();
        type_keys(&controller, &page, &["ex", "exa"]);
        controller.on_clear();

        assert_eq!(page.input_value(), "");
        assert_eq!(controller.current_text(), "");
        assert_eq!(
            &page.calls()[2..],
            &[PageCall::Reset, PageCall::Filled(false)]
        );
        assert_eq!(analytics.events(), vec![AnalyticsEvent::did_not_want("exa")]);
    }

    #[test]
    fn clear_on_empty_field_reports_nothing() {
        let (controller, page, analytics, _) = controller();
        controller.on_clear();
        assert_eq!(page.calls(), vec![PageCall::Reset, PageCall::Filled(false)]);
        assert!(analytics.events().is_empty());
    }

    #[test]
    fn footer_submits_without_tracking() {
        let (controller, page, analytics, timers) = controller();
        type_keys(&controller, &page, &["budget"]);
        controller.on_selected(&Suggestion::Footer {
            query: "budget".to_string(),
        });
        assert_eq!(page.calls().last(), Some(&PageCall::Submit));
        assert!(page.redirects().is_empty());
        assert!(analytics.events().is_empty());
        assert_eq!(timers.pending(), 0);
        assert_eq!(controller.state(), SelectionState::Selected);
    }

    #[test]
    fn agency_navigates_when_analytics_answers() {
        let (controller, page, analytics, timers) = controller();
        type_keys(&controller, &page, &["d", "do"]);
        controller.on_selected(&doe());

        assert_eq!(analytics.events(), vec![AnalyticsEvent::select_agency("doe", "do")]);
        assert_eq!(timers.delays(), vec![Duration::from_millis(500)]);
        assert!(page.redirects().is_empty());

        analytics.acknowledge();
        assert_eq!(page.redirects(), vec!["/contacts/doe/"]);
        assert_eq!(timers.pending(), 0);

        timers.fire_all();
        assert_eq!(page.redirects().len(), 1);
    }

    #[test]
    fn agency_navigates_when_analytics_stalls() {
        let (controller, page, analytics, timers) = controller();
        type_keys(&controller, &page, &["example"]);
        controller.on_selected(&doe());

        timers.fire_all();
        assert_eq!(page.redirects(), vec!["/contacts/doe/"]);

        // a late answer doesn't navigate twice
        analytics.acknowledge();
        assert_eq!(page.redirects().len(), 1);
    }

    #[test]
    fn selecting_again_after_a_blocked_submit_still_navigates() {
        let (controller, page, analytics, timers) = controller();
        controller.on_rendered(2);
        assert_eq!(controller.state(), SelectionState::SuggestionsShown);
        controller.on_selected(&Suggestion::Footer {
            query: "do".to_string(),
        });
        assert_eq!(controller.state(), SelectionState::Selected);

        // the submit went nowhere, the user picks an agency instead
        controller.on_rendered(3);
        assert_eq!(controller.state(), SelectionState::SuggestionsShown);
        controller.on_selected(&doe());
        timers.fire_all();

        assert_eq!(page.calls().iter().filter(|c| **c == PageCall::Submit).count(), 1);
        assert_eq!(page.redirects(), vec!["/contacts/doe/"]);
        assert_eq!(analytics.events().len(), 1);
    }

    #[test]
    fn each_agency_selection_navigates_once() {
        let (controller, page, analytics, timers) = controller();
        controller.on_selected(&doe());
        analytics.acknowledge();
        controller.on_selected(&Suggestion::Agency(Agency::new("Energy", None, "energy")));
        timers.fire_all();
        analytics.acknowledge();

        assert_eq!(page.redirects(), vec!["/contacts/doe/", "/contacts/energy/"]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn without_timers_navigation_is_immediate() {
        let page = FakePage::default();
        let analytics = FakeAnalytics::default();
        let controller = SearchController::new(
            page.clone(),
            analytics.clone(),
            NoTimers,
            SearchConfig::default(),
        );
        controller.on_selected(&doe());
        assert_eq!(page.redirects(), vec!["/contacts/doe/"]);
        assert_eq!(analytics.events().len(), 1);
        analytics.acknowledge();
        assert_eq!(page.redirects().len(), 1);
    }

    #[test]
    fn cursor_sync() {
        let (controller, page, _, _) = controller();
        controller.on_cursor_changed(true);
        controller.on_cursor_changed(false);
        assert_eq!(
            page.calls(),
            vec![PageCall::CursorFirst(true), PageCall::CursorFirst(false)]
        );
    }
}
