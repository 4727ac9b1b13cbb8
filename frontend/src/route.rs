//! Path-based routing on top of the History API.

use tracing::{info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    AddTransaction,
    EditTransaction(String),
    Scheduled,
    /// Query string without the leading `?`.
    DayView { query: String },
    NotFound,
}

impl Route {
    pub fn parse(path: &str, search: &str) -> Self {
        let path = path.trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Dashboard,
            ["transactions", "add"] => Route::AddTransaction,
            ["transactions", "edit", id] => Route::EditTransaction((*id).to_string()),
            ["scheduled"] => Route::Scheduled,
            ["views", "day"] => Route::DayView {
                query: search.trim_start_matches('?').to_string(),
            },
            _ => Route::NotFound,
        }
    }

    pub fn to_url(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::AddTransaction => "/transactions/add".to_string(),
            Route::EditTransaction(id) => format!("/transactions/edit/{}", id),
            Route::Scheduled => "/scheduled".to_string(),
            Route::DayView { query } if query.is_empty() => "/views/day".to_string(),
            Route::DayView { query } => format!("/views/day?{}", query),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Whether a sidebar entry pointing at `self` should be highlighted.
    pub fn is_section_of(&self, current: &Route) -> bool {
        match (self, current) {
            (Route::DayView { .. }, Route::DayView { .. }) => true,
            (Route::AddTransaction, Route::EditTransaction(_)) => true,
            _ => self == current,
        }
    }

    /// Route for the page the browser is currently showing.
    pub fn current() -> Self {
        let Some(window) = web_sys::window() else {
            return Route::Dashboard;
        };
        let location = window.location();
        let path = location.pathname().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        Route::parse(&path, &search)
    }
}

/// Adds a history entry for `route`.
pub fn push(route: &Route) {
    let url = route.to_url();
    info!(%url, "navigating");
    if let Err(error) = history_call(&url, false) {
        warn!(?error, %url, "pushState failed");
    }
}

/// Rewrites the current history entry, used by the day view.
pub fn replace_url(url: &str) {
    if let Err(error) = history_call(url, true) {
        warn!(?error, %url, "replaceState failed");
    }
}

fn history_call(url: &str, replace: bool) -> Result<(), JsValue> {
    let history = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .history()?;
    if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(url))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(url))
    }
}

/// Navigation callback provided by the app root.
#[derive(Clone, PartialEq)]
pub struct Navigator(pub Callback<Route>);

impl Navigator {
    pub fn go(&self, route: Route) {
        self.0.emit(route);
    }
}

#[hook]
pub fn use_navigator() -> Navigator {
    use_context::<Navigator>().unwrap_or_else(|| Navigator(Callback::from(|route: Route| push(&route))))
}

/// Keeps `route` in step with back/forward navigation.
#[hook]
pub fn use_popstate(route: UseStateHandle<Route>) {
    use_effect_with_deps(
        move |_| {
            let listener = Closure::<dyn FnMut()>::new(move || route.set(Route::current()));
            let window = web_sys::window();
            if let Some(window) = &window {
                if let Err(error) = window
                    .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
                {
                    warn!(?error, "could not listen to popstate");
                }
            }

            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback(
                        "popstate",
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        },
        (),
    );
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/", ""), Route::Dashboard);
        assert_eq!(Route::parse("", ""), Route::Dashboard);
        assert_eq!(Route::parse("/transactions/add", ""), Route::AddTransaction);
        assert_eq!(
            Route::parse("/transactions/edit/abc-123", ""),
            Route::EditTransaction("abc-123".to_string())
        );
        assert_eq!(Route::parse("/scheduled/", ""), Route::Scheduled);
    }

    #[test]
    fn day_view_keeps_its_query() {
        assert_eq!(
            Route::parse("/views/day", "?day=1&month=2&year=2024"),
            Route::DayView {
                query: "day=1&month=2&year=2024".to_string()
            }
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/transactions", ""), Route::NotFound);
        assert_eq!(Route::parse("/transactions/edit", ""), Route::NotFound);
        assert_eq!(Route::parse("/transactions/edit/1/extra", ""), Route::NotFound);
        assert_eq!(Route::parse("/settings", ""), Route::NotFound);
    }

    #[test]
    fn urls_parse_back_to_the_same_route() {
        let routes = [
            Route::Dashboard,
            Route::AddTransaction,
            Route::EditTransaction("t9".to_string()),
            Route::Scheduled,
            Route::DayView {
                query: "day=3&month=4&year=2024".to_string(),
            },
        ];

        for route in routes {
            let url = route.to_url();
            let (path, search) = url.split_once('?').unwrap_or((url.as_str(), ""));
            assert_eq!(Route::parse(path, search), route);
        }
    }

    #[test]
    fn edit_highlights_add_entry() {
        let add = Route::AddTransaction;

        assert!(add.is_section_of(&Route::EditTransaction("t1".to_string())));
        assert!(Route::DayView { query: String::new() }.is_section_of(&Route::DayView {
            query: "day=1".to_string()
        }));
        assert!(!Route::Scheduled.is_section_of(&Route::Dashboard));
    }
}
