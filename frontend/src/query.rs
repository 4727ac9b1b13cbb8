//! Cached queries and mutations.
//!
//! Query results are cached by [QueryKey]. Components reading the same key
//! share one request; a mutation invalidates key prefixes, which makes every
//! mounted reader of those keys refetch.

use std::{
    any::Any,
    cell::RefCell,
    collections::HashMap,
    fmt,
    future::Future,
    rc::Rc,
};

use tracing::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    api::ApiClient,
    error::{ApiError, REQUEST_FAILED},
};

/// Identity of a cached request: resource name followed by its parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self(segments.into_iter().map(|s| s.to_string()).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

enum CacheEntry {
    Ready(Rc<dyn Any>),
    Failed(String),
}

/// What the cache holds for a key.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup<T> {
    Hit(T),
    Failed(String),
    Miss,
}

/// Results by key plus the requests currently in flight.
///
/// Each fetch gets a ticket; a result is only stored if its ticket is still
/// the current one, so a response that was invalidated mid-flight is dropped.
#[derive(Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    in_flight: HashMap<QueryKey, u64>,
    next_ticket: u64,
}

impl QueryCache {
    pub fn lookup<T: Clone + 'static>(&self, key: &QueryKey) -> Lookup<T> {
        match self.entries.get(key) {
            Some(CacheEntry::Ready(value)) => match value.downcast_ref::<T>() {
                Some(value) => Lookup::Hit(value.clone()),
                None => Lookup::Miss,
            },
            Some(CacheEntry::Failed(message)) => Lookup::Failed(message.clone()),
            None => Lookup::Miss,
        }
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.in_flight.contains_key(key)
    }

    /// Claims the fetch for `key`. Returns `None` when another fetch for the
    /// same key is already running.
    pub fn begin_fetch(&mut self, key: &QueryKey) -> Option<u64> {
        if self.in_flight.contains_key(key) {
            return None;
        }
        self.next_ticket += 1;
        self.in_flight.insert(key.clone(), self.next_ticket);
        Some(self.next_ticket)
    }

    /// Stores a finished fetch. Returns false if the result was stale.
    pub fn complete<T: 'static>(
        &mut self,
        key: &QueryKey,
        ticket: u64,
        result: Result<T, ApiError>,
    ) -> bool {
        if self.in_flight.get(key) != Some(&ticket) {
            return false;
        }
        self.in_flight.remove(key);

        let entry = match result {
            Ok(value) => CacheEntry::Ready(Rc::new(value)),
            Err(error) => CacheEntry::Failed(error.to_string()),
        };
        self.entries.insert(key.clone(), entry);
        true
    }

    /// Drops every entry and in-flight fetch under `prefix`. Returns how many
    /// keys were affected.
    pub fn invalidate(&mut self, prefix: &QueryKey) -> usize {
        let before = self.entries.len() + self.in_flight.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        self.in_flight.retain(|key, _| !key.starts_with(prefix));
        before - self.entries.len() - self.in_flight.len()
    }

    fn invalidate_all(&mut self, prefixes: &[QueryKey]) {
        for prefix in prefixes {
            let dropped = self.invalidate(prefix);
            debug!(%prefix, dropped, "invalidated queries");
        }
    }
}

/// Which key a reader has already fetched since it mounted.
///
/// A cached failure is refetched once per mount; later cache changes show
/// the stored failure instead of retrying in a loop.
#[derive(Debug, Default)]
pub struct RetryGuard(Option<QueryKey>);

impl RetryGuard {
    /// Returns true the first time `key` is claimed.
    pub fn claim(&mut self, key: &QueryKey) -> bool {
        if self.0.as_ref() == Some(key) {
            return false;
        }
        self.0 = Some(key.clone());
        true
    }

    pub fn release(&mut self, key: &QueryKey) {
        if self.0.as_ref() == Some(key) {
            self.0 = None;
        }
    }
}

/// Shared handle to the cache, provided as a context by the app root.
///
/// `epoch` changes whenever the cache does, which is what makes readers
/// re-run their lookups.
#[derive(Clone)]
pub struct QueryClient {
    api: Rc<ApiClient>,
    cache: Rc<RefCell<QueryCache>>,
    epoch: u64,
    notify: Callback<()>,
}

impl PartialEq for QueryClient {
    fn eq(&self, other: &Self) -> bool {
        self.epoch == other.epoch
            && Rc::ptr_eq(&self.cache, &other.cache)
            && self.api == other.api
    }
}

impl QueryClient {
    pub fn new(
        api: Rc<ApiClient>,
        cache: Rc<RefCell<QueryCache>>,
        epoch: u64,
        notify: Callback<()>,
    ) -> Self {
        Self {
            api,
            cache,
            epoch,
            notify,
        }
    }

    pub fn api(&self) -> Rc<ApiClient> {
        self.api.clone()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn invalidate(&self, prefixes: &[QueryKey]) {
        self.cache.borrow_mut().invalidate_all(prefixes);
        self.notify.emit(());
    }
}

/// Counter behind [QueryClient::epoch].
#[derive(Default, PartialEq)]
pub struct Epoch(pub u64);

impl Reducible for Epoch {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        Epoch(self.0.wrapping_add(1)).into()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<T> {
    /// The query is disabled.
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Reads `key` from the cache, fetching it with `fetch` on a miss.
///
/// A disabled query stays [QueryState::Idle] and never fetches.
#[hook]
pub fn use_query<T, F, Fut>(key: QueryKey, enabled: bool, fetch: F) -> QueryState<T>
where
    T: Clone + PartialEq + 'static,
    F: FnOnce(Rc<ApiClient>) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_context::<QueryClient>();
    let state = use_state(|| None::<(QueryKey, QueryState<T>)>);
    let guard = use_mut_ref(RetryGuard::default);

    {
        let state = state.clone();
        let epoch = client.as_ref().map(QueryClient::epoch).unwrap_or_default();
        use_effect_with_deps(
            move |(key, _epoch, enabled)| {
                match (client, *enabled) {
                    (_, false) => state.set(Some((key.clone(), QueryState::Idle))),
                    (None, true) => {
                        warn!(%key, "query used outside a QueryClient provider");
                        state.set(Some((
                            key.clone(),
                            QueryState::Failed("query client unavailable".to_string()),
                        )));
                    }
                    (Some(client), true) => sync_query(client, key.clone(), state, &guard, fetch),
                }
                || ()
            },
            (key.clone(), epoch, enabled),
        );
    }

    match &*state {
        Some((state_key, value)) if *state_key == key => value.clone(),
        _ if enabled => QueryState::Loading,
        _ => QueryState::Idle,
    }
}

fn sync_query<T, F, Fut>(
    client: QueryClient,
    key: QueryKey,
    state: UseStateHandle<Option<(QueryKey, QueryState<T>)>>,
    guard: &RefCell<RetryGuard>,
    fetch: F,
) where
    T: Clone + PartialEq + 'static,
    F: FnOnce(Rc<ApiClient>) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let lookup = client.cache.borrow().lookup::<T>(&key);
    match lookup {
        Lookup::Hit(value) => {
            guard.borrow_mut().release(&key);
            state.set(Some((key, QueryState::Ready(value))));
        }
        Lookup::Failed(message) if !guard.borrow_mut().claim(&key) => {
            state.set(Some((key, QueryState::Failed(message))));
        }
        Lookup::Failed(_) | Lookup::Miss => {
            guard.borrow_mut().claim(&key);
            state.set(Some((key.clone(), QueryState::Loading)));

            let ticket = client.cache.borrow_mut().begin_fetch(&key);
            let Some(ticket) = ticket else {
                return;
            };

            debug!(%key, "fetching query");
            spawn_local(async move {
                let result = fetch(client.api()).await;
                if let Err(error) = &result {
                    warn!(%key, %error, unauthorized = error.is_unauthorized(), "query failed");
                }

                let stored = client.cache.borrow_mut().complete(&key, ticket, result);
                if stored {
                    client.notify.emit(());
                } else {
                    debug!(%key, "dropped stale query result");
                }
            });
        }
    }
}

/// Pending and error state of one mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutationStatus {
    pending: bool,
    error: Option<String>,
}

impl MutationStatus {
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Marks a write as started. Returns false, changing nothing, when one
    /// is already pending.
    pub fn start(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.error = None;
        true
    }

    /// Records how the write ended. A success drops every cached key under
    /// `invalidates`; a failure keeps the generic request-failed message.
    pub fn settle(
        &mut self,
        cache: &mut QueryCache,
        invalidates: &[QueryKey],
        result: Result<(), ApiError>,
    ) -> bool {
        self.pending = false;
        match result {
            Ok(()) => {
                self.error = None;
                cache.invalidate_all(invalidates);
                true
            }
            Err(_) => {
                self.fail();
                false
            }
        }
    }

    pub fn fail(&mut self) {
        self.pending = false;
        self.error = Some(REQUEST_FAILED.to_string());
    }
}

/// Handle returned by [use_mutation].
pub struct UseMutationHandle<I> {
    status: Rc<RefCell<MutationStatus>>,
    snapshot: UseStateHandle<MutationStatus>,
    trigger: Rc<dyn Fn(I, Callback<()>)>,
}

impl<I> Clone for UseMutationHandle<I> {
    fn clone(&self) -> Self {
        Self {
            status: self.status.clone(),
            snapshot: self.snapshot.clone(),
            trigger: self.trigger.clone(),
        }
    }
}

impl<I> PartialEq for UseMutationHandle<I> {
    fn eq(&self, other: &Self) -> bool {
        *self.snapshot == *other.snapshot && Rc::ptr_eq(&self.trigger, &other.trigger)
    }
}

impl<I> UseMutationHandle<I> {
    pub fn pending(&self) -> bool {
        self.snapshot.is_pending()
    }

    pub fn error(&self) -> Option<String> {
        self.snapshot.error().map(str::to_string)
    }

    pub fn clear_error(&self) {
        self.status.borrow_mut().clear_error();
        self.snapshot.set(self.status.borrow().clone());
    }

    /// Sends the write. Ignored while a previous call is still pending.
    pub fn run(&self, input: I, on_success: Callback<()>) {
        (self.trigger)(input, on_success);
    }
}

/// Wraps a write request with pending/error state and cache invalidation.
///
/// On success every key under `invalidates` is dropped and `on_success`
/// fires; on failure a generic message is kept for an inline banner.
#[hook]
pub fn use_mutation<I, F, Fut>(action: F, invalidates: Vec<QueryKey>) -> UseMutationHandle<I>
where
    I: 'static,
    F: Fn(Rc<ApiClient>, I) -> Fut + 'static,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
{
    let client = use_context::<QueryClient>();
    let status = use_mut_ref(MutationStatus::default);
    let snapshot = use_state(MutationStatus::default);

    let trigger: Rc<dyn Fn(I, Callback<()>)> = {
        let status = status.clone();
        let snapshot = snapshot.clone();
        Rc::new(move |input: I, on_success: Callback<()>| {
            let Some(client) = client.clone() else {
                warn!("mutation used outside a QueryClient provider");
                status.borrow_mut().fail();
                snapshot.set(status.borrow().clone());
                return;
            };
            if !status.borrow_mut().start() {
                debug!("mutation already pending, ignoring");
                return;
            }
            snapshot.set(status.borrow().clone());

            let future = action(client.api(), input);
            let status = status.clone();
            let snapshot = snapshot.clone();
            let invalidates = invalidates.clone();
            spawn_local(async move {
                let result = future.await;
                if let Err(error) = &result {
                    warn!(%error, "mutation failed");
                }

                let succeeded =
                    status
                        .borrow_mut()
                        .settle(&mut client.cache.borrow_mut(), &invalidates, result);
                snapshot.set(status.borrow().clone());
                if succeeded {
                    client.notify.emit(());
                    on_success.emit(());
                }
            });
        })
    };

    UseMutationHandle {
        status,
        snapshot,
        trigger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(segments: &[&str]) -> QueryKey {
        QueryKey::new(segments.iter().copied())
    }

    #[test]
    fn prefix_matching_is_by_whole_segment() {
        let by_date = key(&["transactions", "by-date", "2024-01-31", "0", "10"]);

        assert!(by_date.starts_with(&key(&["transactions"])));
        assert!(by_date.starts_with(&key(&["transactions", "by-date"])));
        assert!(!by_date.starts_with(&key(&["trans"])));
        assert!(!key(&["transactions"]).starts_with(&by_date));
    }

    #[test]
    fn display_joins_segments() {
        assert_eq!(key(&["transactions", "summary", "2"]).to_string(), "transactions/summary/2");
    }

    #[test]
    fn completed_fetch_is_a_hit() {
        let mut cache = QueryCache::default();
        let recent = key(&["transactions", "recent"]);

        let ticket = cache.begin_fetch(&recent).unwrap();
        assert!(cache.is_fetching(&recent));
        assert!(cache.complete(&recent, ticket, Ok(vec![1, 2, 3])));

        assert!(!cache.is_fetching(&recent));
        assert_eq!(cache.lookup::<Vec<i32>>(&recent), Lookup::Hit(vec![1, 2, 3]));
    }

    #[test]
    fn concurrent_fetches_for_same_key_are_deduplicated() {
        let mut cache = QueryCache::default();
        let recent = key(&["transactions", "recent"]);

        assert!(cache.begin_fetch(&recent).is_some());
        assert!(cache.begin_fetch(&recent).is_none());
        assert!(cache.begin_fetch(&key(&["accounts"])).is_some());
    }

    #[test]
    fn failures_are_cached_as_messages() {
        let mut cache = QueryCache::default();
        let summary = key(&["transactions", "summary", "1"]);

        let ticket = cache.begin_fetch(&summary).unwrap();
        cache.complete::<i32>(&summary, ticket, Err(ApiError::Status(500)));

        assert_eq!(
            cache.lookup::<i32>(&summary),
            Lookup::Failed("server responded with status 500".to_string())
        );
    }

    #[test]
    fn invalidate_drops_matching_entries_only() {
        let mut cache = QueryCache::default();
        let recent = key(&["transactions", "recent"]);
        let accounts = key(&["accounts"]);
        for k in [&recent, &accounts] {
            let ticket = cache.begin_fetch(k).unwrap();
            cache.complete(k, ticket, Ok(1u8));
        }

        assert_eq!(cache.invalidate(&key(&["transactions"])), 1);

        assert_eq!(cache.lookup::<u8>(&recent), Lookup::Miss);
        assert_eq!(cache.lookup::<u8>(&accounts), Lookup::Hit(1));
    }

    #[test]
    fn result_invalidated_mid_flight_is_dropped() {
        let mut cache = QueryCache::default();
        let recent = key(&["transactions", "recent"]);

        let stale = cache.begin_fetch(&recent).unwrap();
        cache.invalidate(&key(&["transactions"]));
        let fresh = cache.begin_fetch(&recent).unwrap();

        assert!(!cache.complete(&recent, stale, Ok("old")));
        assert_eq!(cache.lookup::<&str>(&recent), Lookup::Miss);
        assert!(cache.complete(&recent, fresh, Ok("new")));
        assert_eq!(cache.lookup::<&str>(&recent), Lookup::Hit("new"));
    }

    #[test]
    fn type_mismatch_is_a_miss() {
        let mut cache = QueryCache::default();
        let recent = key(&["transactions", "recent"]);
        let ticket = cache.begin_fetch(&recent).unwrap();
        cache.complete(&recent, ticket, Ok(7u32));

        assert_eq!(cache.lookup::<String>(&recent), Lookup::Miss);
    }

    #[test]
    fn failed_key_can_fetch_again() {
        let mut cache = QueryCache::default();
        let recent = key(&["transactions", "recent"]);
        let ticket = cache.begin_fetch(&recent).unwrap();
        cache.complete::<u8>(&recent, ticket, Err(ApiError::Status(503)));

        let retry = cache.begin_fetch(&recent).unwrap();
        assert!(cache.complete(&recent, retry, Ok(4u8)));

        assert_eq!(cache.lookup::<u8>(&recent), Lookup::Hit(4));
    }

    #[test]
    fn retry_guard_allows_one_refetch_per_key() {
        let mut guard = RetryGuard::default();
        let recent = key(&["transactions", "recent"]);
        let accounts = key(&["accounts"]);

        assert!(guard.claim(&recent));
        assert!(!guard.claim(&recent));
        assert!(guard.claim(&accounts));
        assert!(guard.claim(&recent));

        guard.release(&recent);
        assert!(guard.claim(&recent));
    }

    #[test]
    fn mutation_ignores_a_second_start_while_pending() {
        let mut status = MutationStatus::default();

        assert!(status.start());
        assert!(!status.start());
        assert!(status.is_pending());
    }

    #[test]
    fn mutation_success_invalidates_and_clears_error() {
        let mut cache = QueryCache::default();
        let recent = key(&["transactions", "recent"]);
        let accounts = key(&["accounts"]);
        for k in [&recent, &accounts] {
            let ticket = cache.begin_fetch(k).unwrap();
            cache.complete(k, ticket, Ok(1u8));
        }
        let mut status = MutationStatus::default();
        status.start();
        status.settle(&mut cache, &[], Err(ApiError::Status(500)));

        status.start();
        let succeeded = status.settle(&mut cache, &[key(&["transactions"])], Ok(()));

        assert!(succeeded);
        assert!(!status.is_pending());
        assert_eq!(status.error(), None);
        assert_eq!(cache.lookup::<u8>(&recent), Lookup::Miss);
        assert_eq!(cache.lookup::<u8>(&accounts), Lookup::Hit(1));
    }

    #[test]
    fn mutation_failure_keeps_message_and_cache() {
        let mut cache = QueryCache::default();
        let recent = key(&["transactions", "recent"]);
        let ticket = cache.begin_fetch(&recent).unwrap();
        cache.complete(&recent, ticket, Ok(1u8));
        let mut status = MutationStatus::default();
        status.start();

        let succeeded = status.settle(&mut cache, &[key(&["transactions"])], Err(ApiError::Status(500)));

        assert!(!succeeded);
        assert!(!status.is_pending());
        assert_eq!(status.error(), Some(REQUEST_FAILED));
        assert_eq!(cache.lookup::<u8>(&recent), Lookup::Hit(1));
        assert!(status.start());
    }
}
