//! Debounced, cached, de-duplicated search dispatch.
//!
//! The [`Dispatcher`] turns editor state into at most one network request per
//! logical commit. It never performs I/O: every decision comes back as a
//! [`Dispatch`] value and the caller turns it into host actions (arm a timer,
//! send a web request, adopt cached results).
//!
//! Host timers cannot be revoked once armed, so the [`Debouncer`] cancels by
//! ticket invalidation: each armed timer gets a ticket, timers fire in arming
//! order, and only the timer whose ticket is still pending releases the
//! request.

use super::cache::SearchCache;
use super::request::{CacheKey, SearchRequest, SortSpec};
use crate::domain::{Journal, Result};
use crate::filter::FilterCriteria;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::Duration;

/// Default quiet period before a typed search is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Monotonic identifier of an issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parses an id carried as text through the host request context.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok().map(Self)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of the most recent dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPhase {
    #[default]
    Idle,
    Pending,
    Fetching,
    Loaded,
    Failed,
}

/// Outcome of a dispatch decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Nothing to search for.
    Skipped,
    /// The result set is already cached; adopt it now under `id`.
    CacheHit { id: RequestId, results: Vec<Journal> },
    /// Waiting out the debounce window; arm a host timer for `delay`.
    Scheduled { delay: Duration },
    /// Send `request` over the network, tagged with `id` and `key`.
    Fetch { id: RequestId, key: CacheKey, request: SearchRequest },
    /// The same key is already being fetched under `id`; wait for it.
    Joined { id: RequestId },
}

/// Trailing-edge debounce over a request slot.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    next_ticket: u64,
    armed: VecDeque<u64>,
    pending: Option<(u64, SearchRequest, CacheKey)>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_ticket: 0,
            armed: VecDeque::new(),
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces whatever is pending and records a newly armed timer.
    /// The caller must arm one host timer of [`delay`](Self::delay) per call.
    pub fn schedule(&mut self, request: SearchRequest, key: CacheKey) -> Duration {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.armed.push_back(ticket);
        if self.pending.replace((ticket, request, key)).is_some() {
            tracing::debug!(ticket, "superseding pending search");
        }
        self.delay
    }

    /// Drops the pending request. Timers already armed will fire as no-ops.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Consumes one fired host timer.
    ///
    /// Returns the pending request only when the fired timer is the one armed
    /// for it.
    pub fn on_timer(&mut self) -> Option<(SearchRequest, CacheKey)> {
        let fired = self.armed.pop_front()?;
        let current = matches!(&self.pending, Some((ticket, _, _)) if *ticket == fired);
        if !current {
            tracing::debug!(ticket = fired, "ignoring superseded timer");
            return None;
        }
        self.pending.take().map(|(_, request, key)| (request, key))
    }
}

/// Owns the cache, the debouncer, and in-flight bookkeeping.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    cache: SearchCache,
    debouncer: Debouncer,
    in_flight: HashMap<CacheKey, RequestId>,
    last_issued: u64,
    /// Id most recently handed to the caller, whether fresh or joined.
    current: Option<RequestId>,
    phase: DispatchPhase,
}

impl Dispatcher {
    #[must_use]
    pub fn new(cache: SearchCache, debounce: Duration) -> Self {
        Self {
            cache,
            debouncer: Debouncer::new(debounce),
            in_flight: HashMap::new(),
            last_issued: 0,
            current: None,
            phase: DispatchPhase::Idle,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> DispatchPhase {
        self.phase
    }

    #[must_use]
    pub const fn cache(&self) -> &SearchCache {
        &self.cache
    }

    #[cfg(test)]
    pub(crate) fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    fn issue_id(&mut self) -> RequestId {
        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        self.current = Some(id);
        id
    }

    /// Debounced dispatch for typed commits and live filter refinement.
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::Serialization` if the request cannot be keyed.
    pub fn dispatch(
        &mut self,
        raw_query: &str,
        criteria: &FilterCriteria,
        include_aims_and_scope: bool,
        sort: Option<SortSpec>,
    ) -> Result<Dispatch> {
        let Some(request) =
            SearchRequest::normalize(raw_query, criteria, include_aims_and_scope, sort)
        else {
            return Ok(Dispatch::Skipped);
        };
        let key = request.cache_key()?;

        if let Some(hit) = self.adopt_cached(&key) {
            return Ok(hit);
        }

        let delay = self.debouncer.schedule(request, key);
        self.phase = DispatchPhase::Pending;
        Ok(Dispatch::Scheduled { delay })
    }

    /// Undebounced dispatch for sort changes. Any pending search is dropped.
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::Serialization` if the request cannot be keyed.
    pub fn dispatch_immediate(
        &mut self,
        raw_query: &str,
        criteria: &FilterCriteria,
        include_aims_and_scope: bool,
        sort: Option<SortSpec>,
    ) -> Result<Dispatch> {
        let Some(request) =
            SearchRequest::normalize(raw_query, criteria, include_aims_and_scope, sort)
        else {
            return Ok(Dispatch::Skipped);
        };
        let key = request.cache_key()?;

        if let Some(hit) = self.adopt_cached(&key) {
            return Ok(hit);
        }

        self.debouncer.cancel_pending();
        Ok(self.start_fetch(request, key))
    }

    /// Handles one elapsed host timer.
    pub fn on_timer(&mut self) -> Option<Dispatch> {
        let (request, key) = self.debouncer.on_timer()?;
        if let Some(hit) = self.adopt_cached(&key) {
            return Some(hit);
        }
        Some(self.start_fetch(request, key))
    }

    /// Records the outcome of a fetch.
    ///
    /// Successful results are cached even when a newer search has since been
    /// issued; whether they are displayed is the result store's decision.
    pub fn complete(&mut self, id: RequestId, key: CacheKey, outcome: &Result<Vec<Journal>>) {
        if self.in_flight.get(&key) == Some(&id) {
            self.in_flight.remove(&key);
        }

        let latest = self.current == Some(id);
        match outcome {
            Ok(results) => {
                tracing::debug!(%id, count = results.len(), latest, "search completed");
                self.cache.insert(key, results.clone());
                if latest {
                    self.phase = DispatchPhase::Loaded;
                }
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, latest, "search failed");
                if latest {
                    self.phase = DispatchPhase::Failed;
                }
            }
        }
    }

    fn adopt_cached(&mut self, key: &CacheKey) -> Option<Dispatch> {
        let results = self.cache.get(key)?.to_vec();
        self.debouncer.cancel_pending();
        let id = self.issue_id();
        self.phase = DispatchPhase::Loaded;
        tracing::debug!(%id, count = results.len(), "cache hit");
        Some(Dispatch::CacheHit { id, results })
    }

    fn start_fetch(&mut self, request: SearchRequest, key: CacheKey) -> Dispatch {
        self.phase = DispatchPhase::Fetching;
        if let Some(&id) = self.in_flight.get(&key) {
            tracing::debug!(%id, "joining in-flight search");
            self.current = Some(id);
            return Dispatch::Joined { id };
        }
        let id = self.issue_id();
        self.in_flight.insert(key.clone(), id);
        tracing::debug!(%id, query = %request.query_text, "starting fetch");
        Dispatch::Fetch { id, key, request }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(SearchCache::new(), DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScoutError;
    use crate::filter::{Facet, RangeFacet};
    use pretty_assertions::assert_eq;

    fn journal(title: &str) -> Journal {
        Journal { title: title.into(), issn: format!("{title}-issn"), ..Journal::default() }
    }

    fn fetch(dispatch: Dispatch) -> (RequestId, CacheKey, SearchRequest) {
        match dispatch {
            Dispatch::Fetch { id, key, request } => (id, key, request),
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn blank_query_is_skipped_without_state_change() {
        let mut dispatcher = Dispatcher::default();
        let outcome = dispatcher.dispatch(" \t", &FilterCriteria::default(), false, None).unwrap();
        assert_eq!(outcome, Dispatch::Skipped);
        assert_eq!(dispatcher.phase(), DispatchPhase::Idle);
        assert!(dispatcher.on_timer().is_none());
    }

    #[test]
    fn rapid_dispatches_collapse_into_one_trailing_fetch() {
        let mut dispatcher = Dispatcher::default();
        let criteria = FilterCriteria::default();

        for query in ["m", "ma", "mach"] {
            let outcome = dispatcher.dispatch(query, &criteria, false, None).unwrap();
            assert_eq!(outcome, Dispatch::Scheduled { delay: DEFAULT_DEBOUNCE });
        }
        assert_eq!(dispatcher.phase(), DispatchPhase::Pending);

        assert!(dispatcher.on_timer().is_none());
        assert!(dispatcher.on_timer().is_none());
        let (_, _, request) = fetch(dispatcher.on_timer().unwrap());
        assert_eq!(request.query_text, "mach");
        assert!(dispatcher.on_timer().is_none());
    }

    #[test]
    fn superseded_timer_does_nothing() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        let request =
            SearchRequest::normalize("a", &FilterCriteria::default(), false, None).unwrap();
        let key = request.cache_key().unwrap();

        debouncer.schedule(request.clone(), key.clone());
        assert!(debouncer.cancel_pending());
        assert!(debouncer.on_timer().is_none());
        assert!(!debouncer.has_pending());

        debouncer.schedule(request, key);
        assert!(debouncer.on_timer().is_some());
    }

    #[test]
    fn repeated_cached_dispatch_hits_network_once() {
        let mut dispatcher = Dispatcher::default();
        let criteria = FilterCriteria::default();

        let (id, key, _) =
            fetch(dispatcher.dispatch_immediate("optics", &criteria, false, None).unwrap());
        dispatcher.complete(id, key, &Ok(vec![journal("Optics Letters")]));

        let mut hits = 0;
        for _ in 0..4 {
            match dispatcher.dispatch("optics", &criteria, false, None).unwrap() {
                Dispatch::CacheHit { results, .. } => {
                    assert_eq!(results.len(), 1);
                    hits += 1;
                }
                other => panic!("expected cache hit, got {other:?}"),
            }
        }
        assert_eq!(hits, 4);
        assert_eq!(dispatcher.cache().len(), 1);
        assert_eq!(dispatcher.phase(), DispatchPhase::Loaded);
    }

    #[test]
    fn cache_hits_issue_fresh_request_ids() {
        let mut dispatcher = Dispatcher::default();
        let criteria = FilterCriteria::default();
        let (id, key, _) =
            fetch(dispatcher.dispatch_immediate("q", &criteria, false, None).unwrap());
        dispatcher.complete(id, key, &Ok(vec![]));

        let Dispatch::CacheHit { id: hit_id, .. } =
            dispatcher.dispatch("q", &criteria, false, None).unwrap()
        else {
            panic!("expected cache hit");
        };
        assert!(hit_id > id);
    }

    #[test]
    fn duplicate_in_flight_request_is_joined() {
        let mut dispatcher = Dispatcher::default();
        let criteria = FilterCriteria::default();

        let (id, _, _) =
            fetch(dispatcher.dispatch_immediate("q", &criteria, false, None).unwrap());
        let joined = dispatcher.dispatch_immediate("q", &criteria, false, None).unwrap();
        assert_eq!(joined, Dispatch::Joined { id });
        assert_eq!(dispatcher.in_flight_count(), 1);
    }

    #[test]
    fn immediate_dispatch_cancels_pending_timer() {
        let mut dispatcher = Dispatcher::default();
        let mut criteria = FilterCriteria::default();

        dispatcher.dispatch("q", &criteria, false, None).unwrap();
        criteria.cite_score_range = Facet::Active(RangeFacet::CiteScore.default_range());
        fetch(dispatcher.dispatch_immediate("q", &criteria, false, None).unwrap());

        assert!(dispatcher.on_timer().is_none());
    }

    #[test]
    fn failure_is_not_cached() {
        let mut dispatcher = Dispatcher::default();
        let criteria = FilterCriteria::default();
        let (id, key, _) =
            fetch(dispatcher.dispatch_immediate("q", &criteria, false, None).unwrap());

        dispatcher.complete(id, key, &Err(ScoutError::Protocol("bad".into())));

        assert_eq!(dispatcher.phase(), DispatchPhase::Failed);
        assert!(dispatcher.cache().is_empty());
        assert_eq!(dispatcher.in_flight_count(), 0);
        fetch(dispatcher.dispatch_immediate("q", &criteria, false, None).unwrap());
    }

    #[test]
    fn stale_completion_is_still_cached() {
        let mut dispatcher = Dispatcher::default();
        let criteria = FilterCriteria::default();
        let (old_id, old_key, _) =
            fetch(dispatcher.dispatch_immediate("old", &criteria, false, None).unwrap());
        let (new_id, _, _) =
            fetch(dispatcher.dispatch_immediate("new", &criteria, false, None).unwrap());
        assert!(new_id > old_id);

        dispatcher.complete(old_id, old_key, &Ok(vec![journal("Old")]));
        assert_eq!(dispatcher.phase(), DispatchPhase::Fetching);
        assert_eq!(dispatcher.cache().len(), 1);
    }

    #[test]
    fn joined_completion_finishes_the_phase() {
        let mut dispatcher = Dispatcher::default();
        let criteria = FilterCriteria::default();
        let (first, key, _) =
            fetch(dispatcher.dispatch_immediate("a", &criteria, false, None).unwrap());
        fetch(dispatcher.dispatch_immediate("b", &criteria, false, None).unwrap());

        let joined = dispatcher.dispatch_immediate("a", &criteria, false, None).unwrap();
        assert_eq!(joined, Dispatch::Joined { id: first });

        dispatcher.complete(first, key, &Ok(vec![journal("A")]));
        assert_eq!(dispatcher.phase(), DispatchPhase::Loaded);
        assert_eq!(dispatcher.in_flight_count(), 1);
    }
}
