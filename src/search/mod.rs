//! Search pipeline.
//!
//! - [`request`]: normalization, canonical cache keys, wire body
//! - [`cache`]: session-lifetime result cache
//! - [`dispatcher`]: debounce, cache adoption, in-flight de-duplication
//! - [`client`]: HTTP request construction and envelope validation

pub mod cache;
pub mod client;
pub mod dispatcher;
pub mod request;

pub use cache::SearchCache;
pub use client::{SearchClient, SearchError, WebRequest};
pub use dispatcher::{Debouncer, Dispatch, DispatchPhase, Dispatcher, RequestId};
pub use request::{next_sort, CacheKey, SearchRequest, SortField, SortOrder, SortSpec};
