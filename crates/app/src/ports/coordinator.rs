//! Coordinator port: the polling cache the switches read from.

use std::future::Future;
use std::sync::Arc;

use vsmart_domain::snapshot::Snapshot;

/// Holds the latest snapshot fetched from the cloud.
///
/// Switches never poll on their own: every state read goes through
/// [`snapshot`](Self::snapshot), and every command ends with
/// [`request_refresh`](Self::request_refresh).
pub trait Coordinator: Send + Sync {
    /// The most recent snapshot. Cheap to call; never performs IO.
    fn snapshot(&self) -> Arc<Snapshot>;

    /// Ask for a refresh of the cached snapshot.
    ///
    /// Debouncing and error handling are the coordinator's concern.
    fn request_refresh(&self) -> impl Future<Output = ()> + Send;
}
