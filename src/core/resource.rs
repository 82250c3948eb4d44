//! Suspending async cell around one fetch
//!
//! A [`Resource`] starts the wrapped future on a tokio runtime as soon as it
//! is created and memoizes its outcome. Readers never block: [`Resource::try_read`]
//! returns [`Poll::Pending`] until the future settles, and the host scheduler
//! decides when to try again (typically after awaiting [`Resource::settled`]).
//!
//! ```rust,ignore
//! let resource = Resource::new(async { fetch_products().await });
//!
//! match resource.try_read() {
//!     Poll::Pending => render_skeleton(),
//!     Poll::Ready(Ok(products)) => render(&products),
//!     Poll::Ready(Err(e)) => render_error(&e),
//! }
//! ```

use crate::core::error::FetchError;
use std::future::Future;
use std::sync::Arc;
use std::task::Poll;
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Settlement state of a resource
///
/// Transitions only from `Pending` to one of the terminal states, once.
#[derive(Debug)]
enum ResourceState<T> {
    Pending,
    Success(Arc<T>),
    Error(FetchError),
}

impl<T> ResourceState<T> {
    fn to_poll(&self) -> Poll<Result<Arc<T>, FetchError>> {
        match self {
            ResourceState::Pending => Poll::Pending,
            ResourceState::Success(value) => Poll::Ready(Ok(Arc::clone(value))),
            ResourceState::Error(err) => Poll::Ready(Err(err.clone())),
        }
    }
}

/// Memoized outcome of one asynchronous operation
///
/// Clones share the same underlying operation and state.
#[derive(Debug)]
pub struct Resource<T> {
    state: watch::Receiver<ResourceState<T>>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> Resource<T> {
    /// Start `operation` on the current tokio runtime
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime; use [`Resource::spawn_on`]
    /// with an explicit handle otherwise.
    pub fn new<F>(operation: F) -> Self
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self::spawn_on(&Handle::current(), operation)
    }

    /// Start `operation` on the runtime behind `handle`
    ///
    /// Exactly one settlement task is attached to the operation, no matter
    /// how many times the resource is read while pending.
    pub fn spawn_on<F>(handle: &Handle, operation: F) -> Self
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(ResourceState::Pending);

        handle.spawn(async move {
            let settled = match operation.await {
                Ok(value) => {
                    tracing::debug!("Resource settled");
                    ResourceState::Success(Arc::new(value))
                }
                Err(err) => {
                    tracing::warn!(error = %format!("{:#}", err), "Resource failed");
                    ResourceState::Error(FetchError::new(err))
                }
            };
            tx.send_replace(settled);
        });

        Self { state: rx }
    }

    /// A resource that is already settled with `value`
    pub fn ready(value: T) -> Self {
        let (_tx, rx) = watch::channel(ResourceState::Success(Arc::new(value)));
        Self { state: rx }
    }

    /// A resource that is already settled with `err`
    pub fn failed(err: FetchError) -> Self {
        let (_tx, rx) = watch::channel(ResourceState::Error(err));
        Self { state: rx }
    }
}

impl<T> Resource<T> {
    /// Non-blocking read
    ///
    /// - `Poll::Pending`: not settled yet; retry after [`Resource::settled`]
    /// - `Poll::Ready(Ok(value))`: the same value on every call
    /// - `Poll::Ready(Err(e))`: the same captured failure on every call
    pub fn try_read(&self) -> Poll<Result<Arc<T>, FetchError>> {
        self.state.borrow().to_poll()
    }

    /// Whether the operation has not settled yet
    pub fn is_pending(&self) -> bool {
        self.try_read().is_pending()
    }

    /// Wait until the operation settles and return its outcome
    pub async fn settled(&self) -> Result<Arc<T>, FetchError> {
        let mut state = self.state.clone();
        loop {
            let current = state.borrow_and_update().to_poll();
            if let Poll::Ready(outcome) = current {
                return outcome;
            }
            if state.changed().await.is_err() {
                // The settlement task is gone; re-check in case it published
                // right before dropping the sender.
                let current = state.borrow().to_poll();
                return match current {
                    Poll::Ready(outcome) => outcome,
                    Poll::Pending => Err(FetchError::new(anyhow::anyhow!(
                        "resource operation was dropped before settling"
                    ))),
                };
            }
        }
    }

    /// Whether both handles share the same underlying operation
    pub fn ptr_eq(&self, other: &Resource<T>) -> bool {
        self.state.same_channel(&other.state)
    }
}
