//! Request cancellation.
//!
//! A screen that goes away cancels its in-flight requests. A cancelled
//! request's result is discarded, even when the response had already
//! arrived, so it can never overwrite newer state.

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use std::future::Future;

/// Handed to a request; resolves to [`ApiError::Cancelled`](crate::ApiError)
/// once its [`CancelHandle`] fires.
#[derive(Debug)]
pub struct CancelToken {
    handle: AbortHandle,
    registration: AbortRegistration,
}

/// Kept by the caller to cancel the matching [`CancelToken`].
#[derive(Debug, Clone)]
pub struct CancelHandle(AbortHandle);

impl CancelToken {
    /// Creates a linked token/handle pair.
    pub fn new() -> (Self, CancelHandle) {
        let (handle, registration) = AbortHandle::new_pair();
        let token = Self {
            handle: handle.clone(),
            registration,
        };
        (token, CancelHandle(handle))
    }

    /// Runs `fut` until it completes or the token is cancelled.
    /// Returns `None` if cancelled at any point, including after `fut`
    /// finished but before the result was handed back.
    pub(crate) async fn run<F: Future>(self, fut: F) -> Option<F::Output> {
        let handle = self.handle;
        match Abortable::new(fut, self.registration).await {
            Ok(output) if !handle.is_aborted() => Some(output),
            _ => None,
        }
    }
}

impl CancelHandle {
    /// Cancels the request. Idempotent.
    pub fn cancel(&self) {
        self.0.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}
