//! Mock transport for unit testing
//!
//! Records every request it is given and answers from a queue of canned
//! responses, so a `VManageClient` can be exercised without a vManage server.

use crate::common::{ApiRequest, ApiResponse, Transport};
use crate::error::VManageError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-memory [`Transport`]
///
/// Clones share state, so a test can keep one clone to inspect requests
/// after handing another to the client.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    // Answered in order; an empty queue answers 200 with an empty body
    responses: Arc<Mutex<VecDeque<Result<ApiResponse, VManageError>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered request
    pub fn push_response(&self, response: ApiResponse) {
        lock(&self.responses).push_back(Ok(response));
    }

    /// Queue a transport failure for the next unanswered request
    pub fn push_error(&self, error: VManageError) {
        lock(&self.responses).push_back(Err(error));
    }

    /// All requests executed so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        lock(&self.requests).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, VManageError> {
        lock(&self.requests).push(request.clone());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(200, "")))
    }
}
