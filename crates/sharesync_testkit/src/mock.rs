//! Mock remote sources with canned responses.
//!
//! Each mock answers with a sticky response set by `set_*_response`.
//! Responses pushed with `queue_*_response` are consumed first, one per
//! call, which lets a test script a failure followed by a success.

use sharesync_core::{
    CreateShareRequest, RemoteCapability, RemoteCapabilitySource, RemoteError, RemoteResult,
    RemoteShare, RemoteShareSource, RemoteShareeSource, Sharee, UpdateShareRequest,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted answers for one remote call.
#[derive(Debug)]
struct Script<T> {
    queued: Mutex<VecDeque<RemoteResult<T>>>,
    sticky: Mutex<Option<RemoteResult<T>>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            sticky: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    fn set(&self, response: RemoteResult<T>) {
        *self.sticky.lock().unwrap() = Some(response);
    }

    fn queue(&self, response: RemoteResult<T>) {
        self.queued.lock().unwrap().push_back(response);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, what: &str) -> RemoteResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(response) = self.queued.lock().unwrap().pop_front() {
            return response;
        }
        self.sticky
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(RemoteError::unknown(format!("No mock {what} response set"))))
    }
}

/// Connectivity and latency shared by every mock.
#[derive(Debug)]
struct Link {
    connected: AtomicBool,
    latency: Mutex<Duration>,
}

impl Link {
    fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            latency: Mutex::new(Duration::ZERO),
        }
    }

    fn check(&self) -> RemoteResult<()> {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            std::thread::sleep(latency);
        }
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RemoteError::network("No network connection"))
        }
    }
}

/// A mock sharing API.
#[derive(Debug)]
pub struct MockShareSource {
    link: Link,
    list: Script<Vec<RemoteShare>>,
    create: Script<Vec<RemoteShare>>,
    update: Script<Vec<RemoteShare>>,
    delete: Script<()>,
    list_latency: Mutex<Duration>,
    last_list: Mutex<Option<(String, bool, bool)>>,
    last_create: Mutex<Option<CreateShareRequest>>,
    last_update: Mutex<Option<UpdateShareRequest>>,
    last_delete: Mutex<Option<i64>>,
}

impl MockShareSource {
    /// Creates a connected mock with no responses set.
    pub fn new() -> Self {
        Self {
            link: Link::new(),
            list: Script::new(),
            create: Script::new(),
            update: Script::new(),
            delete: Script::new(),
            list_latency: Mutex::new(Duration::ZERO),
            last_list: Mutex::new(None),
            last_create: Mutex::new(None),
            last_update: Mutex::new(None),
            last_delete: Mutex::new(None),
        }
    }

    /// Sets the list response.
    pub fn set_list_response(&self, response: RemoteResult<Vec<RemoteShare>>) {
        self.list.set(response);
    }

    /// Queues a one-time list response.
    pub fn queue_list_response(&self, response: RemoteResult<Vec<RemoteShare>>) {
        self.list.queue(response);
    }

    /// Sets the create response.
    pub fn set_create_response(&self, response: RemoteResult<Vec<RemoteShare>>) {
        self.create.set(response);
    }

    /// Sets the update response.
    pub fn set_update_response(&self, response: RemoteResult<Vec<RemoteShare>>) {
        self.update.set(response);
    }

    /// Sets the delete response.
    pub fn set_delete_response(&self, response: RemoteResult<()>) {
        self.delete.set(response);
    }

    /// Sets the connected state.
    pub fn set_connected(&self, connected: bool) {
        self.link.connected.store(connected, Ordering::SeqCst);
    }

    /// Delays every call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.link.latency.lock().unwrap() = latency;
    }

    /// Delays list calls only, on top of the shared latency.
    pub fn set_list_latency(&self, latency: Duration) {
        *self.list_latency.lock().unwrap() = latency;
    }

    /// Number of list calls made.
    pub fn list_calls(&self) -> usize {
        self.list.calls()
    }

    /// Number of create calls made.
    pub fn create_calls(&self) -> usize {
        self.create.calls()
    }

    /// Number of update calls made.
    pub fn update_calls(&self) -> usize {
        self.update.calls()
    }

    /// Number of delete calls made.
    pub fn delete_calls(&self) -> usize {
        self.delete.calls()
    }

    /// Total number of calls made.
    pub fn total_calls(&self) -> usize {
        self.list_calls() + self.create_calls() + self.update_calls() + self.delete_calls()
    }

    /// Arguments of the last list call: path, reshares, subfiles.
    pub fn last_list(&self) -> Option<(String, bool, bool)> {
        self.last_list.lock().unwrap().clone()
    }

    /// The last create request.
    pub fn last_create(&self) -> Option<CreateShareRequest> {
        self.last_create.lock().unwrap().clone()
    }

    /// The last update request.
    pub fn last_update(&self) -> Option<UpdateShareRequest> {
        self.last_update.lock().unwrap().clone()
    }

    /// The id passed to the last delete call.
    pub fn last_delete(&self) -> Option<i64> {
        *self.last_delete.lock().unwrap()
    }
}

impl Default for MockShareSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteShareSource for MockShareSource {
    fn list_shares(
        &self,
        file_path: &str,
        reshares: bool,
        subfiles: bool,
    ) -> RemoteResult<Vec<RemoteShare>> {
        *self.last_list.lock().unwrap() = Some((file_path.to_string(), reshares, subfiles));
        let latency = *self.list_latency.lock().unwrap();
        if !latency.is_zero() {
            std::thread::sleep(latency);
        }
        self.link.check()?;
        self.list.answer("list")
    }

    fn create_share(&self, request: &CreateShareRequest) -> RemoteResult<Vec<RemoteShare>> {
        *self.last_create.lock().unwrap() = Some(request.clone());
        self.link.check()?;
        self.create.answer("create")
    }

    fn update_share(&self, request: &UpdateShareRequest) -> RemoteResult<Vec<RemoteShare>> {
        *self.last_update.lock().unwrap() = Some(request.clone());
        self.link.check()?;
        self.update.answer("update")
    }

    fn delete_share(&self, remote_id: i64) -> RemoteResult<()> {
        *self.last_delete.lock().unwrap() = Some(remote_id);
        self.link.check()?;
        self.delete.answer("delete")
    }
}

/// A mock capabilities endpoint.
#[derive(Debug)]
pub struct MockCapabilitySource {
    link: Link,
    capabilities: Script<RemoteCapability>,
    last_account: Mutex<Option<String>>,
}

impl MockCapabilitySource {
    /// Creates a connected mock with no response set.
    pub fn new() -> Self {
        Self {
            link: Link::new(),
            capabilities: Script::new(),
            last_account: Mutex::new(None),
        }
    }

    /// Sets the capabilities response.
    pub fn set_response(&self, response: RemoteResult<RemoteCapability>) {
        self.capabilities.set(response);
    }

    /// Queues a one-time capabilities response.
    pub fn queue_response(&self, response: RemoteResult<RemoteCapability>) {
        self.capabilities.queue(response);
    }

    /// Sets the connected state.
    pub fn set_connected(&self, connected: bool) {
        self.link.connected.store(connected, Ordering::SeqCst);
    }

    /// Delays every call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.link.latency.lock().unwrap() = latency;
    }

    /// Number of calls made.
    pub fn calls(&self) -> usize {
        self.capabilities.calls()
    }

    /// Account passed to the last call.
    pub fn last_account(&self) -> Option<String> {
        self.last_account.lock().unwrap().clone()
    }
}

impl Default for MockCapabilitySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteCapabilitySource for MockCapabilitySource {
    fn get_capabilities(&self, account: &str) -> RemoteResult<RemoteCapability> {
        *self.last_account.lock().unwrap() = Some(account.to_string());
        self.link.check()?;
        self.capabilities.answer("capabilities")
    }
}

/// A mock sharee search endpoint.
#[derive(Debug)]
pub struct MockShareeSource {
    link: Link,
    search: Script<Vec<Sharee>>,
    last_search: Mutex<Option<(String, u32, u32)>>,
}

impl MockShareeSource {
    /// Creates a connected mock with no response set.
    pub fn new() -> Self {
        Self {
            link: Link::new(),
            search: Script::new(),
            last_search: Mutex::new(None),
        }
    }

    /// Sets the search response.
    pub fn set_response(&self, response: RemoteResult<Vec<Sharee>>) {
        self.search.set(response);
    }

    /// Sets the connected state.
    pub fn set_connected(&self, connected: bool) {
        self.link.connected.store(connected, Ordering::SeqCst);
    }

    /// Number of calls made.
    pub fn calls(&self) -> usize {
        self.search.calls()
    }

    /// Arguments of the last call: search, page, per page.
    pub fn last_search(&self) -> Option<(String, u32, u32)> {
        self.last_search.lock().unwrap().clone()
    }
}

impl Default for MockShareeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteShareeSource for MockShareeSource {
    fn search_sharees(&self, search: &str, page: u32, per_page: u32) -> RemoteResult<Vec<Sharee>> {
        *self.last_search.lock().unwrap() = Some((search.to_string(), page, per_page));
        self.link.check()?;
        self.search.answer("sharee")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharesync_core::ResultCode;

    #[test]
    fn missing_response_is_unknown_error() {
        let source = MockShareSource::new();
        let err = source.list_shares("/a", true, false).unwrap_err();
        assert_eq!(err.code(), ResultCode::Unknown);
        assert_eq!(source.list_calls(), 1);
        assert_eq!(source.last_list(), Some(("/a".to_string(), true, false)));
    }

    #[test]
    fn queued_responses_come_first() {
        let source = MockCapabilitySource::new();
        source.queue_response(Err(RemoteError::rejected(503, "Service Unavailable")));
        source.set_response(Ok(RemoteCapability::default()));

        assert!(source.get_capabilities("admin@server").is_err());
        assert!(source.get_capabilities("admin@server").is_ok());
        assert!(source.get_capabilities("admin@server").is_ok());
        assert_eq!(source.calls(), 3);
    }

    #[test]
    fn disconnected_is_network_error() {
        let source = MockShareeSource::new();
        source.set_response(Ok(Vec::new()));
        source.set_connected(false);

        let err = source.search_sharees("User", 1, 10).unwrap_err();
        assert_eq!(err.code(), ResultCode::NoNetworkConnection);
        assert_eq!(source.calls(), 0);
    }
}
