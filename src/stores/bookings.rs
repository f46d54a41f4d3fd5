use std::sync::{Arc, Mutex};

use crate::client::ApiClient;
use crate::errors::ApiError;
use crate::models::{
    AssignmentRequest, BookingStatus, Paginated, PujaBooking, RescheduleRequest,
    StatusChangeRequest,
};
use crate::notify::Notifier;
use crate::stores::{Fence, ViewState};

const BOOKINGS_PATH: &str = "/booking/admin/bookings/";

/// Repository for puja/regular admin bookings. Bookings are created by the
/// backend on checkout; the admin panel only lists them and transitions
/// their status, so there is no create or delete here. Every mutation
/// refetches the collection instead of patching the cache.
pub struct BookingStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ViewState<PujaBooking>>,
    fence: Fence,
}

impl BookingStore {
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>, page_size: u32) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(ViewState::new(page_size)),
            fence: Fence::new(),
        }
    }

    pub fn snapshot(&self) -> ViewState<PujaBooking> {
        self.state.lock().unwrap().clone()
    }

    pub fn set_page(&self, page: u32) {
        self.state.lock().unwrap().query.page = page.max(1);
    }

    pub fn set_search(&self, search: Option<String>) {
        let mut state = self.state.lock().unwrap();
        state.query.search = search;
        state.query.page = 1;
    }

    pub fn set_status_filter(&self, status: Option<BookingStatus>) {
        let mut state = self.state.lock().unwrap();
        state.query.status = status.map(|s| s.as_str().to_string());
        state.query.page = 1;
    }

    pub fn select(&self, key: Option<String>) {
        self.state.lock().unwrap().selected = key;
    }

    /// GET the collection using the current filter state and replace the
    /// cached page. Errors are stored and toasted; there is no retry.
    pub async fn fetch(&self) {
        let ticket = self.fence.issue();
        let params = {
            let mut state = self.state.lock().unwrap();
            state.loading = true;
            state.error = None;
            state.query.to_params()
        };

        let result: Result<Paginated<PujaBooking>, ApiError> =
            self.api.get_json(BOOKINGS_PATH, &params).await;

        let failure = {
            let mut state = self.state.lock().unwrap();
            if !self.fence.is_latest(ticket) {
                tracing::debug!(ticket, "discarding stale booking fetch");
                return;
            }
            state.loading = false;
            match result {
                Ok(page) => {
                    state.items = page.results;
                    state.total = page.count;
                    state.total_pages = page.total_pages;
                    None
                }
                Err(err) => {
                    let message = err.user_message();
                    state.error = Some(message.clone());
                    Some(message)
                }
            }
        };
        if let Some(message) = failure {
            self.notifier.error(&message);
        }
    }

    pub async fn refresh(&self) {
        self.fetch().await;
    }

    /// PATCH the status sub-resource, then refetch the whole collection.
    pub async fn set_status(
        &self,
        key: &str,
        status: BookingStatus,
        reason: Option<String>,
    ) -> bool {
        let body = StatusChangeRequest { status, reason };
        let path = format!("{BOOKINGS_PATH}{key}/status/");
        match self.api.patch_json::<_, serde_json::Value>(&path, &body).await {
            Ok(_) => {
                self.notifier
                    .success(&format!("Booking marked {}", status.as_str()));
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    pub async fn assign(&self, key: &str, employee_id: i64) -> bool {
        let body = AssignmentRequest { employee_id };
        let path = format!("{BOOKINGS_PATH}{key}/assign/");
        match self.api.post_json::<_, serde_json::Value>(&path, &body).await {
            Ok(_) => {
                self.notifier.success("Booking assigned");
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    pub async fn reschedule(&self, key: &str, request: &RescheduleRequest) -> bool {
        let path = format!("{BOOKINGS_PATH}{key}/reschedule/");
        match self
            .api
            .post_json::<_, serde_json::Value>(&path, request)
            .await
        {
            Ok(_) => {
                self.notifier.success("Booking rescheduled");
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    fn fail(&self, err: ApiError) {
        let message = err.user_message();
        self.state.lock().unwrap().error = Some(message.clone());
        self.notifier.error(&message);
    }
}
