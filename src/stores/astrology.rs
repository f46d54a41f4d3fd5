use std::sync::{Arc, Mutex};

use crate::client::ApiClient;
use crate::errors::ApiError;
use crate::models::{
    AstrologyBooking, BookingStatus, Paginated, RescheduleRequest, StatusChangeRequest,
};
use crate::notify::Notifier;
use crate::stores::{Fence, ViewState};

const ASTRO_BOOKINGS_PATH: &str = "/astrology/admin/bookings/";

/// Repository for astrology consultation bookings, keyed by their
/// `astro_book_id`. Same contract as the puja booking store: list plus
/// status/reschedule transitions, each followed by a full refetch.
pub struct AstrologyBookingStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ViewState<AstrologyBooking>>,
    fence: Fence,
}

impl AstrologyBookingStore {
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>, page_size: u32) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(ViewState::new(page_size)),
            fence: Fence::new(),
        }
    }

    pub fn snapshot(&self) -> ViewState<AstrologyBooking> {
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

    pub async fn fetch(&self) {
        let ticket = self.fence.issue();
        let params = {
            let mut state = self.state.lock().unwrap();
            state.loading = true;
            state.error = None;
            state.query.to_params()
        };

        let result: Result<Paginated<AstrologyBooking>, ApiError> =
            self.api.get_json(ASTRO_BOOKINGS_PATH, &params).await;

        let failure = {
            let mut state = self.state.lock().unwrap();
            if !self.fence.is_latest(ticket) {
                tracing::debug!(ticket, "discarding stale astrology fetch");
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

    pub async fn set_status(
        &self,
        astro_book_id: &str,
        status: BookingStatus,
        reason: Option<String>,
    ) -> bool {
        let body = StatusChangeRequest { status, reason };
        let path = format!("{ASTRO_BOOKINGS_PATH}{astro_book_id}/status/");
        match self.api.patch_json::<_, serde_json::Value>(&path, &body).await {
            Ok(_) => {
                self.notifier
                    .success(&format!("Consultation marked {}", status.as_str()));
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    pub async fn reschedule(&self, astro_book_id: &str, request: &RescheduleRequest) -> bool {
        let path = format!("{ASTRO_BOOKINGS_PATH}{astro_book_id}/reschedule/");
        match self
            .api
            .post_json::<_, serde_json::Value>(&path, request)
            .await
        {
            Ok(_) => {
                self.notifier.success("Consultation rescheduled");
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
