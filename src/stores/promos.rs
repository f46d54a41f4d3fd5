use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::client::ApiClient;
use crate::errors::ApiError;
use crate::models::{
    generate_bulk_codes, Paginated, PromoCode, PromoCreate, PromoStats, PromoUpdate,
};
use crate::notify::Notifier;
use crate::stores::{Fence, ViewState};

const PROMOS_PATH: &str = "/promo/admin/promos/";

/// Repository for promo codes: full CRUD plus bulk create, stats, CSV export
/// and email delivery. Unlike bookings, single-record mutations merge the
/// server's response into the cache instead of refetching.
pub struct PromoStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ViewState<PromoCode>>,
    fence: Fence,
}

impl PromoStore {
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>, page_size: u32) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(ViewState::new(page_size)),
            fence: Fence::new(),
        }
    }

    pub fn snapshot(&self) -> ViewState<PromoCode> {
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

    /// Server-side status filter, e.g. `active` / `expired`.
    pub fn set_status_filter(&self, status: Option<String>) {
        let mut state = self.state.lock().unwrap();
        state.query.status = status;
        state.query.page = 1;
    }

    pub fn select(&self, id: Option<i64>) {
        self.state.lock().unwrap().selected = id.map(|v| v.to_string());
    }

    pub async fn fetch(&self) {
        let ticket = self.fence.issue();
        let params = {
            let mut state = self.state.lock().unwrap();
            state.loading = true;
            state.error = None;
            state.query.to_params()
        };

        let result: Result<Paginated<PromoCode>, ApiError> =
            self.api.get_json(PROMOS_PATH, &params).await;

        let failure = {
            let mut state = self.state.lock().unwrap();
            if !self.fence.is_latest(ticket) {
                tracing::debug!(ticket, "discarding stale promo fetch");
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

    /// POST a new code; on success the created record is prepended to the
    /// cached page. Invariants are checked before the request goes out.
    pub async fn create(&self, mut data: PromoCreate) -> bool {
        let today = Utc::now().date_naive();
        if let Err(message) = data.normalize_and_validate(today) {
            self.fail(ApiError::Validation(message));
            return false;
        }

        match self.api.post_json::<_, PromoCode>(PROMOS_PATH, &data).await {
            Ok(created) => {
                {
                    let mut state = self.state.lock().unwrap();
                    state.items.insert(0, created);
                    state.total += 1;
                }
                self.notifier.success("Promo code created");
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// PATCH a code; on success the server's record replaces the cached one
    /// in place. Failure leaves the cache untouched.
    pub async fn update(&self, id: i64, patch: &PromoUpdate) -> bool {
        let path = format!("{PROMOS_PATH}{id}/");
        match self.api.patch_json::<_, PromoCode>(&path, patch).await {
            Ok(updated) => {
                {
                    let mut state = self.state.lock().unwrap();
                    if let Some(slot) = state.items.iter_mut().find(|p| p.id == id) {
                        *slot = updated;
                    }
                }
                self.notifier.success("Promo code updated");
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Hard delete; promo codes have no soft-delete. Selection pointing at
    /// the removed record is cleared.
    pub async fn delete(&self, id: i64) -> bool {
        let path = format!("{PROMOS_PATH}{id}/");
        match self.api.delete(&path).await {
            Ok(()) => {
                {
                    let mut state = self.state.lock().unwrap();
                    state.items.retain(|p| p.id != id);
                    state.total = state.total.saturating_sub(1);
                    if state.selected.as_deref() == Some(id.to_string().as_str()) {
                        state.selected = None;
                    }
                }
                self.notifier.success("Promo code deleted");
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Generate `count` distinct codes from the prefix and send them in one
    /// array payload, then refetch the collection.
    pub async fn bulk_create(&self, prefix: &str, count: usize, template: &PromoCreate) -> bool {
        let today = Utc::now().date_naive();
        let mut probe = template.clone();
        probe.code = format!("{prefix}-PROBE");
        if let Err(message) = probe.normalize_and_validate(today) {
            self.fail(ApiError::Validation(message));
            return false;
        }

        let promos: Vec<PromoCreate> = generate_bulk_codes(prefix, count)
            .into_iter()
            .map(|code| {
                let mut promo = template.clone();
                promo.code = code;
                promo
            })
            .collect();

        let body = serde_json::json!({ "promos": promos });
        let path = format!("{PROMOS_PATH}bulk-create/");
        match self.api.post_json::<_, serde_json::Value>(&path, &body).await {
            Ok(_) => {
                self.notifier
                    .success(&format!("Created {count} promo codes"));
                self.refresh().await;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    pub async fn stats(&self) -> Option<PromoStats> {
        let path = format!("{PROMOS_PATH}stats/");
        match self.api.get_json::<PromoStats>(&path, &[]).await {
            Ok(stats) => Some(stats),
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    /// CSV export; bytes are passed through untouched for the caller to save.
    pub async fn export_csv(&self) -> Option<Vec<u8>> {
        let path = format!("{PROMOS_PATH}export/");
        match self.api.get_bytes(&path).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    pub async fn send_email(&self, id: i64, recipients: &[String]) -> bool {
        let path = format!("{PROMOS_PATH}{id}/send-email/");
        let body = serde_json::json!({ "recipients": recipients });
        match self.api.post_json::<_, serde_json::Value>(&path, &body).await {
            Ok(_) => {
                self.notifier.success("Promo code emailed");
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
