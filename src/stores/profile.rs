use std::sync::{Arc, Mutex};

use crate::client::ApiClient;
use crate::errors::ApiError;
use crate::models::{Address, AddressPayload, PanCard, PanCardPayload, Profile, ProfileUpdate};
use crate::notify::Notifier;
use crate::stores::Fence;

const PROFILE_PATH: &str = "/auth/profile/";
const PICTURE_PATH: &str = "/auth/profile/picture/";
const ADDRESSES_PATH: &str = "/auth/addresses/";
const PANCARD_PATH: &str = "/auth/pancard/";

/// The signed-in user's profile view: one profile, their addresses, and at
/// most one PAN card. A missing PAN card is a normal condition, not an error.
#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub profile: Option<Profile>,
    pub addresses: Vec<Address>,
    pub pan_card: Option<PanCard>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct ProfileStore {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ProfileState>,
    fence: Fence,
}

impl ProfileStore {
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(ProfileState::default()),
            fence: Fence::new(),
        }
    }

    pub fn snapshot(&self) -> ProfileState {
        self.state.lock().unwrap().clone()
    }

    /// Load profile, addresses and PAN card in one pass. A 404 on the PAN
    /// endpoint means "none yet" and is swallowed.
    pub async fn fetch(&self) {
        let ticket = self.fence.issue();
        {
            let mut state = self.state.lock().unwrap();
            state.loading = true;
            state.error = None;
        }

        let profile: Result<Profile, ApiError> = self.api.get_json(PROFILE_PATH, &[]).await;
        let addresses: Result<Vec<Address>, ApiError> =
            self.api.get_json(ADDRESSES_PATH, &[]).await;
        let pan_card = match self.api.get_json::<PanCard>(PANCARD_PATH, &[]).await {
            Ok(card) => Ok(Some(card)),
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        };

        let failure = {
            let mut state = self.state.lock().unwrap();
            if !self.fence.is_latest(ticket) {
                tracing::debug!(ticket, "discarding stale profile fetch");
                return;
            }
            state.loading = false;
            match (profile, addresses, pan_card) {
                (Ok(profile), Ok(addresses), Ok(pan_card)) => {
                    state.profile = Some(profile);
                    state.addresses = addresses;
                    state.pan_card = pan_card;
                    None
                }
                (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
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

    pub async fn update_profile(&self, patch: &ProfileUpdate) -> bool {
        match self.api.patch_json::<_, Profile>(PROFILE_PATH, patch).await {
            Ok(updated) => {
                self.state.lock().unwrap().profile = Some(updated);
                self.notifier.success("Profile updated");
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Multipart image upload; the server responds with the updated profile.
    pub async fn upload_picture(&self, bytes: Vec<u8>, filename: &str) -> bool {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("picture", part);
        match self.api.post_multipart::<Profile>(PICTURE_PATH, form).await {
            Ok(updated) => {
                self.state.lock().unwrap().profile = Some(updated);
                self.notifier.success("Profile picture updated");
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    pub async fn create_address(&self, payload: &AddressPayload) -> bool {
        match self
            .api
            .post_json::<_, Address>(ADDRESSES_PATH, payload)
            .await
        {
            Ok(created) => {
                let refresh_needed = created.is_default;
                self.state.lock().unwrap().addresses.insert(0, created);
                self.notifier.success("Address saved");
                // The backend clears the previous default; pick that up.
                if refresh_needed {
                    self.refresh_addresses().await;
                }
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    pub async fn update_address(&self, id: i64, payload: &AddressPayload) -> bool {
        let path = format!("{ADDRESSES_PATH}{id}/");
        match self.api.patch_json::<_, Address>(&path, payload).await {
            Ok(updated) => {
                let refresh_needed = updated.is_default;
                {
                    let mut state = self.state.lock().unwrap();
                    if let Some(slot) = state.addresses.iter_mut().find(|a| a.id == id) {
                        *slot = updated;
                    }
                }
                self.notifier.success("Address updated");
                if refresh_needed {
                    self.refresh_addresses().await;
                }
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    pub async fn delete_address(&self, id: i64) -> bool {
        let path = format!("{ADDRESSES_PATH}{id}/");
        match self.api.delete(&path).await {
            Ok(()) => {
                self.state.lock().unwrap().addresses.retain(|a| a.id != id);
                self.notifier.success("Address removed");
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Flag one address as default, then refetch so exactly one default
    /// remains however the backend resolved it.
    pub async fn set_default_address(&self, id: i64) -> bool {
        let path = format!("{ADDRESSES_PATH}{id}/");
        let body = serde_json::json!({ "is_default": true });
        match self.api.patch_json::<_, Address>(&path, &body).await {
            Ok(_) => {
                self.notifier.success("Default address updated");
                self.refresh_addresses().await;
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    pub async fn save_pan_card(&self, payload: &PanCardPayload) -> bool {
        match self
            .api
            .post_json::<_, PanCard>(PANCARD_PATH, payload)
            .await
        {
            Ok(saved) => {
                self.state.lock().unwrap().pan_card = Some(saved);
                self.notifier.success("PAN card saved");
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    async fn refresh_addresses(&self) {
        match self.api.get_json::<Vec<Address>>(ADDRESSES_PATH, &[]).await {
            Ok(addresses) => {
                self.state.lock().unwrap().addresses = addresses;
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&self, err: ApiError) {
        let message = err.user_message();
        self.state.lock().unwrap().error = Some(message.clone());
        self.notifier.error(&message);
    }
}
