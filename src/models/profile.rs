use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One profile per user; mutable fields only, no history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub profile_picture: Option<String>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub label: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddressPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub is_default: bool,
}

/// At most one per user; `verified` is set only by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanCard {
    pub id: i64,
    pub pan_number: String,
    pub full_name: String,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PanCardPayload {
    pub pan_number: String,
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_parts() {
        let profile = Profile {
            id: 1,
            email: "devotee@example.com".to_string(),
            first_name: Some("Asha".to_string()),
            last_name: Some("Rao".to_string()),
            phone: None,
            date_of_birth: None,
            gender: None,
            profile_picture: None,
        };
        assert_eq!(profile.full_name(), "Asha Rao");
    }

    #[test]
    fn test_full_name_falls_back_to_email() {
        let profile = Profile {
            id: 1,
            email: "devotee@example.com".to_string(),
            first_name: None,
            last_name: Some(String::new()),
            phone: None,
            date_of_birth: None,
            gender: None,
            profile_picture: None,
        };
        assert_eq!(profile.full_name(), "devotee@example.com");
    }
}
