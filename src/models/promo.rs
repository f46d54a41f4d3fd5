use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    Percent,
    Fixed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodeType {
    Public,
    Private,
    Assigned,
    ServiceSpecific,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: i64,
    pub code: String,
    pub discount: f64,
    pub discount_type: DiscountType,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    pub usage_count: u32,
    pub usage_limit: Option<u32>,
    pub code_type: CodeType,
    pub is_active: bool,
    pub service_type: Option<String>,
    pub assigned_to: Option<String>,
    pub description: Option<String>,
}

impl PromoCode {
    /// Usage as a 0-100 percentage, clamped at 100. Unlimited codes report 0.
    pub fn usage_progress(&self) -> f64 {
        match self.usage_limit {
            Some(limit) if limit > 0 => {
                (f64::from(self.usage_count) / f64::from(limit)).min(1.0) * 100.0
            }
            _ => 0.0,
        }
    }

    /// The `status=active` filter semantics: active flag set, not past
    /// expiry, and not before the start date when one is set.
    pub fn is_live_at(&self, today: NaiveDate) -> bool {
        if !self.is_active {
            return false;
        }
        if today > self.expiry_date {
            return false;
        }
        if let Some(start) = self.start_date {
            if today < start {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PromoCreate {
    pub code: String,
    pub discount: f64,
    pub discount_type: DiscountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    pub code_type: CodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PromoCreate {
    /// Normalizes the code to uppercase and checks the creation invariants
    /// the backend enforces, so obviously bad payloads never leave the client.
    pub fn normalize_and_validate(&mut self, today: NaiveDate) -> Result<(), String> {
        self.code = self.code.trim().to_uppercase();
        if self.code.is_empty() {
            return Err("code: This field is required.".to_string());
        }
        if self.expiry_date <= today {
            return Err("expiry_date: Date must be in the future.".to_string());
        }
        if self.discount <= 0.0 {
            return Err("discount: Must be greater than zero.".to_string());
        }
        if self.discount_type == DiscountType::Percent && self.discount > 100.0 {
            return Err("discount: Percentage cannot exceed 100.".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PromoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromoStats {
    pub total: u64,
    pub active: u64,
    pub expired: u64,
    pub total_usage: u64,
}

/// Client-side code generation for bulk create: uppercased prefix plus a
/// short random suffix, de-duplicated so exactly `count` distinct codes come
/// back.
pub fn generate_bulk_codes(prefix: &str, count: usize) -> Vec<String> {
    let prefix = prefix.trim().to_uppercase();
    let mut seen = HashSet::with_capacity(count);
    let mut codes = Vec::with_capacity(count);
    while codes.len() < count {
        let suffix: String = uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(6)
            .collect::<String>()
            .to_uppercase();
        let code = format!("{prefix}-{suffix}");
        if seen.insert(code.clone()) {
            codes.push(code);
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_promo() -> PromoCode {
        PromoCode {
            id: 1,
            code: "DIWALI25".to_string(),
            discount: 25.0,
            discount_type: DiscountType::Percent,
            start_date: Some(day("2025-10-01")),
            expiry_date: day("2025-11-15"),
            usage_count: 0,
            usage_limit: Some(100),
            code_type: CodeType::Public,
            is_active: true,
            service_type: None,
            assigned_to: None,
            description: None,
        }
    }

    #[test]
    fn test_usage_progress_monotone_and_clamped() {
        let mut promo = sample_promo();
        let mut last = -1.0;
        for count in [0, 1, 50, 99, 100, 150] {
            promo.usage_count = count;
            let progress = promo.usage_progress();
            assert!(progress >= last, "progress decreased at count={count}");
            assert!(progress <= 100.0, "progress exceeded 100 at count={count}");
            last = progress;
        }
        promo.usage_count = 150;
        assert_eq!(promo.usage_progress(), 100.0);
    }

    #[test]
    fn test_usage_progress_no_limit() {
        let mut promo = sample_promo();
        promo.usage_limit = None;
        promo.usage_count = 500;
        assert_eq!(promo.usage_progress(), 0.0);
        promo.usage_limit = Some(0);
        assert_eq!(promo.usage_progress(), 0.0);
    }

    #[test]
    fn test_live_filter_excludes_inactive() {
        let mut promo = sample_promo();
        promo.is_active = false;
        assert!(!promo.is_live_at(day("2025-10-15")));
    }

    #[test]
    fn test_live_filter_excludes_expired() {
        let promo = sample_promo();
        assert!(!promo.is_live_at(day("2025-11-16")));
        // Expiry day itself still counts.
        assert!(promo.is_live_at(day("2025-11-15")));
    }

    #[test]
    fn test_live_filter_excludes_not_yet_started() {
        let promo = sample_promo();
        assert!(!promo.is_live_at(day("2025-09-30")));
        assert!(promo.is_live_at(day("2025-10-01")));
    }

    #[test]
    fn test_live_filter_no_start_date() {
        let mut promo = sample_promo();
        promo.start_date = None;
        assert!(promo.is_live_at(day("2025-01-01")));
    }

    #[test]
    fn test_bulk_codes_prefix_and_distinct() {
        let codes = generate_bulk_codes("summer", 5);
        assert_eq!(codes.len(), 5);
        let unique: HashSet<&String> = codes.iter().collect();
        assert_eq!(unique.len(), 5);
        for code in &codes {
            assert!(code.starts_with("SUMMER"), "bad prefix: {code}");
        }
    }

    #[test]
    fn test_create_validation_uppercases_code() {
        let mut payload = PromoCreate {
            code: " welcome10 ".to_string(),
            discount: 10.0,
            discount_type: DiscountType::Percent,
            start_date: None,
            expiry_date: day("2025-12-31"),
            usage_limit: Some(50),
            code_type: CodeType::Public,
            service_type: None,
            assigned_to: None,
            description: None,
        };
        payload.normalize_and_validate(day("2025-06-01")).unwrap();
        assert_eq!(payload.code, "WELCOME10");
    }

    #[test]
    fn test_create_validation_rejects_past_expiry() {
        let mut payload = PromoCreate {
            code: "OLD".to_string(),
            discount: 10.0,
            discount_type: DiscountType::Fixed,
            start_date: None,
            expiry_date: day("2025-01-01"),
            usage_limit: None,
            code_type: CodeType::Public,
            service_type: None,
            assigned_to: None,
            description: None,
        };
        let err = payload.normalize_and_validate(day("2025-06-01")).unwrap_err();
        assert!(err.contains("expiry_date"));
    }

    #[test]
    fn test_create_validation_rejects_percent_over_100() {
        let mut payload = PromoCreate {
            code: "BIG".to_string(),
            discount: 120.0,
            discount_type: DiscountType::Percent,
            start_date: None,
            expiry_date: day("2025-12-31"),
            usage_limit: None,
            code_type: CodeType::Public,
            service_type: None,
            assigned_to: None,
            description: None,
        };
        assert!(payload.normalize_and_validate(day("2025-06-01")).is_err());
    }

    #[test]
    fn test_code_type_wire_format() {
        let json = serde_json::to_string(&CodeType::ServiceSpecific).unwrap();
        assert_eq!(json, "\"SERVICE_SPECIFIC\"");
    }
}
