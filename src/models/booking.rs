use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rejected,
    Failed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Failed => "FAILED",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "CONFIRMED" => BookingStatus::Confirmed,
            "COMPLETED" => BookingStatus::Completed,
            "CANCELLED" => BookingStatus::Cancelled,
            "REJECTED" => BookingStatus::Rejected,
            "FAILED" => BookingStatus::Failed,
            _ => BookingStatus::Pending,
        }
    }

    /// Terminal statuses admit no further transitions from the admin panel.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Cancelled | BookingStatus::Rejected
        )
    }
}

/// True iff the scheduled time is at least 24 hours away. The boundary is
/// inclusive: exactly 24h is still cancellable, one second less is not.
pub fn is_cancellable_at(scheduled: NaiveDateTime, now: NaiveDateTime) -> bool {
    scheduled - now >= Duration::hours(24)
}

/// A puja or regular service booking as the admin endpoints return it.
/// Created by the backend on checkout; the client only ever transitions its
/// status, never deletes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PujaBooking {
    pub id: i64,
    /// Human-facing booking code, e.g. `BK-2024-000123`.
    pub book_id: Option<String>,
    pub status: BookingStatus,
    pub service_title: Option<String>,
    pub user_name: Option<String>,
    pub customer_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_number: Option<String>,
    pub booking_date: Option<NaiveDate>,
    /// `HH:MM` or `HH:MM:SS`, as sent by the backend.
    pub start_time: Option<String>,
    pub assigned_to: Option<i64>,
    pub total_amount: Option<String>,
    pub payment_status: Option<String>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl PujaBooking {
    /// Canonical identifier for API paths and selection state: the booking
    /// code when the backend sent one, otherwise the numeric id.
    pub fn key(&self) -> String {
        match &self.book_id {
            Some(code) if !code.is_empty() => code.clone(),
            _ => self.id.to_string(),
        }
    }

    /// Single resolution point for the aliased name fields.
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .or(self.customer_name.as_deref())
            .or(self.contact_name.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        let date = self.booking_date?;
        let time = parse_wire_time(self.start_time.as_deref()?)?;
        Some(date.and_time(time))
    }

    pub fn is_cancellable(&self, now: NaiveDateTime) -> bool {
        match self.scheduled_at() {
            Some(scheduled) => !self.status.is_terminal() && is_cancellable_at(scheduled, now),
            None => false,
        }
    }
}

/// An astrology consultation booking. Always carries its human-facing
/// `astro_book_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AstrologyBooking {
    pub id: i64,
    pub astro_book_id: String,
    pub status: BookingStatus,
    pub service_title: Option<String>,
    pub astrologer_name: Option<String>,
    pub user_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<String>,
    pub birth_place: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub birth_time: Option<String>,
    pub question: Option<String>,
    pub payment_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

impl AstrologyBooking {
    pub fn key(&self) -> String {
        self.astro_book_id.clone()
    }

    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Unknown")
    }

    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        let date = self.preferred_date?;
        let time = parse_wire_time(self.preferred_time.as_deref()?)?;
        Some(date.and_time(time))
    }

    pub fn is_cancellable(&self, now: NaiveDateTime) -> bool {
        match self.scheduled_at() {
            Some(scheduled) => !self.status.is_terminal() && is_cancellable_at(scheduled, now),
            None => false,
        }
    }
}

fn parse_wire_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusChangeRequest {
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RescheduleRequest {
    pub new_date: NaiveDate,
    /// `HH:MM`, matching what the backend accepts.
    pub new_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentRequest {
    pub employee_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn sample_booking() -> PujaBooking {
        PujaBooking {
            id: 42,
            book_id: Some("BK-2025-000042".to_string()),
            status: BookingStatus::Confirmed,
            service_title: Some("Ganesh Puja".to_string()),
            user_name: None,
            customer_name: None,
            contact_name: None,
            contact_email: None,
            contact_number: None,
            booking_date: Some(NaiveDate::from_ymd_opt(2025, 7, 2).unwrap()),
            start_time: Some("10:00".to_string()),
            assigned_to: None,
            total_amount: Some("1500.00".to_string()),
            payment_status: Some("PAID".to_string()),
            notes: None,
            cancellation_reason: None,
            created_at: None,
        }
    }

    #[test]
    fn test_cancellable_exactly_24h() {
        let scheduled = dt("2025-07-02 10:00:00");
        assert!(is_cancellable_at(scheduled, dt("2025-07-01 10:00:00")));
    }

    #[test]
    fn test_not_cancellable_one_second_inside_window() {
        let scheduled = dt("2025-07-02 10:00:00");
        assert!(!is_cancellable_at(scheduled, dt("2025-07-01 10:00:01")));
    }

    #[test]
    fn test_cancellable_far_future() {
        let scheduled = dt("2025-08-01 10:00:00");
        assert!(is_cancellable_at(scheduled, dt("2025-07-01 10:00:00")));
    }

    #[test]
    fn test_not_cancellable_in_past() {
        let scheduled = dt("2025-06-30 10:00:00");
        assert!(!is_cancellable_at(scheduled, dt("2025-07-01 10:00:00")));
    }

    #[test]
    fn test_booking_cancellable_uses_schedule_and_status() {
        let mut booking = sample_booking();
        assert!(booking.is_cancellable(dt("2025-07-01 09:00:00")));
        assert!(!booking.is_cancellable(dt("2025-07-01 11:00:00")));

        booking.status = BookingStatus::Cancelled;
        assert!(!booking.is_cancellable(dt("2025-07-01 09:00:00")));
    }

    #[test]
    fn test_key_prefers_booking_code() {
        let mut booking = sample_booking();
        assert_eq!(booking.key(), "BK-2025-000042");
        booking.book_id = None;
        assert_eq!(booking.key(), "42");
        booking.book_id = Some(String::new());
        assert_eq!(booking.key(), "42");
    }

    #[test]
    fn test_display_name_fallback_order() {
        let mut booking = sample_booking();
        assert_eq!(booking.display_name(), "Unknown");
        booking.contact_name = Some("Contact".to_string());
        assert_eq!(booking.display_name(), "Contact");
        booking.customer_name = Some("Customer".to_string());
        assert_eq!(booking.display_name(), "Customer");
        booking.user_name = Some("User".to_string());
        assert_eq!(booking.display_name(), "User");
    }

    #[test]
    fn test_scheduled_at_accepts_both_time_formats() {
        let mut booking = sample_booking();
        assert_eq!(booking.scheduled_at(), Some(dt("2025-07-02 10:00:00")));
        booking.start_time = Some("10:00:30".to_string());
        assert_eq!(booking.scheduled_at(), Some(dt("2025-07-02 10:00:30")));
        booking.start_time = Some("bogus".to_string());
        assert_eq!(booking.scheduled_at(), None);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");
        let parsed: BookingStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(parsed, BookingStatus::Cancelled);
    }

    #[test]
    fn test_status_from_str_defaults_to_pending() {
        assert_eq!(BookingStatus::from_str("confirmed"), BookingStatus::Confirmed);
        assert_eq!(BookingStatus::from_str("nonsense"), BookingStatus::Pending);
    }
}
