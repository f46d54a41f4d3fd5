pub mod astrology;
pub mod bookings;
pub mod profile;
pub mod promos;

pub use astrology::AstrologyBookingStore;
pub use bookings::BookingStore;
pub use profile::{ProfileState, ProfileStore};
pub use promos::PromoStore;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::ListQuery;

/// Monotonic request sequence for a store. A fetch response is applied only
/// while its ticket is still the latest issued; anything older is discarded,
/// so a slow response cannot overwrite newer state.
pub(crate) struct Fence(AtomicU64);

impl Fence {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

/// In-memory view of one backend collection: the cached page plus the
/// filter/pagination state the next fetch is built from.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub query: ListQuery,
    pub total: u64,
    pub total_pages: u32,
    /// Canonical key of the record highlighted in the UI, if any.
    pub selected: Option<String>,
}

impl<T> ViewState<T> {
    pub(crate) fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            query: ListQuery::new(page_size),
            total: 0,
            total_pages: 0,
            selected: None,
        }
    }
}
