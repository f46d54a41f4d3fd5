pub mod booking;
pub mod page;
pub mod profile;
pub mod promo;

pub use booking::{
    is_cancellable_at, AssignmentRequest, AstrologyBooking, BookingStatus, PujaBooking,
    RescheduleRequest, StatusChangeRequest,
};
pub use page::{ListQuery, Paginated};
pub use profile::{Address, AddressPayload, PanCard, PanCardPayload, Profile, ProfileUpdate};
pub use promo::{
    generate_bulk_codes, CodeType, DiscountType, PromoCode, PromoCreate, PromoStats, PromoUpdate,
};
