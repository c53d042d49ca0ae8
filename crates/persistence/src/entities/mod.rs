//! Database entities (row mappings).

pub mod guest;
pub mod wedding;

pub use guest::{GuestEntity, RsvpStatusDb, UpsertedGuestEntity};
pub use wedding::WeddingEntity;
