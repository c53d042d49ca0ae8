//! Repository implementations.

pub mod guest;
pub mod wedding;

pub use guest::GuestRepository;
pub use wedding::WeddingRepository;
