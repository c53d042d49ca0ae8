//! Domain models for Wedding Manager.

pub mod guest;
pub mod invitation;
pub mod wedding;

pub use guest::{Guest, RsvpStatus};
pub use wedding::Wedding;
