//! HTTP route handlers.

pub mod checkin;
pub mod guests;
pub mod health;
pub mod invitations;
pub mod rsvp;
pub mod weddings;
