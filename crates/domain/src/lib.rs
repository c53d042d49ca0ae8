//! Domain layer for Wedding Manager backend.
//!
//! This crate contains:
//! - Domain models (Wedding, Guest, invitation types)
//! - The guest lifecycle rules (RSVP states, QR tokens, check-in wording)

pub mod models;
