//! Shared utilities and common types for Wedding Manager backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT access token issuance and validation
//! - Common validation logic (slugs, RSVP fields)
//! - Pagination query parsing

pub mod jwt;
pub mod pagination;
pub mod validation;
