//! Application services.

pub mod qr;
