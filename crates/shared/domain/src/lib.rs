//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`).
//! Keep it lean: no I/O, networking, or heavy logic. Data, plus the stateless phone
//! normalization transforms every form field relies on.

pub mod config;
pub mod phone;
