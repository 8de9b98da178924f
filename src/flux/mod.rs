//! Upwind flux staging.
//!
//! [`gather_incoming_flux`] fills the per-(cell, angle) incoming flux buffer
//! that the face coupling consumes.

mod gather;

pub use gather::gather_incoming_flux;
