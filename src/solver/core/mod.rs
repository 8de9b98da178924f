//! Flux storage.
//!
//! Every buffer keeps the group index fastest-varying so that the per-group
//! loops in the kernel walk contiguous memory.
//!
//! - [`PsiData`]: angular flux (and angular source) over the whole mesh
//! - [`PsiBound`]: partition-boundary exchange buffer
//! - [`LocalPsiBound`], [`CellGroupData`]: per-(cell, angle) working buffers
//! - [`ScalarFlux`]: angle-integrated flux

mod bound;
mod local;
mod psi;
mod scalar_flux;

pub use bound::PsiBound;
pub use local::{CellGroupData, LocalPsiBound};
pub use psi::{AngleFlux, AngleFluxMut, PsiData};
pub use scalar_flux::ScalarFlux;
