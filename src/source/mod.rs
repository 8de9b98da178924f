//! Fixed sources.
//!
//! - [`AngularSource`]: pointwise q(x, Ω, g), projected onto cell vertices
//!   by [`project_source`]
//! - [`UniformSource`]: constant isotropic source
//! - [`HatProblem`]: manufactured source with a known solution and its error norm

mod hat;
mod traits;

pub use hat::{HatL2Sums, HatProblem};
pub use traits::{AngularSource, SourceContext, UniformSource, project_source};
