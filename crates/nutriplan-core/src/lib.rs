//! nutriplan-core: shared types for the diet plan pipeline.
//!
//! Two representations live here. [`DietPlan`] is what the reader produces
//! from free text: an ordered list of meals plus macro totals. [`Document`]
//! is the page tree the layout stage builds from a plan and the writers
//! turn into HTML or text.

mod document;
mod fidelity;
mod node;
mod plan;
mod properties;
mod resource;
mod stats;
mod traits;

pub use document::*;
pub use fidelity::*;
pub use node::*;
pub use plan::*;
pub use properties::*;
pub use resource::*;
pub use stats::*;
pub use traits::*;
