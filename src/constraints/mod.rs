//! Constraint bounds attached to every generated record, and the three-tier
//! override chain (global -> portfolio -> brand) that produces them.

mod percent;
mod resolver;

pub use percent::Percent;
pub use resolver::{resolve, ConfigLayer, ConstraintSet, PartialConstraintSet};
