//! Policy implementations
//!
//! - [`WeightedPolicy`]: perturbed max/min over stored state weights
//! - [`RandomPolicy`]: uniform baseline

pub mod random;
pub mod weighted;

pub use random::RandomPolicy;
pub use weighted::WeightedPolicy;

pub use crate::ports::{Decision, Policy};
