//! Traits which, typically, may be imported without concern: `use clam::prelude::*`.

use crate::api::Constraint;
use crate::parser::ConfigError;

/// Behaviour for declarations that compile into [`Constraint`]s.
// Implemented by `CliOption`, and by higher level declarations such as option groups.
pub trait ConstraintProvider {
    /// The constraints this declaration stands for, in evaluation order.
    fn constraints(&self) -> Result<Vec<Constraint>, ConfigError>;
}
