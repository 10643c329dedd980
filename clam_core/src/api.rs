mod constraint;
mod core;
mod option;
mod transformer;

pub use self::core::*;
pub use constraint::*;
pub use option::*;
pub use transformer::*;
