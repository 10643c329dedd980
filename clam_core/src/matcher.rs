mod registry;
mod token;

pub use registry::*;
pub use token::*;
