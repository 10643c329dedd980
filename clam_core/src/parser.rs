mod base;
mod machine;
mod manifest;
mod validator;

pub use base::*;
pub(crate) use machine::*;
pub use manifest::*;
pub use validator::*;
