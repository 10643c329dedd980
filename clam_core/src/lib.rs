//! Engine module for `clam`.
//! See [documentation root](https://docs.rs/clam/latest/clam/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use matcher::{classify, OptionRegistry, Token, TokenForm};
pub use model::*;
pub use parser::{validate, ConfigError, Issue, Manifest, ManifestValidator};

#[cfg(any(test, feature = "unit_test"))]
pub use parser::ManifestBuilder;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
