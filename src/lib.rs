//! `clam` is a command line argument grammar engine for Rust.
//!
//! Rather than binding arguments directly onto program variables, `clam` parses the Cli into a *manifest*: a record of which options occurred, how often, with which values, and which positional arguments were given.
//! Relationships between options are declared separately, as *constraints*, and checked against the completed manifest.
//! Specifically, `clam` prioritizes the following design concerns:
//! * *Exact lexical semantics*:
//! Every token is classified the same way, every time (`--name`, `--name=value`, `-f`, `-abc`, `-f=value`, `--`, and plain arguments).
//! * *Report everything*:
//! Parsing does not stop at the first problem; every independent issue in the input is collected and returned together.
//! * *Declarative relationships*:
//! Required, mutually exclusive, standalone, and occurrence-limited options are data, not hand written `if` statements.
//! * *Shareable configuration*:
//! A configured [`ArgumentParser`] is immutable, so a single parser may run any number of parses (even concurrently).
//!
//! # Usage
//! ```
//! use clam::{ArgumentParser, CliOption, Constraint, Issue, Value};
//!
//! let parser = ArgumentParser::new([
//!     CliOption::switch("verbose").flag('v').recurrent(),
//!     CliOption::switch("quiet").flag('q'),
//!     CliOption::parameter("output").flag('o').required(),
//! ])
//! .unwrap()
//! .constrain(Constraint::mutually_exclusive(["verbose", "quiet"]).unwrap())
//! .unwrap();
//!
//! let manifest = parser
//!     .parse_tokens(&["-vv", "--output=out.txt", "--", "-not-an-option"])
//!     .into_result()
//!     .unwrap();
//! assert_eq!(manifest.switch_count("verbose"), 2);
//! assert_eq!(manifest.value("output"), Some(&Value::from("out.txt")));
//! assert_eq!(manifest.positional_arguments(), &["-not-an-option"]);
//!
//! let issues = parser.parse_tokens(&["-v", "-q"]).into_result().unwrap_err();
//! assert_eq!(
//!     issues,
//!     vec![
//!         Issue::RequiredOptionMissing { option: "output".to_string() },
//!         Issue::MutuallyExclusiveOptionsPresent {
//!             options: vec!["verbose".to_string(), "quiet".to_string()],
//!         },
//!     ]
//! );
//! ```
//!
//! # Options
//! Options come in two kinds:
//! * [`CliOption::switch`]: a boolean option, which accumulates an occurrence count (ex: `-vvv`).
//! * [`CliOption::parameter`]: an option which takes exactly one value per occurrence (ex: `--name alice`, `--name=alice`, `-n:alice`).
//!
//! Each option has a long name, and optionally a single character flag.
//! The declaration itself implies some constraints: `required`, non-`recurrent` (the default), `standalone`, and `depends_on`.
//!
//! Parameter values may be converted via a [`Transformer`].
//! A failed conversion is reported as an issue, and the value is not accumulated.
//!
//! # Constraints
//! Beyond what each option implies, constraints may be added to the parser directly ([`Constraint`]) or compiled from an option group ([`group::OptionGroup`]).
//! Any constraint may be *predicated* on an option, so that it is only checked when the predicate occurs.
//!
//! Constraints are only checked when parsing finds no issues.
//! A manifest built from malformed input is incomplete, and validating it would report misleading issues.
//!
//! # Features
//! * `tracing_debug`: emit `tracing::debug!` events for token classification, state machine transitions, and constraint checks.
//! * `unit_test`: expose [`ManifestBuilder`], to construct manifests directly in downstream tests.
#![deny(missing_docs)]
pub use clam_core::*;

pub mod group;
