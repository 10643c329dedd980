use std::env;

use crate::api::{CliOption, Constraint};
use crate::matcher::OptionRegistry;
use crate::parser::{ConfigError, Issue, Manifest, ManifestValidator, StateMachine};
use crate::prelude::ConstraintProvider;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The configured argument parser.
///
/// Holds the option registry and the constraints to validate.
/// Parsing never mutates the parser, so one parser may serve any number of (concurrent) parses.
///
/// ### Example
/// ```
/// # use clam_core as clam;
/// use clam::{ArgumentParser, CliOption, Constraint, Value};
///
/// let parser = ArgumentParser::new([
///     CliOption::switch("verbose").flag('v').recurrent(),
///     CliOption::parameter("name").flag('n'),
///     CliOption::switch("quiet").flag('q'),
/// ])
/// .unwrap()
/// .constrain(Constraint::mutually_exclusive(["verbose", "quiet"]).unwrap())
/// .unwrap();
///
/// let outcome = parser.parse_tokens(&["-vv", "--name=alice", "extra"]);
/// assert!(outcome.is_success());
/// assert_eq!(outcome.manifest().switch_count("verbose"), 2);
/// assert_eq!(outcome.manifest().value("name"), Some(&Value::from("alice")));
/// assert_eq!(outcome.manifest().positional_arguments(), &["extra"]);
///
/// let outcome = parser.parse_tokens(&["-v", "-q"]);
/// assert_eq!(outcome.issues().len(), 1);
/// ```
#[derive(Debug)]
pub struct ArgumentParser {
    registry: OptionRegistry,
    constraints: Vec<Constraint>,
}

impl ArgumentParser {
    /// Create a parser over `options`.
    ///
    /// The constraints implied by each option (required, non-recurrent, standalone, dependencies) are derived here, in declaration order.
    pub fn new(options: impl IntoIterator<Item = CliOption>) -> Result<Self, ConfigError> {
        let registry = OptionRegistry::build(options)?;
        let mut constraints = Vec::default();

        for option in registry.options() {
            constraints.extend(option.constraints()?);
        }

        let parser = Self {
            registry,
            constraints: Vec::default(),
        };
        parser.with_constraints(constraints)
    }

    /// Add a single constraint, validated after any previously added constraints.
    pub fn constrain(self, constraint: Constraint) -> Result<Self, ConfigError> {
        self.with_constraints([constraint])
    }

    /// Add the constraints compiled from `provider` (ex: an option group).
    pub fn provide(self, provider: &impl ConstraintProvider) -> Result<Self, ConfigError> {
        let constraints = provider.constraints()?;
        self.with_constraints(constraints)
    }

    /// Add constraints, validated after any previously added constraints.
    ///
    /// Fails if a constraint refers to an option which is not registered.
    pub fn with_constraints(
        mut self,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Result<Self, ConfigError> {
        for constraint in constraints {
            if let Some(unknown) = constraint
                .referenced_options()
                .into_iter()
                .find(|name| !self.registry.has_option_named(name))
            {
                return Err(ConfigError::UnknownOption(unknown.to_string()));
            }

            self.constraints.push(constraint);
        }

        Ok(self)
    }

    /// The option registry.
    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Every constraint, in validation order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Run the parser against the input tokens (excluding the program name).
    ///
    /// Parsing happens in two phases:
    /// 1. The state machine matches every token, accumulating a [`Manifest`] along with any parse issues.
    /// Parsing never stops early (except when the final option is missing its value), so every independent problem is reported.
    /// 2. If, and only if, parsing found no issues, the constraints are validated against the manifest.
    ///
    /// The manifest is always returned, even when issues were found.
    pub fn parse_tokens(&self, tokens: &[&str]) -> ParseOutcome {
        let (manifest, mut issues) = StateMachine::new(&self.registry, tokens).run();

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Parsed {} tokens with {} issues.", tokens.len(), issues.len());
        }

        // A manifest with parse issues is incomplete; validating it would only mislead.
        if issues.is_empty() {
            issues = ManifestValidator::new(&manifest).validate(&self.constraints);
        }

        ParseOutcome { manifest, issues }
    }

    /// Run the parser against the Cli [`env::args`], skipping the program name.
    /// See [`ArgumentParser::parse_tokens`].
    pub fn parse(&self) -> ParseOutcome {
        let command_input: Vec<String> = env::args().skip(1).collect();
        self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }
}

/// The result of a parse: the manifest, plus every parse or validation issue.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    manifest: Manifest,
    issues: Vec<Issue>,
}

impl ParseOutcome {
    /// The accumulated manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Every issue, in the order found.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Whether no issues were found.
    pub fn is_success(&self) -> bool {
        self.issues.is_empty()
    }

    /// Split into the manifest and the issues.
    pub fn into_parts(self) -> (Manifest, Vec<Issue>) {
        (self.manifest, self.issues)
    }

    /// The manifest, or the issues if there were any.
    pub fn into_result(self) -> Result<Manifest, Vec<Issue>> {
        if self.issues.is_empty() {
            Ok(self.manifest)
        } else {
            Err(self.issues)
        }
    }
}

/// Parse `argv` (excluding the program name) against `options`, validating the constraints the options imply.
///
/// ### Example
/// ```
/// # use clam_core as clam;
/// use clam::{parse, CliOption, Issue};
///
/// let (manifest, issues) = parse(&[], [CliOption::parameter("name").flag('n').required()]).unwrap();
/// assert!(manifest.is_empty());
/// assert_eq!(issues, vec![Issue::RequiredOptionMissing { option: "name".to_string() }]);
/// ```
pub fn parse(
    argv: &[&str],
    options: impl IntoIterator<Item = CliOption>,
) -> Result<(Manifest, Vec<Issue>), ConfigError> {
    Ok(ArgumentParser::new(options)?.parse_tokens(argv).into_parts())
}
