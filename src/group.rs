//! Option groups: a convenience notation for common constraint patterns over several options.
//!
//! A group names its member options and, optionally, nested subgroups.
//! It compiles (flattens) into plain [`Constraint`]s, which are added to a parser through [`ArgumentParser::provide`](crate::ArgumentParser::provide).
//!
//! ### Example
//! ```
//! use clam::group::OptionGroup;
//! use clam::{ArgumentParser, CliOption, Issue};
//!
//! // Exactly one output format must be chosen.
//! let formats = OptionGroup::mutexed(["json", "yaml", "text"]).required();
//! let parser = ArgumentParser::new([
//!     CliOption::switch("json"),
//!     CliOption::switch("yaml"),
//!     CliOption::switch("text"),
//! ])
//! .unwrap()
//! .provide(&formats)
//! .unwrap();
//!
//! assert!(parser.parse_tokens(&["--yaml"]).is_success());
//! assert_eq!(
//!     parser.parse_tokens(&[]).issues(),
//!     &[Issue::NoneOfRequiredGroupPresent {
//!         options: vec!["json".to_string(), "yaml".to_string(), "text".to_string()],
//!     }]
//! );
//! ```
use clam_core::prelude::ConstraintProvider;
use clam_core::{ConfigError, Constraint};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A declaration over several options, compiled into [`Constraint`]s.
///
/// * `required`: at least one option of the group (including its subgroups) must occur.
/// * `mutexed`: at most one *member* may occur, where each option and each subgroup is a member.
/// Options inside the same subgroup may still occur together.
/// * `restricted`: every option of the group (including its subgroups) may occur at most once.
///
/// Subgroups contribute their own constraints as well, compiled the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    options: Vec<String>,
    subgroups: Vec<OptionGroup>,
    mutexed: bool,
    required: bool,
    restricted: bool,
}

impl OptionGroup {
    /// Create a plain group over `options`.
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            subgroups: Vec::default(),
            mutexed: false,
            required: false,
            restricted: false,
        }
    }

    /// Create a mutually exclusive group over `options`.
    pub fn mutexed<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        let mut group = Self::new(options);
        group.mutexed = true;
        group
    }

    /// Require at least one option of this group.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Limit every option of this group to at most one occurrence.
    pub fn restricted(mut self) -> Self {
        self.restricted = true;
        self
    }

    /// Nest `subgroups` as members of this group.
    pub fn subgroups(mut self, subgroups: impl IntoIterator<Item = OptionGroup>) -> Self {
        self.subgroups.extend(subgroups);
        self
    }

    /// The options declared directly on this group.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Whether at least one option of this group is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the members of this group are mutually exclusive.
    pub fn is_mutexed(&self) -> bool {
        self.mutexed
    }

    /// Whether the options of this group are limited to one occurrence.
    pub fn is_restricted(&self) -> bool {
        self.restricted
    }

    /// Every option in this group, followed by those of its subgroups (depth first).
    pub fn all_options(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.options.iter().map(String::as_str).collect();

        for subgroup in &self.subgroups {
            names.extend(subgroup.all_options());
        }

        names
    }

    // Each direct option is its own member; each subgroup is one member.
    fn members(&self) -> Vec<Vec<&str>> {
        self.options
            .iter()
            .map(|option| vec![option.as_str()])
            .chain(self.subgroups.iter().map(OptionGroup::all_options))
            .collect()
    }

    fn mutex_constraints(&self) -> Result<Vec<Constraint>, ConfigError> {
        if self.subgroups.is_empty() {
            return Ok(vec![Constraint::mutually_exclusive(&self.options)?]);
        }

        let members = self.members();
        let mut constraints = Vec::default();

        for (i, left) in members.iter().enumerate() {
            for right in &members[i + 1..] {
                for a in left {
                    for b in right {
                        constraints.push(Constraint::mutually_exclusive([*a, *b])?);
                    }
                }
            }
        }

        Ok(constraints)
    }
}

impl ConstraintProvider for OptionGroup {
    fn constraints(&self) -> Result<Vec<Constraint>, ConfigError> {
        let mut constraints = Vec::default();

        if self.required {
            constraints.push(Constraint::any_required(self.all_options())?);
        }

        if self.mutexed {
            constraints.extend(self.mutex_constraints()?);
        }

        if self.restricted {
            constraints.extend(
                self.all_options()
                    .into_iter()
                    .map(Constraint::occurrences_limited),
            );
        }

        for subgroup in &self.subgroups {
            constraints.extend(subgroup.constraints()?);
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Compiled {self:?} into {} constraints.", constraints.len());
        }

        Ok(constraints)
    }
}
