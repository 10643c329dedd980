use std::collections::HashSet;

use crate::parser::ConfigError;

/// The rule a [`Constraint`] applies, along with the option names it applies to.
///
/// Each kind carries exactly the fields it needs, so a kind/field mismatch cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// `significant` must occur at least once.
    Required {
        /// The required option.
        significant: String,
    },
    /// At least one of `banded` must occur.
    AnyRequired {
        /// The candidate options.
        banded: Vec<String>,
    },
    /// At most one of `banded` may occur.
    MutuallyExclusive {
        /// The exclusive options.
        banded: Vec<String>,
    },
    /// When `significant` occurs, no other option may occur, except those in `whitelist`.
    Standalone {
        /// The standalone option.
        significant: String,
        /// The options allowed alongside it.
        whitelist: Vec<String>,
    },
    /// `significant` may occur at most once.
    OccurrencesLimited {
        /// The limited option.
        significant: String,
    },
}

/// A declarative rule over option names, checked against a completed manifest.
///
/// A constraint may be *predicated* on an option, in which case it is only evaluated when that option occurs.
///
/// ### Example
/// ```
/// # use clam_core as clam;
/// use clam::Constraint;
///
/// // When --mode is given, --fast and --safe may not both be given.
/// let constraint = Constraint::mutually_exclusive(["fast", "safe"])
///     .unwrap()
///     .predicated_on("mode");
///
/// assert_eq!(constraint.predicate(), Some("mode"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    kind: ConstraintKind,
    predicate: Option<String>,
}

impl Constraint {
    fn new(kind: ConstraintKind) -> Self {
        Self {
            kind,
            predicate: None,
        }
    }

    /// `option` must occur at least once.
    pub fn required(option: impl Into<String>) -> Self {
        Self::new(ConstraintKind::Required {
            significant: option.into(),
        })
    }

    /// At least one of `options` must occur.
    pub fn any_required<S: Into<String>>(
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self, ConfigError> {
        let kind = ConstraintKind::AnyRequired {
            banded: band("any required", options)?,
        };
        Ok(Self::new(kind))
    }

    /// At most one of `options` may occur.
    pub fn mutually_exclusive<S: Into<String>>(
        options: impl IntoIterator<Item = S>,
    ) -> Result<Self, ConfigError> {
        let kind = ConstraintKind::MutuallyExclusive {
            banded: band("mutually exclusive", options)?,
        };
        Ok(Self::new(kind))
    }

    /// When `option` occurs, no other option may occur, except those in `whitelist`.
    ///
    /// The whitelist may be empty, but may not contain duplicates.
    pub fn standalone<S: Into<String>>(
        option: impl Into<String>,
        whitelist: impl IntoIterator<Item = S>,
    ) -> Result<Self, ConfigError> {
        let whitelist: Vec<String> = whitelist.into_iter().map(Into::into).collect();
        check_duplicates(&whitelist)?;
        Ok(Self::new(ConstraintKind::Standalone {
            significant: option.into(),
            whitelist,
        }))
    }

    /// `option` may occur at most once.
    pub fn occurrences_limited(option: impl Into<String>) -> Self {
        Self::new(ConstraintKind::OccurrencesLimited {
            significant: option.into(),
        })
    }

    /// Only evaluate this constraint when `option` occurs.
    /// If repeated, only the final predicate will apply.
    pub fn predicated_on(mut self, option: impl Into<String>) -> Self {
        self.predicate.replace(option.into());
        self
    }

    /// The rule.
    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// The predicating option, if any.
    pub fn predicate(&self) -> Option<&str> {
        self.predicate.as_deref()
    }

    /// Every option name this constraint refers to, including the predicate.
    pub fn referenced_options(&self) -> Vec<&str> {
        let mut names: Vec<&str> = match &self.kind {
            ConstraintKind::Required { significant }
            | ConstraintKind::OccurrencesLimited { significant } => vec![significant.as_str()],
            ConstraintKind::AnyRequired { banded } | ConstraintKind::MutuallyExclusive { banded } => {
                banded.iter().map(String::as_str).collect()
            }
            ConstraintKind::Standalone {
                significant,
                whitelist,
            } => std::iter::once(significant.as_str())
                .chain(whitelist.iter().map(String::as_str))
                .collect(),
        };

        if let Some(predicate) = &self.predicate {
            names.push(predicate);
        }

        names
    }
}

fn band<S: Into<String>>(
    label: &'static str,
    options: impl IntoIterator<Item = S>,
) -> Result<Vec<String>, ConfigError> {
    let banded: Vec<String> = options.into_iter().map(Into::into).collect();

    if banded.is_empty() {
        return Err(ConfigError::EmptyBand(label));
    }

    check_duplicates(&banded)?;
    Ok(banded)
}

fn check_duplicates(options: &[String]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for option in options {
        if !seen.insert(option.as_str()) {
            return Err(ConfigError::DuplicateBandedOption(option.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required() {
        let constraint = Constraint::required("name");
        assert_eq!(
            constraint.kind(),
            &ConstraintKind::Required {
                significant: "name".to_string()
            }
        );
        assert_eq!(constraint.predicate(), None);
        assert_eq!(constraint.referenced_options(), vec!["name"]);
    }

    #[test]
    fn mutually_exclusive() {
        let constraint = Constraint::mutually_exclusive(["a", "b"])
            .unwrap()
            .predicated_on("x")
            .predicated_on("mode");
        assert_eq!(
            constraint.kind(),
            &ConstraintKind::MutuallyExclusive {
                banded: vec!["a".to_string(), "b".to_string()]
            }
        );
        assert_eq!(constraint.predicate(), Some("mode"));
        assert_eq!(constraint.referenced_options(), vec!["a", "b", "mode"]);
    }

    #[test]
    fn empty_band() {
        assert_eq!(
            Constraint::any_required(Vec::<String>::default()).unwrap_err(),
            ConfigError::EmptyBand("any required")
        );
        assert_eq!(
            Constraint::mutually_exclusive(Vec::<String>::default()).unwrap_err(),
            ConfigError::EmptyBand("mutually exclusive")
        );
    }

    #[test]
    fn duplicate_band() {
        assert_eq!(
            Constraint::any_required(["a", "b", "a"]).unwrap_err(),
            ConfigError::DuplicateBandedOption("a".to_string())
        );
        assert_eq!(
            Constraint::standalone("s", ["w", "w"]).unwrap_err(),
            ConfigError::DuplicateBandedOption("w".to_string())
        );
    }

    #[test]
    fn standalone() {
        let constraint = Constraint::standalone("interactive", Vec::<String>::default()).unwrap();
        assert_eq!(
            constraint.kind(),
            &ConstraintKind::Standalone {
                significant: "interactive".to_string(),
                whitelist: vec![],
            }
        );

        let constraint = Constraint::standalone("interactive", ["verbose"]).unwrap();
        assert_eq!(constraint.referenced_options(), vec!["interactive", "verbose"]);
    }
}
