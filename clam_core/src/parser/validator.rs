use crate::api::{Constraint, ConstraintKind};
use crate::parser::{Issue, Manifest};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Checks constraints against a completed [`Manifest`].
///
/// Validation is read-only: the same constraints checked against the same manifest always produce the same issues.
#[derive(Debug, Clone, Copy)]
pub struct ManifestValidator<'m> {
    manifest: &'m Manifest,
}

impl<'m> ManifestValidator<'m> {
    /// Create a validator over `manifest`.
    pub fn new(manifest: &'m Manifest) -> Self {
        Self { manifest }
    }

    /// Check every constraint, in order, returning an issue for each violation.
    pub fn validate(&self, constraints: &[Constraint]) -> Vec<Issue> {
        constraints
            .iter()
            .filter_map(|constraint| self.check(constraint))
            .collect()
    }

    /// Check a single constraint.
    ///
    /// Predicated constraints whose predicate did not occur are skipped (`None`).
    pub fn check(&self, constraint: &Constraint) -> Option<Issue> {
        if let Some(predicate) = constraint.predicate() {
            if !self.manifest.has_option(predicate) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Skipping {constraint:?}, predicate '{predicate}' absent.");
                }

                return None;
            }
        }

        let issue = match constraint.kind() {
            ConstraintKind::Required { significant } => self.check_required(significant),
            ConstraintKind::AnyRequired { banded } => self.check_any_required(banded),
            ConstraintKind::MutuallyExclusive { banded } => self.check_mutually_exclusive(banded),
            ConstraintKind::Standalone {
                significant,
                whitelist,
            } => self.check_standalone(significant, whitelist),
            ConstraintKind::OccurrencesLimited { significant } => {
                self.check_occurrences_limited(significant)
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Checked {constraint:?}: {issue:?}.");
        }

        issue
    }

    fn check_required(&self, significant: &str) -> Option<Issue> {
        if self.manifest.has_option(significant) {
            None
        } else {
            Some(Issue::RequiredOptionMissing {
                option: significant.to_string(),
            })
        }
    }

    fn check_any_required(&self, banded: &[String]) -> Option<Issue> {
        if banded.iter().any(|option| self.manifest.has_option(option)) {
            None
        } else {
            Some(Issue::NoneOfRequiredGroupPresent {
                options: banded.to_vec(),
            })
        }
    }

    fn check_mutually_exclusive(&self, banded: &[String]) -> Option<Issue> {
        let present: Vec<String> = banded
            .iter()
            .filter(|option| self.manifest.has_option(option))
            .cloned()
            .collect();

        if present.len() > 1 {
            Some(Issue::MutuallyExclusiveOptionsPresent { options: present })
        } else {
            None
        }
    }

    fn check_standalone(&self, significant: &str, whitelist: &[String]) -> Option<Issue> {
        if !self.manifest.has_option(significant) {
            return None;
        }

        let offending: Vec<String> = self
            .manifest
            .option_names()
            .filter(|option| *option != significant)
            .filter(|option| !whitelist.iter().any(|allowed| allowed == option))
            .map(str::to_string)
            .collect();

        if offending.is_empty() {
            None
        } else {
            Some(Issue::StandaloneOptionViolated {
                option: significant.to_string(),
                offending,
            })
        }
    }

    fn check_occurrences_limited(&self, significant: &str) -> Option<Issue> {
        let occurrences = self.manifest.occurrences(significant);

        if occurrences > 1 {
            Some(Issue::OccurrenceLimitExceeded {
                option: significant.to_string(),
                occurrences,
            })
        } else {
            None
        }
    }
}

/// Check `constraints` against `manifest`.
/// See [`ManifestValidator::validate`].
pub fn validate(constraints: &[Constraint], manifest: &Manifest) -> Vec<Issue> {
    ManifestValidator::new(manifest).validate(constraints)
}
