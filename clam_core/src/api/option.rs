use std::sync::Arc;

use crate::api::{Constraint, Transformer};
use crate::constant::{is_legal_identifier_char, is_legal_name};
use crate::model::OptionKind;
use crate::parser::ConfigError;
use crate::prelude::ConstraintProvider;

/// An option descriptor.
///
/// Options are declared once, via the consuming builder methods, and are immutable thereafter.
/// Names are dashless (ex: `verbose` for `--verbose`).
///
/// ### Example
/// ```
/// # use clam_core as clam;
/// use clam::{CliOption, IntegerTransformer, OptionKind};
///
/// let verbose = CliOption::switch("verbose").flag('v').recurrent();
/// let count = CliOption::parameter("count")
///     .flag('c')
///     .required()
///     .transformer(IntegerTransformer);
///
/// assert_eq!(verbose.kind(), OptionKind::Switch);
/// assert_eq!(count.flag_char(), Some('c'));
/// assert!(count.is_required());
/// ```
#[derive(Clone)]
pub struct CliOption {
    kind: OptionKind,
    name: String,
    flag: Option<char>,
    required: bool,
    recurrent: bool,
    standalone: Option<Vec<String>>,
    dependencies: Vec<String>,
    transformer: Option<Arc<dyn Transformer>>,
}

impl CliOption {
    fn new(kind: OptionKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            flag: None,
            required: false,
            recurrent: false,
            standalone: None,
            dependencies: Vec::default(),
            transformer: None,
        }
    }

    /// Create a switch option: it takes no value, only its occurrences are counted.
    pub fn switch(name: impl Into<String>) -> Self {
        Self::new(OptionKind::Switch, name)
    }

    /// Create a parameter option: each occurrence consumes precisely one value.
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::new(OptionKind::Parameter, name)
    }

    /// Set the single character short identifier (ex: `v` for `-v`).
    /// If repeated, only the final flag will apply.
    pub fn flag(mut self, flag: char) -> Self {
        self.flag.replace(flag);
        self
    }

    /// Require that this option occurs at least once.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allow this option to occur more than once.
    pub fn recurrent(mut self) -> Self {
        self.recurrent = true;
        self
    }

    /// Make this option exclusive of every other option.
    pub fn standalone(self) -> Self {
        self.standalone_with(Vec::<String>::default())
    }

    /// Make this option exclusive of every other option, except those in `whitelist`.
    pub fn standalone_with<S: Into<String>>(mut self, whitelist: impl IntoIterator<Item = S>) -> Self {
        self.standalone
            .replace(whitelist.into_iter().map(Into::into).collect());
        self
    }

    /// Require the `dependency` option whenever this option occurs.
    pub fn depends_on(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    /// Convert each value of this (parameter) option with `transformer`.
    ///
    /// Switch options take no value, so building a switch with a transformer fails.
    pub fn transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer.replace(Arc::new(transformer));
        self
    }

    /// The dashless long identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short identifier, if any.
    pub fn flag_char(&self) -> Option<char> {
        self.flag
    }

    /// Switch or parameter.
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Whether this option must occur at least once.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether this option may occur more than once.
    pub fn is_recurrent(&self) -> bool {
        self.recurrent
    }

    /// Whether this option is exclusive of (almost) every other option.
    pub fn is_standalone(&self) -> bool {
        self.standalone.is_some()
    }

    /// The options allowed alongside a standalone option.
    pub fn standalone_whitelist(&self) -> &[String] {
        self.standalone.as_deref().unwrap_or_default()
    }

    /// The options required whenever this option occurs.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Whether a transformer is configured.
    pub fn has_transformer(&self) -> bool {
        self.transformer.is_some()
    }

    pub(crate) fn transformer_ref(&self) -> Option<&dyn Transformer> {
        self.transformer.as_deref()
    }

    /// How the user would write the long form of this option.
    pub(crate) fn invocation(&self) -> String {
        format!("--{}", self.name)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !is_legal_name(&self.name) {
            return Err(ConfigError::InvalidName(self.name.clone()));
        }

        if let Some(flag) = self.flag {
            if !is_legal_identifier_char(flag) {
                return Err(ConfigError::InvalidFlag(flag));
            }
        }

        if self.kind == OptionKind::Switch && self.transformer.is_some() {
            return Err(ConfigError::SwitchTransformer(self.name.clone()));
        }

        Ok(())
    }
}

impl ConstraintProvider for CliOption {
    fn constraints(&self) -> Result<Vec<Constraint>, ConfigError> {
        let mut constraints = Vec::default();

        if self.required {
            constraints.push(Constraint::required(self.name.clone()));
        }

        // Parsing reports recurrence itself; this covers manifests validated outside `ArgumentParser`.
        if !self.recurrent {
            constraints.push(Constraint::occurrences_limited(self.name.clone()));
        }

        if let Some(whitelist) = &self.standalone {
            constraints.push(Constraint::standalone(self.name.clone(), whitelist.clone())?);
        }

        for dependency in &self.dependencies {
            constraints
                .push(Constraint::required(dependency.clone()).predicated_on(self.name.clone()));
        }

        Ok(constraints)
    }
}

impl PartialEq for CliOption {
    fn eq(&self, other: &Self) -> bool {
        let same_transformer = match (&self.transformer, &other.transformer) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };

        self.kind == other.kind
            && self.name == other.name
            && self.flag == other.flag
            && self.required == other.required
            && self.recurrent == other.recurrent
            && self.standalone == other.standalone
            && self.dependencies == other.dependencies
            && same_transformer
    }
}

impl std::fmt::Debug for CliOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flag = match &self.flag {
            Some(flag) => format!(" -{flag},"),
            None => "".to_string(),
        };

        write!(
            f,
            "{kind}[--{name},{flag} required={required}, recurrent={recurrent}, standalone={standalone}]",
            kind = self.kind,
            name = self.name,
            required = self.required,
            recurrent = self.recurrent,
            standalone = self.is_standalone(),
        )
    }
}
