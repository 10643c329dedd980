use std::collections::HashMap;

use crate::api::Value;

#[derive(Debug, Clone, PartialEq)]
enum Accumulation {
    Switch(usize),
    Parameter(Vec<Value>),
}

impl Accumulation {
    fn occurrences(&self) -> usize {
        match self {
            Accumulation::Switch(count) => *count,
            Accumulation::Parameter(values) => values.len(),
        }
    }
}

/// The result of parsing one argument vector.
///
/// Switch options accumulate an occurrence count; parameter options accumulate their (converted) values, in order.
/// Options which did not occur are absent, rather than stored with a zero count.
/// Everything else (including every token after `--`) is kept as a positional argument, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    // Kept in first-occurrence order.
    entries: Vec<(String, Accumulation)>,
    index: HashMap<String, usize>,
    positional_arguments: Vec<String>,
}

impl Manifest {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, name: &str) -> Option<&mut Accumulation> {
        match self.index.get(name) {
            Some(index) => Some(&mut self.entries[*index].1),
            None => None,
        }
    }

    fn insert(&mut self, name: &str, accumulation: Accumulation) {
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), accumulation));
    }

    pub(crate) fn accumulate_switch(&mut self, name: &str) {
        match self.entry(name) {
            Some(Accumulation::Switch(count)) => *count += 1,
            Some(Accumulation::Parameter(_)) => {
                unreachable!("internal error - switch '{name}' accumulated as a parameter")
            }
            None => self.insert(name, Accumulation::Switch(1)),
        }
    }

    pub(crate) fn accumulate_value(&mut self, name: &str, value: Value) {
        match self.entry(name) {
            Some(Accumulation::Parameter(values)) => values.push(value),
            Some(Accumulation::Switch(_)) => {
                unreachable!("internal error - parameter '{name}' accumulated as a switch")
            }
            None => self.insert(name, Accumulation::Parameter(vec![value])),
        }
    }

    pub(crate) fn accumulate_positional_argument(&mut self, argument: impl Into<String>) {
        self.positional_arguments.push(argument.into());
    }

    fn get(&self, name: &str) -> Option<&Accumulation> {
        self.index.get(name).map(|index| &self.entries[*index].1)
    }

    /// How many times the option occurred (`0` when absent).
    pub fn occurrences(&self, name: &str) -> usize {
        self.get(name).map(Accumulation::occurrences).unwrap_or(0)
    }

    /// Whether the option occurred at least once.
    pub fn has_option(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The occurrence count of a switch option (`0` when absent, or when `name` is a parameter option).
    pub fn switch_count(&self, name: &str) -> usize {
        match self.get(name) {
            Some(Accumulation::Switch(count)) => *count,
            _ => 0,
        }
    }

    /// The values of a parameter option, in order (empty when absent, or when `name` is a switch option).
    pub fn values(&self, name: &str) -> &[Value] {
        match self.get(name) {
            Some(Accumulation::Parameter(values)) => values,
            _ => &[],
        }
    }

    /// The final value of a parameter option.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values(name).last()
    }

    /// The names of the options which occurred, in order of their first occurrence.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// The positional arguments, in their original order.
    pub fn positional_arguments(&self) -> &[String] {
        &self.positional_arguments
    }

    /// Whether nothing at all was accumulated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.positional_arguments.is_empty()
    }
}

/// *Available using 'unit_test' crate feature only.*</br></br>
/// Build a [`Manifest`] directly, for testing code which consumes manifests.
///
/// ### Example
/// ```
/// # #[cfg(feature = "unit_test")] {
/// # use clam_core as clam;
/// use clam::{ManifestBuilder, Value};
///
/// let manifest = ManifestBuilder::default()
///     .switch("verbose", 2)
///     .value("name", "alice")
///     .positional("extra")
///     .build();
///
/// assert_eq!(manifest.switch_count("verbose"), 2);
/// assert_eq!(manifest.values("name"), &[Value::from("alice")]);
/// # }
/// ```
#[cfg(any(test, feature = "unit_test"))]
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    manifest: Manifest,
}

#[cfg(any(test, feature = "unit_test"))]
impl ManifestBuilder {
    /// Accumulate `count` occurrences of a switch option.
    ///
    /// # Panics
    /// If `name` was already given a value (see [`ManifestBuilder::value`]).
    pub fn switch(mut self, name: &str, count: usize) -> Self {
        for _ in 0..count {
            self.manifest.accumulate_switch(name);
        }
        self
    }

    /// Accumulate a value for a parameter option.
    ///
    /// # Panics
    /// If `name` was already given switch occurrences (see [`ManifestBuilder::switch`]).
    pub fn value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.manifest.accumulate_value(name, value.into());
        self
    }

    /// Accumulate a positional argument.
    pub fn positional(mut self, argument: impl Into<String>) -> Self {
        self.manifest.accumulate_positional_argument(argument);
        self
    }

    /// Finish the manifest.
    pub fn build(self) -> Manifest {
        self.manifest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};

    #[test]
    fn empty() {
        let manifest = Manifest::new();
        assert!(manifest.is_empty());
        assert_eq!(manifest.occurrences("a"), 0);
        assert!(!manifest.has_option("a"));
        assert!(manifest.values("a").is_empty());
        assert_eq!(manifest.value("a"), None);
        assert_eq!(manifest.option_names().count(), 0);
    }

    #[test]
    fn switch() {
        for _ in 0..20 {
            let count: usize = thread_rng().gen_range(1..50);
            let mut manifest = Manifest::new();

            for _ in 0..count {
                manifest.accumulate_switch("verbose");
            }

            assert_eq!(manifest.switch_count("verbose"), count);
            assert_eq!(manifest.occurrences("verbose"), count);
            assert!(manifest.has_option("verbose"));
            assert!(manifest.values("verbose").is_empty());
            assert!(!manifest.is_empty());
        }
    }

    #[test]
    fn parameter() {
        let mut manifest = Manifest::new();
        manifest.accumulate_value("name", Value::from("b"));
        manifest.accumulate_value("name", Value::from("a"));
        manifest.accumulate_value("name", Value::from("b"));

        assert_eq!(
            manifest.values("name"),
            &[Value::from("b"), Value::from("a"), Value::from("b")]
        );
        assert_eq!(manifest.value("name"), Some(&Value::from("b")));
        assert_eq!(manifest.occurrences("name"), 3);
        assert_eq!(manifest.switch_count("name"), 0);
    }

    #[test]
    fn option_names_order() {
        let manifest = ManifestBuilder::default()
            .value("zulu", "1")
            .switch("alpha", 1)
            .value("zulu", "2")
            .switch("mike", 3)
            .build();

        assert_eq!(
            manifest.option_names().collect::<Vec<&str>>(),
            vec!["zulu", "alpha", "mike"]
        );
    }

    #[test]
    #[should_panic]
    fn builder_mixed_kinds() {
        ManifestBuilder::default()
            .switch("name", 1)
            .value("name", "alice")
            .build();
    }

    #[test]
    fn positional_arguments() {
        let manifest = ManifestBuilder::default()
            .positional("b")
            .positional("--a")
            .positional("b")
            .build();

        assert_eq!(manifest.positional_arguments(), &["b", "--a", "b"]);
        assert_eq!(manifest.option_names().count(), 0);
        assert!(!manifest.is_empty());
    }
}
