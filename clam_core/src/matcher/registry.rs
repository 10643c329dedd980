use std::collections::HashMap;

use crate::api::CliOption;
use crate::parser::ConfigError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Name and flag lookup over a set of options.
///
/// Built once per option set, after which it may be shared read-only across any number of parses.
#[derive(Debug)]
pub struct OptionRegistry {
    options: Vec<CliOption>,
    names: HashMap<String, usize>,
    flags: HashMap<char, usize>,
}

impl OptionRegistry {
    /// Build the registry, checking each option's identifiers.
    ///
    /// Fails when an option name or flag is invalid, or when two options share a name or a flag.
    pub fn build(options: impl IntoIterator<Item = CliOption>) -> Result<Self, ConfigError> {
        let mut registered = Vec::default();
        let mut names = HashMap::default();
        let mut flags = HashMap::default();

        for (index, option) in options.into_iter().enumerate() {
            option.validate()?;

            if names.insert(option.name().to_string(), index).is_some() {
                return Err(ConfigError::DuplicateIdentifier(option.invocation()));
            }

            if let Some(flag) = option.flag_char() {
                if flags.insert(flag, index).is_some() {
                    return Err(ConfigError::DuplicateIdentifier(format!("-{flag}")));
                }
            }

            registered.push(option);
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Registered {} options ({} with flags).",
                registered.len(),
                flags.len()
            );
        }

        Ok(Self {
            options: registered,
            names,
            flags,
        })
    }

    /// Find the option with the (dashless) `name`.
    pub fn lookup_by_name(&self, name: &str) -> Option<&CliOption> {
        self.names.get(name).map(|index| &self.options[*index])
    }

    /// Find the option with the `flag`.
    pub fn lookup_by_flag(&self, flag: char) -> Option<&CliOption> {
        self.flags.get(&flag).map(|index| &self.options[*index])
    }

    /// Whether an option with the (dashless) `name` exists.
    pub fn has_option_named(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// The registered options, in declaration order.
    pub fn options(&self) -> &[CliOption] {
        &self.options
    }
}
