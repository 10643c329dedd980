use thiserror::Error;

/// A programmer error in the option or constraint declarations.
///
/// These are detected before any argument vector is processed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An option name is empty or contains a reserved character (`-`, `=`, `:`, whitespace).
    #[error("Config error: invalid option name '{0}'.")]
    InvalidName(String),

    /// An option flag is a reserved character.
    #[error("Config error: invalid option flag '{0}'.")]
    InvalidFlag(char),

    /// A transformer was set on a switch option, which takes no value.
    #[error("Config error: switch option '{0}' cannot have a transformer.")]
    SwitchTransformer(String),

    /// Two options share a name, or share a flag.
    #[error("Config error: cannot duplicate the option identifier '{0}'.")]
    DuplicateIdentifier(String),

    /// A constraint kind that bands options was given none.
    #[error("Config error: {0} constraint requires at least one banded option.")]
    EmptyBand(&'static str),

    /// A constraint bands the same option more than once.
    #[error("Config error: cannot band the option '{0}' more than once.")]
    DuplicateBandedOption(String),

    /// A constraint references an option that is not registered.
    #[error("Config error: constraint references unknown option '{0}'.")]
    UnknownOption(String),
}

/// A diagnostic produced while parsing or validating an argument vector.
///
/// Parse-time issues identify the offending token or option.
/// Validation-time issues identify the options involved in the violated constraint.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Issue {
    /// The option name or flag is not registered.
    #[error("unrecognized option '{token}'.")]
    UnrecognizedOption {
        /// The option as the user wrote it (ex: `--foo`, `-f`).
        token: String,
    },

    /// The token resembles option syntax, but is lexically invalid.
    #[error("malformed option '{token}'.")]
    MalformedOption {
        /// The raw token.
        token: String,
    },

    /// A flag set contains a flag that is unknown, or that does not belong to a switch option.
    #[error("invalid flag group '{token}': '-{flag}' is not a known switch.")]
    InvalidFlagGroup {
        /// The raw token.
        token: String,
        /// The first flag which failed.
        flag: char,
    },

    /// The argument vector ended while a parameter option was waiting for its value.
    #[error("expected an argument for option '{option}'.")]
    MissingArgument {
        /// The parameter option.
        option: String,
    },

    /// An inline value was assigned to a switch option.
    #[error("option '{option}' does not accept an inline value ('{token}').")]
    UnexpectedAssignment {
        /// The switch option.
        option: String,
        /// The raw token.
        token: String,
    },

    /// The option's transformer refused the value.
    #[error("invalid argument '{value}' for option '{option}': {reason}")]
    ArgumentConversionFailed {
        /// The parameter option.
        option: String,
        /// The raw, unconverted value.
        value: String,
        /// The transformer's explanation.
        reason: String,
    },

    /// A non-recurrent option occurred more than once.
    #[error("option '{option}' may not be provided more than once.")]
    UnexpectedRecurrence {
        /// The option.
        option: String,
    },

    /// A required option did not occur.
    #[error("--{option}: required option not provided.")]
    RequiredOptionMissing {
        /// The required option.
        option: String,
    },

    /// None of a group of options, one of which is required, occurred.
    #[error("one or more of the following options must be provided: {}.", display_options(.options))]
    NoneOfRequiredGroupPresent {
        /// The banded options.
        options: Vec<String>,
    },

    /// More than one of a group of mutually exclusive options occurred.
    #[error("the following options are mutually exclusive: {}.", display_options(.options))]
    MutuallyExclusiveOptionsPresent {
        /// The options which occurred.
        options: Vec<String>,
    },

    /// A standalone option occurred alongside options outside its whitelist.
    #[error("--{option} may not be provided with other options: {}.", display_options(.offending))]
    StandaloneOptionViolated {
        /// The standalone option.
        option: String,
        /// The options which may not accompany it.
        offending: Vec<String>,
    },

    /// An occurrence-limited option occurred more than once.
    #[error("--{option} may not be provided more than once (provided {occurrences} times).")]
    OccurrenceLimitExceeded {
        /// The option.
        option: String,
        /// How many times it occurred.
        occurrences: usize,
    },
}

fn display_options(options: &[String]) -> String {
    options
        .iter()
        .map(|option| format!("--{option}"))
        .collect::<Vec<String>>()
        .join(", ")
}

impl Issue {
    /// Whether this issue was found by constraint validation, as opposed to parsing.
    pub fn is_validation_issue(&self) -> bool {
        match self {
            Issue::UnrecognizedOption { .. }
            | Issue::MalformedOption { .. }
            | Issue::InvalidFlagGroup { .. }
            | Issue::MissingArgument { .. }
            | Issue::UnexpectedAssignment { .. }
            | Issue::ArgumentConversionFailed { .. }
            | Issue::UnexpectedRecurrence { .. } => false,
            Issue::RequiredOptionMissing { .. }
            | Issue::NoneOfRequiredGroupPresent { .. }
            | Issue::MutuallyExclusiveOptionsPresent { .. }
            | Issue::StandaloneOptionViolated { .. }
            | Issue::OccurrenceLimitExceeded { .. } => true,
        }
    }

    /// The option names this issue concerns.
    ///
    /// Empty when the issue is about a token that resolves to no option.
    pub fn salient_options(&self) -> Vec<&str> {
        match self {
            Issue::UnrecognizedOption { .. }
            | Issue::MalformedOption { .. }
            | Issue::InvalidFlagGroup { .. } => Vec::default(),
            Issue::MissingArgument { option }
            | Issue::UnexpectedAssignment { option, .. }
            | Issue::ArgumentConversionFailed { option, .. }
            | Issue::UnexpectedRecurrence { option }
            | Issue::RequiredOptionMissing { option }
            | Issue::OccurrenceLimitExceeded { option, .. } => vec![option.as_str()],
            Issue::NoneOfRequiredGroupPresent { options }
            | Issue::MutuallyExclusiveOptionsPresent { options } => {
                options.iter().map(String::as_str).collect()
            }
            Issue::StandaloneOptionViolated { option, offending } => {
                std::iter::once(option.as_str())
                    .chain(offending.iter().map(String::as_str))
                    .collect()
            }
        }
    }
}
