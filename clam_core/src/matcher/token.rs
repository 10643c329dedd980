use crate::constant::*;

/// The lexical form of a single argument vector element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenForm {
    /// `--name`
    OptionName,
    /// `-f`
    OptionFlag,
    /// `-fgh`
    OptionFlagSet,
    /// `--name=value`, `--name:value`
    NameAssignment,
    /// `-f=value`, `-f:value`
    FlagAssignment,
    /// `--`
    RemainderSentinel,
    /// Anything which isn't option syntax, including a bare `-`.
    Argument,
    /// Resembles option syntax, but is lexically invalid (ex: `--`+`=value`).
    Malformed,
}

impl TokenForm {
    /// Whether this form introduces an option.
    pub fn is_kind_of_option(&self) -> bool {
        matches!(
            self,
            TokenForm::OptionName
                | TokenForm::OptionFlag
                | TokenForm::OptionFlagSet
                | TokenForm::NameAssignment
                | TokenForm::FlagAssignment
        )
    }
}

/// A classified token, borrowing its parts from the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'t> {
    /// `--name`, holding `name`.
    OptionName(&'t str),
    /// `-f`, holding `f`.
    OptionFlag(char),
    /// `-fgh`, holding `fgh`.
    /// Only a lexical candidate: whether every flag is a known switch is decided by the parser.
    OptionFlagSet(&'t str),
    /// `--name=value`, split at the first operator.
    NameAssignment {
        /// The option name.
        name: &'t str,
        /// Everything after the operator (may be empty).
        value: &'t str,
    },
    /// `-f=value`, split at the operator.
    FlagAssignment {
        /// The option flag.
        flag: char,
        /// Everything after the operator (may be empty).
        value: &'t str,
    },
    /// `--`
    RemainderSentinel,
    /// A positional argument.
    Argument(&'t str),
    /// The raw token, which resembles an option but is lexically invalid.
    Malformed(&'t str),
}

impl<'t> Token<'t> {
    /// The lexical form of this token.
    pub fn form(&self) -> TokenForm {
        match self {
            Token::OptionName(_) => TokenForm::OptionName,
            Token::OptionFlag(_) => TokenForm::OptionFlag,
            Token::OptionFlagSet(_) => TokenForm::OptionFlagSet,
            Token::NameAssignment { .. } => TokenForm::NameAssignment,
            Token::FlagAssignment { .. } => TokenForm::FlagAssignment,
            Token::RemainderSentinel => TokenForm::RemainderSentinel,
            Token::Argument(_) => TokenForm::Argument,
            Token::Malformed(_) => TokenForm::Malformed,
        }
    }
}

/// Classify a raw argument vector element.
///
/// Pure and total: every string has exactly one classification.
///
/// ### Example
/// ```
/// # use clam_core as clam;
/// use clam::{classify, Token};
///
/// assert_eq!(classify("--name=alice"), Token::NameAssignment { name: "name", value: "alice" });
/// assert_eq!(classify("-vx"), Token::OptionFlagSet("vx"));
/// assert_eq!(classify("-"), Token::Argument("-"));
/// ```
pub fn classify(raw: &str) -> Token<'_> {
    if raw == REMAINDER_SENTINEL {
        return Token::RemainderSentinel;
    }

    if let Some(remainder) = raw.strip_prefix(NAME_PREFIX) {
        return classify_name(raw, remainder);
    }

    if let Some(remainder) = raw.strip_prefix(FLAG_PREFIX) {
        return classify_flag(raw, remainder);
    }

    Token::Argument(raw)
}

fn classify_name<'t>(raw: &'t str, remainder: &'t str) -> Token<'t> {
    // The name ends at the first operator; anything after belongs to the value.
    match remainder.split_once(&ASSIGNMENT_OPERATORS[..]) {
        Some((name, value)) => {
            if is_legal_name(name) {
                Token::NameAssignment { name, value }
            } else {
                Token::Malformed(raw)
            }
        }
        None => {
            if is_legal_name(remainder) {
                Token::OptionName(remainder)
            } else {
                Token::Malformed(raw)
            }
        }
    }
}

fn classify_flag<'t>(raw: &'t str, remainder: &'t str) -> Token<'t> {
    let mut chars = remainder.char_indices();

    let flag = match chars.next() {
        Some((_, flag)) if is_legal_identifier_char(flag) => flag,
        _ => return Token::Argument(raw),
    };

    match chars.next() {
        None => Token::OptionFlag(flag),
        Some((index, operator)) if ASSIGNMENT_OPERATORS.contains(&operator) => {
            Token::FlagAssignment {
                flag,
                value: &remainder[index + operator.len_utf8()..],
            }
        }
        Some(_) => {
            if remainder.chars().all(is_legal_identifier_char) {
                Token::OptionFlagSet(remainder)
            } else {
                Token::Argument(raw)
            }
        }
    }
}
