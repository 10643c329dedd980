pub(crate) const REMAINDER_SENTINEL: &str = "--";
pub(crate) const NAME_PREFIX: &str = "--";
pub(crate) const FLAG_PREFIX: &str = "-";
pub(crate) const ASSIGNMENT_OPERATORS: [char; 2] = ['=', ':'];
pub(crate) const DASH: char = '-';

/// Whether `c` may appear in an option name or flag.
pub(crate) fn is_legal_identifier_char(c: char) -> bool {
    c != DASH && !ASSIGNMENT_OPERATORS.contains(&c) && !c.is_whitespace()
}

pub(crate) fn is_legal_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_legal_identifier_char)
}
