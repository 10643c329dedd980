/// The arity of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Takes no value; only the number of occurrences matters.
    Switch,
    /// Consumes precisely one value per occurrence.
    Parameter,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionKind::Switch => write!(f, "switch"),
            OptionKind::Parameter => write!(f, "parameter"),
        }
    }
}
