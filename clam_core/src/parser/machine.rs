use std::collections::HashSet;

use crate::api::{CliOption, Value};
use crate::matcher::{classify, OptionRegistry, Token};
use crate::model::OptionKind;
use crate::parser::{Issue, Manifest};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State<'r, 't> {
    Begin,
    ReadNextToken,
    ParseOptionName(&'t str),
    ParseOptionFlag(char),
    ParseOptionFlagSet(&'t str),
    ParseNameAssignment { name: &'t str, value: &'t str },
    ParseFlagAssignment { flag: char, value: &'t str },
    ParseOptionValue(&'r CliOption),
    ParseArgument(&'t str),
    ParseMalformed(&'t str),
    ParseRemainder,
    End,
}

/// Drives a single parse: consumes the tokens one at a time, accumulating into a [`Manifest`].
///
/// Issues never halt the machine, with the exception of the token stream ending while a parameter option awaits its value.
pub(crate) struct StateMachine<'r, 't> {
    registry: &'r OptionRegistry,
    tokens: std::slice::Iter<'t, &'t str>,
    current: &'t str,
    manifest: Manifest,
    // Options which occurred, whether or not their value was accumulated.
    occurred: HashSet<&'r str>,
    issues: Vec<Issue>,
}

impl<'r, 't> StateMachine<'r, 't> {
    pub(crate) fn new(registry: &'r OptionRegistry, tokens: &'t [&'t str]) -> Self {
        Self {
            registry,
            tokens: tokens.iter(),
            current: "",
            manifest: Manifest::new(),
            occurred: HashSet::default(),
            issues: Vec::default(),
        }
    }

    pub(crate) fn run(mut self) -> (Manifest, Vec<Issue>) {
        let mut state = State::Begin;

        loop {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("State: {state:?}");
            }

            state = match state {
                State::Begin => State::ReadNextToken,
                State::ReadNextToken => self.read_next_token(),
                State::ParseOptionName(name) => self.parse_option_name(name),
                State::ParseOptionFlag(flag) => self.parse_option_flag(flag),
                State::ParseOptionFlagSet(flags) => self.parse_option_flag_set(flags),
                State::ParseNameAssignment { name, value } => {
                    let option = self.registry.lookup_by_name(name);
                    self.parse_assignment(option, format!("--{name}"), value)
                }
                State::ParseFlagAssignment { flag, value } => {
                    let option = self.registry.lookup_by_flag(flag);
                    self.parse_assignment(option, format!("-{flag}"), value)
                }
                State::ParseOptionValue(option) => self.parse_option_value(option),
                State::ParseArgument(argument) => {
                    self.manifest.accumulate_positional_argument(argument);
                    State::ReadNextToken
                }
                State::ParseMalformed(token) => {
                    self.issues.push(Issue::MalformedOption {
                        token: token.to_string(),
                    });
                    State::ReadNextToken
                }
                State::ParseRemainder => self.parse_remainder(),
                State::End => break,
            };
        }

        (self.manifest, self.issues)
    }

    fn read_next_token(&mut self) -> State<'r, 't> {
        let raw = match self.tokens.next() {
            Some(raw) => *raw,
            None => return State::End,
        };
        self.current = raw;

        match classify(raw) {
            Token::OptionName(name) => State::ParseOptionName(name),
            Token::OptionFlag(flag) => State::ParseOptionFlag(flag),
            Token::OptionFlagSet(flags) => State::ParseOptionFlagSet(flags),
            Token::NameAssignment { name, value } => State::ParseNameAssignment { name, value },
            Token::FlagAssignment { flag, value } => State::ParseFlagAssignment { flag, value },
            Token::RemainderSentinel => State::ParseRemainder,
            Token::Argument(argument) => State::ParseArgument(argument),
            Token::Malformed(token) => State::ParseMalformed(token),
        }
    }

    fn parse_option_name(&mut self, name: &str) -> State<'r, 't> {
        match self.registry.lookup_by_name(name) {
            Some(option) => self.process_option(option),
            None => self.unrecognized(),
        }
    }

    fn parse_option_flag(&mut self, flag: char) -> State<'r, 't> {
        match self.registry.lookup_by_flag(flag) {
            Some(option) => self.process_option(option),
            None => self.unrecognized(),
        }
    }

    fn unrecognized(&mut self) -> State<'r, 't> {
        self.issues.push(Issue::UnrecognizedOption {
            token: self.current.to_string(),
        });
        State::ReadNextToken
    }

    fn process_option(&mut self, option: &'r CliOption) -> State<'r, 't> {
        self.check_recurrence(option);

        match option.kind() {
            OptionKind::Switch => {
                self.manifest.accumulate_switch(option.name());
                State::ReadNextToken
            }
            OptionKind::Parameter => State::ParseOptionValue(option),
        }
    }

    fn parse_option_value(&mut self, option: &'r CliOption) -> State<'r, 't> {
        // The value is taken verbatim, even when it looks like an option (or the sentinel).
        match self.tokens.next() {
            Some(raw) => {
                let raw = *raw;
                self.current = raw;
                self.accumulate_value(option, raw);
                State::ReadNextToken
            }
            None => {
                self.issues.push(Issue::MissingArgument {
                    option: option.name().to_string(),
                });
                State::End
            }
        }
    }

    fn parse_option_flag_set(&mut self, flags: &str) -> State<'r, 't> {
        let mut switches = Vec::default();

        // All or nothing: a single bad flag rejects the whole group.
        for flag in flags.chars() {
            match self.registry.lookup_by_flag(flag) {
                Some(option) if option.kind() == OptionKind::Switch => switches.push(option),
                _ => {
                    self.issues.push(Issue::InvalidFlagGroup {
                        token: self.current.to_string(),
                        flag,
                    });
                    return State::ReadNextToken;
                }
            }
        }

        for option in switches {
            self.check_recurrence(option);
            self.manifest.accumulate_switch(option.name());
        }

        State::ReadNextToken
    }

    fn parse_assignment(
        &mut self,
        option: Option<&'r CliOption>,
        invocation: String,
        value: &str,
    ) -> State<'r, 't> {
        match option {
            None => {
                self.issues
                    .push(Issue::UnrecognizedOption { token: invocation });
            }
            Some(option) => match option.kind() {
                OptionKind::Switch => {
                    self.issues.push(Issue::UnexpectedAssignment {
                        option: option.name().to_string(),
                        token: self.current.to_string(),
                    });
                }
                OptionKind::Parameter => {
                    self.check_recurrence(option);
                    self.accumulate_value(option, value);
                }
            },
        }

        State::ReadNextToken
    }

    fn parse_remainder(&mut self) -> State<'r, 't> {
        for raw in self.tokens.by_ref() {
            self.manifest.accumulate_positional_argument(*raw);
        }

        State::End
    }

    fn check_recurrence(&mut self, option: &'r CliOption) {
        // Reported, but the occurrence is still accumulated.
        if !self.occurred.insert(option.name()) && !option.is_recurrent() {
            self.issues.push(Issue::UnexpectedRecurrence {
                option: option.name().to_string(),
            });
        }
    }

    fn accumulate_value(&mut self, option: &CliOption, raw: &str) {
        let value = match option.transformer_ref() {
            Some(transformer) => match transformer.transform(raw) {
                Ok(value) => value,
                Err(error) => {
                    self.issues.push(Issue::ArgumentConversionFailed {
                        option: option.name().to_string(),
                        value: raw.to_string(),
                        reason: error.to_string(),
                    });
                    return;
                }
            },
            None => Value::Text(raw.to_string()),
        };

        self.manifest.accumulate_value(option.name(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FloatTransformer, IntegerTransformer};
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn registry() -> OptionRegistry {
        OptionRegistry::build([
            CliOption::switch("verbose").flag('v').recurrent(),
            CliOption::switch("quiet").flag('q'),
            CliOption::switch("all").flag('a').recurrent(),
            CliOption::parameter("name").flag('n').recurrent(),
            CliOption::parameter("count")
                .flag('c')
                .transformer(IntegerTransformer),
            CliOption::parameter("ratio").transformer(FloatTransformer),
        ])
        .unwrap()
    }

    fn run(tokens: &[&str]) -> (Manifest, Vec<Issue>) {
        let registry = registry();
        StateMachine::new(&registry, tokens).run()
    }

    fn text(values: &[&str]) -> Vec<Value> {
        values.iter().map(|value| Value::from(*value)).collect()
    }

    #[test]
    fn empty() {
        let (manifest, issues) = run(&[]);
        assert!(manifest.is_empty());
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[rstest]
    #[case(vec!["a"])]
    #[case(vec!["a", "b", "a"])]
    #[case(vec!["", "-", "a b", "=", ":x"])]
    fn positional_only(#[case] tokens: Vec<&str>) {
        let (manifest, issues) = run(tokens.as_slice());
        assert_eq!(manifest.positional_arguments(), tokens.as_slice());
        assert_eq!(manifest.option_names().count(), 0);
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn switch_repeated() {
        for _ in 0..20 {
            let count: usize = thread_rng().gen_range(1..20);
            let tokens: Vec<&str> = (0..count)
                .map(|i| if i % 2 == 0 { "-v" } else { "--verbose" })
                .collect();

            let (manifest, issues) = run(tokens.as_slice());

            assert_eq!(manifest.switch_count("verbose"), count);
            assert!(issues.is_empty(), "{issues:?}");
        }
    }

    #[rstest]
    #[case(vec!["--name", "alice"])]
    #[case(vec!["-n", "alice"])]
    #[case(vec!["--name=alice"])]
    #[case(vec!["--name:alice"])]
    #[case(vec!["-n=alice"])]
    #[case(vec!["-n:alice"])]
    fn parameter_forms(#[case] tokens: Vec<&str>) {
        let (manifest, issues) = run(tokens.as_slice());
        assert_eq!(manifest.values("name"), text(&["alice"]).as_slice());
        assert!(manifest.positional_arguments().is_empty());
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn parameter_recurrent_order() {
        let (manifest, issues) = run(&["-n", "b", "--name=a", "x", "--name", "b", "-n:c"]);
        assert_eq!(manifest.values("name"), text(&["b", "a", "b", "c"]).as_slice());
        assert_eq!(manifest.positional_arguments(), &["x"]);
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[rstest]
    #[case("--verbose")]
    #[case("-v")]
    #[case("--")]
    #[case("--unknown")]
    #[case("--=")]
    #[case("-vq")]
    fn parameter_value_verbatim(#[case] value: &str) {
        let (manifest, issues) = run(&["--name", value, "after"]);
        assert_eq!(manifest.values("name"), text(&[value]).as_slice());
        assert_eq!(manifest.switch_count("verbose"), 0);
        assert_eq!(manifest.positional_arguments(), &["after"]);
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[rstest]
    #[case(vec!["--name"])]
    #[case(vec!["-n"])]
    #[case(vec!["-v", "--name"])]
    fn missing_argument(#[case] tokens: Vec<&str>) {
        let (manifest, issues) = run(tokens.as_slice());
        assert_eq!(manifest.occurrences("name"), 0);
        assert_eq!(
            issues,
            vec![Issue::MissingArgument {
                option: "name".to_string()
            }]
        );
    }

    #[test]
    fn remainder() {
        let (manifest, issues) = run(&["-v", "--", "-v", "--name", "--", "x", "--bogus="]);
        assert_eq!(manifest.switch_count("verbose"), 1);
        assert_eq!(manifest.occurrences("name"), 0);
        assert_eq!(
            manifest.positional_arguments(),
            &["-v", "--name", "--", "x", "--bogus="]
        );
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn flag_set() {
        let (manifest, issues) = run(&["-vaq", "-av"]);
        assert_eq!(manifest.switch_count("verbose"), 2);
        assert_eq!(manifest.switch_count("all"), 2);
        assert_eq!(manifest.switch_count("quiet"), 1);
        assert_eq!(
            manifest.option_names().collect::<Vec<&str>>(),
            vec!["verbose", "all", "quiet"]
        );
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[rstest]
    #[case("-vax", 'x')]
    #[case("-xva", 'x')]
    #[case("-van", 'n')]
    #[case("-1.5", '1')]
    fn flag_set_invalid(#[case] token: &str, #[case] flag: char) {
        let (manifest, issues) = run(&[token]);
        assert_eq!(manifest.option_names().count(), 0);
        assert!(manifest.positional_arguments().is_empty());
        assert_eq!(
            issues,
            vec![Issue::InvalidFlagGroup {
                token: token.to_string(),
                flag,
            }]
        );
    }

    #[rstest]
    #[case("--bogus", "--bogus")]
    #[case("-x", "-x")]
    #[case("--bogus=1", "--bogus")]
    #[case("-x:1", "-x")]
    fn unrecognized(#[case] token: &str, #[case] expected: &str) {
        let (manifest, issues) = run(&[token, "-v"]);
        assert_eq!(manifest.switch_count("verbose"), 1);
        assert_eq!(
            issues,
            vec![Issue::UnrecognizedOption {
                token: expected.to_string()
            }]
        );
    }

    #[rstest]
    #[case("---")]
    #[case("--dry-run")]
    #[case("--=x")]
    fn malformed_reported_once(#[case] token: &str) {
        let (manifest, issues) = run(&[token]);
        assert!(manifest.is_empty());
        assert_eq!(
            issues,
            vec![Issue::MalformedOption {
                token: token.to_string()
            }]
        );
    }

    #[rstest]
    #[case("--verbose=1")]
    #[case("-v=1")]
    #[case("-q:")]
    fn assignment_to_switch(#[case] token: &str) {
        let (manifest, issues) = run(&[token]);
        assert_eq!(manifest.option_names().count(), 0);
        assert_matches!(&issues[..], [Issue::UnexpectedAssignment { token: t, .. }] => {
            assert_eq!(t, token);
        });
    }

    #[test]
    fn recurrence() {
        let (manifest, issues) = run(&["-q", "--quiet", "--count", "1", "-c=2"]);
        assert_eq!(manifest.switch_count("quiet"), 2);
        assert_eq!(
            manifest.values("count"),
            &[Value::Integer(1), Value::Integer(2)]
        );
        assert_eq!(
            issues,
            vec![
                Issue::UnexpectedRecurrence {
                    option: "quiet".to_string()
                },
                Issue::UnexpectedRecurrence {
                    option: "count".to_string()
                },
            ]
        );
    }

    #[test]
    fn recurrence_after_failed_conversion() {
        let (manifest, issues) = run(&["--count", "x", "--count", "2"]);
        assert_eq!(manifest.values("count"), &[Value::Integer(2)]);
        assert_eq!(issues.len(), 2, "{issues:?}");
        assert_matches!(&issues[0], Issue::ArgumentConversionFailed { option, value, .. } => {
            assert_eq!(option, "count");
            assert_eq!(value, "x");
        });
        assert_eq!(
            issues[1],
            Issue::UnexpectedRecurrence {
                option: "count".to_string()
            }
        );
    }

    #[test]
    fn recurrence_in_flag_set() {
        let (manifest, issues) = run(&["-qq"]);
        assert_eq!(manifest.switch_count("quiet"), 2);
        assert_eq!(
            issues,
            vec![Issue::UnexpectedRecurrence {
                option: "quiet".to_string()
            }]
        );
    }

    #[test]
    fn transformer() {
        let (manifest, issues) = run(&["--count=7", "--ratio", "0.5"]);
        assert_eq!(manifest.value("count"), Some(&Value::Integer(7)));
        assert_eq!(manifest.value("ratio"), Some(&Value::Float(0.5)));
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn transformer_failure() {
        let (manifest, issues) = run(&["--count", "seven", "--ratio=x", "-v"]);
        assert!(!manifest.has_option("count"));
        assert!(!manifest.has_option("ratio"));
        assert_eq!(manifest.switch_count("verbose"), 1);
        assert_eq!(issues.len(), 2);
        assert_matches!(&issues[0], Issue::ArgumentConversionFailed { option, value, reason } => {
            assert_eq!(option, "count");
            assert_eq!(value, "seven");
            assert_eq!(reason, "cannot convert 'seven' to i64.");
        });
        assert_matches!(&issues[1], Issue::ArgumentConversionFailed { option, value, .. } => {
            assert_eq!(option, "ratio");
            assert_eq!(value, "x");
        });
    }

    #[test]
    fn accumulates_every_issue() {
        let (manifest, issues) = run(&[
            "--bogus", "-vx", "--a-b", "--verbose=1", "--count", "z", "keep", "-q", "-q",
        ]);
        assert_eq!(manifest.positional_arguments(), &["keep"]);
        assert_eq!(manifest.switch_count("quiet"), 2);
        assert_eq!(issues.len(), 6);
        assert_matches!(issues[0], Issue::UnrecognizedOption { .. });
        assert_matches!(issues[1], Issue::InvalidFlagGroup { flag: 'x', .. });
        assert_matches!(issues[2], Issue::MalformedOption { .. });
        assert_matches!(issues[3], Issue::UnexpectedAssignment { .. });
        assert_matches!(issues[4], Issue::ArgumentConversionFailed { .. });
        assert_matches!(issues[5], Issue::UnexpectedRecurrence { .. });
    }

    #[test]
    fn example_mixed() {
        let (manifest, issues) = run(&["-v", "--name=alice", "extra"]);
        assert_eq!(manifest.switch_count("verbose"), 1);
        assert_eq!(manifest.values("name"), text(&["alice"]).as_slice());
        assert_eq!(manifest.positional_arguments(), &["extra"]);
        assert!(issues.is_empty(), "{issues:?}");
    }
}
