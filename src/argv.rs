//! Tokenize a raw argument vector into flag/value pairs.
//!
//! Recognized shapes:
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `--name` | long flag: a lowercase letter, then one or more of `[a-z0-9-]` |
//! | `-x` | short flag: one of `[A-Za-z?]` |
//! | `-abc` | run of short flags, each set on its own |
//!
//! Any other token is a value for the most recent flag, if that flag has not
//! received one yet, or is otherwise ignored. Tokens before the first flag are
//! always ignored: a real process argv starts with the executable (and often a
//! script path), neither of which is user input.

use indexmap::IndexMap;
use tracing::trace;

/// What a flag received on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// The flag appeared with no trailing value.
    Bare,
    Value(String),
}

impl ArgValue {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            ArgValue::Bare => None,
            ArgValue::Value(v) => Some(v),
        }
    }
}

/// Result of [`tokenize`]. `config` keeps the order in which each flag was
/// first seen; a repeated flag keeps its slot but takes the latest value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub config: IndexMap<String, ArgValue>,
    pub ignored: Vec<String>,
}

#[derive(Debug)]
enum Scan {
    SkippingPrefix,
    AwaitingFlag,
    AwaitingValue(String),
}

enum Token<'a> {
    Flag(&'a str),
    Run(&'a str),
    Plain,
}

pub fn is_long_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && !chars.as_str().is_empty()
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub fn is_short_name(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '?'
}

fn classify(token: &str) -> Token<'_> {
    if let Some(name) = token.strip_prefix("--") {
        if is_long_name(name) {
            return Token::Flag(name);
        }
        return Token::Plain;
    }
    let Some(body) = token.strip_prefix('-') else {
        return Token::Plain;
    };
    if body.is_empty() || !body.chars().all(is_short_name) {
        return Token::Plain;
    }
    if body.len() == 1 {
        Token::Flag(body)
    } else {
        Token::Run(body)
    }
}

/// Split `argv` into flags and ignored tokens. Never fails.
pub fn tokenize<S: AsRef<str>>(argv: &[S]) -> Tokens {
    let mut tokens = Tokens::default();
    let mut state = Scan::SkippingPrefix;

    for raw in argv {
        let raw = raw.as_ref();
        state = match classify(raw) {
            Token::Flag(name) => {
                tokens.config.insert(name.to_string(), ArgValue::Bare);
                Scan::AwaitingValue(name.to_string())
            }
            Token::Run(run) => {
                for c in run.chars() {
                    tokens.config.insert(c.to_string(), ArgValue::Bare);
                }
                // Only the last flag of a run can take the next token as its value.
                let last = run.chars().last().map(String::from).unwrap_or_default();
                Scan::AwaitingValue(last)
            }
            Token::Plain => match state {
                Scan::AwaitingValue(name) => {
                    trace!(flag = %name, value = raw, "argv value");
                    tokens
                        .config
                        .insert(name, ArgValue::Value(raw.to_string()));
                    Scan::AwaitingFlag
                }
                other => {
                    trace!(token = raw, "argv token ignored");
                    tokens.ignored.push(raw.to_string());
                    other
                }
            },
        };
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bare() -> ArgValue {
        ArgValue::Bare
    }

    fn val(s: &str) -> ArgValue {
        ArgValue::Value(s.to_string())
    }

    fn config(pairs: &[(&str, ArgValue)]) -> IndexMap<String, ArgValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn leading_paths_ignored_and_run_value_goes_to_last() {
        let t = tokenize(&["/node", "/run.js", "-A?i", "input/file.txt"]);
        assert_eq!(
            t.config,
            config(&[("A", bare()), ("?", bare()), ("i", val("input/file.txt"))])
        );
        assert_eq!(t.ignored, vec!["/node", "/run.js"]);
    }

    #[test]
    fn mixed_flags_values_and_strays() {
        let t = tokenize(&["--foo", "-?", "Q A", "-", "-B", "--z--9", "--", "lost"]);
        assert_eq!(
            t.config,
            config(&[
                ("foo", bare()),
                ("?", val("Q A")),
                ("B", bare()),
                ("z--9", val("--")),
            ])
        );
        assert_eq!(t.ignored, vec!["-", "lost"]);
    }

    #[test]
    fn empty_argv() {
        let t = tokenize::<&str>(&[]);
        assert!(t.config.is_empty());
        assert!(t.ignored.is_empty());
    }

    #[test]
    fn only_values_are_all_ignored() {
        let t = tokenize(&["a", "b", "c"]);
        assert!(t.config.is_empty());
        assert_eq!(t.ignored, vec!["a", "b", "c"]);
    }

    #[test]
    fn last_occurrence_wins() {
        let t = tokenize(&["--port", "1", "--port", "2"]);
        assert_eq!(t.config, config(&[("port", val("2"))]));
    }

    #[test]
    fn repeated_flag_without_value_resets_to_bare() {
        let t = tokenize(&["--port", "1", "--port"]);
        assert_eq!(t.config, config(&[("port", bare())]));
    }

    #[test]
    fn only_first_plain_token_attaches() {
        let t = tokenize(&["--name", "a", "b"]);
        assert_eq!(t.config, config(&[("name", val("a"))]));
        assert_eq!(t.ignored, vec!["b"]);
    }

    #[test]
    fn earlier_run_members_never_get_values() {
        let t = tokenize(&["-ab", "x"]);
        assert_eq!(t.config, config(&[("a", bare()), ("b", val("x"))]));
    }

    #[test]
    fn flags_are_case_sensitive() {
        let t = tokenize(&["-a", "-A"]);
        assert_eq!(t.config, config(&[("a", bare()), ("A", bare())]));
    }

    #[test]
    fn long_with_single_char_is_plain() {
        let t = tokenize(&["--x", "-v", "--x"]);
        assert_eq!(t.config, config(&[("v", val("--x"))]));
        assert_eq!(t.ignored, vec!["--x"]);
    }

    #[test]
    fn uppercase_long_is_plain() {
        let t = tokenize(&["-v", "--Foo"]);
        assert_eq!(t.config, config(&[("v", val("--Foo"))]));
    }

    #[test]
    fn invalid_chars_make_plain_tokens() {
        let t = tokenize(&["-v", "-a1", "--foo=bar", "-3"]);
        assert_eq!(t.config, config(&[("v", val("-a1"))]));
        assert_eq!(t.ignored, vec!["--foo=bar", "-3"]);
    }

    #[test]
    fn negative_number_is_a_value() {
        let t = tokenize(&["--offset", "-5"]);
        assert_eq!(t.config, config(&[("offset", val("-5"))]));
    }

    #[test]
    fn skip_mode_ends_permanently() {
        let t = tokenize(&["prog", "-v", "x", "y", "--qq", "z"]);
        assert_eq!(t.config, config(&[("v", val("x")), ("qq", val("z"))]));
        assert_eq!(t.ignored, vec!["prog", "y"]);
    }

    #[test]
    fn map_keeps_first_seen_order() {
        let t = tokenize(&["--bb", "-a", "--bb"]);
        let keys: Vec<&str> = t.config.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["bb", "a"]);
    }

    #[test]
    fn long_name_rules() {
        assert!(is_long_name("ab"));
        assert!(is_long_name("z--9"));
        assert!(!is_long_name("a"));
        assert!(!is_long_name("9a"));
        assert!(!is_long_name("aB"));
        assert!(!is_long_name(""));
    }

    // Canonical form: every flag written long-form (`--name`), followed by its
    // value when it has one. Only long names survive the round trip, and
    // values must not themselves look like flags.
    fn canonical(config: &IndexMap<String, ArgValue>) -> Vec<String> {
        let mut out = Vec::new();
        for (name, value) in config {
            out.push(format!("--{name}"));
            if let ArgValue::Value(v) = value {
                out.push(v.clone());
            }
        }
        out
    }

    proptest! {
        #[test]
        fn canonical_form_retokenizes_to_same_config(
            entries in proptest::collection::vec(
                ("[a-z][a-z0-9-]{1,8}", proptest::option::of("[a-zA-Z0-9 /._]{1,8}")),
                0..8,
            ),
            prefix in proptest::collection::vec("[a-z/._]{1,8}", 0..3),
        ) {
            let mut argv = prefix.clone();
            for (name, value) in &entries {
                argv.push(format!("--{name}"));
                if let Some(v) = value {
                    argv.push(v.clone());
                }
            }
            let first = tokenize(&argv);
            let second = tokenize(&canonical(&first.config));
            prop_assert_eq!(&first.config, &second.config);
            prop_assert!(second.ignored.is_empty());
            prop_assert_eq!(first.ignored, prefix);
        }

        #[test]
        fn tokenize_never_panics(argv in proptest::collection::vec(".{0,6}", 0..10)) {
            let t = tokenize(&argv);
            for token in &t.ignored {
                prop_assert!(argv.contains(token));
            }
        }
    }
}
