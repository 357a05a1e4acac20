use std::fmt;

use thiserror::Error;

use crate::types::label;

/// Why a mandatory value could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCause {
    /// Neither argv nor env mentioned it.
    Absent,
    /// Not in argv; env had it, but the value did not coerce.
    InvalidEnv,
    /// Not in env; argv had it, but the value did not coerce.
    InvalidArgv,
    /// Both had it and neither coerced.
    InvalidBoth,
}

impl MissingCause {
    pub(crate) fn from_states(argv_invalid: bool, env_invalid: bool) -> Self {
        match (argv_invalid, env_invalid) {
            (false, false) => MissingCause::Absent,
            (false, true) => MissingCause::InvalidEnv,
            (true, false) => MissingCause::InvalidArgv,
            (true, true) => MissingCause::InvalidBoth,
        }
    }
}

impl fmt::Display for MissingCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissingCause::Absent => "missing from both argv and env",
            MissingCause::InvalidEnv => "missing from argv, and the env value is invalid",
            MissingCause::InvalidArgv => "the argv value is invalid, and it is missing from env",
            MissingCause::InvalidBoth => "both the argv and the env values are invalid",
        })
    }
}

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum GatherError {
    #[error("{}", .violations.join("\n"))]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(gatherconf::invalid_descriptors),
            help("fix the value descriptors passed by the caller")
        )
    )]
    InvalidDescriptors { violations: Vec<String> },

    #[error("{}{what} {reason}", label(.begin))]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(gatherconf::invalid_input)))]
    InvalidInput {
        begin: String,
        what: &'static str,
        reason: String,
    },

    #[error("{}unexpected argv option '{flag}'", label(.begin))]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(gatherconf::unexpected_argv),
            help("remove the option, or set allow_unexpected_argv")
        )
    )]
    UnexpectedArgv { begin: String, flag: String },

    #[error("{}value '{name}' is mandatory but {cause}", label(.begin))]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(gatherconf::missing_value),
            help("pass the value on the command line or in the environment")
        )
    )]
    MissingValue {
        begin: String,
        name: String,
        cause: MissingCause,
    },

    #[error("Failed to parse descriptor manifest: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(gatherconf::parse_error)))]
    ParseError {
        #[from]
        source: toml::de::Error,
    },
}

/// Format a tokenized flag name the way a user would have typed it.
pub(crate) fn display_flag(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}
