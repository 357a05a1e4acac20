//! Core resolution pipeline: merge argv, env and fallbacks into typed values.
//!
//! Operates on pre-loaded data (`GatherInput`) with no process access, so the
//! whole pipeline is testable with synthetic inputs. Steps:
//!
//! 1. Validate descriptors
//! 2. Scan sources in precedence order: argv then env, or env then argv with
//!    `prefer_env`. A scan only runs while some descriptor is unresolved
//! 3. Unresolved descriptors take their fallback, verbatim
//! 4. Anything still unresolved is mandatory and missing: fail

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::argv::{self, ArgValue, Tokens};
use crate::coerce::coerce;
use crate::error::{GatherError, MissingCause, display_flag};
use crate::output::{Gathered, Source, Warning};
use crate::types::{ConfigValue, GatherOptions, ValueDescriptor};
use crate::validate;

/// All pre-loaded data needed for one gather. No I/O happens here.
#[derive(Debug, Clone, Default)]
pub struct GatherInput {
    pub descriptors: Vec<ValueDescriptor>,
    /// Environment pairs (pass `std::env::vars().collect()` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Full argument vector, leading executable path included.
    pub argv: Vec<String>,
    pub options: GatherOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Argv,
    Env,
}

/// Per-descriptor progress.
#[derive(Debug, Default)]
struct Slot {
    value: Option<ConfigValue>,
    argv_invalid: bool,
    env_invalid: bool,
}

struct Gathering<'a> {
    descriptors: &'a [ValueDescriptor],
    options: &'a GatherOptions,
    slots: Vec<Slot>,
    warnings: Vec<Warning>,
}

/// Resolve every descriptor from the given input.
pub fn gather(input: GatherInput) -> Result<Gathered, GatherError> {
    let GatherInput {
        descriptors,
        env_vars,
        argv: args,
        options,
    } = input;
    validate::validate_descriptors(&descriptors, &options.begin)?;

    let env: HashMap<String, String> = env_vars.into_iter().collect();
    let mut run = Gathering {
        descriptors: &descriptors,
        options: &options,
        slots: descriptors.iter().map(|_| Slot::default()).collect(),
        warnings: Vec::new(),
    };

    let passes = if options.prefer_env {
        [Pass::Env, Pass::Argv]
    } else {
        [Pass::Argv, Pass::Env]
    };
    for pass in passes {
        if run.all_resolved() {
            debug!(?pass, "all values resolved, skipping scan");
            continue;
        }
        match pass {
            Pass::Argv => run.scan_argv(&argv::tokenize(&args))?,
            Pass::Env => run.scan_env(&env),
        }
    }

    run.finish()
}

impl Gathering<'_> {
    fn all_resolved(&self) -> bool {
        self.slots.iter().all(|s| s.value.is_some())
    }

    fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.value.is_none())
            .map(|(i, _)| i)
    }

    fn scan_argv(&mut self, tokens: &Tokens) -> Result<(), GatherError> {
        if !self.options.allow_unexpected_argv {
            self.reject_unexpected(tokens)?;
        }

        let descriptors = self.descriptors;
        let pending: Vec<usize> = self.pending().collect();
        for i in pending {
            let d = &descriptors[i];
            let long = d.name_argv_long.as_ref().and_then(|name| {
                tokens
                    .config
                    .get(name)
                    .map(|raw| (Source::ArgvLong(name.clone()), raw))
            });
            let short = d.name_argv_short.and_then(|c| {
                tokens
                    .config
                    .get(c.to_string().as_str())
                    .map(|raw| (Source::ArgvShort(c), raw))
            });
            for (source, raw) in long.into_iter().chain(short) {
                if self.offer(i, source, raw) {
                    break;
                }
                self.slots[i].argv_invalid = true;
            }
        }
        Ok(())
    }

    fn reject_unexpected(&self, tokens: &Tokens) -> Result<(), GatherError> {
        let declared = |key: &str| {
            self.descriptors.iter().any(|d| {
                d.name_argv_long.as_deref() == Some(key)
                    || d.name_argv_short.map(String::from).as_deref() == Some(key)
            })
        };
        match tokens.config.keys().find(|key| !declared(key.as_str())) {
            Some(key) => Err(GatherError::UnexpectedArgv {
                begin: self.options.begin.clone(),
                flag: display_flag(key),
            }),
            None => Ok(()),
        }
    }

    fn scan_env(&mut self, env: &HashMap<String, String>) {
        let descriptors = self.descriptors;
        let pending: Vec<usize> = self.pending().collect();
        for i in pending {
            let Some(name) = &descriptors[i].name_env else {
                continue;
            };
            let Some(raw) = env.get(name) else {
                continue;
            };
            if !self.offer(i, Source::Env(name.clone()), &ArgValue::Value(raw.clone())) {
                self.slots[i].env_invalid = true;
            }
        }
    }

    /// Try a raw value for descriptor `i`. Returns whether it resolved;
    /// otherwise a warning has been recorded.
    fn offer(&mut self, i: usize, source: Source, raw: &ArgValue) -> bool {
        let descriptors = self.descriptors;
        let d = &descriptors[i];
        match coerce(d.kind, raw) {
            Ok(value) => {
                debug!(name = %d.name_returned, %source, "value resolved");
                self.slots[i].value = Some(value);
                true
            }
            Err(reason) => {
                let warning = Warning {
                    begin: self.options.begin.clone(),
                    name: d.name_returned.clone(),
                    source,
                    kind: d.kind,
                    raw: raw.as_value().map(String::from),
                    reason,
                };
                warn!("{warning}");
                self.warnings.push(warning);
                false
            }
        }
    }

    fn finish(self) -> Result<Gathered, GatherError> {
        let mut gathered = Gathered {
            warnings: self.warnings,
            ..Gathered::default()
        };
        for (d, slot) in self.descriptors.iter().zip(self.slots) {
            let value = match (slot.value, &d.fallback) {
                (Some(value), _) => value,
                (None, Some(fallback)) => {
                    debug!(name = %d.name_returned, "using fallback");
                    fallback.clone()
                }
                (None, None) => {
                    return Err(GatherError::MissingValue {
                        begin: self.options.begin.clone(),
                        name: d.name_returned.clone(),
                        cause: MissingCause::from_states(slot.argv_invalid, slot.env_invalid),
                    });
                }
            };
            gathered.values.insert(d.name_returned.clone(), value);
        }
        Ok(gathered)
    }
}
