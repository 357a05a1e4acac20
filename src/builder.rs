use crate::error::GatherError;
use crate::manifest;
use crate::output::Gathered;
use crate::resolve::{self, GatherInput};
use crate::types::{GatherOptions, ValueDescriptor};

/// Entry point for gathering configuration.
pub struct Gatherer;

impl Gatherer {
    pub fn builder() -> GathererBuilder {
        GathererBuilder::new()
    }
}

/// Builder for a single gather.
///
/// Environment and argv default to the running process (`std::env::vars()`
/// and `std::env::args()`); supply them explicitly for tests or embedding.
#[derive(Debug, Clone)]
pub struct GathererBuilder {
    descriptors: Vec<ValueDescriptor>,
    manifests: Vec<String>,
    env_vars: Option<Vec<(String, String)>>,
    env_enabled: bool,
    argv: Option<Vec<String>>,
    options: GatherOptions,
}

impl GathererBuilder {
    fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            manifests: Vec::new(),
            env_vars: None,
            env_enabled: true,
            argv: None,
            options: GatherOptions::default(),
        }
    }

    pub fn descriptor(mut self, descriptor: ValueDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn descriptors(mut self, descriptors: impl IntoIterator<Item = ValueDescriptor>) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    /// Add descriptors from a TOML manifest (see [`manifest`](crate::manifest)).
    /// Parsed and validated when gathering, after the descriptors added in code.
    pub fn manifest(mut self, content: &str) -> Self {
        self.manifests.push(content.to_string());
        self
    }

    /// Use these environment pairs instead of the process environment.
    pub fn env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Disable environment lookups entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Use this argument vector instead of the process's. Like a real argv it
    /// should start with the program path, which is skipped.
    pub fn argv<S: Into<String>>(mut self, argv: impl IntoIterator<Item = S>) -> Self {
        self.argv = Some(argv.into_iter().map(Into::into).collect());
        self
    }

    /// Accept argv flags no descriptor declares (default: `false`).
    pub fn allow_unexpected_argv(mut self, allow: bool) -> Self {
        self.options.allow_unexpected_argv = allow;
        self
    }

    /// Look at the environment before argv (default: `false`).
    pub fn prefer_env(mut self, prefer: bool) -> Self {
        self.options.prefer_env = prefer;
        self
    }

    /// Label prefixed to every message. Empty disables the prefix.
    pub fn begin(mut self, begin: &str) -> Self {
        self.options.begin = begin.to_string();
        self
    }

    pub fn options(mut self, options: GatherOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the `GatherInput` from current builder state.
    fn build_input(self) -> Result<GatherInput, GatherError> {
        let mut descriptors = self.descriptors;
        for content in &self.manifests {
            descriptors.extend(manifest::descriptors_from_toml(content, &self.options.begin)?);
        }

        let env_vars = match (self.env_enabled, self.env_vars) {
            (false, _) => Vec::new(),
            (true, Some(vars)) => vars,
            (true, None) => std::env::vars().collect(),
        };
        let argv = self.argv.unwrap_or_else(|| std::env::args().collect());

        Ok(GatherInput {
            descriptors,
            env_vars,
            argv,
            options: self.options,
        })
    }

    /// Validate descriptors and resolve every value.
    pub fn gather(self) -> Result<Gathered, GatherError> {
        let input = self.build_input()?;
        resolve::gather(input)
    }
}
