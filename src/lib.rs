//! Typed configuration from argv, environment variables and fallbacks, in
//! one call.
//!
//! gatherconf resolves a list of value descriptors against three competing
//! sources: the command line, the process environment, and static fallback
//! defaults. It coerces raw strings to booleans, numbers or strings, keeps
//! going when a single value is malformed, and fails loudly when a mandatory
//! value cannot be found.
//!
//! ```ignore
//! let config = Gatherer::builder()
//!     .descriptor(
//!         ValueDescriptor::new(Kind::Number, "port")
//!             .long("port")
//!             .short('p')
//!             .env("APP_PORT")
//!             .fallback(8080),
//!     )
//!     .gather()?;
//! let port = config.get_number("port");
//! ```
//!
//! That call validates the descriptor, tokenizes `std::env::args()`, reads
//! `APP_PORT` from the environment, and hands back the resolved value along
//! with any warnings.
//!
//! # Descriptors
//!
//! A [`ValueDescriptor`] names one value and every place it may come from:
//!
//! - **`kind`**: `boolean`, `number` or `string`. Drives coercion.
//! - **`name_argv_long`**: `--name`, a lowercase letter then 1-31 of
//!   `[a-z0-9-]`.
//! - **`name_argv_short`**: `-x`, one ASCII letter or `?`.
//! - **`name_env`**: an uppercase letter then up to 31 of `[A-Z0-9_]`.
//! - **`name_returned`**: the key in the result, a letter or `_`, then up
//!   to 31 of `[A-Za-z0-9_]`.
//! - **`fallback`**: used when no source supplies a usable value. Without
//!   one the value is mandatory.
//! - **`note`**: free documentation for help renderers.
//!
//! Descriptors can be built in code, deserialized from JSON
//! ([`validate::validate_value`]), or declared as `[[value]]` tables in a TOML
//! manifest ([`manifest`]). Every gather validates them first: naming rules,
//! at least one possible source per descriptor, and no name reused within
//! any of the four namespaces (long, short, env, returned).
//!
//! # Precedence
//!
//! ```text
//! argv --long        (highest, by default)
//!      ↓
//! argv -s
//!      ↓
//! environment
//!      ↓
//! fallback           (lowest, emitted verbatim)
//! ```
//!
//! With [`prefer_env`](GathererBuilder::prefer_env) the environment moves
//! above argv. Once every descriptor has a value the remaining sources are
//! not consulted at all; in particular argv is not even checked for
//! unexpected flags when the environment already settled everything.
//!
//! # Argv
//!
//! The tokenizer ([`argv::tokenize`]) understands `--long`, `-s` and runs
//! like `-abc`. A non-flag token becomes the value of the flag right before
//! it; in a run only the last flag can take a value. Tokens before the first
//! flag are skipped, which drops the program path of a real argv.
//!
//! Flags that no descriptor declares are an error unless
//! [`allow_unexpected_argv`](GathererBuilder::allow_unexpected_argv) is set.
//!
//! # Coercion and warnings
//!
//! - `boolean`: a bare flag is `true`; otherwise exactly `"true"` or `"false"`.
//! - `number`: an optional `-`, then `0b…`, `0o…`, `0x…` or a decimal.
//! - `string`: taken verbatim.
//!
//! A value that fails to coerce is not an error. It becomes a [`Warning`] in
//! [`Gathered::warnings`] and the next source gets its turn. Only when no
//! source works and there is no fallback does gathering fail, with a
//! [`MissingCause`] telling whether argv and env were absent or invalid.
//!
//! # Error handling
//!
//! All fallible operations return [`GatherError`]. Enable the `rich-errors`
//! feature to get [`miette`](https://docs.rs/miette) diagnostics with codes
//! and help text.

pub mod argv;
pub mod error;
pub mod manifest;
pub mod types;
pub mod validate;

mod builder;
mod coerce;
mod loose;
mod output;
mod resolve;

#[cfg(test)]
mod fixtures;

pub use argv::{ArgValue, Tokens, tokenize};
pub use builder::{Gatherer, GathererBuilder};
pub use coerce::parse_number;
pub use error::{GatherError, MissingCause};
pub use loose::gather_value;
pub use output::{Gathered, Source, Warning};
pub use resolve::{GatherInput, gather};
pub use types::{ConfigValue, GatherOptions, Kind, ValueDescriptor};
pub use validate::{validate_descriptors, validate_value};
