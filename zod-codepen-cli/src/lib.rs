//! # zod-codepen-cli
//!
//! Library behind the `zod-codepen` command line tool, which turns JSON
//! snapshots of Zod schema objects into standalone TypeScript modules.
//!
//! ## Architecture
//!
//! - [`config`] - `zod-codepen.toml` loading and command line overrides
//! - [`snapshot`] - snapshot decoding into runtime values
//! - [`filter`] - export name selection
//! - [`generator`] - module generation through the core serializer
//! - [`writer`] - file output and dry-run support
//! - [`error`] - error types

pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod snapshot;
pub mod writer;

pub use config::{CliArgs, Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use filter::NameFilter;
pub use generator::{strip_header, ModuleGenerator};
pub use snapshot::{load_snapshot, parse_snapshot, Snapshot};
pub use writer::{FileWriter, WriteResult};
