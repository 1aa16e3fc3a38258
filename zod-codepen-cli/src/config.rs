//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `zod-codepen.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use zod_codepen::{Optimizations, SerializeOptions, ZodVersion};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "zod-codepen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Export selection.
    pub filter: FilterConfig,

    /// Serializer settings.
    pub serialize: SerializeConfig,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the generated module.
    pub file: PathBuf,

    /// Whether to emit `export type X = z.infer<typeof X>` lines.
    pub include_types: bool,

    /// Custom header replacing the generated "do not edit" banner.
    pub header: Option<String>,
}

/// Export selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Apply the built-in rules (skip `$`-prefixed and `*Type` names).
    pub default_rules: bool,

    /// Glob patterns; when non-empty only matching names are exported.
    pub include: Vec<String>,

    /// Glob patterns of names to skip.
    pub exclude: Vec<String>,
}

/// Serializer settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SerializeConfig {
    /// Zod major version the snapshot was taken from.
    pub zod_version: ZodVersion,

    /// Indentation unit.
    pub indent: String,

    /// Pretty-print objects one property per line.
    pub format: bool,

    /// Recover `.positive()`, `.safe()` and similar calls.
    pub semantic_methods: bool,

    /// Render boundary constants symbolically (`2**31 - 1`).
    pub scientific_notation: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("./generated/schemas.ts"),
            include_types: true,
            header: None,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_rules: true,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl Default for SerializeConfig {
    fn default() -> Self {
        let options = SerializeOptions::default();
        Self {
            zod_version: ZodVersion::V4,
            indent: options.indent,
            format: options.format,
            semantic_methods: options.optimizations.semantic_methods,
            scientific_notation: options.optimizations.scientific_notation,
        }
    }
}

impl SerializeConfig {
    /// The core serializer options these settings describe.
    pub fn to_options(&self) -> SerializeOptions {
        SerializeOptions::new()
            .with_indent(self.indent.clone())
            .with_format(self.format)
            .with_optimizations(Optimizations {
                semantic_methods: self.semantic_methods,
                scientific_notation: self.scientific_notation,
            })
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration.
    ///
    /// An explicitly given path must exist. Without one, `zod-codepen.toml`
    /// in the working directory is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
                .into());
            }
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(CONFIG_FILENAME);
                if !default.exists() {
                    tracing::debug!("no {CONFIG_FILENAME} found, using defaults");
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path.clone(), e.to_string()))?;

        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(content)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// Scalar CLI arguments take precedence over config file values; filter
    /// patterns given on the command line are appended.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.file = output.clone();
        }

        if let Some(include_types) = args.include_types {
            config.output.include_types = include_types;
        }

        if let Some(version) = args.zod_version {
            config.serialize.zod_version = version;
        }

        if let Some(format) = args.format {
            config.serialize.format = format;
        }

        config.filter.include.extend(args.include.iter().cloned());
        config.filter.exclude.extend(args.exclude.iter().cloned());

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# zod-codepen configuration file

[output]
# Path of the generated TypeScript module
file = "./generated/schemas.ts"

# Emit `export type X = z.infer<typeof X>;` for every exported schema
include_types = true

# Custom header replacing the "AUTO-GENERATED FILE" banner
# header = "// generated"

[filter]
# Skip exports whose name starts with `$` or ends with `Type`
default_rules = true

# Only export names matching one of these glob patterns (empty = all)
include = []

# Skip names matching any of these glob patterns
exclude = []

[serialize]
# Zod major version of the snapshot ("v3" or "v4")
zod_version = "v4"

# Indentation unit
indent = "  "

# One object property per line
format = true

# Recover .positive(), .nonnegative(), .safe() from raw bounds
semantic_methods = true

# Render boundary constants as 2**31 - 1, Number.MAX_SAFE_INTEGER, ...
scientific_notation = true
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output file override.
    pub output: Option<PathBuf>,

    /// Type exports override.
    pub include_types: Option<bool>,

    /// Zod version override.
    pub zod_version: Option<ZodVersion>,

    /// Formatting override.
    pub format: Option<bool>,

    /// Additional include patterns.
    pub include: Vec<String>,

    /// Additional exclude patterns.
    pub exclude: Vec<String>,
}
