//! Module generation from snapshots.
//!
//! Binds the configured Zod version, header, type exports and name filter to
//! the core [`ModuleBuilder`].

use chrono::{DateTime, Utc};
use zod_codepen::{generated_header, GeneratedModule, ModuleBuilder, Serializer, IMPORT_LINE};

use crate::config::Config;
use crate::error::CliResult;
use crate::filter::NameFilter;
use crate::snapshot::Snapshot;

/// Name recorded in the generated header.
pub const GENERATOR_NAME: &str = "zod-codepen";

/// Generates TypeScript modules according to a [`Config`].
#[derive(Debug, Clone)]
pub struct ModuleGenerator {
    config: Config,
    timestamp: Option<DateTime<Utc>>,
}

impl ModuleGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            timestamp: None,
        }
    }

    /// Fix the header timestamp instead of using the current time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate the module for `snapshot`.
    pub fn generate(&self, snapshot: &Snapshot) -> CliResult<GeneratedModule> {
        let filter = NameFilter::from_config(&self.config.filter)?;
        let serializer = Serializer::for_version(self.config.serialize.zod_version);
        let options = self.config.serialize.to_options();

        let header = match &self.config.output.header {
            Some(header) => header.clone(),
            None => generated_header(GENERATOR_NAME, self.timestamp.unwrap_or_else(Utc::now)),
        };

        let module = ModuleBuilder::new()
            .with_header(header)
            .include_types(self.config.output.include_types)
            .with_filter(move |name, _| filter.matches(name))
            .generate(&serializer, snapshot, &options);

        tracing::info!(
            version = %self.config.serialize.zod_version,
            exported = module.exported.len(),
            failed = module.failed.len(),
            filtered = module.filtered.len(),
            skipped = module.skipped.len(),
            "generated module"
        );
        for name in &module.failed {
            tracing::warn!(name = %name, "exported as z.any() after serialization failure");
        }

        Ok(module)
    }
}

/// The part of a generated module that follows the header.
///
/// Used to compare modules whose headers differ only by timestamp. Content
/// without an import line is returned unchanged.
pub fn strip_header(content: &str) -> &str {
    match content.find(IMPORT_LINE) {
        Some(start) => &content[start..],
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use zod_codepen::{Value, ZodVersion};

    fn v4(tag: &str) -> Value {
        Value::object([(
            "_zod",
            Value::object([("def", Value::object([("type", Value::from(tag))]))]),
        )])
    }

    fn snapshot(entries: Vec<(&str, Value)>) -> Snapshot {
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap()
    }

    #[test]
    fn test_generate_with_default_header() {
        let input = snapshot(vec![("Name", v4("string")), ("NameType", v4("string"))]);
        let module = ModuleGenerator::new(Config::default())
            .with_timestamp(timestamp())
            .generate(&input)
            .unwrap();

        assert!(module
            .code
            .starts_with("/**\n * AUTO-GENERATED FILE - DO NOT EDIT\n"));
        assert!(module
            .code
            .contains(" * Generated by zod-codepen at 2025-03-04T05:06:07.000Z\n"));
        assert!(module.code.contains("export const Name = z.string();"));
        assert!(module.code.contains("export type Name = z.infer<typeof Name>;"));
        assert_eq!(module.filtered, ["NameType"]);
    }

    #[test]
    fn test_generate_with_custom_header_and_no_types() {
        let mut config = Config::default();
        config.output.header = Some("// custom".to_string());
        config.output.include_types = false;

        let module = ModuleGenerator::new(config)
            .generate(&snapshot(vec![("Flag", v4("boolean"))]))
            .unwrap();

        assert_eq!(
            module.code,
            "// custom\n\nimport { z } from 'zod';\n\nexport const Flag = z.boolean();\n"
        );
    }

    #[test]
    fn test_generate_respects_version() {
        let mut config = Config::default();
        config.serialize.zod_version = ZodVersion::V3;

        let module = ModuleGenerator::new(config)
            .generate(&snapshot(vec![("Name", v4("string"))]))
            .unwrap();

        assert!(module.exported.is_empty());
        assert_eq!(module.skipped, ["Name"]);
    }

    #[test]
    fn test_generate_with_glob_filters() {
        let mut config = Config::default();
        config.filter.exclude = vec!["Internal*".to_string()];
        let input = snapshot(vec![("InternalId", v4("string")), ("Id", v4("string"))]);

        let module = ModuleGenerator::new(config).generate(&input).unwrap();
        assert_eq!(module.exported, ["Id"]);
        assert_eq!(module.filtered, ["InternalId"]);
    }

    #[test]
    fn test_invalid_filter_is_an_error() {
        let mut config = Config::default();
        config.filter.include = vec!["[".to_string()];

        assert!(ModuleGenerator::new(config)
            .generate(&Snapshot::new())
            .is_err());
    }

    #[test]
    fn test_strip_header() {
        let content = "/** header */\n\nimport { z } from 'zod';\n\nexport const A = z.string();\n";
        assert_eq!(
            strip_header(content),
            "import { z } from 'zod';\n\nexport const A = z.string();\n"
        );
        assert_eq!(strip_header("no import here"), "no import here");
    }
}
