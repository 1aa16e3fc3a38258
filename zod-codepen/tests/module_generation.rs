//! Module generation, export filtering and serializer sharing.

mod common;

use std::io;
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::{TimeZone, Utc};
use common::{v3, v3_check, v3_object, v4, v4_object};
use indexmap::IndexMap;
use proptest::prelude::*;
use zod_codepen::{
    default_filter, generated_header, ModuleBuilder, SerializeOptions, Serializer, Value,
};

/// Log sink shared with a test subscriber.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with WARN and above captured.
fn with_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

fn schemas(entries: Vec<(&str, Value)>) -> IndexMap<String, Value> {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

// =============================================================================
// generate_module
// =============================================================================

#[test]
fn test_module_generation_completeness() {
    let input = schemas(vec![
        ("A", v4("string", vec![])),
        ("B", Value::from("not a schema")),
    ]);
    let code = Serializer::v4().generate_module(&input, &SerializeOptions::default());

    assert!(code.starts_with("import { z } from 'zod';\n\n"));
    assert_eq!(code.matches("export const").count(), 1);
    assert!(code.contains("export const A = z.string();"));
    assert!(!code.contains('B'));
}

#[test]
fn test_failure_isolation() {
    let input = schemas(vec![
        ("Broken", v4("unknown_type", vec![])),
        ("Working", v4("string", vec![])),
    ]);
    let (code, logs) =
        with_warnings(|| Serializer::v4().generate_module(&input, &SerializeOptions::default()));

    assert!(code.contains("export const Broken = z.any()"));
    assert!(code.contains("export const Working = z.string();"));
    assert!(logs.contains("WARN"), "no warning logged: {logs:?}");
    assert!(logs.contains("unknown_type"));
    assert!(!logs.contains("tag=string"));
}

#[test]
fn test_failing_entry_does_not_abort_module() {
    let broken = v3(
        "ZodObject",
        vec![("shape", Value::function(|_| Err(zod_codepen::CallError::new("boom"))))],
    );
    let input = schemas(vec![
        ("Broken", broken),
        ("Working", v3("ZodString", vec![])),
    ]);
    let (code, logs) =
        with_warnings(|| Serializer::v3().generate_module(&input, &SerializeOptions::default()));

    assert!(logs.contains("failed to serialize schema"));
    assert!(logs.contains("Broken"));
    assert_eq!(
        code,
        "import { z } from 'zod';\n\n\
         export const Broken = z.any(); // Serialization failed\n\n\
         export const Working = z.string();\n"
    );
}

#[test]
fn test_formatting_toggle_in_modules() {
    let input = schemas(vec![(
        "User",
        v3_object(vec![
            ("name", v3("ZodString", vec![])),
            (
                "age",
                v3(
                    "ZodNumber",
                    vec![("checks", Value::array([v3_check("min", 0, true)]))],
                ),
            ),
        ]),
    )]);
    let serializer = Serializer::v3();

    let compact = serializer.generate_module(&input, &SerializeOptions::compact());
    assert!(compact.contains(
        "export const User = z.object({ name: z.string(), age: z.number().nonnegative() });"
    ));

    let pretty = serializer.generate_module(&input, &SerializeOptions::default());
    assert!(pretty.contains(
        "export const User = z.object({\n  name: z.string(),\n  age: z.number().nonnegative(),\n});"
    ));
}

// =============================================================================
// ModuleBuilder
// =============================================================================

#[test]
fn test_full_module_snapshot() {
    let timestamp = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let input = schemas(vec![
        (
            "User",
            v4_object(vec![
                ("id", v4("string", vec![])),
                ("admin", v4("optional", vec![("innerType", v4("boolean", vec![]))])),
            ]),
        ),
        ("UserType", v4("string", vec![])),
        ("$meta", v4("string", vec![])),
        ("Role", v4("enum", vec![("entries", Value::object([("a", Value::from("admin"))]))])),
        ("helper", Value::function(|_| Ok(Value::Undefined))),
    ]);

    let module = ModuleBuilder::new()
        .with_header(generated_header("zod-codepen", timestamp))
        .with_default_filter()
        .generate(&Serializer::v4(), &input, &SerializeOptions::default());

    insta::assert_snapshot!(module.code, @r#"
    /**
     * AUTO-GENERATED FILE - DO NOT EDIT
     *
     * Generated by zod-codepen at 2025-06-01T12:00:00.000Z
     */

    import { z } from 'zod';

    export const User = z.object({
      id: z.string(),
      admin: z.boolean().optional(),
    });

    export const Role = z.enum(["admin"]);

    // Type exports
    export type User = z.infer<typeof User>;
    export type Role = z.infer<typeof Role>;
    "#);
    assert_eq!(module.exported, ["User", "Role"]);
    assert_eq!(module.filtered, ["UserType", "$meta"]);
    assert_eq!(module.skipped, ["helper"]);
}

#[test]
fn test_custom_filter_sees_schema() {
    let input = schemas(vec![
        ("Name", v4("string", vec![])),
        ("Count", v4("number", vec![])),
    ]);
    let serializer = Serializer::v4();
    let adapter_tag = |value: &Value| {
        value
            .get("_zod")
            .and_then(|z| z.get("def"))
            .and_then(|d| d.get("type"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let module = ModuleBuilder::new()
        .include_types(false)
        .with_filter(move |_, schema| adapter_tag(schema).as_deref() == Some("number"))
        .generate(&serializer, &input, &SerializeOptions::default());

    assert_eq!(
        module.code,
        "import { z } from 'zod';\n\nexport const Count = z.number();\n"
    );
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn test_serializer_shared_across_threads() {
    let serializer = Arc::new(Serializer::v4());
    let schema = Arc::new(v4_object(vec![("id", v4("string", vec![]))]));

    let outputs: Vec<String> = (0..4)
        .map(|_| {
            let serializer = Arc::clone(&serializer);
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                serializer
                    .serialize(&schema, &SerializeOptions::compact())
                    .unwrap()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert!(outputs.iter().all(|o| o == "z.object({ id: z.string() })"));
}

#[test]
fn test_custom_handlers_stay_private() {
    let mut custom = Serializer::v4();
    custom.register_handler("template_literal", |_, _| {
        Ok(Some("z.templateLiteral([])".to_string()))
    });
    let input = schemas(vec![("Slug", v4("template_literal", vec![]))]);
    let opts = SerializeOptions::default();

    assert!(custom
        .generate_module(&input, &opts)
        .contains("export const Slug = z.templateLiteral([]);"));
    assert!(Serializer::v4()
        .generate_module(&input, &opts)
        .contains("export const Slug = z.any() /* unhandled type: template_literal */;"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_filter_excludes_marked_names(stem in "[A-Za-z]{0,8}") {
        let prefixed = format!("${stem}");
        let suffixed = format!("{stem}Type");
        let both = format!("${stem}Type");
        prop_assert!(!default_filter(&prefixed));
        prop_assert!(!default_filter(&suffixed));
        prop_assert!(!default_filter(&both));
    }

    #[test]
    fn prop_filter_keeps_plain_names(name in "[A-Z][A-Za-z]{0,8}") {
        prop_assume!(!name.ends_with("Type"));
        prop_assert!(default_filter(&name));
    }

    #[test]
    fn prop_serialization_is_deterministic(min in -1000i32..1000, max in -1000i32..1000, format in any::<bool>()) {
        let schema = v3(
            "ZodNumber",
            vec![("checks", Value::array([v3_check("min", min, true), v3_check("max", max, false)]))],
        );
        let serializer = Serializer::v3();
        let opts = SerializeOptions::default().with_format(format);
        prop_assert_eq!(
            serializer.serialize(&schema, &opts).unwrap(),
            serializer.serialize(&schema, &opts).unwrap()
        );
    }

    #[test]
    fn prop_module_exports_every_schema_once(names in proptest::collection::btree_set("[A-Z][a-z]{1,6}", 0..8)) {
        let input: IndexMap<String, Value> = names
            .iter()
            .map(|name| (name.clone(), v4("string", vec![])))
            .collect();
        let code = Serializer::v4().generate_module(&input, &SerializeOptions::default());

        prop_assert_eq!(code.matches("export const").count(), names.len());
        for name in &names {
            let expected = format!("export const {} = z.string();", name);
            prop_assert!(code.contains(&expected));
        }
    }
}
