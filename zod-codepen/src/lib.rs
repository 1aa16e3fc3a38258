//! # zod-codepen
//!
//! Serialize in-memory [Zod](https://zod.dev/) schema graphs back into
//! standalone TypeScript source.
//!
//! Schemas built through heavy composition (derived from ORM tables, shared
//! libraries, generated types) drag their whole dependency chain into every
//! bundle that imports them. `zod-codepen` snapshots such a schema once and
//! emits the plain `z.*` constructor calls that rebuild it.
//!
//! ## Overview
//!
//! A schema is represented as a [`Value`] tree mirroring the schema object's
//! internals (`_def` for Zod 3, `_zod.def` for Zod 4). A [`SchemaAdapter`]
//! hides the version-specific field paths, and a table of handlers renders
//! each schema kind:
//!
//! | Piece | Role |
//! |-------|------|
//! | [`SchemaAdapter`] | Recognize schemas, read type tags and definitions |
//! | [`normalize_checks`] | Unify v3 and v4 constraint lists |
//! | [`format_number`] / [`format_bigint`] | Render boundary constants symbolically |
//! | [`HandlerRegistry`] | Map [`TypeTag`]s to rendering functions |
//! | [`Serializer`] | Render one schema or a bare module |
//! | [`ModuleBuilder`] | Render a module with header, filter and type exports |
//!
//! ## Quick Start
//!
//! ```rust
//! use zod_codepen::{Serializer, SerializeOptions, Value};
//!
//! let check = |kind: &str, value: i32| {
//!     Value::object([("kind", Value::from(kind)), ("value", Value::from(value)), ("inclusive", Value::from(true))])
//! };
//! let age = Value::object([(
//!     "_def",
//!     Value::object([
//!         ("typeName", Value::from("ZodNumber")),
//!         ("checks", Value::array([check("min", 0), check("max", 120)])),
//!     ]),
//! )]);
//!
//! let code = Serializer::v3().serialize(&age, &SerializeOptions::default()).unwrap();
//! assert_eq!(code, "z.number().nonnegative().max(120)");
//! ```
//!
//! ## Options
//!
//! | Option | Effect | Default |
//! |--------|--------|---------|
//! | `indent` | Indentation unit | two spaces |
//! | `indent_level` | Starting depth | `0` |
//! | `format` | One object property per line | `true` |
//! | `optimizations.semantic_methods` | `.positive()`, `.nonnegative()`, `.safe()` recovery | `true` |
//! | `optimizations.scientific_notation` | `2**31 - 1`, `Number.MAX_SAFE_INTEGER` | `true` |
//!
//! ## Limitations
//!
//! - Refinements, transforms and preprocessors are emitted as comment
//!   placeholders; their logic cannot be recovered.
//! - `z.lazy()` is never dereferenced, so recursive schemas render a
//!   placeholder body.
//! - Brands exist only at the type level and render as a bare `.brand()`.

pub mod adapter;
pub mod checks;
pub mod error;
pub mod handlers;
pub mod module;
pub mod number_format;
pub mod options;
pub mod render;
pub mod serializer;
pub mod value;

pub use adapter::{SchemaAdapter, ZodV3Adapter, ZodV4Adapter, ZodVersion};
pub use checks::{normalize_checks, Check};
pub use error::{Result, SerializeError};
pub use handlers::{Handler, HandlerRegistry, TypeTag};
pub use module::{default_filter, generated_header, GeneratedModule, ModuleBuilder, IMPORT_LINE};
pub use number_format::{format_bigint, format_number, MAX_SAFE_INTEGER, MIN_SAFE_INTEGER};
pub use options::{Optimizations, SerializeOptions};
pub use serializer::{Context, Serializer};
pub use value::{CallError, Callable, Object, RegExp, Value};
