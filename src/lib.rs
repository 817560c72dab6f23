//! Compile declarative table descriptions into a MySQL DDL script and typed
//! Rust client helpers.

pub mod codegen;
pub mod config;
pub mod describe;
pub mod error;
pub mod escape;
pub mod introspect;
pub mod maker;
pub mod manifest;
pub mod schema;
pub mod typemap;
pub mod validate;
pub mod verify;

pub use config::DbConfig;
pub use describe::{Capability, Description, FieldDescriptor, FieldKind};
pub use error::{Diagnostic, DiagnosticKind, MakerError, ValidationError};
pub use maker::Maker;
pub use manifest::Manifest;
