//! Core schema infrastructure: the widget field table and its registry.

pub mod registry;
pub mod schema;

pub use registry::SchemaRegistry;
pub use schema::{FieldSpec, Requirement, WidgetSchema};
