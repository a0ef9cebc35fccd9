//! Display models shared by every output format
//!
//! API responses arrive as schema-less JSON. Commands pick the fields they
//! want to show, coerce them into [`DisplayValue`]s and hand the resulting
//! [`Entity`] or [`Table`] to a renderer.

pub mod entity;
pub mod lookup;
pub mod policy;
pub mod value;

pub use entity::{Entity, Row, Table};
pub use policy::{PolicyReport, interpret_policy_trace};
pub use value::{DisplayValue, FieldSpec};
