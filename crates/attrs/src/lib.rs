//! Typed attribute descriptors over an owning node tree.
//!
//! Every node kind declares its attributes once, as an ordered
//! [`DescriptorSet`]. A [`Descriptor`] reads, writes and resets one attribute
//! on any node of its kind through a lazily compiled [`Accessor`], keeping
//! "unset" distinct from "holds a default", and wiring nested children into
//! the [`NodeTree`] with parent back-references.

/// Compiled read/write closures and their publish-once cache.
pub mod accessor;
/// Per-attribute descriptors and the value operations.
pub mod descriptor;
/// Configuration and attribute errors.
pub mod error;
/// Typed attribute handles.
pub mod key;
/// Field and property bindings onto node storage.
pub mod member;
/// The `Node` trait and static kind metadata.
pub mod node;
/// Ordered descriptor sets and their builders.
pub mod set;
/// Boxing between typed slots and raw values.
pub mod storage;
/// The owning node arena with parent back-references.
pub mod tree;
/// The closed attribute value enum and scalar conversions.
pub mod value;

#[cfg(test)]
pub(crate) mod fixtures;

pub use accessor::Accessor;
pub use descriptor::{AccessMode, Behavior, Descriptor, Fresh, ValueType};
pub use error::{AttrError, ConfigError};
pub use folio_primitives::{Color, NodeId, Nullable};
pub use key::AttrKey;
pub use member::{Binding, Field, Member, Property, Setter};
pub use node::{Node, NodeKind, NodeList};
pub use set::{AttrDecl, DescriptorSet, RegistryOptions};
pub use storage::{RawValue, Shape, Storage};
pub use tree::NodeTree;
pub use value::{AttrType, AttrValue, EnumInfo, EnumValue, Scalar};
