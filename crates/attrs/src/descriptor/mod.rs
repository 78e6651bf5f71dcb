//! Attribute descriptors.
//!
//! A [`Descriptor`] mediates typed access to one named attribute of a node
//! kind. It owns no attribute data: every operation takes the tree and the
//! node it applies to. Behavior is selected by [`Behavior`], a closed set of
//! four variants fixed at registration:
//!
//! - [`Behavior::NullableScalar`]: a scalar wrapped in [`Nullable`](folio_primitives::Nullable).
//! - [`Behavior::Value`]: a scalar stored directly; only values that carry
//!   their own nullable state (colors) can be unset.
//! - [`Behavior::NestedObject`]: an optional child node, materialized on
//!   first read-write access when field-backed.
//! - [`Behavior::NestedCollection`]: an optional child collection, always
//!   field-backed.

use std::fmt;
use std::sync::Arc;

use folio_primitives::NodeId;

use crate::accessor::{Accessor, AccessorCell};
use crate::error::{AttrError, ConfigError};
use crate::member::Member;
use crate::node::{Node, NodeKind};
use crate::set::AttrDecl;
use crate::storage::{RawValue, Shape};
use crate::tree::NodeTree;
use crate::value::{AttrType, AttrValue};


/// How a read treats an unset attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
	/// Never returns the null sentinel; nested attributes are materialized.
	#[default]
	ReadWrite,
	/// Returns `None` for unset or absent attributes.
	GetNull,
}

/// Declared value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
	Scalar(AttrType),
	Node(&'static NodeKind),
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ValueType::Scalar(ty) => write!(f, "{ty}"),
			ValueType::Node(kind) => f.write_str(kind.name),
		}
	}
}

/// The four descriptor behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
	NullableScalar(AttrType),
	Value(AttrType),
	NestedObject(&'static NodeKind),
	NestedCollection(&'static NodeKind),
}

/// A freshly constructed attribute value from [`Descriptor::create_value`].
#[derive(Debug)]
pub enum Fresh {
	Value(AttrValue),
	Node(Box<dyn Node>),
}

pub struct Descriptor {
	owner: &'static str,
	name: &'static str,
	member: Member,
	shape: Shape,
	behavior: Behavior,
	ref_only: bool,
	accessor: AccessorCell,
}

impl Descriptor {
	/// Validates a declaration of kind `owner` and selects its behavior.
	pub fn new(owner: &'static str, decl: AttrDecl) -> Result<Self, ConfigError> {
		let AttrDecl {
			name: attr,
			member,
			shape,
			value_type,
			ref_only,
		} = decl;

		let behavior = match (shape, value_type) {
			(Shape::Nullable, Some(ValueType::Scalar(ty))) => Behavior::NullableScalar(ty),
			(Shape::Plain, Some(ValueType::Scalar(ty))) => Behavior::Value(ty),
			(Shape::Child, Some(ValueType::Node(kind))) if kind.is_collection() => {
				if member.is_property() {
					return Err(ConfigError::CollectionOnProperty { owner, attr });
				}
				Behavior::NestedCollection(kind)
			}
			(Shape::Child, Some(ValueType::Node(kind))) => Behavior::NestedObject(kind),
			(Shape::Child, None) => return Err(ConfigError::MissingChildKind { owner, attr }),
			(shape, value_type) => {
				return Err(ConfigError::ShapeMismatch {
					owner,
					attr,
					shape,
					value_type: value_type.map_or_else(|| "nothing".to_string(), |t| t.to_string()),
				});
			}
		};

		Ok(Self {
			owner,
			name: attr,
			member,
			shape,
			behavior,
			ref_only,
			accessor: AccessorCell::default(),
		})
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Name of the node kind declaring this attribute.
	pub fn owner(&self) -> &'static str {
		self.owner
	}

	pub fn behavior(&self) -> Behavior {
		self.behavior
	}

	pub fn value_type(&self) -> ValueType {
		match self.behavior {
			Behavior::NullableScalar(ty) | Behavior::Value(ty) => ValueType::Scalar(ty),
			Behavior::NestedObject(kind) | Behavior::NestedCollection(kind) => ValueType::Node(kind),
		}
	}

	pub fn shape(&self) -> Shape {
		self.shape
	}

	pub fn member(&self) -> &Member {
		&self.member
	}

	pub fn is_ref_only(&self) -> bool {
		self.ref_only
	}

	pub fn is_nested(&self) -> bool {
		matches!(self.behavior, Behavior::NestedObject(_) | Behavior::NestedCollection(_))
	}

	/// Whether the accessor has been compiled and published.
	pub fn is_compiled(&self) -> bool {
		self.accessor.get().is_some()
	}

	/// Returns the cached accessor, compiling it on first use.
	pub fn compile(&self) -> Result<Arc<Accessor>, ConfigError> {
		self.accessor
			.get_or_compile(|| self.member.compile(self.owner, self.name))
	}

	/// Reads the attribute of `node`.
	///
	/// Under [`AccessMode::GetNull`] an unset attribute reads as `None`.
	/// Under [`AccessMode::ReadWrite`] it never does: scalars fall back to
	/// their default, and an absent field-backed child is created, attached
	/// to `node` and stored before it is returned.
	pub fn get_value(
		&self,
		tree: &mut NodeTree,
		node: NodeId,
		mode: AccessMode,
	) -> Result<Option<AttrValue>, AttrError> {
		match self.behavior {
			Behavior::NullableScalar(_) | Behavior::Value(_) => self.read_scalar(tree, node, mode),
			Behavior::NestedObject(kind) | Behavior::NestedCollection(kind) => {
				let accessor = self.compile()?;
				match self.read_child(&accessor, tree, node)? {
					Some(child) => self.child_value(tree, child, mode),
					None if mode == AccessMode::ReadWrite && self.member.is_field() => {
						let child = self.materialize(&accessor, tree, node, kind)?;
						Ok(Some(AttrValue::Node(child)))
					}
					None => Ok(None),
				}
			}
		}
	}

	/// Reads the attribute without materializing anything, with
	/// [`AccessMode::GetNull`] semantics.
	pub fn peek_value(&self, tree: &NodeTree, node: NodeId) -> Result<Option<AttrValue>, AttrError> {
		match self.behavior {
			Behavior::NullableScalar(_) | Behavior::Value(_) => {
				self.read_scalar(tree, node, AccessMode::GetNull)
			}
			Behavior::NestedObject(_) | Behavior::NestedCollection(_) => {
				let accessor = self.compile()?;
				match self.read_child(&accessor, tree, node)? {
					Some(child) => self.child_value(tree, child, AccessMode::GetNull),
					None => Ok(None),
				}
			}
		}
	}

	/// Overwrites the attribute. Nested attributes adopt the given node and
	/// release the child they replace.
	pub fn set_value(&self, tree: &mut NodeTree, node: NodeId, value: AttrValue) -> Result<(), AttrError> {
		let accessor = self.compile()?;
		match self.behavior {
			Behavior::NullableScalar(_) => {
				let mut wrapper = accessor.read(tree.get(node)?)?;
				match &mut wrapper {
					RawValue::Nullable { value: stored, set } => {
						*stored = value;
						*set = true;
					}
					raw => return Err(self.shape_error(raw)),
				}
				accessor.write(tree.get_mut(node)?, wrapper)
			}
			Behavior::Value(_) => accessor.write(tree.get_mut(node)?, RawValue::Plain(value)),
			Behavior::NestedObject(kind) | Behavior::NestedCollection(kind) => {
				if !self.member.is_field() {
					return Err(AttrError::InvalidOperation(format!(
						"{}.{}: this value cannot be set",
						self.owner, self.name
					)));
				}
				self.replace_child(&accessor, tree, node, kind, value)
			}
		}
	}

	/// Marks the attribute unset.
	///
	/// Nullable scalars keep their stored value. Nested attributes delegate
	/// to the child's own unset routine and are a no-op while absent.
	pub fn set_null(&self, tree: &mut NodeTree, node: NodeId) -> Result<(), AttrError> {
		let accessor = self.compile()?;
		match self.behavior {
			Behavior::NullableScalar(_) => {
				let mut wrapper = accessor.read(tree.get(node)?)?;
				match &mut wrapper {
					RawValue::Nullable { set, .. } => *set = false,
					raw => return Err(self.shape_error(raw)),
				}
				accessor.write(tree.get_mut(node)?, wrapper)
			}
			Behavior::Value(_) => match accessor.read(tree.get(node)?)? {
				RawValue::Plain(mut value) => {
					if !value.mark_unset() {
						return Err(AttrError::NotNullable { attr: self.name });
					}
					accessor.write(tree.get_mut(node)?, RawValue::Plain(value))
				}
				raw => Err(self.shape_error(&raw)),
			},
			Behavior::NestedObject(_) | Behavior::NestedCollection(_) => {
				match self.read_child(&accessor, tree, node)? {
					Some(child) => tree.clear_node(child),
					None => Ok(()),
				}
			}
		}
	}

	/// Whether the attribute is unset or absent.
	pub fn is_null(&self, tree: &NodeTree, node: NodeId) -> Result<bool, AttrError> {
		Ok(self.null_state(tree, node)?.unwrap_or(false))
	}

	/// `Some(is_unset)`, or `None` for a plain value without an unset state.
	pub(crate) fn null_state(&self, tree: &NodeTree, node: NodeId) -> Result<Option<bool>, AttrError> {
		let accessor = self.compile()?;
		match self.behavior {
			Behavior::NullableScalar(_) => match accessor.read(tree.get(node)?)? {
				RawValue::Nullable { set, .. } => Ok(Some(!set)),
				raw => Err(self.shape_error(&raw)),
			},
			Behavior::Value(_) => match accessor.read(tree.get(node)?)? {
				RawValue::Plain(value) => Ok(value.null_state()),
				raw => Err(self.shape_error(&raw)),
			},
			Behavior::NestedObject(_) | Behavior::NestedCollection(_) => {
				match self.read_child(&accessor, tree, node)? {
					Some(child) => tree.node_is_null(child).map(Some),
					None => Ok(Some(true)),
				}
			}
		}
	}

	/// Default-constructs a fresh value of the declared type.
	pub fn create_value(&self) -> Fresh {
		match self.behavior {
			Behavior::NullableScalar(ty) | Behavior::Value(ty) => Fresh::Value(ty.default_value()),
			Behavior::NestedObject(kind) | Behavior::NestedCollection(kind) => {
				Fresh::Node((kind.create)())
			}
		}
	}

	pub(crate) fn read_scalar(
		&self,
		tree: &NodeTree,
		node: NodeId,
		mode: AccessMode,
	) -> Result<Option<AttrValue>, AttrError> {
		let accessor = self.compile()?;
		match (self.behavior, accessor.read(tree.get(node)?)?) {
			(Behavior::NullableScalar(_), RawValue::Nullable { value, set: true }) => Ok(Some(value)),
			(Behavior::NullableScalar(ty), RawValue::Nullable { set: false, .. }) => match mode {
				AccessMode::GetNull => Ok(None),
				AccessMode::ReadWrite => Ok(Some(ty.default_value())),
			},
			(Behavior::Value(_), RawValue::Plain(value)) => {
				if mode == AccessMode::GetNull && value.null_state() == Some(true) {
					Ok(None)
				} else {
					Ok(Some(value))
				}
			}
			(_, raw) => Err(self.shape_error(&raw)),
		}
	}

	fn read_child(
		&self,
		accessor: &Accessor,
		tree: &NodeTree,
		node: NodeId,
	) -> Result<Option<NodeId>, AttrError> {
		match accessor.read(tree.get(node)?)? {
			// A handle whose node is gone reads as absent.
			RawValue::Child(child) => Ok(child.filter(|&c| tree.contains(c))),
			raw => Err(self.shape_error(&raw)),
		}
	}

	fn child_value(
		&self,
		tree: &NodeTree,
		child: NodeId,
		mode: AccessMode,
	) -> Result<Option<AttrValue>, AttrError> {
		if mode == AccessMode::GetNull && tree.node_is_null(child)? {
			Ok(None)
		} else {
			Ok(Some(AttrValue::Node(child)))
		}
	}

	fn materialize(
		&self,
		accessor: &Accessor,
		tree: &mut NodeTree,
		node: NodeId,
		kind: &'static NodeKind,
	) -> Result<NodeId, AttrError> {
		let child = tree.insert_child(node, (kind.create)())?;
		if let Err(err) = accessor.write(tree.get_mut(node)?, RawValue::Child(Some(child))) {
			tree.release_owned(node, child);
			return Err(err);
		}
		tracing::trace!(owner = self.owner, attr = self.name, %child, "materialized child");
		Ok(child)
	}

	fn replace_child(
		&self,
		accessor: &Accessor,
		tree: &mut NodeTree,
		node: NodeId,
		kind: &'static NodeKind,
		value: AttrValue,
	) -> Result<(), AttrError> {
		let AttrValue::Node(child) = value else {
			return Err(AttrError::TypeMismatch {
				attr: self.name,
				expected: kind.name.to_string(),
				got: value.type_name(),
			});
		};
		let child_kind = tree.kind(child)?;
		if child_kind != kind {
			return Err(AttrError::TypeMismatch {
				attr: self.name,
				expected: kind.name.to_string(),
				got: child_kind.name,
			});
		}

		let previous = self.read_child(accessor, tree, node)?;
		if previous == Some(child) {
			return Ok(());
		}
		if let Some(owner) = tree.parent(child) {
			return Err(AttrError::InvalidOperation(format!(
				"{}.{}: node {child} is already owned by {owner}",
				self.owner, self.name
			)));
		}
		tree.adopt(node, child)?;
		if let Err(err) = accessor.write(tree.get_mut(node)?, RawValue::Child(Some(child))) {
			tree.disown(node, child);
			return Err(err);
		}
		if let Some(previous) = previous {
			tree.release_owned(node, previous);
		}
		Ok(())
	}

	fn shape_error(&self, raw: &RawValue) -> AttrError {
		ConfigError::ShapeMismatch {
			owner: self.owner,
			attr: self.name,
			shape: raw.shape(),
			value_type: self.value_type().to_string(),
		}
		.into()
	}
}

impl fmt::Debug for Descriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Descriptor")
			.field("owner", &self.owner)
			.field("name", &self.name)
			.field("behavior", &self.behavior)
			.field("member", &self.member)
			.field("ref_only", &self.ref_only)
			.finish()
	}
}
