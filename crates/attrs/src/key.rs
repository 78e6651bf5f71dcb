use std::marker::PhantomData;

use folio_primitives::NodeId;

use crate::descriptor::{AccessMode, Behavior, Descriptor};
use crate::error::AttrError;
use crate::node::NodeKind;
use crate::tree::NodeTree;
use crate::value::Scalar;

/// Typed handle to a scalar attribute of a node kind.
pub struct AttrKey<T: Scalar> {
	kind: &'static NodeKind,
	name: &'static str,
	_marker: PhantomData<fn() -> T>,
}

impl<T: Scalar> Clone for AttrKey<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: Scalar> Copy for AttrKey<T> {}

impl<T: Scalar> std::fmt::Debug for AttrKey<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "AttrKey({}.{})", self.kind.name, self.name)
	}
}

impl<T: Scalar> AttrKey<T> {
	pub const fn new(kind: &'static NodeKind, name: &'static str) -> Self {
		Self {
			kind,
			name,
			_marker: PhantomData,
		}
	}

	pub fn kind(&self) -> &'static NodeKind {
		self.kind
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Resolves the untyped descriptor, checking it holds a `T`.
	pub fn descriptor(&self) -> Result<&'static Descriptor, AttrError> {
		let descriptor = self
			.kind
			.descriptors()
			.get(self.name)
			.ok_or_else(|| AttrError::UnknownAttribute {
				kind: self.kind.name,
				attr: self.name.to_string(),
			})?;
		match descriptor.behavior() {
			Behavior::NullableScalar(ty) | Behavior::Value(ty) if ty == T::attr_type() => Ok(descriptor),
			_ => Err(AttrError::TypeMismatch {
				attr: self.name,
				expected: descriptor.value_type().to_string(),
				got: std::any::type_name::<T>(),
			}),
		}
	}

	/// Reads the value, falling back to the default when unset.
	pub fn get(&self, tree: &NodeTree, node: NodeId) -> Result<T, AttrError> {
		let value = self.descriptor()?.read_scalar(tree, node, AccessMode::ReadWrite)?;
		value.map_or_else(|| Ok(T::default()), |v| self.convert(v))
	}

	/// Reads the value, or `None` when unset.
	pub fn peek(&self, tree: &NodeTree, node: NodeId) -> Result<Option<T>, AttrError> {
		self.descriptor()?
			.read_scalar(tree, node, AccessMode::GetNull)?
			.map(|v| self.convert(v))
			.transpose()
	}

	pub fn set(&self, tree: &mut NodeTree, node: NodeId, value: T) -> Result<(), AttrError> {
		self.descriptor()?.set_value(tree, node, value.into_value())
	}

	pub fn clear(&self, tree: &mut NodeTree, node: NodeId) -> Result<(), AttrError> {
		self.descriptor()?.set_null(tree, node)
	}

	pub fn is_null(&self, tree: &NodeTree, node: NodeId) -> Result<bool, AttrError> {
		self.descriptor()?.is_null(tree, node)
	}

	fn convert(&self, value: crate::AttrValue) -> Result<T, AttrError> {
		T::from_value(value).map_err(|v| AttrError::TypeMismatch {
			attr: self.name,
			expected: T::attr_type().to_string(),
			got: v.type_name(),
		})
	}
}
