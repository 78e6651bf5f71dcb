//! Per-kind descriptor sets built from declarative attribute metadata.

use std::sync::{Arc, LazyLock};

use rustc_hash::FxHashMap as HashMap;

use crate::descriptor::{Descriptor, ValueType};
use crate::error::ConfigError;
use crate::member::{Binding, Field, Member, Property};
use crate::node::{Node, NodeKind};
use crate::storage::{Shape, Storage};
use crate::value::AttrType;

/// Declaration of one attribute, before validation.
#[derive(Debug, Clone)]
pub struct AttrDecl {
	pub(crate) name: &'static str,
	pub(crate) member: Member,
	pub(crate) shape: Shape,
	pub(crate) value_type: Option<ValueType>,
	pub(crate) ref_only: bool,
}

impl AttrDecl {
	/// Attribute stored in a struct field.
	pub fn field<N: Node, S: Storage>(name: &'static str, field: Field<N, S>) -> Self {
		let (shape, value_type) = (field.shape(), field.value_type());
		Self::bound(name, Member::Field(Arc::new(field)), shape, value_type)
	}

	/// Attribute exposed through getter/setter functions.
	pub fn property<N: Node, S: Storage>(name: &'static str, property: Property<N, S>) -> Self {
		let (shape, value_type) = (property.shape(), property.value_type());
		Self::bound(name, Member::Property(Arc::new(property)), shape, value_type)
	}

	/// Attribute whose metadata names a member that has no binding.
	pub fn unbound(name: &'static str, member: &'static str, shape: Shape, value_type: ValueType) -> Self {
		Self {
			name,
			member: Member::Unbound(member),
			shape,
			value_type: Some(value_type),
			ref_only: false,
		}
	}

	fn bound(name: &'static str, member: Member, shape: Shape, value_type: Option<AttrType>) -> Self {
		Self {
			name,
			member,
			shape,
			value_type: value_type.map(ValueType::Scalar),
			ref_only: false,
		}
	}

	/// Declares the node kind a child slot holds.
	pub fn child(mut self, kind: &'static NodeKind) -> Self {
		self.value_type = Some(ValueType::Node(kind));
		self
	}

	/// Marks the attribute as a non-owned reference.
	pub fn ref_only(mut self) -> Self {
		self.ref_only = true;
		self
	}
}

/// Options applied while building a [`DescriptorSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryOptions {
	/// Compile every accessor at build time instead of on first use.
	pub precompile: bool,
}

impl RegistryOptions {
	pub fn precompile(mut self, precompile: bool) -> Self {
		self.precompile = precompile;
		self
	}
}

/// The ordered attribute descriptors of one node kind.
#[derive(Debug)]
pub struct DescriptorSet {
	kind: &'static str,
	descriptors: Vec<Descriptor>,
	by_name: HashMap<&'static str, usize>,
}

impl DescriptorSet {
	pub fn build(
		kind: &'static str,
		decls: impl IntoIterator<Item = AttrDecl>,
	) -> Result<Self, ConfigError> {
		Self::build_with(kind, decls, RegistryOptions::default())
	}

	pub fn build_with(
		kind: &'static str,
		decls: impl IntoIterator<Item = AttrDecl>,
		options: RegistryOptions,
	) -> Result<Self, ConfigError> {
		let mut descriptors = Vec::new();
		let mut by_name = HashMap::default();
		for decl in decls {
			let name = decl.name;
			if by_name.insert(name, descriptors.len()).is_some() {
				return Err(ConfigError::DuplicateName { owner: kind, attr: name });
			}
			descriptors.push(Descriptor::new(kind, decl)?);
		}

		let set = Self {
			kind,
			descriptors,
			by_name,
		};
		if options.precompile {
			set.precompile()?;
		}
		tracing::debug!(kind, attrs = set.len(), precompiled = options.precompile, "built descriptor set");
		Ok(set)
	}

	/// The shared set of a kind without attributes.
	pub fn empty() -> &'static DescriptorSet {
		static EMPTY: LazyLock<DescriptorSet> = LazyLock::new(|| DescriptorSet {
			kind: "",
			descriptors: Vec::new(),
			by_name: HashMap::default(),
		});
		&EMPTY
	}

	pub fn kind(&self) -> &'static str {
		self.kind
	}

	pub fn get(&self, name: &str) -> Option<&Descriptor> {
		self.by_name.get(name).map(|&idx| &self.descriptors[idx])
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Descriptor> {
		self.descriptors.iter()
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.descriptors.iter().map(Descriptor::name)
	}

	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}

	/// Compiles every accessor now, surfacing unbound members.
	pub fn precompile(&self) -> Result<(), ConfigError> {
		self.descriptors.iter().try_for_each(|d| d.compile().map(drop))
	}
}

impl<'a> IntoIterator for &'a DescriptorSet {
	type Item = &'a Descriptor;
	type IntoIter = std::slice::Iter<'a, Descriptor>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Builds a kind's [`DescriptorSet`] once and returns it.
///
/// Invalid declarations are authoring bugs and panic on first use.
///
/// ```ignore
/// fn describe_counter() -> &'static DescriptorSet {
///     descriptor_set!("Counter", [
///         AttrDecl::field("Count", field!(Counter, count)),
///     ])
/// }
/// ```
#[macro_export]
macro_rules! descriptor_set {
	($kind:literal, [$($decl:expr),* $(,)?]) => {{
		static SET: ::std::sync::LazyLock<$crate::DescriptorSet> = ::std::sync::LazyLock::new(|| {
			$crate::DescriptorSet::build($kind, [$($decl),*])
				.unwrap_or_else(|err| panic!("invalid attribute declarations: {err}"))
		});
		&*SET
	}};
}
