use folio_primitives::NodeId;

use crate::storage::Shape;

/// Attribute metadata that cannot be honored. These are authoring bugs in a
/// node type's declarations and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	#[error("{owner}.{attr}: member `{member}` is neither a field nor a property")]
	UnboundMember {
		owner: &'static str,
		attr: &'static str,
		member: &'static str,
	},
	#[error("{owner}.{attr}: collection attributes must be backed by a field")]
	CollectionOnProperty { owner: &'static str, attr: &'static str },
	#[error("{owner}.{attr}: attribute declared more than once")]
	DuplicateName { owner: &'static str, attr: &'static str },
	#[error("{owner}.{attr}: child slot declared without a node kind")]
	MissingChildKind { owner: &'static str, attr: &'static str },
	#[error("{owner}.{attr}: {shape:?} storage cannot hold {value_type}")]
	ShapeMismatch {
		owner: &'static str,
		attr: &'static str,
		shape: Shape,
		value_type: String,
	},
}

/// Failure of a single attribute operation. Operations either commit fully or
/// fail with one of these and leave the slot as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttrError {
	#[error(transparent)]
	Configuration(#[from] ConfigError),
	#[error("invalid operation: {0}")]
	InvalidOperation(String),
	#[error("{attr}: expected {expected}, got {got}")]
	TypeMismatch {
		attr: &'static str,
		expected: String,
		got: &'static str,
	},
	#[error("expected node of type {expected}, got {got}")]
	WrongNodeKind {
		expected: &'static str,
		got: &'static str,
	},
	#[error("node {0} does not exist")]
	NodeNotFound(NodeId),
	#[error("{attr}: value has no unset state")]
	NotNullable { attr: &'static str },
	#[error("{attr}: value rejected: {reason}")]
	Rejected { attr: &'static str, reason: String },
	#[error("{kind} has no attribute `{attr}`")]
	UnknownAttribute { kind: &'static str, attr: String },
}
