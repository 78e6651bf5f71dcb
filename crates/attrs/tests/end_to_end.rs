//! A node type declared entirely through the public surface.

use folio_attrs::{
	AccessMode, AttrDecl, AttrValue, DescriptorSet, NodeId, NodeTree, Nullable, descriptor_set,
	field, node_kind,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct Widget {
	count: Nullable<i64>,
	child: Option<NodeId>,
}

node_kind!(static WIDGET: Widget = "Widget", describe = describe_widget);

fn describe_widget() -> &'static DescriptorSet {
	descriptor_set!("Widget", [
		AttrDecl::field("Count", field!(Widget, count)),
		AttrDecl::field("Child", field!(Widget, child)).child(&WIDGET),
	])
}

#[test]
fn count_and_child() {
	let mut tree = NodeTree::new();
	let n = tree.create(&WIDGET);

	assert!(tree.attr_is_null(n, "Count").unwrap());
	tree.set_attr(n, "Count", 5i64).unwrap();
	assert_eq!(
		tree.get_attr(n, "Count", AccessMode::ReadWrite).unwrap(),
		Some(AttrValue::Int(5))
	);

	let first = tree
		.get_attr(n, "Child", AccessMode::ReadWrite)
		.unwrap()
		.and_then(|v| v.as_node())
		.expect("child is materialized");
	assert_eq!(tree.parent(first), Some(n));

	let second = tree
		.get_attr(n, "Child", AccessMode::ReadWrite)
		.unwrap()
		.and_then(|v| v.as_node());
	assert_eq!(second, Some(first));
}

#[test]
fn nested_chain_materializes_level_by_level() {
	let mut tree = NodeTree::new();
	let root = tree.create(&WIDGET);

	let mut current = root;
	for _ in 0..3 {
		current = tree
			.get_attr(current, "Child", AccessMode::ReadWrite)
			.unwrap()
			.and_then(|v| v.as_node())
			.unwrap();
	}
	tree.set_attr(current, "Count", 1i64).unwrap();

	assert_eq!(tree.ancestors(current).count(), 3);
	assert_eq!(tree.ancestors(current).last(), Some(root));
	assert!(!tree.attr_is_null(root, "Child").unwrap());

	tree.clear_attr(root, "Child").unwrap();
	assert!(tree.attr_is_null(root, "Child").unwrap());
	assert_eq!(tree.len(), 4);

	tree.release(root).unwrap();
	assert!(tree.is_empty());
}

#[test]
fn descriptors_keep_declaration_order() {
	let names: Vec<_> = WIDGET.descriptors().names().collect();
	assert_eq!(names, ["Count", "Child"]);
	assert_eq!(WIDGET.descriptors().kind(), "Widget");
}
