use pretty_assertions::assert_eq;

use super::*;
use crate::fixtures::{COUNTER, Counter, GAUGE, GAUGES};
use crate::{Color, NodeList};

fn child_of(tree: &mut NodeTree, id: NodeId, attr: &str) -> NodeId {
	tree.get_attr(id, attr, AccessMode::ReadWrite)
		.unwrap()
		.and_then(|v| v.as_node())
		.unwrap()
}

#[test]
fn stale_ids_are_rejected() {
	let mut tree = NodeTree::new();
	let first = tree.create(&GAUGE);
	tree.release(first).unwrap();
	let second = tree.create(&GAUGE);

	assert_eq!(first.index(), second.index());
	assert!(!tree.contains(first));
	assert!(tree.contains(second));
	assert_eq!(tree.get(first).unwrap_err(), AttrError::NodeNotFound(first));
	assert_eq!(tree.set_attr(first, "Level", 1i64).unwrap_err(), AttrError::NodeNotFound(first));
}

#[test]
fn release_is_transitive() {
	let mut tree = NodeTree::new();
	let root = tree.create(&COUNTER);
	let gauge = child_of(&mut tree, root, "Child");
	let list = child_of(&mut tree, root, "Gauges");
	let item = tree.append_new(list).unwrap();
	assert_eq!(tree.len(), 4);

	tree.release(root).unwrap();
	assert!(tree.is_empty());
	for id in [root, gauge, list, item] {
		assert!(!tree.contains(id), "{id} survived");
	}
}

#[test]
fn owned_nodes_are_released_through_their_owner() {
	let mut tree = NodeTree::new();
	let root = tree.create(&COUNTER);
	let gauge = child_of(&mut tree, root, "Child");

	let err = tree.release(gauge).unwrap_err();
	assert!(matches!(err, AttrError::InvalidOperation(_)), "{err}");
	assert!(tree.contains(gauge));
	assert_eq!(tree.downcast::<Counter>(root).unwrap().child, Some(gauge));
}

#[test]
fn ancestors_walk_to_the_root() {
	let mut tree = NodeTree::new();
	let root = tree.create(&COUNTER);
	let list = child_of(&mut tree, root, "Gauges");
	let item = tree.append_new(list).unwrap();

	assert_eq!(tree.ancestors(item).collect::<Vec<_>>(), vec![list, root]);
	assert_eq!(tree.ancestors(root).count(), 0);
}

#[test]
fn adopt_refuses_cycles() {
	let mut tree = NodeTree::new();
	let root = tree.create(&COUNTER);
	let list = child_of(&mut tree, root, "Gauges");

	let err = tree.adopt(list, root).unwrap_err();
	assert!(matches!(err, AttrError::InvalidOperation(_)), "{err}");
	let err = tree.adopt(root, root).unwrap_err();
	assert!(matches!(err, AttrError::InvalidOperation(_)), "{err}");
	assert_eq!(tree.parent(root), None);
}

#[test]
fn lists_hold_only_their_item_kind() {
	let mut tree = NodeTree::new();
	let list = tree.create(&GAUGES);
	let counter = tree.create(&COUNTER);

	assert_eq!(
		tree.append(list, counter).unwrap_err(),
		AttrError::WrongNodeKind {
			expected: "Gauge",
			got: "Counter",
		}
	);
	assert!(matches!(
		tree.append(counter, list).unwrap_err(),
		AttrError::InvalidOperation(_)
	));
	assert!(matches!(tree.items(counter).unwrap_err(), AttrError::InvalidOperation(_)));
	assert_eq!(tree.downcast::<NodeList>(list).unwrap().len(), 0);
}

#[test]
fn append_refuses_items_owned_elsewhere() {
	let mut tree = NodeTree::new();
	let a = tree.create(&GAUGES);
	let b = tree.create(&GAUGES);
	let item = tree.append_new(a).unwrap();

	assert!(matches!(tree.append(b, item).unwrap_err(), AttrError::InvalidOperation(_)));
	assert_eq!(tree.items(b).unwrap(), &[] as &[NodeId]);
	assert_eq!(tree.parent(item), Some(a));
}

#[test]
fn append_refuses_items_already_in_the_list() {
	let mut tree = NodeTree::new();
	let list = tree.create(&GAUGES);
	let item = tree.append_new(list).unwrap();

	assert!(matches!(tree.append(list, item).unwrap_err(), AttrError::InvalidOperation(_)));
	assert_eq!(tree.items(list).unwrap(), &[item]);
	assert_eq!(tree.children(list).unwrap(), &[item]);
}

#[test]
fn remove_item_releases_it() {
	let mut tree = NodeTree::new();
	let list = tree.create(&GAUGES);
	let first = tree.append_new(list).unwrap();
	let second = tree.append_new(list).unwrap();

	tree.remove_item(list, 0).unwrap();
	assert_eq!(tree.items(list).unwrap(), &[second]);
	assert_eq!(tree.children(list).unwrap(), &[second]);
	assert!(!tree.contains(first));

	assert!(matches!(tree.remove_item(list, 3).unwrap_err(), AttrError::InvalidOperation(_)));
}

#[test]
fn node_null_state_tracks_attributes() {
	let mut tree = NodeTree::new();
	let gauge = tree.create(&GAUGE);
	assert!(tree.node_is_null(gauge).unwrap());

	tree.set_attr(gauge, "Tint", Color::rgb(1, 2, 3)).unwrap();
	assert!(!tree.node_is_null(gauge).unwrap());

	tree.clear_node(gauge).unwrap();
	assert!(tree.node_is_null(gauge).unwrap());
}

#[test]
fn clear_node_skips_values_without_unset_state() {
	let mut tree = NodeTree::new();
	let root = tree.create(&COUNTER);
	tree.set_attr(root, "Count", 7).unwrap();
	tree.set_attr(root, "Label", "kept").unwrap();
	tree.set_attr(root, "Tint", Color::BLACK).unwrap();
	let gauge = child_of(&mut tree, root, "Child");
	tree.set_attr(gauge, "Level", 2i64).unwrap();

	tree.clear_node(root).unwrap();

	assert!(tree.attr_is_null(root, "Count").unwrap());
	assert!(tree.attr_is_null(root, "Tint").unwrap());
	assert!(tree.attr_is_null(root, "Child").unwrap());
	assert!(tree.contains(gauge));
	assert_eq!(tree.peek_attr(root, "Label").unwrap(), Some(AttrValue::from("kept")));
}

#[test]
fn explicit_attrs_follow_declaration_order() {
	let mut tree = NodeTree::new();
	let root = tree.create(&COUNTER);
	tree.set_attr(root, "Tint", Color::WHITE).unwrap();
	tree.set_attr(root, "Count", 3).unwrap();
	tree.set_attr(root, "Label", "ab").unwrap();

	assert_eq!(
		tree.explicit_attrs(root).unwrap(),
		vec![
			("Count", AttrValue::Int(3)),
			("Label", AttrValue::from("ab")),
			("Tint", AttrValue::Color(Color::WHITE)),
			("Limit", AttrValue::Int(0)),
			("LabelLength", AttrValue::Int(2)),
		]
	);
	assert_eq!(tree.len(), 1);
}

#[test]
fn unknown_attribute_names_are_reported() {
	let mut tree = NodeTree::new();
	let root = tree.create(&COUNTER);
	assert_eq!(
		tree.set_attr(root, "Colour", Color::WHITE).unwrap_err(),
		AttrError::UnknownAttribute {
			kind: "Counter",
			attr: "Colour".to_string(),
		}
	);
	assert!(tree.clear_attr(root, "Colour").is_err());
}

#[test]
fn debug_lists_live_nodes() {
	let mut tree = NodeTree::new();
	let root = tree.create(&COUNTER);
	child_of(&mut tree, root, "Child");
	let out = format!("{tree:?}");
	assert!(out.contains("Counter"), "{out}");
	assert!(out.contains("Gauge"), "{out}");
}

#[test]
fn child_node_materializes_nested_attributes() {
	let mut tree = NodeTree::new();
	let root = tree.create(&COUNTER);

	let list = tree.child_node(root, "Gauges").unwrap();
	assert_eq!(tree.child_node(root, "Gauges").unwrap(), list);
	assert_eq!(tree.kind(list).unwrap(), &GAUGES);

	assert!(matches!(
		tree.child_node(root, "Count").unwrap_err(),
		AttrError::TypeMismatch { attr: "Count", got: "int", .. }
	));
	assert!(matches!(
		tree.child_node(root, "Linked").unwrap_err(),
		AttrError::InvalidOperation(_)
	));
}
