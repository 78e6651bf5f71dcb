//! Indented text dump of a subtree that shows set attributes only.

use std::fmt::Write as _;

use folio_attrs::{AttrError, AttrValue, NodeId, NodeTree};

/// Renders `root` and everything below it that is set.
///
/// Each line is a node kind followed by its set scalar attributes. Nested
/// attributes follow on deeper lines, labeled with the attribute name when it
/// differs from the kind; collection items follow their list. Unset attributes and
/// children that are entirely unset are omitted. Nothing is materialized.
pub fn outline(tree: &NodeTree, root: NodeId) -> Result<String, AttrError> {
	let mut out = String::new();
	write_node(tree, root, None, 0, &mut out)?;
	Ok(out)
}

fn write_node(
	tree: &NodeTree,
	id: NodeId,
	label: Option<&str>,
	depth: usize,
	out: &mut String,
) -> Result<(), AttrError> {
	let node = tree.get(id)?;
	let kind = node.kind().name;
	let _ = write!(out, "{:width$}", "", width = depth * 2);
	match label {
		Some(label) if label != kind => {
			let _ = write!(out, "{label}: {kind}");
		}
		_ => out.push_str(kind),
	}

	let mut nested = Vec::new();
	for (name, value) in tree.explicit_attrs(id)? {
		match value {
			AttrValue::Node(child) => nested.push((name, child)),
			value => {
				let _ = write!(out, " {name}={value}");
			}
		}
	}
	out.push('\n');

	for &item in node.items().unwrap_or_default() {
		write_node(tree, item, None, depth + 1, out)?;
	}
	for (name, child) in nested {
		write_node(tree, child, Some(name), depth + 1, out)?;
	}
	Ok(())
}
