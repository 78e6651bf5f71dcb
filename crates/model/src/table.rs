//! Tables, rows, cells and borders.

use folio_attrs::{
	AttrDecl, Color, DescriptorSet, NodeId, Nullable, descriptor_set, field, list_kind, node_kind,
};

use crate::style::{Alignment, LineStyle, VerticalAlign};
use crate::text::PARAGRAPHS;

#[derive(Debug, Default)]
pub struct Table {
	pub alignment: Nullable<Alignment>,
	pub borders: Option<NodeId>,
	pub rows: Option<NodeId>,
}

node_kind!(pub static TABLE: Table = "Table", describe = describe_table);
list_kind!(pub static TABLES = "Tables" of TABLE);

fn describe_table() -> &'static DescriptorSet {
	descriptor_set!("Table", [
		AttrDecl::field("Alignment", field!(Table, alignment)),
		AttrDecl::field("Borders", field!(Table, borders)).child(&BORDERS),
		AttrDecl::field("Rows", field!(Table, rows)).child(&ROWS),
	])
}

#[derive(Debug, Default)]
pub struct Row {
	pub height: Nullable<f64>,
	pub cells: Option<NodeId>,
}

node_kind!(pub static ROW: Row = "Row", describe = describe_row);
list_kind!(pub static ROWS = "Rows" of ROW);

fn describe_row() -> &'static DescriptorSet {
	descriptor_set!("Row", [
		AttrDecl::field("Height", field!(Row, height)),
		AttrDecl::field("Cells", field!(Row, cells)).child(&CELLS),
	])
}

#[derive(Debug, Default)]
pub struct Cell {
	pub vertical_align: Nullable<VerticalAlign>,
	pub width: Nullable<f64>,
	pub shading: Color,
	pub paragraphs: Option<NodeId>,
}

node_kind!(pub static CELL: Cell = "Cell", describe = describe_cell);
list_kind!(pub static CELLS = "Cells" of CELL);

fn describe_cell() -> &'static DescriptorSet {
	descriptor_set!("Cell", [
		AttrDecl::field("VerticalAlign", field!(Cell, vertical_align)),
		AttrDecl::field("Width", field!(Cell, width)),
		AttrDecl::field("Shading", field!(Cell, shading)),
		AttrDecl::field("Paragraphs", field!(Cell, paragraphs)).child(&PARAGRAPHS),
	])
}

/// Border settings shared by paragraphs and tables.
#[derive(Debug, Default)]
pub struct Borders {
	pub style: Nullable<LineStyle>,
	pub width: Nullable<f64>,
	pub color: Color,
}

node_kind!(pub static BORDERS: Borders = "Borders", describe = describe_borders);

fn describe_borders() -> &'static DescriptorSet {
	descriptor_set!("Borders", [
		AttrDecl::field("Style", field!(Borders, style)),
		AttrDecl::field("Width", field!(Borders, width)),
		AttrDecl::field("Color", field!(Borders, color)),
	])
}
