//! Enumerated attribute values. The first variant of each is its default.

use folio_attrs::attr_enum;

attr_enum! {
	/// Horizontal alignment of paragraphs and tables.
	pub enum Alignment {
		Left,
		Center,
		Right,
		Justify,
	}
}

attr_enum! {
	pub enum VerticalAlign {
		Top,
		Center,
		Bottom,
	}
}

attr_enum! {
	pub enum Underline {
		None,
		Single,
		Double,
		Wavy,
	}
}

attr_enum! {
	/// Stroke of a border line.
	pub enum LineStyle {
		None,
		Single,
		Thick,
		Double,
		Dotted,
	}
}

attr_enum! {
	pub enum Orientation {
		Portrait,
		Landscape,
	}
}
