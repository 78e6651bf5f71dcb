//! Typed handles to frequently used attributes.

use folio_attrs::{AttrKey, Color};

use crate::document::{DOCUMENT, SECTION};
use crate::style::{Alignment, Orientation, Underline};
use crate::table::CELL;
use crate::text::{FONT, PARAGRAPH, PARAGRAPH_FORMAT, RUN};

pub static TITLE: AttrKey<String> = AttrKey::new(&DOCUMENT, "Title");

pub static ORIENTATION: AttrKey<Orientation> = AttrKey::new(&SECTION, "Orientation");
pub static PAGE_WIDTH: AttrKey<f64> = AttrKey::new(&SECTION, "PageWidth");

pub static STYLE: AttrKey<String> = AttrKey::new(&PARAGRAPH, "Style");
pub static ALIGNMENT: AttrKey<Alignment> = AttrKey::new(&PARAGRAPH_FORMAT, "Alignment");
pub static LEFT_INDENT: AttrKey<f64> = AttrKey::new(&PARAGRAPH_FORMAT, "LeftIndent");
pub static SPACE_AFTER: AttrKey<f64> = AttrKey::new(&PARAGRAPH_FORMAT, "SpaceAfter");

pub static TEXT: AttrKey<String> = AttrKey::new(&RUN, "Text");
pub static LENGTH: AttrKey<i64> = AttrKey::new(&RUN, "Length");

pub static FONT_NAME: AttrKey<String> = AttrKey::new(&FONT, "Name");
/// Point size; writes of non-positive sizes are rejected.
pub static FONT_SIZE: AttrKey<f64> = AttrKey::new(&FONT, "Size");
pub static BOLD: AttrKey<bool> = AttrKey::new(&FONT, "Bold");
pub static ITALIC: AttrKey<bool> = AttrKey::new(&FONT, "Italic");
pub static UNDERLINE: AttrKey<Underline> = AttrKey::new(&FONT, "Underline");
pub static FONT_COLOR: AttrKey<Color> = AttrKey::new(&FONT, "Color");

pub static SHADING: AttrKey<Color> = AttrKey::new(&CELL, "Shading");
