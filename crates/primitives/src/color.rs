use std::fmt;
use std::str::FromStr;

use crate::Nullable;

/// An ARGB color that may be empty.
///
/// The empty state is carried by an inner [`Nullable`], so a color attribute
/// stored as a plain value still reports whether it was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(Nullable<u32>);

impl Color {
	pub const EMPTY: Self = Self(Nullable::from_parts(0, false));
	pub const BLACK: Self = Self::from_argb(0xFF00_0000);
	pub const WHITE: Self = Self::from_argb(0xFFFF_FFFF);

	pub const fn from_argb(argb: u32) -> Self {
		Self(Nullable::new(argb))
	}

	/// Opaque color from its channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::from_argb(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
	}

	pub fn argb(&self) -> Option<u32> {
		self.0.get().copied()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_null()
	}

	/// Marks the color empty, keeping the channel bits.
	pub fn clear(&mut self) {
		self.0.set_null();
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.argb() {
			Some(argb) => write!(f, "#{argb:08X}"),
			None => f.write_str("empty"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color literal: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
	type Err = ParseColorError;

	/// Parses `#RRGGBB`, `#AARRGGBB` or `empty`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == "empty" {
			return Ok(Self::EMPTY);
		}
		let err = || ParseColorError(s.to_string());
		let hex = s.strip_prefix('#').ok_or_else(err)?;
		let bits = u32::from_str_radix(hex, 16).map_err(|_| err())?;
		match hex.len() {
			6 => Ok(Self::from_argb(0xFF00_0000 | bits)),
			8 => Ok(Self::from_argb(bits)),
			_ => Err(err()),
		}
	}
}
