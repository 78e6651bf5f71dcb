//! Tri-state attribute wrapper.


/// A value that is either explicitly set or unset.
///
/// Unlike `Option<T>`, unsetting keeps the last stored value in place so that
/// [`Nullable::restore`] can bring it back. Readers that only care about
/// explicit values go through [`Nullable::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nullable<T> {
	value: T,
	set: bool,
}

impl<T> Nullable<T> {
	/// Creates a set wrapper holding `value`.
	pub const fn new(value: T) -> Self {
		Self { value, set: true }
	}

	/// Creates a wrapper from its raw parts.
	pub const fn from_parts(value: T, set: bool) -> Self {
		Self { value, set }
	}

	/// Returns the value if it is set.
	#[inline]
	pub fn get(&self) -> Option<&T> {
		self.set.then_some(&self.value)
	}

	/// Returns the stored value, whether or not it is currently set.
	#[inline]
	pub fn stored(&self) -> &T {
		&self.value
	}

	#[inline]
	pub fn is_set(&self) -> bool {
		self.set
	}

	#[inline]
	pub fn is_null(&self) -> bool {
		!self.set
	}

	/// Stores `value` and marks the wrapper set.
	pub fn set(&mut self, value: T) {
		self.value = value;
		self.set = true;
	}

	/// Marks the wrapper unset. The stored value is kept.
	pub fn set_null(&mut self) {
		self.set = false;
	}

	/// Marks the wrapper set again, exposing the retained value.
	pub fn restore(&mut self) -> &T {
		self.set = true;
		&self.value
	}

	pub fn into_option(self) -> Option<T> {
		self.set.then_some(self.value)
	}

	pub fn into_parts(self) -> (T, bool) {
		(self.value, self.set)
	}
}

impl<T: Clone + Default> Nullable<T> {
	/// Returns the set value, or `T::default()` when unset.
	pub fn value_or_default(&self) -> T {
		if self.set {
			self.value.clone()
		} else {
			T::default()
		}
	}
}

impl<T> From<T> for Nullable<T> {
	fn from(value: T) -> Self {
		Self::new(value)
	}
}

impl<T: Default> From<Option<T>> for Nullable<T> {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(value) => Self::new(value),
			None => Self::default(),
		}
	}
}
