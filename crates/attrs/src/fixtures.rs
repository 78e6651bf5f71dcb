//! Node kinds shared by unit tests.

use crate::{
	AttrDecl, AttrKey, AttrType, Color, DescriptorSet, NodeId, Nullable, Shape, ValueType, field,
	list_kind, node_kind, property,
};

/// Child kind mixing unsettable attributes with a plain string.
#[derive(Debug, Default)]
pub struct Gauge {
	pub level: Nullable<i64>,
	pub tint: Color,
	pub note: String,
}

node_kind!(pub static GAUGE: Gauge = "Gauge", describe = describe_gauge);
list_kind!(pub static GAUGES = "Gauges" of GAUGE);

pub fn describe_gauge() -> &'static DescriptorSet {
	crate::descriptor_set!("Gauge", [
		AttrDecl::field("Level", field!(Gauge, level)),
		AttrDecl::field("Tint", field!(Gauge, tint)),
		AttrDecl::field("Note", field!(Gauge, note)),
	])
}

#[derive(Debug, Default)]
pub struct Counter {
	pub count: Nullable<i32>,
	pub label: String,
	pub tint: Color,
	pub child: Option<NodeId>,
	pub spare: Option<NodeId>,
	pub gauges: Option<NodeId>,
	pub limit: i64,
	pub linked: Option<NodeId>,
}

impl Counter {
	fn limit(&self) -> i64 {
		self.limit
	}

	fn set_limit(&mut self, limit: i64) -> Result<(), String> {
		if limit < 0 {
			return Err("limit must not be negative".to_string());
		}
		self.limit = limit;
		Ok(())
	}

	fn label_len(&self) -> i64 {
		self.label.len() as i64
	}

	pub fn linked(&self) -> Option<NodeId> {
		self.linked
	}
}

node_kind!(pub static COUNTER: Counter = "Counter", describe = describe_counter);

pub fn describe_counter() -> &'static DescriptorSet {
	crate::descriptor_set!("Counter", [
		AttrDecl::field("Count", field!(Counter, count)),
		AttrDecl::field("Label", field!(Counter, label)),
		AttrDecl::field("Tint", field!(Counter, tint)),
		AttrDecl::field("Child", field!(Counter, child)).child(&GAUGE),
		AttrDecl::field("Spare", field!(Counter, spare)).child(&GAUGE),
		AttrDecl::field("Gauges", field!(Counter, gauges)).child(&GAUGES),
		AttrDecl::property("Limit", property!(Counter, Counter::limit, Counter::set_limit)),
		AttrDecl::property("LabelLength", property!(Counter, Counter::label_len)),
		AttrDecl::property("Linked", property!(Counter, Counter::linked)).child(&GAUGE).ref_only(),
	])
}

pub static COUNT: AttrKey<i32> = AttrKey::new(&COUNTER, "Count");
pub static LABEL: AttrKey<String> = AttrKey::new(&COUNTER, "Label");

/// Kind whose metadata names a member without a binding.
#[derive(Debug, Default)]
pub struct Broken;

node_kind!(pub static BROKEN: Broken = "Broken", describe = describe_broken);

pub fn describe_broken() -> &'static DescriptorSet {
	crate::descriptor_set!("Broken", [AttrDecl::unbound(
		"Ghost",
		"ghost",
		Shape::Plain,
		ValueType::Scalar(AttrType::Int),
	)])
}
