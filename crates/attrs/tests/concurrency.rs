//! First-use accessor compilation raced from many threads.

use std::sync::{Arc, Barrier};

use folio_attrs::{
	AccessMode, AttrDecl, AttrValue, DescriptorSet, NodeTree, Nullable, RegistryOptions, field,
	node_kind,
};

#[derive(Debug, Default)]
struct Probe {
	hits: Nullable<i64>,
	note: String,
}

node_kind!(static PROBE: Probe = "Probe", describe = DescriptorSet::empty);

fn decls() -> [AttrDecl; 2] {
	[
		AttrDecl::field("Hits", field!(Probe, hits)),
		AttrDecl::field("Note", field!(Probe, note)),
	]
}

fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_max_level(tracing::Level::TRACE)
		.with_test_writer()
		.try_init();
}

#[test]
fn racing_first_use_publishes_one_accessor() {
	init_tracing();
	let set = DescriptorSet::build("Probe", decls()).unwrap();
	let hits = set.get("Hits").unwrap();
	assert!(!hits.is_compiled());

	const THREADS: usize = 16;
	let barrier = Barrier::new(THREADS);
	let accessors: Vec<_> = std::thread::scope(|s| {
		let handles: Vec<_> = (0..THREADS)
			.map(|i| {
				let barrier = &barrier;
				s.spawn(move || {
					let mut tree = NodeTree::new();
					let probe = tree.create(&PROBE);
					barrier.wait();
					hits.set_value(&mut tree, probe, AttrValue::Int(i as i64)).unwrap();
					assert_eq!(
						hits.get_value(&mut tree, probe, AccessMode::GetNull).unwrap(),
						Some(AttrValue::Int(i as i64))
					);
					hits.compile().unwrap()
				})
			})
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	let winner = hits.compile().unwrap();
	assert!(accessors.iter().all(|a| Arc::ptr_eq(a, &winner)));
	assert_eq!(winner.member(), "hits");
}

#[test]
fn precompiled_sets_are_warm() {
	init_tracing();
	let set = DescriptorSet::build_with("Probe", decls(), RegistryOptions::default().precompile(true))
		.unwrap();
	assert!(set.iter().all(|d| d.is_compiled()));

	let lazy = DescriptorSet::build("Probe", decls()).unwrap();
	assert!(lazy.iter().all(|d| !d.is_compiled()));
}

#[test]
fn shared_set_serves_independent_trees() {
	init_tracing();
	let set = DescriptorSet::build("Probe", decls()).unwrap();
	let note = set.get("Note").unwrap();

	std::thread::scope(|s| {
		for i in 0..4 {
			s.spawn(move || {
				let mut tree = NodeTree::new();
				let probe = tree.create(&PROBE);
				let text = format!("probe {i}");
				note.set_value(&mut tree, probe, text.clone().into()).unwrap();
				assert_eq!(note.peek_value(&tree, probe).unwrap(), Some(AttrValue::String(text)));
			});
		}
	});
}
