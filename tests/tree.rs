// The shape of the mounted tree: names, paths, lookups, children, links.
#![allow(clippy::unwrap_used)]


use std::collections::HashSet;

use test_common::*;
use test_log::test; // We want to see logs while testing.

use mxfs::volume::directory::EntryKind;
use mxfs::volume::paths::to_external_separators;
use mxfs::volume::vtoc::ROOT_UID;

#[test]
fn every_entry_has_a_unique_uid() {
    let (_file, volume) = standard_volume();
    let mut seen = HashSet::new();
    for entry in volume.entries() {
        assert!(seen.insert(entry.uid), "uid {:#o} repeats", entry.uid);
    }
}

#[test]
fn full_paths_round_trip_through_lookup() {
    let (_file, volume) = standard_volume();
    for (index, entry) in volume.entries().iter().enumerate() {
        let external = to_external_separators(&entry.full_path);
        assert_eq!(
            volume.lookup_path(&external),
            Some(index),
            "path {external} did not come back to its own entry"
        );
    }
}

#[test]
fn the_root_is_the_root() {
    let (_file, volume) = standard_volume();
    let root = volume.lookup_path("/").unwrap();
    let entry = volume.entry(root);
    assert_eq!(entry.uid, ROOT_UID);
    assert_eq!(entry.name, ">");
    assert_eq!(entry.full_path, ">");
    assert!(entry.is_directory());
    assert!(volume.stat(root).is_dir);
}

#[test]
fn root_children_come_back_in_chain_order_without_the_tombstone() {
    let (_file, volume) = standard_volume();
    let root = volume.lookup_path("/").unwrap();
    let children = volume.list_children(root);

    // Four live entries; the tombstoned one between alpha and holey is
    // skipped but does not derail the walk.
    let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "holey", "short", "lnk"]);

    assert_eq!(children[0].kind, EntryKind::Directory);
    assert_eq!(children[1].kind, EntryKind::Segment);
    assert_eq!(children[2].kind, EntryKind::Segment);
    assert_eq!(children[3].kind, EntryKind::Link);
}

#[test]
fn children_resolve_to_their_own_entries() {
    let (_file, volume) = standard_volume();
    let root = volume.lookup_path("/").unwrap();
    let alpha = volume.lookup_path("/alpha").unwrap();

    let children = volume.list_children(root);
    assert_eq!(children[0].child_index, Some(alpha));

    // And down a level.
    let hello = volume.lookup_path("/alpha/hello").unwrap();
    let alpha_children = volume.list_children(alpha);
    assert_eq!(alpha_children.len(), 1);
    assert_eq!(alpha_children[0].name, "hello");
    assert_eq!(alpha_children[0].child_index, Some(hello));
    assert_eq!(volume.entry(hello).full_path, ">alpha>hello");
}

#[test]
fn uid_lookup_agrees_with_path_lookup() {
    let (_file, volume) = standard_volume();
    assert_eq!(
        volume.lookup_uid(UID_HELLO),
        volume.lookup_path("/alpha/hello")
    );
    assert_eq!(volume.lookup_uid(ROOT_UID), volume.lookup_path("/"));
    assert_eq!(volume.lookup_uid(0o676767), None);
}

#[test]
fn missing_paths_are_a_miss_not_an_error() {
    let (_file, volume) = standard_volume();
    assert_eq!(volume.lookup_path("/no/such/thing"), None);
    assert_eq!(volume.lookup_path("/alpha/hell"), None); // no prefix matching
}

#[test]
fn sizes_come_from_the_branch_records() {
    let (_file, volume) = standard_volume();
    let hello = volume.lookup_path("/alpha/hello").unwrap();
    assert_eq!(volume.stat(hello).size_bytes, HELLO_CONTENT.len() as u64);
    let short = volume.lookup_path("/short").unwrap();
    assert_eq!(volume.stat(short).size_bytes, 5);
    let holey = volume.lookup_path("/holey").unwrap();
    assert_eq!(volume.stat(holey).size_bytes, 6000);
}

#[test]
fn links_are_addressable_and_readable() {
    let (_file, volume) = standard_volume();
    let lnk = volume.lookup_path("/lnk").unwrap();
    let entry = volume.entry(lnk);
    assert!(entry.is_link());
    assert!(!entry.is_directory());
    assert_eq!(entry.full_path, ">lnk");
    assert_eq!(volume.read_link(lnk), Some(">alpha>hello"));
    // Link targets count as the link's size.
    assert_eq!(volume.stat(lnk).size_bytes, ">alpha>hello".len() as u64);

    // The root's child record points at the materialized link entry.
    let root = volume.lookup_path("/").unwrap();
    assert_eq!(volume.list_children(root)[3].child_index, Some(lnk));

    // And nothing that is not a link pretends to be one.
    let hello = volume.lookup_path("/alpha/hello").unwrap();
    assert_eq!(volume.read_link(hello), None);
}

#[test]
fn timestamps_convert_to_unix_time() {
    let (_file, volume) = standard_volume();
    let hello = volume.lookup_path("/alpha/hello").unwrap();
    let stat = volume.stat(hello);
    // The fixture writes three consecutive clock words; conversion keeps
    // their order even though it lands them in coarse seconds.
    assert!(stat.accessed <= stat.modified);
    assert!(stat.modified <= stat.created);
    // And they land this side of 1970.
    assert!(stat.modified > 0);
}
