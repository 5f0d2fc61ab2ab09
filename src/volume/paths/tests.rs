// Path resolution tests.
#![allow(clippy::unwrap_used)]

use crate::volume::paths::resolve::*;
use crate::volume::volume_struct::{EntryOrigin, VolumeEntry};
use crate::volume::vtoc::{VtoceAttributes, ROOT_UID};

fn bare_entry(uid: u64, name: &str, ancestors: Vec<u64>) -> VolumeEntry {
    VolumeEntry {
        uid,
        attributes: VtoceAttributes::empty(),
        time_used: 0,
        time_modified: 0,
        time_created: 0,
        origin: EntryOrigin::Catalog {
            subvolume: 0,
            slot: 0,
        },
        file_map: Vec::new(),
        ancestors,
        name: name.to_string(),
        dir_name: String::new(),
        full_path: String::new(),
        bit_count: 0,
        link_target: None,
        children: Vec::new(),
    }
}

#[test]
fn separator_substitution_round_trips() {
    assert_eq!(to_native_separators("/alpha/beta"), ">alpha>beta");
    assert_eq!(to_external_separators(">alpha>beta"), "/alpha/beta");
    assert_eq!(to_native_separators("/"), ">");
}

#[test]
fn root_sentinel_gets_the_root_name() {
    let words = [0o141142143144; 8]; // "abcd" x 8, ignored for the root
    assert_eq!(entry_name(ROOT_UID, &words), ">");
    assert_eq!(entry_name(0o123, &words), "abcdabcdabcdabcdabcdabcdabcdabcd");
}

#[test]
fn paths_concatenate_down_the_chain() {
    let mut entries = vec![
        bare_entry(ROOT_UID, ">", vec![]),
        bare_entry(0o111, "alpha", vec![ROOT_UID]),
        bare_entry(0o222, "beta", vec![ROOT_UID, 0o111]),
    ];
    build_paths(&mut entries);
    assert_eq!(entries[0].full_path, ">");
    assert_eq!(entries[0].dir_name, "");
    assert_eq!(entries[1].full_path, ">alpha");
    assert_eq!(entries[1].dir_name, ">");
    assert_eq!(entries[2].full_path, ">alpha>beta");
    assert_eq!(entries[2].dir_name, ">alpha>");
}

#[test]
fn missing_ancestors_render_as_octal() {
    assert_eq!(
        AncestorName::Unresolved(0o555).into_component(),
        "000000000555"
    );
    let mut entries = vec![
        bare_entry(ROOT_UID, ">", vec![]),
        bare_entry(0o333, "gamma", vec![ROOT_UID, 0o555]),
    ];
    build_paths(&mut entries);
    // 0o555 is on some other pack; it shows up as its octal uid rather
    // than killing the entry.
    assert_eq!(entries[1].full_path, ">000000000555>gamma");
}

#[test]
fn child_paths_do_not_double_the_root_separator() {
    assert_eq!(child_path(">", "alpha"), ">alpha");
    assert_eq!(child_path(">alpha", "beta"), ">alpha>beta");
}
