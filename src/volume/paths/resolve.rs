// Names and paths.
//
// Every catalog entry carries its own name and the uid chain of its
// ancestors, all the way up to the volume root. Nothing stores a ready-made
// path; we rebuild each one by resolving the chain uid-by-uid against the
// catalog. Multics writes paths with `>` where the rest of the world uses
// `/` (the root directory is itself named ">"), so the external surface
// swaps separators on the way in and out.

use log::warn;

use crate::helpers::chars::trimmed_packed_string;
use crate::volume::volume_struct::VolumeEntry;
use crate::volume::vtoc::ROOT_UID;
use crate::words::Word36;

/// What the root calls itself.
pub const ROOT_NAME: &str = ">";

/// Convert an external `/`-separated path to the native form.
pub fn to_native_separators(path: &str) -> String {
    path.replace('/', ">")
}

/// And back out again.
pub fn to_external_separators(path: &str) -> String {
    path.replace('>', "/")
}

/// One resolved step of an ancestor chain. An ancestor uid that is not in
/// this volume's catalog usually points at a directory living on some other
/// pack of the logical volume; the entry is still perfectly browsable, so
/// the missing ancestor renders as its octal uid instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AncestorName {
    Resolved(String),
    Unresolved(u64),
}

impl AncestorName {
    pub fn into_component(self) -> String {
        match self {
            Self::Resolved(name) => name,
            Self::Unresolved(uid) => format!("{uid:012o}"),
        }
    }
}

/// An entry's own display name: the trimmed primary-name field, except the
/// root sentinel, which is always ">".
pub(crate) fn entry_name(uid: u64, name_words: &[Word36]) -> String {
    if uid == ROOT_UID {
        ROOT_NAME.to_string()
    } else {
        trimmed_packed_string(name_words)
    }
}

/// Resolve one ancestor uid against the built entry table.
pub(crate) fn resolve_ancestor(entries: &[VolumeEntry], uid: u64) -> AncestorName {
    match entries.iter().find(|e| e.uid == uid) {
        Some(found) => AncestorName::Resolved(found.name.clone()),
        None => {
            warn!("ancestor uid {uid:#012o} is not on this volume, using its octal form");
            AncestorName::Unresolved(uid)
        }
    }
}

/// Fill in `dir_name` (the path of the containing directory) and
/// `full_path` for every entry. Runs once, after the whole catalog is in
/// memory, since any entry can be an ancestor of any other.
pub(crate) fn build_paths(entries: &mut [VolumeEntry]) {
    for i in 0..entries.len() {
        let chain = entries[i].ancestors.clone();
        let mut prefix = String::new();
        for (step, &uid) in chain.iter().enumerate() {
            prefix.push_str(&resolve_ancestor(entries, uid).into_component());
            // The root's own name is the separator, so only the steps below
            // it add one.
            if step > 0 {
                prefix.push('>');
            }
        }
        let full = format!("{prefix}{}", entries[i].name);
        entries[i].dir_name = prefix;
        entries[i].full_path = full;
    }
}

/// The path a child of `parent_path` named `name` would have.
pub(crate) fn child_path(parent_path: &str, name: &str) -> String {
    if parent_path == ROOT_NAME {
        format!(">{name}")
    } else {
        format!("{parent_path}>{name}")
    }
}
