// src/view/sort.rs
//! Ordering of the filtered view: directories first, then by the sort key.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::fs::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Modified,
}

impl SortKey {
    pub fn toggled(self) -> Self {
        match self {
            SortKey::Name => SortKey::Modified,
            SortKey::Modified => SortKey::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Modified => "date",
        }
    }
}

fn by_name(a: &Entry, b: &Entry) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.name().cmp(b.name()))
}

fn by_modified(a: &Entry, b: &Entry) -> Ordering {
    let stamp = |e: &Entry| e.snapshot.as_ref().map(|s| s.last_modified);
    stamp(a).cmp(&stamp(b)).then_with(|| by_name(a, b))
}

/// Full comparator. Only the within-group order is reversed for descending.
pub fn compare(a: &Entry, b: &Entry, key: SortKey, ascending: bool) -> Ordering {
    // Directories first
    let group = b.is_dir().cmp(&a.is_dir());
    if group != Ordering::Equal {
        return group;
    }

    let cmp = match key {
        SortKey::Name => by_name(a, b),
        SortKey::Modified => by_modified(a, b),
    };
    if ascending { cmp } else { cmp.reverse() }
}

/// Stable in-place sort. Metadata was resolved at listing time, so this never blocks.
pub fn sort_entries(entries: &mut [&Entry], key: SortKey, ascending: bool) {
    entries.sort_by(|a, b| compare(a, b, key, ascending));
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use super::*;
    use crate::fs::{DirectoryHandle, EntryKind, FileSnapshot};

    fn file(name: &str, secs: u64) -> Entry {
        Entry::file(
            DirectoryHandle::new("/s").child(name, EntryKind::File),
            FileSnapshot {
                name: name.to_string(),
                byte_size: 1,
                mime_hint: None,
                last_modified: UNIX_EPOCH + Duration::from_secs(secs),
            },
        )
    }

    fn folder(name: &str) -> Entry {
        Entry::directory(DirectoryHandle::new("/s").child(name, EntryKind::Directory))
    }

    fn sorted(entries: &[Entry], key: SortKey, ascending: bool) -> Vec<String> {
        let mut refs: Vec<&Entry> = entries.iter().collect();
        sort_entries(&mut refs, key, ascending);
        refs.iter().map(|e| e.name().to_string()).collect()
    }

    fn sample() -> Vec<Entry> {
        vec![
            file("beta.txt", 30),
            folder("zeta"),
            file("Alpha.txt", 10),
            folder("Archive"),
            file("gamma.txt", 20),
        ]
    }

    #[test]
    fn directories_precede_files_for_every_key_and_direction() {
        let entries = sample();
        for key in [SortKey::Name, SortKey::Modified] {
            for ascending in [true, false] {
                let order = sorted(&entries, key, ascending);
                let first_file = order.iter().position(|n| n.ends_with(".txt")).unwrap();
                assert!(order[..first_file].iter().all(|n| !n.ends_with(".txt")));
                assert!(order[first_file..].iter().all(|n| n.ends_with(".txt")));
            }
        }
    }

    #[test]
    fn name_order_ignores_case() {
        assert_eq!(
            sorted(&sample(), SortKey::Name, true),
            ["Archive", "zeta", "Alpha.txt", "beta.txt", "gamma.txt"]
        );
        assert_eq!(
            sorted(&sample(), SortKey::Name, false),
            ["zeta", "Archive", "gamma.txt", "beta.txt", "Alpha.txt"]
        );
    }

    #[test]
    fn modified_order_uses_snapshot_time() {
        assert_eq!(
            sorted(&sample(), SortKey::Modified, true),
            ["Archive", "zeta", "Alpha.txt", "gamma.txt", "beta.txt"]
        );
    }

    #[test]
    fn toggling_direction_twice_restores_order() {
        let mut entries = sample();
        entries.push(file("delta.txt", 20));
        let mut ascending = true;
        let mut view: Vec<&Entry> = entries.iter().collect();
        sort_entries(&mut view, SortKey::Modified, ascending);
        let names = |v: &[&Entry]| v.iter().map(|e| e.name().to_string()).collect::<Vec<_>>();
        let original = names(&view);
        assert_eq!(
            original,
            ["Archive", "zeta", "Alpha.txt", "delta.txt", "gamma.txt", "beta.txt"]
        );

        ascending = !ascending;
        sort_entries(&mut view, SortKey::Modified, ascending);
        assert_eq!(
            names(&view),
            ["zeta", "Archive", "beta.txt", "gamma.txt", "delta.txt", "Alpha.txt"]
        );

        ascending = !ascending;
        sort_entries(&mut view, SortKey::Modified, ascending);
        assert_eq!(names(&view), original);
    }

    #[test]
    fn sort_key_toggles_between_name_and_date() {
        assert_eq!(SortKey::Name.toggled(), SortKey::Modified);
        assert_eq!(SortKey::Name.toggled().toggled(), SortKey::Name);
    }
}
