// src/fs/navigation.rs
//! Ancestor stack behind "go up" and breadcrumb navigation.

use thiserror::Error;

use super::handle::DirectoryHandle;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no folder is open")]
    NoFolder,
    #[error("already at the top folder")]
    AtTop,
    #[error("breadcrumb {index} is out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },
}

/// Current directory plus the root-to-parent chain of its ancestors.
#[derive(Debug, Default, Clone)]
pub struct NavigationStack {
    current: Option<DirectoryHandle>,
    ancestors: Vec<DirectoryHandle>,
}

impl NavigationStack {
    pub fn current(&self) -> Option<&DirectoryHandle> {
        self.current.as_ref()
    }

    pub fn ancestors(&self) -> &[DirectoryHandle] {
        &self.ancestors
    }

    /// Start over at a freshly picked directory.
    pub fn open_root(&mut self, dir: DirectoryHandle) {
        self.ancestors.clear();
        self.current = Some(dir);
    }

    pub fn descend(&mut self, target: DirectoryHandle) -> Result<(), NavigationError> {
        let previous = self.current.take().ok_or(NavigationError::NoFolder)?;
        self.ancestors.push(previous);
        self.current = Some(target);
        Ok(())
    }

    pub fn ascend(&mut self) -> Result<(), NavigationError> {
        if self.current.is_none() {
            return Err(NavigationError::NoFolder);
        }
        let parent = self.ancestors.pop().ok_or(NavigationError::AtTop)?;
        self.current = Some(parent);
        Ok(())
    }

    /// Jump to breadcrumb `index`; the last breadcrumb is the current folder.
    pub fn jump_to(&mut self, index: usize) -> Result<(), NavigationError> {
        let len = self.breadcrumbs().len();
        if index >= len {
            return Err(NavigationError::OutOfRange { index, len });
        }
        if index == self.ancestors.len() {
            return Ok(());
        }
        let mut rest = self.ancestors.split_off(index);
        // `rest[0]` is the target; the remainder sat between it and current.
        self.current = Some(rest.swap_remove(0));
        Ok(())
    }

    /// Root-to-current chain of directory names.
    pub fn breadcrumbs(&self) -> Vec<&str> {
        self.ancestors
            .iter()
            .chain(self.current.iter())
            .map(DirectoryHandle::name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(name: &str) -> DirectoryHandle {
        DirectoryHandle::new(format!("/{name}"))
    }

    fn stack_at(path: &[&str]) -> NavigationStack {
        let mut nav = NavigationStack::default();
        nav.open_root(dir(path[0]));
        for name in &path[1..] {
            nav.descend(dir(name)).unwrap();
        }
        nav
    }

    #[test]
    fn descend_and_ascend_mirror_each_other() {
        let mut nav = stack_at(&["root", "a", "b"]);
        assert_eq!(nav.breadcrumbs(), ["root", "a", "b"]);
        nav.ascend().unwrap();
        assert_eq!(nav.current().map(DirectoryHandle::name), Some("a"));
        assert_eq!(nav.ancestors().len(), 1);
    }

    #[test]
    fn ascend_on_empty_stack_changes_nothing() {
        let mut nav = stack_at(&["root"]);
        assert_eq!(nav.ascend(), Err(NavigationError::AtTop));
        assert_eq!(nav.current().map(DirectoryHandle::name), Some("root"));
        assert!(nav.ancestors().is_empty());
    }

    #[test]
    fn jump_truncates_to_breadcrumb() {
        let mut nav = stack_at(&["root", "a", "b", "c"]);
        nav.jump_to(1).unwrap();
        assert_eq!(nav.breadcrumbs(), ["root", "a"]);

        let mut nav = stack_at(&["root", "a", "b", "c"]);
        nav.jump_to(0).unwrap();
        assert_eq!(nav.breadcrumbs(), ["root"]);
        assert!(nav.ancestors().is_empty());
    }

    #[test]
    fn jump_to_current_is_a_no_op() {
        let mut nav = stack_at(&["root", "a"]);
        nav.jump_to(1).unwrap();
        assert_eq!(nav.breadcrumbs(), ["root", "a"]);
    }

    #[test]
    fn jump_out_of_range_changes_nothing() {
        let mut nav = stack_at(&["root", "a"]);
        assert_eq!(
            nav.jump_to(5),
            Err(NavigationError::OutOfRange { index: 5, len: 2 })
        );
        assert_eq!(nav.breadcrumbs(), ["root", "a"]);
    }

    #[test]
    fn navigation_needs_an_open_folder() {
        let mut nav = NavigationStack::default();
        assert_eq!(nav.ascend(), Err(NavigationError::NoFolder));
        assert_eq!(nav.descend(dir("x")), Err(NavigationError::NoFolder));
        assert!(nav.current().is_none());
    }
}
