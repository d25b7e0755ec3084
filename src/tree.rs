//! Complete binary tree stored in level order.
//!
//! Levels and node numbers are 1-based: the root is node 1 of level 1.
//! Parent and child relations are pure index arithmetic over the flat slot list,
//! so a missing node is a hole in the shape, never a change of shape.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("tree must have at least one element")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedCompleteBinaryTree {
    slots: Vec<Option<String>>,
}

impl IndexedCompleteBinaryTree {
    pub fn new(slots: Vec<Option<String>>) -> Result<Self, TreeError> {
        if slots.is_empty() {
            return Err(TreeError::Empty);
        }
        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of levels occupied by the stored slots.
    pub fn height(&self) -> usize {
        // ceil(log2(len + 1)) without going through floats
        (usize::BITS - self.slots.len().leading_zeros()) as usize
    }

    /// Maximum number of slots on a level.
    pub fn max_node_count(level: usize) -> usize {
        1 << (level - 1)
    }

    /// Flat index of the first slot of a level.
    pub fn level_start(level: usize) -> usize {
        Self::max_node_count(level) - 1
    }

    pub fn flat_index(level: usize, number: usize) -> usize {
        Self::level_start(level) + number - 1
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|s| s.as_deref())
    }

    /// Slots of a level, right-padded with `None` past the end of storage.
    pub fn nodes_at_level(&self, level: usize) -> Vec<Option<&str>> {
        let start = Self::level_start(level);
        (start..start + Self::max_node_count(level))
            .map(|i| self.get(i))
            .collect()
    }

    pub fn exists_at(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn exists(&self, level: usize, number: usize) -> bool {
        self.exists_at(Self::flat_index(level, number))
    }

    pub fn has_left_child(&self, level: usize, number: usize) -> bool {
        self.exists_at(Self::flat_index(level, number) * 2 + 1)
    }

    pub fn has_right_child(&self, level: usize, number: usize) -> bool {
        self.exists_at(Self::flat_index(level, number) * 2 + 2)
    }

    /// True when neither child exists. Says nothing about the node itself.
    pub fn is_external(&self, level: usize, number: usize) -> bool {
        !self.has_left_child(level, number) && !self.has_right_child(level, number)
    }

    /// Whether the position would have a parent, whether or not a node is stored there.
    pub fn has_parent(&self, level: usize, number: usize) -> bool {
        match Self::flat_index(level, number) {
            0 => false,
            index => self.exists_at((index - 1) / 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(items: &[Option<&str>]) -> IndexedCompleteBinaryTree {
        IndexedCompleteBinaryTree::new(items.iter().map(|s| s.map(String::from)).collect())
            .unwrap()
    }

    #[test]
    fn test_max_node_count() {
        assert_eq!(IndexedCompleteBinaryTree::max_node_count(1), 1);
        assert_eq!(IndexedCompleteBinaryTree::max_node_count(2), 2);
        assert_eq!(IndexedCompleteBinaryTree::max_node_count(3), 4);
    }

    #[test]
    fn test_level_start() {
        assert_eq!(IndexedCompleteBinaryTree::level_start(1), 0);
        assert_eq!(IndexedCompleteBinaryTree::level_start(2), 1);
        assert_eq!(IndexedCompleteBinaryTree::level_start(4), 7);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(
            IndexedCompleteBinaryTree::new(vec![]),
            Err(TreeError::Empty)
        );
    }

    #[test]
    fn test_height() {
        assert_eq!(tree(&[Some("1")]).height(), 1);
        assert_eq!(tree(&[Some("1"), Some("2")]).height(), 2);
        assert_eq!(tree(&[Some("1"), Some("2"), Some("3")]).height(), 2);
        assert_eq!(tree(&[Some("1"); 4]).height(), 3);
        assert_eq!(tree(&[Some("1"); 15]).height(), 4);
    }

    #[test]
    fn test_nodes_by_level() {
        let t = tree(&[Some("1"), Some("2"), Some("3")]);
        assert_eq!(t.nodes_at_level(1), vec![Some("1")]);
        assert_eq!(t.nodes_at_level(2), vec![Some("2"), Some("3")]);
    }

    #[test]
    fn test_nodes_by_level_padded() {
        let t = tree(&[Some("1"), Some("2"), Some("3"), Some("4")]);
        assert_eq!(t.nodes_at_level(3), vec![Some("4"), None, None, None]);
    }

    #[test]
    fn test_external() {
        let t = tree(&[Some("1"), Some("2"), Some("3")]);
        assert!(!t.is_external(1, 1));
        assert!(t.is_external(2, 1));
        assert!(t.is_external(2, 2));
    }

    #[test]
    fn test_children() {
        let t = tree(&[Some("A"), None, Some("C"), None, None, Some("F")]);
        assert!(!t.has_left_child(1, 1));
        assert!(t.has_right_child(1, 1));
        assert!(t.has_left_child(2, 2));
        assert!(!t.has_right_child(2, 2));
        assert!(!t.exists(2, 1));
        assert!(t.exists(3, 3));
    }

    #[test]
    fn test_has_parent() {
        let t = tree(&[Some("A"), None, Some("C")]);
        assert!(!t.has_parent(1, 1));
        assert!(t.has_parent(2, 1));
        // Parent is the hole at index 1
        assert!(!t.has_parent(3, 1));
        assert!(!t.has_parent(3, 2));
        // Positions past the end still resolve their parent
        assert!(t.has_parent(3, 3));
        assert!(t.has_parent(3, 4));
    }
}
