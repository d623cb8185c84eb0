//! Segregated free lists
//!
//! One doubly-linked list per size class, threaded through a shared node pool.
//! Links are indices into the pool rather than pointers; unlinked nodes are
//! recycled through a vacant stack so the pool never grows past the peak
//! number of simultaneously free blocks.

use super::{class_index, class_size};

/// A free byte range inside the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeBlock {
    /// Offset of the first byte
    pub position: usize,

    /// Power-of-two length of the range
    pub size: usize,
}

impl FreeBlock {
    pub fn new(position: usize, size: usize) -> Self {
        Self { position, size }
    }

    /// One past the last byte of the range
    pub fn end(&self) -> usize {
        self.position + self.size
    }
}

/// Index of a node in the free-list pool
///
/// Only valid until the node it names is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy)]
struct Node {
    block: FreeBlock,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Free lists for every size class, kept in ascending position order
#[derive(Debug, Default)]
pub struct FreeLists {
    /// Node storage shared by all classes
    nodes: Vec<Node>,

    /// Recycled node slots
    vacant: Vec<usize>,

    /// Head of each class list (index = size class)
    heads: Vec<Option<NodeId>>,

    /// Number of linked nodes across all classes
    len: usize,
}

impl FreeLists {
    /// Create empty lists for `class_count` size classes
    pub fn new(class_count: usize) -> Self {
        Self {
            nodes: Vec::new(),
            vacant: Vec::new(),
            heads: vec![None; class_count],
            len: 0,
        }
    }

    /// Number of size classes
    pub fn class_count(&self) -> usize {
        self.heads.len()
    }

    /// Append an empty list for the next larger size class
    pub fn add_tier(&mut self) {
        self.heads.push(None);
    }

    /// Total number of free blocks
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The block stored at `id`
    pub fn block(&self, id: NodeId) -> FreeBlock {
        self.nodes[id.0].block
    }

    /// Head of a class list
    pub fn head(&self, class: usize) -> Option<NodeId> {
        self.heads.get(class).copied().flatten()
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].prev
    }

    /// Head of the first non-empty list at or above `min_class`
    ///
    /// Classes are visited smallest first, so the result is the smallest
    /// block class that can satisfy a request of `class_size(min_class)`.
    pub fn first_fit(&self, min_class: usize) -> Option<NodeId> {
        self.heads.iter().skip(min_class).find_map(|head| *head)
    }

    /// Link a block into its class list, keeping position order
    pub fn insert(&mut self, block: FreeBlock) -> NodeId {
        let class = class_index(block.size);
        debug_assert!(class < self.heads.len(), "size class {} out of range", class);

        // Find the first node positioned after the new block
        let mut prev = None;
        let mut cursor = self.heads[class];
        while let Some(id) = cursor {
            if self.nodes[id.0].block.position > block.position {
                break;
            }
            prev = Some(id);
            cursor = self.nodes[id.0].next;
        }

        let id = self.alloc_node(Node {
            block,
            prev,
            next: cursor,
        });

        match prev {
            Some(p) => self.nodes[p.0].next = Some(id),
            None => self.heads[class] = Some(id),
        }
        if let Some(n) = cursor {
            self.nodes[n.0].prev = Some(id);
        }

        self.len += 1;
        id
    }

    /// Unlink a node and return the block it described
    pub fn remove(&mut self, id: NodeId) -> FreeBlock {
        let Node { block, prev, next } = self.nodes[id.0];
        let class = class_index(block.size);

        match prev {
            Some(p) => self.nodes[p.0].next = next,
            None => self.heads[class] = next,
        }
        if let Some(n) = next {
            self.nodes[n.0].prev = prev;
        }

        self.nodes[id.0].prev = None;
        self.nodes[id.0].next = None;
        self.vacant.push(id.0);
        self.len -= 1;
        block
    }

    /// Iterate over one class list in position order
    pub fn iter_class(&self, class: usize) -> ClassIter<'_> {
        ClassIter {
            lists: self,
            cursor: self.head(class),
        }
    }

    /// Iterate over every free block, smallest class first
    pub fn iter(&self) -> impl Iterator<Item = FreeBlock> + '_ {
        (0..self.heads.len()).flat_map(move |class| self.iter_class(class))
    }

    /// Block size served by each class, paired with its list
    pub fn tiers(&self) -> impl Iterator<Item = (usize, ClassIter<'_>)> + '_ {
        (0..self.heads.len()).map(move |class| (class_size(class), self.iter_class(class)))
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn alloc_node(&mut self, node: Node) -> NodeId {
        match self.vacant.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                NodeId(slot)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }
}

/// Iterator over a single class list
pub struct ClassIter<'a> {
    lists: &'a FreeLists,
    cursor: Option<NodeId>,
}

impl Iterator for ClassIter<'_> {
    type Item = FreeBlock;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        self.cursor = self.lists.next(id);
        Some(self.lists.block(id))
    }
}
