use crate::cidr::Cidr;
use std::num::NonZeroU32;

const DEFAULT_CAPACITY: usize = 32;
const HIGH_BIT: u32 = 1 << 31;

/// Binary trie node. Child indexes are never 0 (the root is never a child).
#[derive(Debug, Clone, Copy, Default)]
struct Node {
    children: [Option<NonZeroU32>; 2],
    range_end: bool,
}

/// Set of IPv4 ranges stored as a binary trie over address bits, most
/// significant bit first.
///
/// Nodes live in one `Vec` addressed by index; the whole set is rebuilt and
/// replaced on reload rather than edited.
#[derive(Debug, Clone)]
pub struct PrefixSet {
    nodes: Vec<Node>,
    ranges: usize,
}

impl PrefixSet {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::default());
        Self { nodes, ranges: 0 }
    }

    /// Add the range `address/prefix_len`. Bits past the prefix are ignored
    /// and prefix lengths above 32 are treated as 32.
    ///
    /// Inserting a range already present only re-marks its node.
    pub fn insert(&mut self, address: u32, prefix_len: u8) {
        let prefix_len = prefix_len.min(32);
        let mut bit = HIGH_BIT;
        let mut current = 0usize;
        let mut depth = 0u8;

        while depth < prefix_len {
            match self.nodes[current].children[branch(address, bit)] {
                Some(next) => current = next.get() as usize,
                None => break,
            }
            bit >>= 1;
            depth += 1;
        }

        while depth < prefix_len {
            let next = self.push_node();
            self.nodes[current].children[branch(address, bit)] = Some(next);
            current = next.get() as usize;
            bit >>= 1;
            depth += 1;
        }

        if !self.nodes[current].range_end {
            self.nodes[current].range_end = true;
            self.ranges += 1;
        }
    }

    pub fn insert_cidr(&mut self, cidr: &Cidr) {
        self.insert(cidr.address(), cidr.prefix_len());
    }

    /// Returns true if `address` falls in any inserted range.
    ///
    /// Every node on the address path is checked, so a wider range covers the
    /// address even when narrower (unrelated) nodes continue below it.
    #[inline]
    pub fn contains(&self, address: u32) -> bool {
        let mut bit = HIGH_BIT;
        let mut current = 0usize;

        loop {
            let node = &self.nodes[current];
            if node.range_end {
                return true;
            }
            if bit == 0 {
                return false;
            }
            match node.children[branch(address, bit)] {
                Some(next) => current = next.get() as usize,
                None => return false,
            }
            bit >>= 1;
        }
    }

    /// Number of distinct ranges inserted.
    pub fn len(&self) -> usize {
        self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push_node(&mut self) -> NonZeroU32 {
        if self.nodes.len() == self.nodes.capacity() {
            self.nodes.reserve_exact(self.nodes.len());
        }
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::default());
        NonZeroU32::new(index).unwrap_or(NonZeroU32::MIN)
    }
}

impl Default for PrefixSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FromIterator<&'a Cidr> for PrefixSet {
    fn from_iter<I: IntoIterator<Item = &'a Cidr>>(iter: I) -> Self {
        let mut set = PrefixSet::new();
        for cidr in iter {
            set.insert_cidr(cidr);
        }
        set
    }
}

#[inline]
fn branch(address: u32, bit: u32) -> usize {
    usize::from(address & bit != 0)
}
