//! Frequency tables, Huffman tree construction and code assignment.
//!
//! Trees are built from a canonical table: pairs sorted ascending by
//! `(freq, symbol)`. Leaves enter a min-queue in that order and ties on
//! weight are broken by insertion order, so the same multiset of pairs
//! always yields the same tree no matter how the table was assembled.

use hashflate_core::error::{HashflateError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// Longest code the bit packer can emit.
pub const MAX_CODE_BITS: u8 = 64;

/// Frequencies whose low 24 bits are zero collide with the table sentinel
/// when paired with symbol 0.
const SENTINEL_MASK: u32 = 0x00FF_FFFF;

/// A symbol and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrequencySymbol {
    /// The byte value.
    pub symbol: u8,
    /// Occurrence count (never zero in a valid table).
    pub freq: u32,
}

impl FrequencySymbol {
    /// Create a pair.
    pub const fn new(symbol: u8, freq: u32) -> Self {
        Self { symbol, freq }
    }

    /// Whether this pair would serialize to the 4-byte zero sentinel.
    pub fn collides_with_sentinel(&self) -> bool {
        self.symbol == 0 && self.freq & SENTINEL_MASK == 0
    }
}

/// A validated, canonically ordered frequency table.
///
/// Symbols are unique, frequencies are non-zero and no pair collides with
/// the serialized sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    pairs: Vec<FrequencySymbol>,
}

impl FrequencyTable {
    /// Count byte frequencies in `data`.
    ///
    /// A symbol-0 count that would collide with the sentinel is raised by
    /// one; encoder and decoder both build from the serialized table, so
    /// the trees still agree.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(HashflateError::EmptyInput);
        }

        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }

        let mut pairs = Vec::new();
        for (symbol, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let symbol = symbol as u8;
            let freq = u32::try_from(count)
                .map_err(|_| HashflateError::input_too_large(symbol, count))?;

            let mut pair = FrequencySymbol::new(symbol, freq);
            if pair.collides_with_sentinel() {
                debug!(freq, "symbol 0 frequency adjusted to avoid the table sentinel");
                pair.freq += 1;
            }
            pairs.push(pair);
        }

        Ok(Self::canonical(pairs))
    }

    /// Build a table from caller-supplied pairs, in any order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = FrequencySymbol>) -> Result<Self> {
        let pairs: Vec<FrequencySymbol> = pairs.into_iter().collect();
        if pairs.is_empty() {
            return Err(HashflateError::EmptyInput);
        }

        let mut seen = [false; 256];
        for pair in &pairs {
            if std::mem::replace(&mut seen[pair.symbol as usize], true) {
                return Err(HashflateError::invalid_table(format!(
                    "symbol {} appears more than once",
                    pair.symbol
                )));
            }
            if pair.freq == 0 {
                return Err(HashflateError::invalid_table(format!(
                    "symbol {} has zero frequency",
                    pair.symbol
                )));
            }
            if pair.collides_with_sentinel() {
                return Err(HashflateError::invalid_table(format!(
                    "pair (0, {}) serializes as the table sentinel",
                    pair.freq
                )));
            }
        }

        Ok(Self::canonical(pairs))
    }

    fn canonical(mut pairs: Vec<FrequencySymbol>) -> Self {
        pairs.sort_unstable_by_key(|p| (p.freq, p.symbol));
        Self { pairs }
    }

    /// Pairs sorted ascending by `(freq, symbol)`.
    pub fn pairs(&self) -> &[FrequencySymbol] {
        &self.pairs
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sum of all frequencies.
    pub fn total(&self) -> u64 {
        self.pairs.iter().map(|p| u64::from(p.freq)).sum()
    }
}

/// A node of a Huffman tree. Internal nodes own their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A symbol.
    Leaf {
        /// The byte value.
        symbol: u8,
        /// Its frequency.
        freq: u64,
    },
    /// Two subtrees; the left edge is bit 0, the right edge bit 1.
    Internal {
        /// Combined frequency of both subtrees.
        freq: u64,
        /// Subtree reached by a 0 bit.
        left: Box<HuffmanNode>,
        /// Subtree reached by a 1 bit.
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Weight of this subtree.
    pub fn freq(&self) -> u64 {
        match self {
            Self::Leaf { freq, .. } | Self::Internal { freq, .. } => *freq,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

/// Min-queue entry ordered only by `(weight, seq)`.
struct QueueEntry {
    weight: u64,
    seq: usize,
    node: HuffmanNode,
}

impl QueueEntry {
    fn key(&self) -> (u64, usize) {
        (self.weight, self.seq)
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // Reversed: BinaryHeap is a max-heap.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// A Huffman tree built from a frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for `table`.
    ///
    /// The first node popped becomes the left child, the second the right.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let mut queue = BinaryHeap::with_capacity(table.len());
        let mut seq = 0;

        for pair in table.pairs() {
            queue.push(QueueEntry {
                weight: u64::from(pair.freq),
                seq,
                node: HuffmanNode::Leaf {
                    symbol: pair.symbol,
                    freq: u64::from(pair.freq),
                },
            });
            seq += 1;
        }

        loop {
            let Some(first) = queue.pop() else {
                return Err(HashflateError::EmptyInput);
            };
            let Some(second) = queue.pop() else {
                return Ok(Self { root: first.node });
            };

            let weight = first.weight + second.weight;
            queue.push(QueueEntry {
                weight,
                seq,
                node: HuffmanNode::Internal {
                    freq: weight,
                    left: Box::new(first.node),
                    right: Box::new(second.node),
                },
            });
            seq += 1;
        }
    }

    /// The root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Derive the code of every leaf.
    pub fn encoding_table(&self) -> Result<EncodingTable> {
        EncodingTable::from_tree(self)
    }
}

/// A prefix code: the low `len` bits of `bits`, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    /// Code bits, right-aligned.
    pub bits: u64,
    /// Number of bits (1-64).
    pub len: u8,
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in (0..self.len).rev() {
            let bit = (self.bits >> i) & 1;
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

/// Symbol → code mapping for one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingTable {
    codes: [Option<Code>; 256],
}

impl EncodingTable {
    /// Walk `tree` with an explicit stack: 0 on left edges, 1 on right edges.
    /// A lone leaf gets the 1-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = [None; 256];

        if let HuffmanNode::Leaf { symbol, .. } = tree.root() {
            codes[*symbol as usize] = Some(Code { bits: 0, len: 1 });
            return Ok(Self { codes });
        }

        let mut stack = vec![(tree.root(), Code { bits: 0, len: 0 })];
        while let Some((node, code)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes[*symbol as usize] = Some(code);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    if code.len == MAX_CODE_BITS {
                        return Err(HashflateError::invalid_table(format!(
                            "code length exceeds {MAX_CODE_BITS} bits"
                        )));
                    }
                    let len = code.len + 1;
                    stack.push((right, Code { bits: (code.bits << 1) | 1, len }));
                    stack.push((left, Code { bits: code.bits << 1, len }));
                }
            }
        }

        Ok(Self { codes })
    }

    /// Code for `symbol`, if it is in the tree.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// `(symbol, code)` for every coded symbol, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Number of coded symbols.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Whether no symbol is coded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
