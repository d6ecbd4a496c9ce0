use std::fmt;

/// Fixed-size bitset over word ids.
///
/// Every query result is one of these, sized to the lexicon, so that
/// combining constraints is a word-at-a-time `&`/`|` over the blocks.

// This borrows some implementation from the fixedbitset crate, v0.4.0,
// which is licensed under the MIT license, Copyright (c) 2015-2017.
// https://github.com/petgraph/fixedbitset

type Block = u64;
const BLOCK_BITS: usize = 64;

fn div_rem(x: usize, d: usize) -> (usize, usize) {
    (x / d, x % d)
}

#[derive(Clone, Hash, PartialEq, Eq)]
pub struct BitSet {
    blocks: Box<[Block]>,
    capacity: usize,
}

impl BitSet {
    pub fn new(capacity: usize) -> Self {
        let (mut block_size, rem) = div_rem(capacity, BLOCK_BITS);
        block_size += (rem > 0) as usize;

        Self {
            blocks: vec![0; block_size].into_boxed_slice(),
            capacity,
        }
    }

    /// A bitset with every id in `0..capacity` set
    pub fn full(capacity: usize) -> Self {
        let mut bitset = Self::new(capacity);
        bitset.blocks.iter_mut().for_each(|b| *b = !0);
        let (_, rem) = div_rem(capacity, BLOCK_BITS);
        if rem > 0 {
            if let Some(last) = bitset.blocks.last_mut() {
                *last = (1 << rem) - 1;
            }
        }
        bitset
    }

    pub fn from_ids<I>(capacity: usize, ids: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut bitset = Self::new(capacity);
        for id in ids {
            bitset.insert(id);
        }
        bitset
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|&x| x == 0)
    }

    pub fn contains(&self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let (block, bit) = div_rem(index, BLOCK_BITS);
        self.blocks[block] & (1 << bit) != 0
    }

    pub fn insert(&mut self, index: usize) {
        assert!(index < self.capacity);
        let (block, bit) = div_rem(index, BLOCK_BITS);
        self.blocks[block] |= 1 << bit;
    }

    pub fn remove(&mut self, index: usize) {
        if index >= self.capacity {
            return;
        }
        let (block, bit) = div_rem(index, BLOCK_BITS);
        self.blocks[block] &= !(1 << bit);
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        debug_assert_eq!(self.blocks.len(), other.blocks.len());
        self.blocks
            .iter()
            .zip(other.blocks.iter())
            .all(|(&x, &y)| (x | y) == y)
    }

    pub fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.blocks.len(), other.blocks.len());
        for (x, y) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            *x |= *y;
        }
    }

    pub fn intersect_with(&mut self, other: &Self) {
        debug_assert_eq!(self.blocks.len(), other.blocks.len());
        for (x, y) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            *x &= *y;
        }
    }

    pub fn difference_with(&mut self, other: &Self) {
        debug_assert_eq!(self.blocks.len(), other.blocks.len());
        for (x, y) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            *x &= !*y;
        }
    }

    /// Keep only the ids for which `f` returns true
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(usize) -> bool,
    {
        let rejected: Vec<usize> = self.ones().filter(|&i| !f(i)).collect();
        for i in rejected {
            self.remove(i);
        }
    }

    pub fn ones(&self) -> Ones<'_> {
        match self.blocks.split_first() {
            Some((&block, remaining_blocks)) => Ones {
                block,
                offset: 0,
                remaining_blocks,
            },
            None => Ones {
                block: 0,
                offset: 0,
                remaining_blocks: &[],
            },
        }
    }
}

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &self.ones().collect::<Vec<_>>())
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitSet")
            .field("capacity", &self.capacity)
            .field("ones", &self.ones().collect::<Vec<_>>())
            .finish()
    }
}

pub struct Ones<'a> {
    block: Block,
    offset: usize,
    remaining_blocks: &'a [Block],
}

impl<'a> Iterator for Ones<'a> {
    type Item = usize; // the bit position of the '1'

    fn next(&mut self) -> Option<Self::Item> {
        while self.block == 0 {
            let (&block, rest) = self.remaining_blocks.split_first()?;
            self.block = block;
            self.remaining_blocks = rest;
            self.offset += BLOCK_BITS;
        }
        let t = self.block & self.block.wrapping_neg();
        let r = self.block.trailing_zeros() as usize;
        self.block ^= t;
        Some(self.offset + r)
    }
}
