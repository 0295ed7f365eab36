use erl_types::ContentHash;
use serde::{Deserialize, Serialize};

use crate::hasher::DualHasher;

/// Side of a sibling in a Merkle proof path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Binary Merkle tree over receipt payload hashes.
///
/// Every level with an odd number of nodes (a lone leaf included) has its
/// last node paired with itself. Parents are `hash_chain(left, right)`. An
/// empty batch has the fixed [`DualHasher::empty_root`] as its root.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    root: ContentHash,
    /// Level 0 = leaves, last level = `[root]`. Empty for an empty batch.
    levels: Vec<Vec<ContentHash>>,
}

impl MerkleTree {
    /// Build a tree from leaf hashes.
    pub fn from_leaves(hasher: &DualHasher, leaves: Vec<ContentHash>) -> Self {
        if leaves.is_empty() {
            return Self {
                root: hasher.empty_root(),
                levels: vec![],
            };
        }

        let mut levels = vec![leaves];
        loop {
            let current = &levels[levels.len() - 1];
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            for pair in current.chunks(2) {
                // Odd node: paired with itself.
                let right = pair.get(1).unwrap_or(&pair[0]);
                next.push(hasher.hash_chain(&pair[0], right));
            }
            let done = next.len() == 1;
            levels.push(next);
            if done {
                break;
            }
        }

        let root = levels[levels.len() - 1][0].clone();
        Self { root, levels }
    }

    /// Root of a batch without keeping the tree around.
    pub fn root_of(hasher: &DualHasher, leaves: Vec<ContentHash>) -> ContentHash {
        Self::from_leaves(hasher, leaves).root
    }

    pub fn root(&self) -> &ContentHash {
        &self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Generate an inclusion proof for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Option<MerkleProof> {
        let leaves = self.levels.first()?;
        let leaf = leaves.get(index)?.clone();

        let mut path = Vec::with_capacity(self.levels.len() - 1);
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let (sibling_idx, side) = if idx % 2 == 0 {
                (idx + 1, Side::Right)
            } else {
                (idx - 1, Side::Left)
            };
            let sibling = level.get(sibling_idx).unwrap_or(&level[idx]);
            path.push((sibling.clone(), side));
            idx /= 2;
        }

        Some(MerkleProof {
            leaf,
            path,
            root: self.root.clone(),
        })
    }
}

/// Merkle inclusion proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// The leaf being proven.
    pub leaf: ContentHash,
    /// Path of (sibling_hash, sibling_side) pairs from leaf to root.
    pub path: Vec<(ContentHash, Side)>,
    /// Expected root hash.
    pub root: ContentHash,
}

impl MerkleProof {
    /// Recompute the root from the leaf and path.
    pub fn verify(&self, hasher: &DualHasher) -> bool {
        let mut current = self.leaf.clone();
        for (sibling, side) in &self.path {
            current = match side {
                Side::Left => hasher.hash_chain(sibling, &current),
                Side::Right => hasher.hash_chain(&current, sibling),
            };
        }
        current == self.root
    }
}
