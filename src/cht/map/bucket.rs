use crate::{
    common::{concurrent::constants::BUCKET_INLINE_NODES, fault::Fault},
    policy::{ResizePolicy, Thresholds},
};

use std::iter;

use parking_lot::Mutex;
use smallvec::SmallVec;

/// A stored value together with its cached hash.
///
/// The payload is copied once on insertion and never changes afterwards. A
/// resize moves the node into its new bucket without touching the payload or
/// hashing it again.
pub(crate) struct Node {
    pub(crate) hash: u64,
    pub(crate) value: Box<[u8]>,
}

impl Node {
    fn new(hash: u64, value: &[u8]) -> Self {
        Self {
            hash,
            value: value.into(),
        }
    }

    #[inline]
    fn matches(&self, hash: u64, value: &[u8]) -> bool {
        self.hash == hash && *self.value == *value
    }
}

pub(crate) type Chain = SmallVec<[Node; BUCKET_INLINE_NODES]>;

/// One slot of a bucket array: the chain of nodes hashing to this slot and the
/// lock guarding it. The chain is only read or written with the lock held,
/// or through `&mut` while the whole array is held exclusively.
#[derive(Default)]
pub(crate) struct Bucket {
    chain: Mutex<Chain>,
}

impl Bucket {
    pub(crate) fn contains(&self, hash: u64, value: &[u8]) -> bool {
        self.chain.lock().iter().any(|node| node.matches(hash, value))
    }

    /// Links a new node unless an equal value is already present. Returns
    /// `true` if a node was created.
    pub(crate) fn insert(&self, hash: u64, value: &[u8]) -> bool {
        let mut chain = self.chain.lock();
        if chain.iter().any(|node| node.matches(hash, value)) {
            return false;
        }
        chain.push(Node::new(hash, value));
        true
    }

    /// Unlinks and frees the node holding `value`. Returns `true` if there was
    /// one.
    pub(crate) fn remove(&self, hash: u64, value: &[u8]) -> bool {
        let mut chain = self.chain.lock();
        match chain.iter().position(|node| node.matches(hash, value)) {
            Some(i) => {
                // Chain order carries no meaning.
                chain.swap_remove(i);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn chain_len(&mut self) -> usize {
        self.chain.get_mut().len()
    }
}

pub(crate) struct BucketArray {
    buckets: Box<[Bucket]>,
    pub(crate) thresholds: Thresholds,
}

impl BucketArray {
    pub(crate) fn with_length(length: usize, policy: &ResizePolicy) -> Result<Self, Fault> {
        assert!(length > 0);

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(length)
            .map_err(|source| Fault::BucketArrayAllocation {
                buckets: length,
                source,
            })?;
        buckets.extend(iter::repeat_with(Bucket::default).take(length));

        Ok(Self {
            buckets: buckets.into_boxed_slice(),
            thresholds: policy.thresholds(length),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub(crate) fn bucket_for(&self, hash: u64) -> &Bucket {
        &self.buckets[index_of(hash, self.buckets.len())]
    }

    /// Replaces this array with one of `new_len` buckets and moves every node
    /// into the bucket its cached hash selects there. Each old bucket is
    /// visited once and drained; the old buckets and their locks are dropped
    /// afterwards.
    ///
    /// On error, `self` is left untouched.
    pub(crate) fn rehash(&mut self, new_len: usize, policy: &ResizePolicy) -> Result<(), Fault> {
        let mut new_array = Self::with_length(new_len, policy)?;

        for bucket in self.buckets.iter_mut() {
            for node in bucket.chain.get_mut().drain(..) {
                let i = index_of(node.hash, new_len);
                new_array.buckets[i].chain.get_mut().push(node);
            }
        }

        *self = new_array;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn buckets_mut(&mut self) -> &mut [Bucket] {
        &mut self.buckets
    }
}

#[inline]
fn index_of(hash: u64, len: usize) -> usize {
    (hash % len as u64) as usize
}
