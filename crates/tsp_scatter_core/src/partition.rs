use std::ops::Range;

/// One worker's share of an enumerable search space: a contiguous slice of
/// the item indices, plus at most one leftover item taken from the end of
/// the index range.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chunk {
    pub slice: Range<u128>,
    pub extra: Option<u128>,
}

impl Chunk {
    /// A single chunk covering the whole space `0..total`.
    pub fn full(total: u128) -> Self {
        Self {
            slice: 0..total,
            extra: None,
        }
    }

    pub fn len(&self) -> u128 {
        (self.slice.end - self.slice.start) + u128::from(self.extra.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.slice.is_empty() && self.extra.is_none()
    }

    /// Item indices in evaluation order: the slice first, then the leftover.
    pub fn iter(&self) -> impl Iterator<Item = u128> + '_ {
        self.slice.clone().chain(self.extra)
    }
}

/// Splits the item indices `0..total` into `workers` disjoint chunks whose
/// union is the whole range.
///
/// Worker `r` receives the contiguous slice `[r*base, (r+1)*base)` where
/// `base = total / workers`. The `total % workers` leftover items at the end
/// of the range are handed out one per worker: worker 0 takes the last item,
/// worker 1 the one before it, and so on. The assignment is stable for a
/// fixed `(total, workers)` pair; when `total < workers` every worker with
/// rank `>= total` receives an empty chunk.
pub fn partition(total: u128, workers: usize) -> Vec<Chunk> {
    assert!(workers >= 1, "worker count must be >= 1");
    let w = workers as u128;
    let base = total / w;
    let remainder = total % w;

    (0..w)
        .map(|r| Chunk {
            slice: (r * base)..((r + 1) * base),
            extra: (r < remainder).then(|| total - 1 - r),
        })
        .collect()
}
