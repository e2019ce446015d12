use crate::{Error, Result, matrix::DistanceMatrix, partition::Chunk, tour::Tour};

const ERR_SPACE_TOO_LARGE: &str =
    "too many nodes for exhaustive search: permutation count exceeds the supported range";

/// The lexicographically ordered permutations of a fixed item list, addressed
/// by rank in `0..items.len()!`.
///
/// Ranks let a worker materialize exactly its assigned slice: the first
/// permutation of a slice is unranked through the factorial number system and
/// the rest follow by in-place lexicographic successor. With the item list in
/// ascending order this reproduces plain enumeration order, so "first rank
/// wins ties" means "first permutation encountered wins ties".
#[derive(Debug)]
pub(crate) struct PermutationSpace {
    items: Vec<usize>,
    factorials: Vec<u128>,
}

impl PermutationSpace {
    pub(crate) fn new(items: Vec<usize>) -> Result<Self> {
        let mut factorials = Vec::with_capacity(items.len() + 1);
        factorials.push(1u128);
        for i in 1..=items.len() {
            let next = factorials[i - 1]
                .checked_mul(i as u128)
                .ok_or_else(|| Error::invalid_input(ERR_SPACE_TOO_LARGE))?;
            factorials.push(next);
        }
        Ok(Self { items, factorials })
    }

    /// Total number of permutations. The empty item list has exactly one
    /// (empty) permutation.
    pub(crate) fn total(&self) -> u128 {
        self.factorials[self.items.len()]
    }

    /// The `rank`-th permutation in lexicographic order.
    pub(crate) fn nth(&self, rank: u128) -> Vec<usize> {
        debug_assert!(rank < self.total());
        let mut pool = self.items.clone();
        let mut out = Vec::with_capacity(pool.len());
        let mut rest = rank;
        while !pool.is_empty() {
            let block = self.factorials[pool.len() - 1];
            let pick = (rest / block) as usize;
            rest %= block;
            out.push(pool.remove(pick));
        }
        out
    }

    /// Advances `perm` to its lexicographic successor in place. Returns
    /// `false` when `perm` is already the last permutation.
    pub(crate) fn advance(perm: &mut [usize]) -> bool {
        if perm.len() < 2 {
            return false;
        }
        let mut i = perm.len() - 1;
        while i > 0 && perm[i - 1] >= perm[i] {
            i -= 1;
        }
        if i == 0 {
            return false;
        }
        let mut j = perm.len() - 1;
        while perm[j] <= perm[i - 1] {
            j -= 1;
        }
        perm.swap(i - 1, j);
        perm[i..].reverse();
        true
    }
}

/// Exhaustive tour search: evaluates every assigned permutation of the
/// non-start indices and keeps the cheapest cycle, first-encountered winning
/// cost ties.
///
/// Full enumeration is factorial in the node count. That cost is not policed
/// here; callers bound the node count to what they can afford.
pub(crate) struct ExhaustiveSearch<'a> {
    matrix: &'a DistanceMatrix,
    start: usize,
}

impl<'a> ExhaustiveSearch<'a> {
    pub(crate) fn new(matrix: &'a DistanceMatrix, start: usize) -> Self {
        Self { matrix, start }
    }

    /// The permutation space over all non-start indices, ascending.
    pub(crate) fn space(&self) -> Result<PermutationSpace> {
        let items: Vec<usize> = (0..self.matrix.size())
            .filter(|&i| i != self.start)
            .collect();
        PermutationSpace::new(items)
    }

    /// Searches the chunk's ranks in enumeration order. Returns
    /// `(None, +inf)` for an empty chunk.
    pub(crate) fn search_chunk(
        &self,
        space: &PermutationSpace,
        chunk: &Chunk,
    ) -> (Option<Tour>, f64) {
        let mut best: Option<Tour> = None;
        let mut best_cost = f64::INFINITY;

        if !chunk.slice.is_empty() {
            let mut perm = space.nth(chunk.slice.start);
            let mut remaining = chunk.slice.end - chunk.slice.start;
            loop {
                self.consider(&perm, &mut best, &mut best_cost);
                remaining -= 1;
                if remaining == 0 {
                    break;
                }
                let stepped = PermutationSpace::advance(&mut perm);
                debug_assert!(stepped);
            }
        }

        if let Some(extra) = chunk.extra {
            let perm = space.nth(extra);
            self.consider(&perm, &mut best, &mut best_cost);
        }

        (best, best_cost)
    }

    fn consider(&self, perm: &[usize], best: &mut Option<Tour>, best_cost: &mut f64) {
        let cost = self.cycle_cost(perm);
        if cost < *best_cost {
            *best_cost = cost;
            *best = Some(self.cycle(perm));
        }
    }

    fn cycle_cost(&self, perm: &[usize]) -> f64 {
        let mut cost = 0.0;
        let mut current = self.start;
        for &next in perm {
            cost += self.matrix.get(current, next);
            current = next;
        }
        cost + self.matrix.get(current, self.start)
    }

    fn cycle(&self, perm: &[usize]) -> Tour {
        let mut indices = Vec::with_capacity(perm.len() + 2);
        indices.push(self.start);
        indices.extend_from_slice(perm);
        indices.push(self.start);
        Tour::new(indices)
    }
}
