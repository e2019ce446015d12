use tsp_scatter_derive::New;

use crate::{matrix::DistanceMatrix, node::Node};

/// A closed visiting order over node indices: the first and last entry are
/// the same start index and every other index appears exactly once.
#[derive(Clone, Debug, Default, PartialEq, New)]
pub struct Tour {
    pub indices: Vec<usize>,
}

impl Tour {
    /// Total cost of the cycle: the sum over consecutive edges. The closing
    /// edge is covered by the repeated start at the end of `indices`.
    pub fn cost(&self, matrix: &DistanceMatrix) -> f64 {
        self.indices
            .windows(2)
            .map(|edge| matrix.get(edge[0], edge[1]))
            .sum()
    }

    /// The cycle projected onto node labels.
    pub fn labels(&self, nodes: &[Node]) -> Vec<String> {
        self.indices
            .iter()
            .map(|&i| nodes[i].label.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Re-anchors the cycle on `start`. The edge set is unchanged, so the
    /// cost is too. Returns the tour as-is if `start` is not on it.
    pub fn rotate_to(&self, start: usize) -> Tour {
        let n = self.indices.len();
        if n < 2 {
            return self.clone();
        }
        let cycle = &self.indices[..n - 1];
        let Some(pos) = cycle.iter().position(|&i| i == start) else {
            return self.clone();
        };

        let mut out = Vec::with_capacity(n);
        out.extend_from_slice(&cycle[pos..]);
        out.extend_from_slice(&cycle[..pos]);
        out.push(start);
        Tour::new(out)
    }
}
