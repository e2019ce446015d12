use crate::{matrix::DistanceMatrix, tour::Tour};

/// Greedy nearest-neighbor tour construction. Always steps to the closest
/// unvisited node; among equidistant candidates the lowest index wins, since
/// indices are scanned ascending and only a strictly closer node replaces
/// the current pick. Deterministic for a fixed matrix and start; the result
/// can be strictly worse than the exhaustive optimum.
pub(crate) struct NearestNeighbor<'a> {
    matrix: &'a DistanceMatrix,
}

impl<'a> NearestNeighbor<'a> {
    pub(crate) fn new(matrix: &'a DistanceMatrix) -> Self {
        Self { matrix }
    }

    /// Builds the greedy cycle from `start` and returns it with its cost.
    pub(crate) fn tour_from(&self, start: usize) -> (Tour, f64) {
        let n = self.matrix.size();
        let mut visited = vec![false; n];
        visited[start] = true;

        let mut indices = Vec::with_capacity(n + 1);
        indices.push(start);
        let mut current = start;
        let mut cost = 0.0;

        for _ in 1..n {
            let mut nearest: Option<(usize, f64)> = None;
            for next in 0..n {
                if visited[next] {
                    continue;
                }
                let d = self.matrix.get(current, next);
                match nearest {
                    Some((_, best)) if best <= d => {}
                    _ => nearest = Some((next, d)),
                }
            }

            let Some((next, dist)) = nearest else {
                break;
            };
            visited[next] = true;
            indices.push(next);
            cost += dist;
            current = next;
        }

        cost += self.matrix.get(current, start);
        indices.push(start);
        (Tour::new(indices), cost)
    }
}

#[cfg(test)]
mod tests {
    use super::NearestNeighbor;
    use crate::{matrix::DistanceMatrix, node::Node};

    fn unit_square() -> DistanceMatrix {
        DistanceMatrix::from_nodes(&[
            Node::new("a", 0.0, 0.0),
            Node::new("b", 0.0, 1.0),
            Node::new("c", 1.0, 1.0),
            Node::new("d", 1.0, 0.0),
        ])
    }

    #[test]
    fn square_from_corner_walks_the_perimeter() {
        let matrix = unit_square();
        // From a, nodes b and d are both at distance 1; the lower index wins.
        let (tour, cost) = NearestNeighbor::new(&matrix).tour_from(0);
        assert_eq!(tour.indices, vec![0, 1, 2, 3, 0]);
        assert!((cost - 4.0).abs() < 1e-12);
    }

    #[test]
    fn tie_break_prefers_the_lowest_index() {
        // Node 0 is equidistant from nodes 1, 2, and 3.
        let matrix = DistanceMatrix::from_nodes(&[
            Node::new("center", 0.0, 0.0),
            Node::new("north", 0.0, 2.0),
            Node::new("east", 2.0, 0.0),
            Node::new("south", 0.0, -2.0),
        ]);
        let (tour, _) = NearestNeighbor::new(&matrix).tour_from(0);
        assert_eq!(tour.indices[1], 1);
    }

    #[test]
    fn different_starts_yield_different_cycles() {
        let matrix = unit_square();
        let engine = NearestNeighbor::new(&matrix);
        let (from_a, cost_a) = engine.tour_from(0);
        let (from_c, cost_c) = engine.tour_from(2);
        assert_eq!(from_a.indices.first(), Some(&0));
        assert_eq!(from_c.indices.first(), Some(&2));
        assert!((cost_a - cost_c).abs() < 1e-12);
    }

    #[test]
    fn single_node_returns_the_trivial_cycle() {
        let matrix = DistanceMatrix::from_nodes(&[Node::new("only", 7.0, -1.0)]);
        let (tour, cost) = NearestNeighbor::new(&matrix).tour_from(0);
        assert_eq!(tour.indices, vec![0, 0]);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn visits_every_node_exactly_once() {
        let matrix = DistanceMatrix::from_nodes(&[
            Node::new("p0", 0.0, 0.0),
            Node::new("p1", 4.0, 1.0),
            Node::new("p2", -3.0, 2.0),
            Node::new("p3", 1.0, -5.0),
            Node::new("p4", 2.0, 2.0),
        ]);
        let (tour, _) = NearestNeighbor::new(&matrix).tour_from(3);
        assert_eq!(tour.len(), 6);
        assert_eq!(tour.indices.first(), tour.indices.last());
        let mut inner: Vec<usize> = tour.indices[..5].to_vec();
        inner.sort_unstable();
        assert_eq!(inner, vec![0, 1, 2, 3, 4]);
    }
}
