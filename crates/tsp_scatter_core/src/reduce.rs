use tsp_scatter_derive::New;

use crate::{Error, Result, tour::Tour};

/// One worker's local best over its assigned chunk. `cost` is
/// `f64::INFINITY` (and `tour` is `None`) when the chunk held no candidate.
#[derive(Clone, Debug, New)]
pub struct WorkerResult {
    pub rank: usize,
    pub tour: Option<Tour>,
    pub cost: f64,
}

impl WorkerResult {
    pub fn empty(rank: usize) -> Self {
        Self::new(rank, None, f64::INFINITY)
    }
}

/// Folds per-worker results into the global best `(tour, cost)` pair.
///
/// Results are scanned in ascending rank order and only a strictly smaller
/// cost displaces the running winner, so the lowest rank wins cost ties.
/// Fails with `EmptySearchSpace` when every worker reports an infinite cost.
pub fn reduce(results: Vec<WorkerResult>) -> Result<(Tour, f64)> {
    let worker_count = results.len();
    let mut winner: Option<(Tour, f64, usize)> = None;

    for result in results {
        let Some(tour) = result.tour else {
            continue;
        };
        match &winner {
            Some((_, cost, _)) if *cost <= result.cost => {}
            _ => winner = Some((tour, result.cost, result.rank)),
        }
    }

    let Some((tour, cost, rank)) = winner else {
        return Err(Error::EmptySearchSpace);
    };
    log::debug!("reduce: workers={worker_count} winner_rank={rank} cost={cost:.6}");
    Ok((tour, cost))
}
