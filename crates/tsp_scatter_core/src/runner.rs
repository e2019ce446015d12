use rayon::prelude::*;

use tsp_scatter_derive::{New, timer};

use crate::{
    Error, Result,
    exhaustive::ExhaustiveSearch,
    job::{Execution, Method, SolverJob},
    matrix::DistanceMatrix,
    nearest::NearestNeighbor,
    partition::{Chunk, partition},
    reduce::{WorkerResult, reduce},
    tour::Tour,
};

/// The reduced global answer for one job.
#[derive(Clone, Debug, New)]
pub struct Solution {
    pub tour: Tour,
    pub cost: f64,
}

/// Runs `job` to completion with the engine and mode it selects.
#[timer("solver")]
pub fn solve(job: &SolverJob) -> Result<Solution> {
    log::info!("solver: start job={job}");
    let matrix = DistanceMatrix::from_nodes(job.nodes());

    let solution = match (job.execution(), job.method()) {
        (Execution::Serial, Method::Brute) => serial_brute(job, &matrix),
        (Execution::Serial, Method::Nearest) => serial_nearest(job, &matrix),
        (Execution::Parallel, Method::Brute) => parallel_brute(job, &matrix),
        (Execution::Parallel, Method::Nearest) => parallel_nearest(job, &matrix),
    }?;

    log::info!(
        "solver: complete n={} cost={:.6} tour_len={}",
        job.n(),
        solution.cost,
        solution.tour.len()
    );
    Ok(solution)
}

fn serial_brute(job: &SolverJob, matrix: &DistanceMatrix) -> Result<Solution> {
    let engine = ExhaustiveSearch::new(matrix, job.start());
    let space = engine.space()?;
    log::debug!("brute: serial permutations={}", space.total());

    let (tour, cost) = engine.search_chunk(&space, &Chunk::full(space.total()));
    let (tour, cost) = reduce(vec![WorkerResult::new(0, tour, cost)])?;
    Ok(Solution::new(tour, cost))
}

fn serial_nearest(job: &SolverJob, matrix: &DistanceMatrix) -> Result<Solution> {
    let (tour, cost) = NearestNeighbor::new(matrix).tour_from(job.start());
    Ok(Solution::new(tour, cost))
}

fn parallel_brute(job: &SolverJob, matrix: &DistanceMatrix) -> Result<Solution> {
    let engine = ExhaustiveSearch::new(matrix, job.start());
    let space = engine.space()?;
    let chunks = partition(space.total(), job.workers());
    log::info!(
        "brute: fan-out permutations={} workers={}",
        space.total(),
        job.workers()
    );

    let results = worker_pool(job.workers())?.install(|| {
        chunks
            .into_par_iter()
            .enumerate()
            .map(|(rank, chunk)| -> Result<WorkerResult> {
                log::debug!("worker: start rank={rank} items={}", chunk.len());
                let (tour, cost) = engine.search_chunk(&space, &chunk);
                log::debug!("worker: done rank={rank} local_best={cost}");
                Ok(WorkerResult::new(rank, tour, cost))
            })
            .collect::<Vec<_>>()
    });

    let (tour, cost) = reduce(gather(results)?)?;
    Ok(Solution::new(tour, cost))
}

/// Multi-start heuristic fan-out: the candidate-start set `0..n` is
/// partitioned across workers and each worker keeps the cheapest greedy tour
/// among its assigned starts. The winning cycle is re-anchored on the job's
/// start node before it is reported.
fn parallel_nearest(job: &SolverJob, matrix: &DistanceMatrix) -> Result<Solution> {
    let engine = NearestNeighbor::new(matrix);
    let chunks = partition(job.n() as u128, job.workers());
    log::info!(
        "nearest: fan-out candidates={} workers={}",
        job.n(),
        job.workers()
    );

    let results = worker_pool(job.workers())?.install(|| {
        chunks
            .into_par_iter()
            .enumerate()
            .map(|(rank, chunk)| -> Result<WorkerResult> {
                let mut best: Option<Tour> = None;
                let mut best_cost = f64::INFINITY;
                for candidate in chunk.iter() {
                    let (tour, cost) = engine.tour_from(candidate as usize);
                    if cost < best_cost {
                        best_cost = cost;
                        best = Some(tour);
                    }
                }
                log::debug!("worker: done rank={rank} local_best={best_cost}");
                Ok(WorkerResult::new(rank, best, best_cost))
            })
            .collect::<Vec<_>>()
    });

    let (tour, cost) = reduce(gather(results)?)?;
    Ok(Solution::new(tour.rotate_to(job.start()), cost))
}

fn worker_pool(workers: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| Error::other(format!("worker pool: {e}")))
}

/// The fan-in barrier's bookkeeping: every worker hands back its own
/// `Result`, and the first failed rank fails the whole job. Reduction never
/// runs over a partial set of workers.
fn gather(results: Vec<Result<WorkerResult>>) -> Result<Vec<WorkerResult>> {
    let mut gathered = Vec::with_capacity(results.len());
    for (rank, result) in results.into_iter().enumerate() {
        match result {
            Ok(worker) => gathered.push(worker),
            Err(err) => return Err(Error::worker_failure(rank, err.to_string())),
        }
    }
    Ok(gathered)
}
