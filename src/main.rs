use std::{
    fs,
    io::{Read, Write},
    process::ExitCode,
    time::Instant,
};

use log::info;

use tsp_scatter_core::{JobRequest, JobResponse, Result, SolverOptions, logging, solve};

fn main() -> ExitCode {
    let started = Instant::now();

    let options = match SolverOptions::from_args() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = logging::init_logger(&options) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    info!("options: {options}");

    // Job-level failures still produce a result document in the failure
    // shape, over the same transport as the success path.
    let response = match run(&options, started) {
        Ok(response) => response,
        Err(err) => JobResponse::failure(&err, started.elapsed().as_secs_f64()),
    };

    if let Err(err) = write_response(&options, &response) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    info!("output: time={:.2}s", started.elapsed().as_secs_f32());
    if response.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(options: &SolverOptions, started: Instant) -> Result<JobResponse> {
    let raw = read_request(options)?;
    let request = JobRequest::from_json(&raw)?;
    let job = request.into_job(options.worker_count)?;

    let solution = solve(&job)?;

    Ok(JobResponse::success(
        &job,
        &solution,
        started.elapsed().as_secs_f64(),
    ))
}

fn read_request(options: &SolverOptions) -> Result<String> {
    match options.input_path() {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn write_response(options: &SolverOptions, response: &JobResponse) -> Result<()> {
    let json = response.to_json()?;
    match options.output_path() {
        Some(path) => fs::write(path, &json)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
