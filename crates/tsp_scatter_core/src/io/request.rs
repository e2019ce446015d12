use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    job::{Execution, Method, SolverJob},
    node::Node,
    runner::Solution,
};

/// Wire coordinates for one node.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// One node as submitted by the caller.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NodeSpec {
    pub label: String,
    pub coordinates: Coordinates,
}

/// A solve request as submitted by the caller. Field names follow the wire
/// format; `workerCount` is optional and only consulted in parallel mode.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub nodes: Vec<NodeSpec>,
    pub start_node: String,
    pub execution_type: String,
    pub method_type: String,
    #[serde(default)]
    pub worker_count: Option<usize>,
}

impl JobRequest {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| Error::invalid_data(format!("malformed job request: {e}")))
    }

    /// Validates the request into a runnable job. `default_workers` fills in
    /// a missing `workerCount`.
    pub fn into_job(self, default_workers: usize) -> Result<SolverJob> {
        let JobRequest {
            nodes,
            start_node,
            execution_type,
            method_type,
            worker_count,
        } = self;

        let execution = Execution::parse(&execution_type)?;
        let method = Method::parse(&method_type)?;
        let nodes: Vec<Node> = nodes
            .into_iter()
            .map(|spec| Node::new(spec.label, spec.coordinates.x, spec.coordinates.y))
            .collect();

        SolverJob::new(
            nodes,
            &start_node,
            method,
            execution,
            worker_count.unwrap_or(default_workers),
        )
    }
}

/// Terminal result document, in the success or the failure shape.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum JobResponse {
    Success {
        optimal_tour: Vec<String>,
        minimum_cost: f64,
        execution_time_seconds: f64,
    },
    Failure {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        execution_time_seconds: Option<f64>,
    },
}

impl JobResponse {
    pub fn success(job: &SolverJob, solution: &Solution, elapsed_seconds: f64) -> Self {
        Self::Success {
            optimal_tour: solution.tour.labels(job.nodes()),
            minimum_cost: solution.cost,
            execution_time_seconds: elapsed_seconds,
        }
    }

    pub fn failure(error: &Error, elapsed_seconds: f64) -> Self {
        Self::Failure {
            error: error.to_string(),
            execution_time_seconds: Some(elapsed_seconds),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::other(format!("serialize result: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{JobRequest, JobResponse};
    use crate::{
        Error,
        job::{Execution, Method},
        runner::solve,
    };

    const SQUARE_REQUEST: &str = r#"{
        "nodes": [
            { "label": "a", "coordinates": { "x": 0.0, "y": 0.0 } },
            { "label": "b", "coordinates": { "x": 0.0, "y": 1.0 } },
            { "label": "c", "coordinates": { "x": 1.0, "y": 1.0 } },
            { "label": "d", "coordinates": { "x": 1.0, "y": 0.0 } }
        ],
        "startNode": "a",
        "executionType": "serial",
        "methodType": "brute"
    }"#;

    #[test]
    fn from_json_reads_the_wire_shape() {
        let request = JobRequest::from_json(SQUARE_REQUEST).expect("parse request");
        assert_eq!(request.nodes.len(), 4);
        assert_eq!(request.start_node, "a");
        assert_eq!(request.execution_type, "serial");
        assert_eq!(request.method_type, "brute");
        assert!(request.worker_count.is_none());
    }

    #[test]
    fn from_json_rejects_malformed_documents() {
        let err = JobRequest::from_json("{ not json").expect_err("malformed");
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn from_json_rejects_missing_required_fields() {
        let err = JobRequest::from_json(r#"{ "nodes": [] }"#).expect_err("missing fields");
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn into_job_applies_the_default_worker_count() {
        let job = JobRequest::from_json(SQUARE_REQUEST)
            .expect("parse request")
            .into_job(4)
            .expect("valid job");
        assert_eq!(job.workers(), 4);
        assert_eq!(job.method(), Method::Brute);
        assert_eq!(job.execution(), Execution::Serial);
        assert_eq!(job.start(), 0);
    }

    #[test]
    fn into_job_prefers_the_request_worker_count() {
        let raw = SQUARE_REQUEST.replace(
            r#""methodType": "brute""#,
            r#""methodType": "nearest", "workerCount": 2"#,
        );
        let job = JobRequest::from_json(&raw)
            .expect("parse request")
            .into_job(4)
            .expect("valid job");
        assert_eq!(job.workers(), 2);
        assert_eq!(job.method(), Method::Nearest);
    }

    #[test]
    fn into_job_rejects_unknown_enum_strings() {
        let raw = SQUARE_REQUEST.replace("serial", "distributed");
        let err = JobRequest::from_json(&raw)
            .expect("parse request")
            .into_job(4)
            .expect_err("unknown execution type");
        assert!(err.to_string().contains("serial|parallel"));
    }

    #[test]
    fn success_response_serializes_the_documented_fields() {
        let job = JobRequest::from_json(SQUARE_REQUEST)
            .expect("parse request")
            .into_job(1)
            .expect("valid job");
        let solution = solve(&job).expect("solve");

        let json = JobResponse::success(&job, &solution, 0.25)
            .to_json()
            .expect("serialize");
        assert!(json.contains(r#""optimal_tour":["a","b","c","d","a"]"#));
        assert!(json.contains(r#""minimum_cost":4.0"#));
        assert!(json.contains(r#""execution_time_seconds":0.25"#));
    }

    #[test]
    fn failure_response_serializes_the_error_shape() {
        let response = JobResponse::failure(&Error::invalid_input("node list is empty"), 0.01);
        assert!(response.is_failure());
        let json = response.to_json().expect("serialize");
        assert!(json.contains(r#""error":"invalid input: node list is empty""#));
        assert!(json.contains(r#""execution_time_seconds":0.01"#));
    }
}
