use std::collections::HashSet;

use tsp_scatter_derive::{CliValue, KvDisplay};

use crate::{Error, Result, node::Node};

/// Worker count used when a job does not name one.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Search algorithm selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "methodType")]
pub enum Method {
    Brute,
    Nearest,
}

/// Execution mode selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "executionType")]
pub enum Execution {
    Serial,
    Parallel,
}

/// A validated solve request. Every invariant the engines rely on is checked
/// on construction, before any distance computation: a non-empty node list,
/// unique labels, finite coordinates, a known start label, and a worker
/// count of at least one.
#[derive(Clone, Debug, KvDisplay)]
pub struct SolverJob {
    #[kv(fmt = "len")]
    nodes: Vec<Node>,
    start: usize,
    method: Method,
    execution: Execution,
    workers: usize,
}

impl SolverJob {
    pub fn new(
        nodes: Vec<Node>,
        start_label: &str,
        method: Method,
        execution: Execution,
        workers: usize,
    ) -> Result<Self> {
        if nodes.is_empty() {
            return Err(Error::invalid_input("node list is empty"));
        }
        if workers == 0 {
            return Err(Error::invalid_input("workerCount must be >= 1"));
        }
        if let Some(node) = nodes.iter().find(|node| !node.is_valid()) {
            return Err(Error::invalid_input(format!(
                "node {} has non-finite coordinates",
                node.label
            )));
        }

        let mut seen = HashSet::new();
        for node in &nodes {
            if !seen.insert(node.label.as_str()) {
                return Err(Error::invalid_input(format!(
                    "duplicate node label: {}",
                    node.label
                )));
            }
        }

        let Some(start) = nodes.iter().position(|node| node.label == start_label) else {
            return Err(Error::invalid_input(format!(
                "unknown start node: {start_label}"
            )));
        };

        Ok(Self {
            nodes,
            start,
            method,
            execution,
            workers,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn n(&self) -> usize {
        self.nodes.len()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

#[cfg(test)]
mod tests {
    use super::{Execution, Method, SolverJob};
    use crate::node::Node;

    fn nodes() -> Vec<Node> {
        vec![
            Node::new("a", 0.0, 0.0),
            Node::new("b", 0.0, 1.0),
            Node::new("c", 1.0, 1.0),
        ]
    }

    #[test]
    fn new_resolves_the_start_label_to_its_index() {
        let job = SolverJob::new(nodes(), "b", Method::Brute, Execution::Serial, 1)
            .expect("valid job");
        assert_eq!(job.start(), 1);
        assert_eq!(job.n(), 3);
    }

    #[test]
    fn empty_node_list_is_rejected() {
        let err = SolverJob::new(Vec::new(), "a", Method::Brute, Execution::Serial, 1)
            .expect_err("empty nodes");
        assert!(err.to_string().contains("node list is empty"));
    }

    #[test]
    fn unknown_start_label_is_rejected() {
        let err = SolverJob::new(nodes(), "z", Method::Brute, Execution::Serial, 1)
            .expect_err("unknown start");
        assert!(err.to_string().contains("unknown start node: z"));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let mut doubled = nodes();
        doubled.push(Node::new("a", 9.0, 9.0));
        let err = SolverJob::new(doubled, "a", Method::Nearest, Execution::Serial, 1)
            .expect_err("duplicate label");
        assert!(err.to_string().contains("duplicate node label: a"));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut bad = nodes();
        bad.push(Node::new("d", f64::NAN, 0.0));
        let err = SolverJob::new(bad, "a", Method::Brute, Execution::Parallel, 2)
            .expect_err("non-finite coordinate");
        assert!(err.to_string().contains("non-finite coordinates"));
    }

    #[test]
    fn zero_workers_are_rejected() {
        let err = SolverJob::new(nodes(), "a", Method::Brute, Execution::Parallel, 0)
            .expect_err("zero workers");
        assert!(err.to_string().contains("workerCount must be >= 1"));
    }

    #[test]
    fn method_and_execution_parse_the_wire_strings() {
        assert_eq!(Method::parse("brute").expect("parse"), Method::Brute);
        assert_eq!(Method::parse("NEAREST").expect("parse"), Method::Nearest);
        assert_eq!(Execution::parse("serial").expect("parse"), Execution::Serial);
        assert_eq!(
            Execution::parse("Parallel").expect("parse"),
            Execution::Parallel
        );
    }

    #[test]
    fn unknown_wire_strings_are_rejected_with_the_expected_values() {
        let err = Method::parse("branch-and-bound").expect_err("unknown method");
        assert!(err.to_string().contains("brute|nearest"));
        let err = Execution::parse("distributed").expect_err("unknown execution");
        assert!(err.to_string().contains("serial|parallel"));
    }
}
