use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Gate `{gate}` requires an angle parameter")]
    MissingAngle { gate: String },

    #[error("Malformed angle `{text}`: {source}")]
    MalformedAngle {
        text: String,
        source: ParseFloatError,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegisterError {
    #[error("Gate acts on {expected} qubit(s) but register holds {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("Amplitude count {requested} exceeds the capacity bound of {limit}")]
    CapacityExceeded { requested: usize, limit: usize },

    #[error("Probability distribution carries no mass to sample from")]
    DegenerateDistribution,

    #[error("Basis index {index} out of range for a {qubit_count}-qubit register")]
    IndexOutOfBounds { index: usize, qubit_count: usize },

    #[error("Gate error: {0}")]
    Gate(#[from] GateError),
}
