//! Classical simulation of a small quantum register.
//!
//! The crate keeps the full complex amplitude vector of an n-qubit register
//! (state size 2^n), applies unitary gates by right-multiplying that vector
//! against gate matrices, composes independent registers via tensor product,
//! synthesizes controlled-gate matrices of arbitrary size, and samples
//! measurement outcomes under the Born rule. It is meant for algorithm
//! experimentation and teaching; noise, decoherence, and hardware
//! constraints are out of scope.
//!
//! Gates act on the *entire* register: a gate's arity must equal the
//! register's qubit count. There is no mechanism to address an individual
//! qubit inside a larger composite register; build small registers, apply
//! gates to them, then combine with [`Register::tensor`].

mod core;

pub use crate::core::{Gate, GateKind, MAX_QUBITS, Register, errors};
