pub mod errors;
mod gates;
mod register;

pub use gates::{Gate, GateKind};
pub use register::Register;

/// System-wide capacity bound on a register's amplitude count.
///
/// Composition and controlled-gate synthesis refuse to grow past this value,
/// keeping the exponential state size tractable. It also fixes the bit-width
/// used when basis indices are rendered as binary strings.
pub const MAX_QUBITS: usize = 8;
