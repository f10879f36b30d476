use crate::core::MAX_QUBITS;
use crate::core::errors::{GateError, RegisterError};
use ndarray::{Array2, arr2};
use num_complex::Complex64;

/// A unitary gate over the complex field.
///
/// A gate is its matrix plus the number of qubits it acts on. Gates apply to
/// a whole register whose qubit count equals `arity`; see
/// [`Register::apply`](crate::Register::apply).
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    /// The unitary matrix of the gate.
    pub matrix: Array2<Complex64>,
    /// The number of qubits the gate acts on.
    pub arity: usize,
}

/// Typed gate identifier for controlled-gate synthesis.
///
/// Parametrized kinds carry their rotation angle directly, so a synthesized
/// controlled gate never has to parse text to find its angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateKind {
    Identity,
    PauliX,
    PauliY,
    PauliZ,
    Hadamard,
    Swap,
    PhaseShift(f64),
    RotX(f64),
    RotY(f64),
    RotZ(f64),
}

impl GateKind {
    /// Base gate this kind names.
    pub fn gate(self) -> Gate {
        match self {
            GateKind::Identity => Gate::identity(1),
            GateKind::PauliX => Gate::pauli_x(),
            GateKind::PauliY => Gate::pauli_y(),
            GateKind::PauliZ => Gate::pauli_z(),
            GateKind::Hadamard => Gate::hadamard(),
            GateKind::Swap => Gate::swap(),
            GateKind::PhaseShift(theta) => Gate::phase_shift(theta),
            GateKind::RotX(theta) => Gate::rot_x(theta),
            GateKind::RotY(theta) => Gate::rot_y(theta),
            GateKind::RotZ(theta) => Gate::rot_z(theta),
        }
    }
}

impl Gate {
    /// Identity on `qubits` qubits (2^qubits x 2^qubits).
    pub fn identity(qubits: usize) -> Gate {
        Gate {
            matrix: Array2::eye(1 << qubits),
            arity: qubits,
        }
    }

    /// Pauli-X (NOT) gate.
    pub fn pauli_x() -> Gate {
        Gate {
            matrix: arr2(&[
                [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
                [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            ]),
            arity: 1,
        }
    }

    /// Pauli-Y gate.
    pub fn pauli_y() -> Gate {
        Gate {
            matrix: arr2(&[
                [Complex64::new(0.0, 0.0), Complex64::new(0.0, -1.0)],
                [Complex64::new(0.0, 1.0), Complex64::new(0.0, 0.0)],
            ]),
            arity: 1,
        }
    }

    /// Pauli-Z gate.
    pub fn pauli_z() -> Gate {
        Gate {
            matrix: arr2(&[
                [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                [Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0)],
            ]),
            arity: 1,
        }
    }

    /// Hadamard gate.
    pub fn hadamard() -> Gate {
        let factor = 1.0 / 2.0_f64.sqrt();
        Gate {
            matrix: arr2(&[
                [Complex64::new(factor, 0.0), Complex64::new(factor, 0.0)],
                [Complex64::new(factor, 0.0), Complex64::new(-factor, 0.0)],
            ]),
            arity: 1,
        }
    }

    /// Phase-shift gate diag(1, e^{i theta}).
    pub fn phase_shift(theta: f64) -> Gate {
        Gate {
            matrix: arr2(&[
                [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
                [
                    Complex64::new(0.0, 0.0),
                    (Complex64::new(0.0, 1.0) * theta).exp(),
                ],
            ]),
            arity: 1,
        }
    }

    /// Rotation about the X axis: cos(theta/2) I - i sin(theta/2) X.
    pub fn rot_x(theta: f64) -> Gate {
        let cos = Complex64::new((theta / 2.0).cos(), 0.0);
        let isin = Complex64::new(0.0, -(theta / 2.0).sin());
        Gate {
            matrix: arr2(&[[cos, isin], [isin, cos]]),
            arity: 1,
        }
    }

    /// Rotation about the Y axis.
    pub fn rot_y(theta: f64) -> Gate {
        let cos = Complex64::new((theta / 2.0).cos(), 0.0);
        let sin = Complex64::new((theta / 2.0).sin(), 0.0);
        Gate {
            matrix: arr2(&[[cos, -sin], [sin, cos]]),
            arity: 1,
        }
    }

    /// Rotation about the Z axis: diag(e^{-i theta/2}, e^{i theta/2}).
    pub fn rot_z(theta: f64) -> Gate {
        let zero = Complex64::new(0.0, 0.0);
        Gate {
            matrix: arr2(&[
                [(Complex64::new(0.0, -1.0) * (theta / 2.0)).exp(), zero],
                [zero, (Complex64::new(0.0, 1.0) * (theta / 2.0)).exp()],
            ]),
            arity: 1,
        }
    }

    /// SWAP gate, exchanging the two middle basis states of a 2-qubit system.
    pub fn swap() -> Gate {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        Gate {
            matrix: arr2(&[
                [one, zero, zero, zero],
                [zero, zero, one, zero],
                [zero, one, zero, zero],
                [zero, zero, zero, one],
            ]),
            arity: 2,
        }
    }

    /// Synthesizes the controlled version of `kind` on `qubits` qubits.
    ///
    /// The result is a 2^qubits x 2^qubits matrix: ones on the leading
    /// diagonal, with the trailing block (2x2, or 4x4 for [`GateKind::Swap`])
    /// replaced by the base gate's entries, trailing indices reduced modulo
    /// the base dimension. The base transformation therefore fires only when
    /// every leading qubit is 1.
    ///
    /// # Errors
    ///
    /// * [`RegisterError::CapacityExceeded`] when 2^qubits exceeds
    ///   [`MAX_QUBITS`](crate::MAX_QUBITS).
    /// * [`RegisterError::ArityMismatch`] when the requested size cannot hold
    ///   the base gate's block.
    pub fn controlled(qubits: usize, kind: GateKind) -> Result<Gate, RegisterError> {
        let dim = 1usize << qubits;
        if dim > MAX_QUBITS {
            return Err(RegisterError::CapacityExceeded {
                requested: dim,
                limit: MAX_QUBITS,
            });
        }

        let base = kind.gate();
        let block = base.matrix.nrows();
        if dim < block {
            return Err(RegisterError::ArityMismatch {
                expected: base.arity,
                got: qubits,
            });
        }

        let mut matrix = Array2::<Complex64>::zeros((dim, dim));
        for i in 0..dim.saturating_sub(2) {
            matrix[[i, i]] = Complex64::new(1.0, 0.0);
        }
        for i in dim - block..dim {
            for j in dim - block..dim {
                matrix[[i, j]] = base.matrix[[i % block, j % block]];
            }
        }

        Ok(Gate {
            matrix,
            arity: qubits,
        })
    }

    /// Textual front-end to [`Gate::controlled`].
    ///
    /// Recognized names: `identity`, `pauliX`, `pauliY`, `pauliZ`,
    /// `hadamard`, `swap`, `phaseShift`, `rotX`, `rotY`, `rotZ`. The four
    /// parametrized gates require `angle` in decimal text form. An
    /// unrecognized name fails soft into the plain identity of the requested
    /// size; a missing or malformed angle is a hard error.
    pub fn controlled_named(
        qubits: usize,
        gate: &str,
        angle: Option<&str>,
    ) -> Result<Gate, RegisterError> {
        let kind = match gate {
            "identity" => GateKind::Identity,
            "pauliX" => GateKind::PauliX,
            "pauliY" => GateKind::PauliY,
            "pauliZ" => GateKind::PauliZ,
            "hadamard" => GateKind::Hadamard,
            "swap" => GateKind::Swap,
            "phaseShift" => GateKind::PhaseShift(parse_angle(gate, angle)?),
            "rotX" => GateKind::RotX(parse_angle(gate, angle)?),
            "rotY" => GateKind::RotY(parse_angle(gate, angle)?),
            "rotZ" => GateKind::RotZ(parse_angle(gate, angle)?),
            _ => {
                let dim = 1usize << qubits;
                if dim > MAX_QUBITS {
                    return Err(RegisterError::CapacityExceeded {
                        requested: dim,
                        limit: MAX_QUBITS,
                    });
                }
                return Ok(Gate::identity(qubits));
            }
        };
        Gate::controlled(qubits, kind)
    }
}

fn parse_angle(gate: &str, angle: Option<&str>) -> Result<f64, GateError> {
    let text = angle.ok_or_else(|| GateError::MissingAngle {
        gate: gate.to_string(),
    })?;
    text.trim()
        .parse::<f64>()
        .map_err(|source| GateError::MalformedAngle {
            text: text.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_matrix_eq(a: &Array2<Complex64>, b: &Array2<Complex64>) {
        assert_eq!(a.dim(), b.dim());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).norm() < 1e-12, "{x} != {y}");
        }
    }

    #[test]
    fn hadamard_is_involutive() {
        let h = Gate::hadamard();
        assert_matrix_eq(&h.matrix.dot(&h.matrix), &Array2::eye(2));
    }

    #[test]
    fn paulis_square_to_identity() {
        for gate in [Gate::pauli_x(), Gate::pauli_y(), Gate::pauli_z()] {
            assert_matrix_eq(&gate.matrix.dot(&gate.matrix), &Array2::eye(2));
        }
    }

    #[test]
    fn zero_angle_rotations_are_identity() {
        for gate in [Gate::rot_x(0.0), Gate::rot_y(0.0), Gate::rot_z(0.0)] {
            assert_matrix_eq(&gate.matrix, &Array2::eye(2));
        }
    }

    #[test]
    fn phase_shift_pi_is_pauli_z() {
        assert_matrix_eq(&Gate::phase_shift(PI).matrix, &Gate::pauli_z().matrix);
    }

    #[test]
    fn swap_exchanges_middle_states() {
        let s = Gate::swap();
        assert_eq!(s.matrix[[1, 2]], Complex64::new(1.0, 0.0));
        assert_eq!(s.matrix[[2, 1]], Complex64::new(1.0, 0.0));
        assert_eq!(s.matrix[[1, 1]], Complex64::new(0.0, 0.0));
        assert_matrix_eq(&s.matrix.dot(&s.matrix), &Array2::eye(4));
    }

    #[test]
    fn controlled_pauli_x_is_cnot() {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let cnot = Gate::controlled(2, GateKind::PauliX).unwrap();
        let expected = arr2(&[
            [one, zero, zero, zero],
            [zero, one, zero, zero],
            [zero, zero, zero, one],
            [zero, zero, one, zero],
        ]);
        assert_matrix_eq(&cnot.matrix, &expected);
        assert_eq!(cnot.arity, 2);
    }

    #[test]
    fn controlled_identity_is_identity() {
        let gate = Gate::controlled(3, GateKind::Identity).unwrap();
        assert_matrix_eq(&gate.matrix, &Array2::eye(8));
    }

    #[test]
    fn controlled_swap_fills_trailing_four_block() {
        let fredkin = Gate::controlled(3, GateKind::Swap).unwrap();
        let swap = Gate::swap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(fredkin.matrix[[4 + i, 4 + j]], swap.matrix[[i, j]]);
            }
        }
        for i in 0..4 {
            assert_eq!(fredkin.matrix[[i, i]], Complex64::new(1.0, 0.0));
        }
    }

    #[test]
    fn controlled_respects_capacity_bound() {
        let err = Gate::controlled(4, GateKind::PauliX).unwrap_err();
        assert!(matches!(err, RegisterError::CapacityExceeded { .. }));
    }

    #[test]
    fn controlled_swap_needs_room_for_its_block() {
        let err = Gate::controlled(1, GateKind::Swap).unwrap_err();
        assert_eq!(err, RegisterError::ArityMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn unknown_gate_name_falls_soft_to_identity() {
        let gate = Gate::controlled_named(2, "bogus", None).unwrap();
        assert_matrix_eq(&gate.matrix, &Array2::eye(4));
    }

    #[test]
    fn named_rotation_parses_its_angle() {
        let named = Gate::controlled_named(2, "rotX", Some("0.5")).unwrap();
        let typed = Gate::controlled(2, GateKind::RotX(0.5)).unwrap();
        assert_matrix_eq(&named.matrix, &typed.matrix);
    }

    #[test]
    fn named_rotation_rejects_malformed_angle() {
        let err = Gate::controlled_named(2, "rotY", Some("not-a-number")).unwrap_err();
        assert!(matches!(
            err,
            RegisterError::Gate(GateError::MalformedAngle { .. })
        ));
        let err = Gate::controlled_named(2, "phaseShift", None).unwrap_err();
        assert!(matches!(
            err,
            RegisterError::Gate(GateError::MissingAngle { .. })
        ));
    }
}
