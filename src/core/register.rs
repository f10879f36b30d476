use crate::core::MAX_QUBITS;
use crate::core::errors::RegisterError;
use crate::core::gates::Gate;
use ndarray::Array1;
use num_complex::Complex64;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use std::fmt;
use std::ops::{Index, IndexMut};

/// An n-qubit register holding the full complex amplitude vector.
///
/// Index `i` of the vector is the computational basis state whose bits are
/// the binary expansion of `i`. A well-formed register keeps the sum of
/// squared magnitudes at 1 within floating-point tolerance. Each register
/// owns a private random source used only by [`Register::measure`]; nothing
/// is shared between registers.
#[derive(Clone, Debug)]
pub struct Register {
    qubit_count: usize,
    amplitudes: Array1<Complex64>,
    rng: StdRng,
}

impl Register {
    /// Builds an n-qubit register in uniform superposition, every amplitude
    /// equal to sqrt(1/2^n). For n = 0 the register is empty and holds no
    /// amplitudes. The random source is seeded from OS entropy; use
    /// [`Register::with_seed`] for reproducible sampling.
    pub fn new(qubit_count: usize) -> Self {
        Self {
            qubit_count,
            amplitudes: Self::uniform(qubit_count),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Same as [`Register::new`] but with an explicit seed, so tests can pin
    /// down measurement outcomes.
    pub fn with_seed(qubit_count: usize, seed: u64) -> Self {
        Self {
            qubit_count,
            amplitudes: Self::uniform(qubit_count),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn uniform(qubit_count: usize) -> Array1<Complex64> {
        if qubit_count == 0 {
            return Array1::zeros(0);
        }
        let dim = 1usize << qubit_count;
        Array1::from_elem(dim, Complex64::new((1.0 / dim as f64).sqrt(), 0.0))
    }

    /// Restores the uniform superposition, discarding any prior state.
    pub fn reset(&mut self) {
        self.amplitudes = Self::uniform(self.qubit_count);
    }

    /// Spreads the probability mass uniformly over the requested basis
    /// indices.
    ///
    /// A request `i` is valid when -2^n < i < 2^n; `count` is the number of
    /// valid requests. The whole vector is zeroed, then each valid request
    /// assigns +sqrt(1/count) when `i` is negative and -sqrt(1/count)
    /// otherwise, at basis index `i mod 2^n` (negative requests wrap).
    /// Duplicates reapply the same value.
    ///
    /// # Errors
    ///
    /// [`RegisterError::DegenerateDistribution`] when no request is valid;
    /// the register is left unchanged.
    pub fn distribute(&mut self, indices: &[i64]) -> Result<(), RegisterError> {
        let dim = self.amplitudes.len() as i64;
        let in_range = |i: i64| -dim < i && i < dim;

        let count = indices.iter().copied().filter(|&i| in_range(i)).count();
        if count == 0 {
            return Err(RegisterError::DegenerateDistribution);
        }

        let magnitude = (1.0 / count as f64).sqrt();
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        for &i in indices.iter().filter(|&&i| in_range(i)) {
            let slot = i.rem_euclid(dim) as usize;
            let value = if i < 0 { magnitude } else { -magnitude };
            self.amplitudes[slot] = Complex64::new(value, 0.0);
        }
        Ok(())
    }

    /// Collapses deterministically to the one-hot basis state at `index`.
    ///
    /// # Errors
    ///
    /// [`RegisterError::IndexOutOfBounds`] when `index` is not a valid basis
    /// index; the register is left unchanged.
    pub fn concentrate(&mut self, index: usize) -> Result<(), RegisterError> {
        if index >= self.amplitudes.len() {
            return Err(RegisterError::IndexOutOfBounds {
                index,
                qubit_count: self.qubit_count,
            });
        }
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(())
    }

    /// The amplitude vector, basis order.
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Born-rule probability of every basis index, same order as the
    /// amplitude vector.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Euclidean norm of the amplitude vector; 1 for a well-formed register.
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Applies `gate` to the whole register, replacing the amplitude vector
    /// with its product against the gate matrix.
    ///
    /// The gate's arity must equal the register's qubit count. Targeting a
    /// qubit subset inside a larger register is deliberately unsupported;
    /// compose small registers with [`Register::tensor`] instead.
    ///
    /// # Errors
    ///
    /// [`RegisterError::ArityMismatch`]; the register is left unchanged.
    pub fn apply(&mut self, gate: &Gate) -> Result<(), RegisterError> {
        if gate.arity != self.qubit_count {
            return Err(RegisterError::ArityMismatch {
                expected: gate.arity,
                got: self.qubit_count,
            });
        }
        self.amplitudes = self.amplitudes.dot(&gate.matrix);
        Ok(())
    }

    /// Tensor-combines two independent registers into one of n+m qubits,
    /// whose amplitude at combined index `i * 2^m + j` is the product of the
    /// source amplitudes at `i` and `j`. The result owns a fresh random
    /// source. An empty operand acts as the identity element.
    ///
    /// # Errors
    ///
    /// [`RegisterError::CapacityExceeded`] when the combined amplitude count
    /// would pass the capacity bound; both operands are left untouched.
    pub fn tensor(&self, other: &Register) -> Result<Register, RegisterError> {
        let requested = (1usize << self.qubit_count) * (1usize << other.qubit_count);
        if requested > MAX_QUBITS {
            return Err(RegisterError::CapacityExceeded {
                requested,
                limit: MAX_QUBITS,
            });
        }

        let mut combined = Register::new(self.qubit_count + other.qubit_count);
        if self.qubit_count == 0 {
            combined.amplitudes = other.amplitudes.clone();
        } else if other.qubit_count == 0 {
            combined.amplitudes = self.amplitudes.clone();
        } else {
            let span = other.amplitudes.len();
            for (i, &a) in self.amplitudes.iter().enumerate() {
                for (j, &b) in other.amplitudes.iter().enumerate() {
                    combined.amplitudes[i * span + j] = a * b;
                }
            }
        }
        Ok(combined)
    }

    /// Samples one basis index from the Born-rule distribution using the
    /// register's private random source.
    ///
    /// Sampling is read-only with respect to the stored amplitudes: no
    /// post-measurement projection or renormalization is applied, so
    /// repeated calls keep drawing from the unmodified distribution. This is
    /// a deliberate simplification of this simulator's contract.
    ///
    /// # Errors
    ///
    /// [`RegisterError::DegenerateDistribution`] when the probability vector
    /// is empty or carries no mass.
    pub fn measure(&mut self) -> Result<usize, RegisterError> {
        let weights = self.probabilities();
        let distribution =
            WeightedIndex::new(&weights).map_err(|_| RegisterError::DegenerateDistribution)?;
        Ok(distribution.sample(&mut self.rng))
    }

    /// Like [`Register::measure`], reporting the outcome as a labeled ket,
    /// e.g. `|011>` for index 3 of a 3-qubit register.
    pub fn measure_ket(&mut self) -> Result<String, RegisterError> {
        let index = self.measure()?;
        Ok(format!("|{}>", self.basis_label(index)))
    }

    /// Renders `index` as a fixed-width binary string truncated to the
    /// register's qubit count, most-significant bits dropped. The full width
    /// is [`MAX_QUBITS`](crate::MAX_QUBITS) bits.
    pub fn basis_label(&self, index: usize) -> String {
        let width = MAX_QUBITS.max(self.qubit_count);
        let bits = format!("{index:0width$b}");
        bits[bits.len() - self.qubit_count..].to_string()
    }
}

impl PartialEq for Register {
    /// Entrywise comparison of the amplitude vectors; the random sources are
    /// not part of a register's observable state.
    fn eq(&self, other: &Self) -> bool {
        self.amplitudes == other.amplitudes
    }
}

impl Index<usize> for Register {
    type Output = Complex64;

    fn index(&self, index: usize) -> &Complex64 {
        &self.amplitudes[index]
    }
}

impl IndexMut<usize> for Register {
    fn index_mut(&mut self, index: usize) -> &mut Complex64 {
        &mut self.amplitudes[index]
    }
}

impl fmt::Display for Register {
    /// Non-zero amplitude terms as a sum of labeled kets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.qubit_count == 0 {
            return write!(f, "Empty qubit register");
        }
        let mut first = true;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if amp.re == 0.0 && amp.im == 0.0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "({})|{}>", amp, self.basis_label(i))?;
            first = false;
        }
        Ok(())
    }
}
