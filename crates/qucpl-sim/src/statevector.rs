//! Statevector simulation engine.
//!
//! All primitives operate on dense amplitude vectors and plain qubit
//! indices. The bit convention is fixed for a whole run: qubit 0 is the
//! most significant bit of every basis label, so the label of basis index
//! `i` on `n` qubits is just `i` written as an `n`-digit binary string.

use num_complex::Complex64;
use rand::Rng;

use qucpl_ir::Gate;

use crate::error::{SimError, SimResult};

/// Amplitudes with magnitude below this are reported as zero.
/// Display only; internal algebra never truncates.
pub const REPORT_TOLERANCE: f64 = 1e-6;

/// Tolerance for the unit-norm invariant.
const NORM_TOLERANCE: f64 = 1e-9;

/// A statevector representing a quantum state.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Create a statevector concentrated on one basis state.
    pub fn basis(num_qubits: usize, index: usize) -> Self {
        debug_assert!(index < (1 << num_qubits));
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitude slice, basis index order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// The amplitude of one basis state.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// Sum of squared magnitudes over all amplitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Basis-index mask for a qubit. Qubit 0 is the most significant bit.
    #[inline]
    fn mask(&self, qubit: usize) -> usize {
        1 << (self.num_qubits - 1 - qubit)
    }

    /// Extract the bit of `index` belonging to `qubit`.
    #[inline]
    fn bit(&self, index: usize, qubit: usize) -> u8 {
        ((index >> (self.num_qubits - 1 - qubit)) & 1) as u8
    }

    /// Dispatch a gate from the fixed vocabulary to its primitive.
    pub fn apply_gate(&mut self, gate: Gate, qubits: &[usize]) {
        match gate {
            Gate::H => self.apply_single(&matrices::hadamard(), qubits[0]),
            Gate::X => self.apply_single(&matrices::pauli_x(), qubits[0]),
            Gate::Y => self.apply_single(&matrices::pauli_y(), qubits[0]),
            Gate::Z => self.apply_single(&matrices::pauli_z(), qubits[0]),
            Gate::CX => self.apply_controlled(&matrices::pauli_x(), qubits[0], qubits[1]),
            Gate::CY => self.apply_controlled(&matrices::pauli_y(), qubits[0], qubits[1]),
            Gate::CZ => self.apply_controlled(&matrices::pauli_z(), qubits[0], qubits[1]),
            Gate::CCX => self.apply_ccx(qubits[0], qubits[1], qubits[2]),
            Gate::Swap => self.apply_swap(qubits[0], qubits[1]),
        }
    }

    /// Apply a 2×2 unitary to one qubit.
    ///
    /// Iterates pairs of basis indices differing only in the qubit's bit and
    /// updates both amplitudes from the matrix; the full 2^n×2^n operator is
    /// never materialized.
    pub fn apply_single(&mut self, matrix: &[[Complex64; 2]; 2], qubit: usize) {
        let mask = self.mask(qubit);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = matrix[0][0] * a + matrix[0][1] * b;
                self.amplitudes[j] = matrix[1][0] * a + matrix[1][1] * b;
            }
        }
    }

    /// Apply a 2×2 unitary to `target`, restricted to the subspace where
    /// `control` is 1. Amplitudes with control bit 0 are untouched.
    pub fn apply_controlled(
        &mut self,
        matrix: &[[Complex64; 2]; 2],
        control: usize,
        target: usize,
    ) {
        let ctrl_mask = self.mask(control);
        let tgt_mask = self.mask(target);
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = matrix[0][0] * a + matrix[0][1] * b;
                self.amplitudes[j] = matrix[1][0] * a + matrix[1][1] * b;
            }
        }
    }

    /// Toffoli: flip `target` where both control bits are 1.
    pub fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let c1_mask = self.mask(c1);
        let c2_mask = self.mask(c2);
        let tgt_mask = self.mask(target);
        for i in 0..self.amplitudes.len() {
            if (i & c1_mask != 0) && (i & c2_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// SWAP two qubits by relabeling basis indices.
    ///
    /// A pure permutation of amplitudes: bit-exact, no arithmetic.
    pub fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = self.mask(q1);
        let mask2 = self.mask(q2);
        for i in 0..self.amplitudes.len() {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Measure the named qubits, collapse the state, and renormalize.
    ///
    /// Draws one joint outcome by the Born rule, zeroes every amplitude
    /// inconsistent with the drawn bits, and renormalizes the survivors.
    /// Returns the drawn bit values in `qubits` order. Irreversible — this
    /// is the mid-circuit measurement that feeds classical registers, not
    /// histogram sampling.
    pub fn measure_collapse(
        &mut self,
        qubits: &[usize],
        rng: &mut impl Rng,
    ) -> SimResult<Vec<u8>> {
        let total = self.norm_sqr();
        if (total - 1.0).abs() > NORM_TOLERANCE {
            return Err(SimError::InvariantViolation(format!(
                "outcome probabilities sum to {total}, expected 1"
            )));
        }

        // Draw a basis index by cumulative probability; its bits at the
        // measured positions are a Born-rule sample of the joint outcome.
        let r: f64 = rng.r#gen::<f64>() * total;
        let mut cumulative = 0.0;
        let mut drawn = self.amplitudes.len() - 1;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                drawn = i;
                break;
            }
        }

        let outcome: Vec<u8> = qubits.iter().map(|&q| self.bit(drawn, q)).collect();

        let mut surviving = 0.0;
        for i in 0..self.amplitudes.len() {
            let consistent = qubits
                .iter()
                .zip(&outcome)
                .all(|(&q, &bit)| self.bit(i, q) == bit);
            if consistent {
                surviving += self.amplitudes[i].norm_sqr();
            } else {
                self.amplitudes[i] = Complex64::new(0.0, 0.0);
            }
        }

        if surviving <= 0.0 {
            return Err(SimError::InvariantViolation(
                "no amplitude consistent with the drawn outcome".into(),
            ));
        }

        let norm = surviving.sqrt();
        for amp in &mut self.amplitudes {
            *amp /= norm;
        }

        Ok(outcome)
    }

    /// Marginal Born-rule distribution over the named qubits.
    ///
    /// Entry `k` is the probability of the joint outcome whose bit `j`
    /// (most significant first) belongs to `qubits[j]`.
    pub fn probabilities(&self, qubits: &[usize]) -> Vec<f64> {
        let mut probs = vec![0.0; 1 << qubits.len()];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let mut outcome = 0usize;
            for &q in qubits {
                outcome = (outcome << 1) | self.bit(i, q) as usize;
            }
            probs[outcome] += amp.norm_sqr();
        }
        probs
    }

    /// The binary label of a basis index, qubit 0 leftmost.
    pub fn basis_label(&self, index: usize) -> String {
        format!("{index:0width$b}", width = self.num_qubits)
    }

    /// Basis-label/amplitude pairs for every non-negligible amplitude.
    pub fn nonzero_amplitudes(&self) -> Vec<(String, Complex64)> {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(_, amp)| amp.norm() > REPORT_TOLERANCE)
            .map(|(i, amp)| (self.basis_label(i), *amp))
            .collect()
    }
}

/// The 2×2 unitaries of the single-qubit vocabulary.
pub mod matrices {
    use num_complex::Complex64;
    use std::f64::consts::FRAC_1_SQRT_2;

    /// Hadamard.
    pub fn hadamard() -> [[Complex64; 2]; 2] {
        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        [[h, h], [h, -h]]
    }

    /// Pauli-X.
    pub fn pauli_x() -> [[Complex64; 2]; 2] {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        [[zero, one], [one, zero]]
    }

    /// Pauli-Y.
    pub fn pauli_y() -> [[Complex64; 2]; 2] {
        let zero = Complex64::new(0.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        [[zero, -i], [i, zero]]
    }

    /// Pauli-Z.
    pub fn pauli_z() -> [[Complex64; 2]; 2] {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        [[one, zero], [zero, -one]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitude(0), Complex64::new(1.0, 0.0)));
        for i in 1..4 {
            assert!(approx_eq(sv.amplitude(i), Complex64::new(0.0, 0.0)));
        }
    }

    #[test]
    fn test_qubit_zero_is_most_significant() {
        // X on qubit 0 of two qubits lands on |10⟩ = index 2, not index 1.
        let mut sv = Statevector::new(2);
        sv.apply_gate(Gate::X, &[0]);
        assert!(approx_eq(sv.amplitude(2), Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitude(1), Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(Gate::H, &[0]);

        let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitude(0), h));
        assert!(approx_eq(sv.amplitude(1), h));
    }

    #[test]
    fn test_hadamard_is_self_inverse() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(Gate::H, &[0]);
        sv.apply_gate(Gate::H, &[0]);
        assert!(approx_eq(sv.amplitude(0), Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitude(1), Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(Gate::H, &[0]);
        sv.apply_gate(Gate::CX, &[0, 1]);

        let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitude(0), h));
        assert!(approx_eq(sv.amplitude(1), Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitude(2), Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitude(3), h));
    }

    #[test]
    fn test_cz_phase() {
        // CZ negates only the |11⟩ amplitude.
        let mut sv = Statevector::new(2);
        sv.apply_gate(Gate::H, &[0]);
        sv.apply_gate(Gate::H, &[1]);
        sv.apply_gate(Gate::CZ, &[0, 1]);
        assert!(sv.amplitude(0).re > 0.0);
        assert!(sv.amplitude(1).re > 0.0);
        assert!(sv.amplitude(2).re > 0.0);
        assert!(sv.amplitude(3).re < 0.0);
    }

    #[test]
    fn test_control_zero_untouched() {
        // Control stays 0, so CX must be the identity.
        let mut sv = Statevector::new(2);
        sv.apply_gate(Gate::CX, &[0, 1]);
        assert!(approx_eq(sv.amplitude(0), Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_ccx_truth_table() {
        // |110⟩ → |111⟩
        let mut sv = Statevector::basis(3, 0b110);
        sv.apply_gate(Gate::CCX, &[0, 1, 2]);
        assert!(approx_eq(sv.amplitude(0b111), Complex64::new(1.0, 0.0)));

        // |010⟩ stays put (first control is 0).
        let mut sv = Statevector::basis(3, 0b010);
        sv.apply_gate(Gate::CCX, &[0, 1, 2]);
        assert!(approx_eq(sv.amplitude(0b010), Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_swap_twice_is_bit_exact_identity() {
        let mut sv = Statevector::new(3);
        sv.apply_gate(Gate::H, &[0]);
        sv.apply_gate(Gate::CX, &[0, 2]);
        let before = sv.clone();

        sv.apply_gate(Gate::Swap, &[0, 2]);
        sv.apply_gate(Gate::Swap, &[0, 2]);
        // Relabeling, not arithmetic: exact equality is required.
        assert_eq!(sv, before);
    }

    #[test]
    fn test_swap_moves_amplitude() {
        // |10⟩ swaps to |01⟩.
        let mut sv = Statevector::basis(2, 0b10);
        sv.apply_gate(Gate::Swap, &[0, 1]);
        assert!(approx_eq(sv.amplitude(0b01), Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_apply_single_custom_matrix() {
        let mut sv = Statevector::new(1);
        sv.apply_single(&matrices::pauli_x(), 0);
        assert!(approx_eq(sv.amplitude(1), Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_measure_certain_outcome() {
        // |0⟩ measures to 0 with certainty and the state is unchanged.
        let mut rng = StdRng::seed_from_u64(7);
        let mut sv = Statevector::new(1);
        for _ in 0..50 {
            let outcome = sv.measure_collapse(&[0], &mut rng).unwrap();
            assert_eq!(outcome, vec![0]);
            assert!(approx_eq(sv.amplitude(0), Complex64::new(1.0, 0.0)));
        }
    }

    #[test]
    fn test_measure_collapse_keeps_unmeasured_superposition() {
        // H on qubit 1, measure qubit 0: qubit 1's superposition survives.
        let mut rng = StdRng::seed_from_u64(11);
        let mut sv = Statevector::new(2);
        sv.apply_gate(Gate::H, &[1]);
        let outcome = sv.measure_collapse(&[0], &mut rng).unwrap();
        assert_eq!(outcome, vec![0]);
        let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitude(0b00), h));
        assert!(approx_eq(sv.amplitude(0b01), h));
    }

    #[test]
    fn test_measure_bell_is_correlated() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let mut sv = Statevector::new(2);
            sv.apply_gate(Gate::H, &[0]);
            sv.apply_gate(Gate::CX, &[0, 1]);
            let outcome = sv.measure_collapse(&[0, 1], &mut rng).unwrap();
            assert_eq!(outcome[0], outcome[1]);
            assert!((sv.norm_sqr() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_measure_rejects_unnormalized_state() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sv = Statevector::new(1);
        sv.apply_single(
            &[
                [Complex64::new(2.0, 0.0), Complex64::new(0.0, 0.0)],
                [Complex64::new(0.0, 0.0), Complex64::new(2.0, 0.0)],
            ],
            0,
        );
        assert!(matches!(
            sv.measure_collapse(&[0], &mut rng),
            Err(SimError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_probabilities_marginal() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(Gate::H, &[0]);
        let probs = sv.probabilities(&[0]);
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!((probs[1] - 0.5).abs() < 1e-12);

        let joint = sv.probabilities(&[0, 1]);
        assert!((joint[0b00] - 0.5).abs() < 1e-12);
        assert!((joint[0b10] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_nonzero_amplitudes_filters_noise() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(Gate::H, &[0]);
        sv.apply_gate(Gate::CX, &[0, 1]);
        let listing = sv.nonzero_amplitudes();
        let labels: Vec<_> = listing.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["00", "11"]);
    }

    #[test]
    fn test_basis_label_width() {
        let sv = Statevector::new(3);
        assert_eq!(sv.basis_label(0b101), "101");
        assert_eq!(sv.basis_label(1), "001");
    }
}
