//! Property-based tests for the statevector engine.
//!
//! Every gate in the vocabulary is unitary, so any gate sequence must
//! preserve the amplitude vector's L2 norm.

use proptest::prelude::*;

use qucpl_ir::Gate;
use qucpl_sim::Statevector;

const NUM_QUBITS: usize = 3;

/// A gate paired with valid, role-distinct operand indices.
#[derive(Debug, Clone)]
struct GateOp {
    gate: Gate,
    qubits: Vec<usize>,
}

fn arb_gate_op() -> impl Strategy<Value = GateOp> {
    let single = prop_oneof![
        Just(Gate::H),
        Just(Gate::X),
        Just(Gate::Y),
        Just(Gate::Z),
    ]
    .prop_flat_map(|gate| {
        (0..NUM_QUBITS).prop_map(move |q| GateOp {
            gate,
            qubits: vec![q],
        })
    });

    let double = prop_oneof![
        Just(Gate::CX),
        Just(Gate::CY),
        Just(Gate::CZ),
        Just(Gate::Swap),
    ]
    .prop_flat_map(|gate| {
        (0..NUM_QUBITS, 0..NUM_QUBITS)
            .prop_filter("operands must differ", |(a, b)| a != b)
            .prop_map(move |(a, b)| GateOp {
                gate,
                qubits: vec![a, b],
            })
    });

    let triple = (0..NUM_QUBITS, 0..NUM_QUBITS, 0..NUM_QUBITS)
        .prop_filter("operands must differ", |(a, b, c)| {
            a != b && a != c && b != c
        })
        .prop_map(|(a, b, c)| GateOp {
            gate: Gate::CCX,
            qubits: vec![a, b, c],
        });

    prop_oneof![single, double, triple]
}

proptest! {
    /// The squared-magnitude sum stays 1 after every gate application.
    #[test]
    fn gate_sequences_preserve_unit_norm(ops in prop::collection::vec(arb_gate_op(), 1..40)) {
        let mut sv = Statevector::new(NUM_QUBITS);
        for op in &ops {
            sv.apply_gate(op.gate, &op.qubits);
            prop_assert!((sv.norm_sqr() - 1.0).abs() < 1e-9,
                "norm drifted to {} after {:?}", sv.norm_sqr(), op);
        }
    }

    /// Swapping the same pair twice is the exact identity.
    #[test]
    fn double_swap_is_identity(
        ops in prop::collection::vec(arb_gate_op(), 0..15),
        pair in (0..NUM_QUBITS, 0..NUM_QUBITS).prop_filter("distinct", |(a, b)| a != b),
    ) {
        let mut sv = Statevector::new(NUM_QUBITS);
        for op in &ops {
            sv.apply_gate(op.gate, &op.qubits);
        }
        let before = sv.clone();
        sv.apply_gate(Gate::Swap, &[pair.0, pair.1]);
        sv.apply_gate(Gate::Swap, &[pair.0, pair.1]);
        prop_assert_eq!(sv, before);
    }
}
