// =========================================================================
// FALSIFY-PB: progressive barrier contract
//
// Each test tries to falsify one documented property of the barrier:
// dominance order, frontier minimality, threshold monotonicity, feasible
// monotonic improvement, exclusion correctness, idempotence, plus the five
// reference scenarios.
//
// References:
//   - Audet & Dennis (2009) "A Progressive Barrier for Derivative-Free
//     Nonlinear Programming"
//   - Bouchet, Le Digabel & Audet (2024) "DiscoMads"
// =========================================================================

use std::sync::Arc;

use super::dominance::{compare, dominates};
use super::*;
use crate::point::{EvalPoint, EvalTag};

fn pt(coords: &[f64], f: f64, h: f64) -> Arc<EvalPoint> {
    Arc::new(EvalPoint::evaluated(coords.to_vec(), f, h))
}

fn fh(p: &EvalPoint) -> (f64, f64) {
    let tag = EvalTag::default();
    (p.f(&tag).unwrap(), p.h(&tag).unwrap())
}

/// FALSIFY-PB-001: single feasible point becomes the sole incumbent
#[test]
fn falsify_pb_001_first_feasible_point() {
    let mut b = ProgressiveBarrier::new(BarrierConfig::new(2)).unwrap();
    let outcome = b.update_default(&[pt(&[1.0, 2.0], 5.0, 0.0)]).unwrap();

    assert!(outcome.improved, "FALSIFIED PB-001: update did not report improvement");
    assert_eq!(b.feasible().len(), 1, "FALSIFIED PB-001: feasible set size != 1");
    assert_eq!(fh(b.best_feasible().unwrap()), (5.0, 0.0));
}

/// FALSIFY-PB-002: trade-off infeasible points both stay on the frontier
#[test]
fn falsify_pb_002_tradeoff_frontier() {
    let mut b = ProgressiveBarrier::new(BarrierConfig::new(2).with_initial_h_max(3.0)).unwrap();
    b.update_default(&[pt(&[0.0, 0.0], 2.0, 1.0), pt(&[1.0, 0.0], 1.0, 2.0)])
        .unwrap();

    let (frontier, count) = b.non_dominated_infeasible();
    assert_eq!(count, 2, "FALSIFIED PB-002: frontier count {count} != 2");
    assert_eq!(frontier.len(), count);
}

/// FALSIFY-PB-003: a point dominating the whole frontier replaces it
#[test]
fn falsify_pb_003_dominating_point_collapses_frontier() {
    let mut b = ProgressiveBarrier::new(BarrierConfig::new(2).with_initial_h_max(3.0)).unwrap();
    b.update_default(&[pt(&[0.0, 0.0], 2.0, 1.0), pt(&[1.0, 0.0], 1.0, 2.0)])
        .unwrap();
    let outcome = b.update_default(&[pt(&[2.0, 0.0], 1.0, 1.0)]).unwrap();

    let (frontier, count) = b.non_dominated_infeasible();
    assert!(outcome.improved);
    assert_eq!(count, 1, "FALSIFIED PB-003: frontier count {count} != 1");
    assert_eq!(fh(&frontier[0]), (1.0, 1.0));
    assert_eq!(b.infeasible().len(), 1, "FALSIFIED PB-003: dominated incumbents kept");
}

/// FALSIFY-PB-004: zero-violation point near a revealing point is excluded
#[test]
fn falsify_pb_004_exclusion_beats_feasibility() {
    let config = BarrierConfig::new(2).with_exclusion_radius(0.5);
    let mut b = ProgressiveBarrier::new(config)
        .unwrap()
        .with_revealing_points(&[pt(&[0.0, 0.0], 0.0, 0.0)])
        .unwrap();
    let outcome = b.update_default(&[pt(&[0.1, 0.1], -10.0, 0.0)]).unwrap();

    assert!(!outcome.improved);
    assert!(
        b.best_feasible().is_none(),
        "FALSIFIED PB-004: excluded point promoted to feasible incumbent"
    );
    assert_eq!(outcome.classifications, vec![Classification::ExcludedByProximity]);
}

/// FALSIFY-PB-005: k-th order statistic and its range check
#[test]
fn falsify_pb_005_kth_violation() {
    let tag = EvalTag::default();
    let sorted = vec![pt(&[0.0], 1.0, 0.2), pt(&[1.0], 1.0, 0.5), pt(&[2.0], 1.0, 0.9)];

    let h = kth_violation(&sorted, 1, &tag).unwrap();
    assert!((h - 0.5).abs() < 1e-12, "FALSIFIED PB-005: rank 1 gave {h}");
    assert!(matches!(
        kth_violation(&sorted, 5, &tag),
        Err(crate::error::BarrierError::IndexOutOfRange { index: 5, len: 3 })
    ));
}

/// FALSIFY-PB-006: dominance is antisymmetric and ties dominate neither way
#[test]
fn falsify_pb_006_dominance_antisymmetry() {
    let samples = [(1.0, 1.0), (1.0, 2.0), (2.0, 1.0), (0.5, 3.0), (1.0, 1.0)];
    for &a in &samples {
        for &b in &samples {
            assert!(
                !(dominates(a, b) && dominates(b, a)),
                "FALSIFIED PB-006: {a:?} and {b:?} dominate each other"
            );
            if a == b {
                assert_eq!(compare(a, b), Dominance::Equal);
            }
        }
    }
}

/// FALSIFY-PB-007: re-feeding an incorporated batch changes nothing
#[test]
fn falsify_pb_007_idempotent_refeed() {
    let mut b = ProgressiveBarrier::new(BarrierConfig::new(1)).unwrap();
    let batch = vec![
        pt(&[0.0], 4.0, 0.0),
        pt(&[1.0], 4.0, 0.0),
        pt(&[2.0], 2.0, 1.0),
        pt(&[3.0], 1.0, 2.0),
    ];
    b.update_default(&batch).unwrap();
    let feasible_before = b.feasible().len();
    let infeasible_before = b.infeasible().len();

    let copies: Vec<_> = batch.iter().map(|p| Arc::new((**p).clone())).collect();
    let outcome = b.update_default(&copies).unwrap();

    assert!(!outcome.improved, "FALSIFIED PB-007: re-feed reported improvement");
    assert_eq!(outcome.success, SuccessType::Unsuccessful);
    assert_eq!(b.feasible().len(), feasible_before);
    assert_eq!(b.infeasible().len(), infeasible_before);
}

/// FALSIFY-PB-008: hMax is non-increasing across tightening updates
#[test]
fn falsify_pb_008_h_max_monotone() {
    let mut b = ProgressiveBarrier::new(BarrierConfig::new(1)).unwrap();
    let batches = [
        vec![pt(&[0.0], 5.0, 4.0), pt(&[1.0], 4.0, 6.0)],
        vec![pt(&[2.0], 6.0, 2.0), pt(&[3.0], 9.0, 1.0)],
        vec![pt(&[4.0], 100.0, 8.0)],
        vec![pt(&[5.0], 0.0, 0.5), pt(&[6.0], 1.0, 0.25)],
    ];
    let mut previous = b.h_max();
    for batch in &batches {
        b.update(batch, false, true).unwrap();
        assert!(
            b.h_max() <= previous,
            "FALSIFIED PB-008: hMax rose from {previous} to {}",
            b.h_max()
        );
        previous = b.h_max();
    }
    assert!(previous.is_finite());
}

/// FALSIFY-PB-009: best feasible objective never increases
#[test]
fn falsify_pb_009_feasible_monotone() {
    let mut b = ProgressiveBarrier::new(BarrierConfig::new(1)).unwrap();
    let objectives = [3.0, 5.0, 2.0, 2.0, 7.0, -1.0];
    let mut best = f64::INFINITY;
    for (i, &f) in objectives.iter().enumerate() {
        b.update_default(&[pt(&[i as f64], f, 0.0)]).unwrap();
        let current = fh(b.best_feasible().unwrap()).0;
        assert!(current <= best, "FALSIFIED PB-009: best rose from {best} to {current}");
        best = current;
    }
    assert!((best + 1.0).abs() < 1e-12);
}

/// FALSIFY-PB-010: no frontier member dominates another after updates
#[test]
fn falsify_pb_010_incumbents_mutually_non_dominated() {
    let mut b = ProgressiveBarrier::new(BarrierConfig::new(1)).unwrap();
    let batch: Vec<_> = (0..20)
        .map(|i| {
            let x = f64::from(i);
            pt(&[x], (x * 1.7).sin() + 2.0, (x * 0.9).cos() + 1.5)
        })
        .collect();
    b.update_default(&batch).unwrap();

    let members = b.infeasible();
    for a in members {
        for c in members {
            assert!(
                !dominates(fh(a), fh(c)),
                "FALSIFIED PB-010: {:?} dominates {:?}",
                fh(a),
                fh(c)
            );
        }
    }
}

/// FALSIFY-PB-011: revealing a point evicts incumbents inside its ball
#[test]
fn falsify_pb_011_reveal_evicts_incumbents() {
    let config = BarrierConfig::new(2).with_exclusion_radius(0.5);
    let mut b = ProgressiveBarrier::new(config).unwrap();
    b.update_default(&[pt(&[0.1, 0.0], 1.0, 0.0), pt(&[0.0, 0.2], 0.0, 1.0)])
        .unwrap();
    assert_eq!(b.feasible().len() + b.infeasible().len(), 2);

    let evicted = b.register_revealing_point(pt(&[0.0, 0.0], 0.0, 0.0)).unwrap();
    assert!(evicted);
    assert!(b.best_feasible().is_none(), "FALSIFIED PB-011: feasible kept inside ball");
    assert!(b.infeasible().is_empty(), "FALSIFIED PB-011: infeasible kept inside ball");
}

/// FALSIFY-PB-012: the exclusion boundary itself is admitted
#[test]
fn falsify_pb_012_boundary_admitted() {
    let config = BarrierConfig::new(2).with_exclusion_radius(5.0);
    let mut b = ProgressiveBarrier::new(config)
        .unwrap()
        .with_revealing_points(&[pt(&[0.0, 0.0], 0.0, 0.0)])
        .unwrap();
    b.update_default(&[pt(&[3.0, 4.0], 1.0, 0.0)]).unwrap();
    assert!(
        b.best_feasible().is_some(),
        "FALSIFIED PB-012: point at distance == radius excluded"
    );
}

/// FALSIFY-PB-013: excluded points do not block the rest of the batch
#[test]
fn falsify_pb_013_exclusion_only_screens() {
    let config = BarrierConfig::new(1).with_exclusion_radius(1.0);
    let mut b = ProgressiveBarrier::new(config)
        .unwrap()
        .with_revealing_points(&[pt(&[0.0], 0.0, 0.0)])
        .unwrap();
    let batch = vec![
        pt(&[0.5], 0.0, 1.0),
        pt(&[3.0], 1.0, 1.0),
        pt(&[-0.5], -5.0, 0.0),
        pt(&[4.0], 2.0, 0.0),
    ];
    let outcome = b.update(&batch, false, true).unwrap();

    assert_eq!(
        outcome.classifications,
        vec![
            Classification::ExcludedByProximity,
            Classification::InfeasibleIncumbent,
            Classification::ExcludedByProximity,
            Classification::Feasible,
        ]
    );
    assert!((b.h_max() - 1.0).abs() < 1e-12);
    assert_eq!(b.exclusion().unwrap().revealing_points().len(), 1);
}

/// FALSIFY-PB-014: clones evolve independently
#[test]
fn falsify_pb_014_clone_independent() {
    let config = BarrierConfig::new(1).with_exclusion_radius(0.1);
    let base = ProgressiveBarrier::new(config).unwrap();
    let mut branch = base.clone();
    branch.register_revealing_point(pt(&[0.0], 0.0, 0.0)).unwrap();
    branch.update_default(&[pt(&[1.0], 1.0, 0.0)]).unwrap();

    assert!(base.exclusion().unwrap().revealing_points().is_empty());
    assert!(base.best_feasible().is_none(), "FALSIFIED PB-014: clone shares membership");
}
