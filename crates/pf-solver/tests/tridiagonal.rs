//! Tridiagonal solver against a dense reference.

use nalgebra::{DMatrix, DVector};
use pf_solver::{Row, TridiagonalSystem};
use proptest::prelude::*;

fn dense(sys: &TridiagonalSystem) -> DMatrix<f64> {
    let n = sys.len();
    let mut mat = DMatrix::zeros(n, n);
    for i in 0..n {
        mat[(i, i)] = sys.b[i];
        if i > 0 {
            mat[(i, i - 1)] = sys.a[i];
        }
        if i + 1 < n {
            mat[(i, i + 1)] = sys.c[i];
        }
    }
    mat
}

#[test]
fn matches_lu_on_asymmetric_system() {
    let rows: Vec<Row> = (0..12)
        .map(|i| {
            let x = i as f64;
            Row {
                a: -1.0 - 0.1 * x,
                b: 4.0 + 0.3 * x,
                c: -0.5 - 0.05 * x,
                d: (0.7 * x).sin(),
            }
        })
        .collect();
    let sys = TridiagonalSystem::from_rows(&rows);
    let x = sys.solve();

    let reference = dense(&sys)
        .lu()
        .solve(&DVector::from_vec(sys.d.clone()))
        .unwrap();
    for i in 0..sys.len() {
        assert!((x[i] - reference[i]).abs() < 1e-12, "row {i}");
    }
}

fn dominant_system() -> impl Strategy<Value = TridiagonalSystem> {
    (3usize..80).prop_flat_map(|n| {
        prop::collection::vec(
            (-1.0f64..1.0, -1.0f64..1.0, 0.1f64..2.0, -10.0f64..10.0),
            n,
        )
        .prop_map(|coeffs| {
            let rows: Vec<Row> = coeffs
                .into_iter()
                .map(|(a, c, extra, d)| Row {
                    a,
                    b: a.abs() + c.abs() + extra,
                    c,
                    d,
                })
                .collect();
            TridiagonalSystem::from_rows(&rows)
        })
    })
}

proptest! {
    #[test]
    fn residual_is_tiny_for_dominant_systems(sys in dominant_system()) {
        let x = sys.solve();
        let scale = sys.d.iter().fold(1.0f64, |m, v| m.max(v.abs()));
        prop_assert!(sys.residual(&x) < 1e-10 * scale);
        prop_assert_eq!(sys.solve_checked().unwrap(), x);
    }

    #[test]
    fn agrees_with_dense_lu(sys in dominant_system()) {
        let x = sys.solve();
        let reference = dense(&sys)
            .lu()
            .solve(&DVector::from_vec(sys.d.clone()))
            .unwrap();
        for i in 0..sys.len() {
            prop_assert!((x[i] - reference[i]).abs() < 1e-9 * (1.0 + reference[i].abs()));
        }
    }
}
