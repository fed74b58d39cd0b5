//! Integration test: sodium correlations across the fitted range.

use pf_core::units::k;
use pf_fluids::{PropertyModel, SodiumModel};

#[test]
fn properties_are_finite_and_positive_over_valid_range() {
    let na = SodiumModel::default();
    let mut t = 371.0;
    while t <= 2500.0 {
        let state = na.state(k(t));
        assert!(state.rho.value > 0.0, "density at {t} K");
        assert!(state.mu.value > 0.0, "viscosity at {t} K");
        assert!(state.k.value > 0.0, "conductivity at {t} K");
        assert!(state.cp > 0.0, "specific heat at {t} K");
        t += 7.0;
    }
    assert_eq!(na.range_warnings(), 0);
}

#[test]
fn adjacent_table_temperatures_never_tie() {
    let na = SodiumModel::default();
    let temps: Vec<f64> = (0..200).map(|i| 371.0 + 10.0 * i as f64).collect();
    for pair in temps.windows(2) {
        let (lo, hi) = (k(pair[0]), k(pair[1]));
        assert!(na.density(hi).value < na.density(lo).value);
        assert!(na.viscosity(hi).value < na.viscosity(lo).value);
    }
}

#[test]
fn shared_model_is_usable_across_threads() {
    let na = std::sync::Arc::new(SodiumModel::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let na = na.clone();
            std::thread::spawn(move || na.density(k(300.0 + 100.0 * i as f64)).value)
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap().is_finite());
    }
    // Only the 300 K query is sub-solidus.
    assert_eq!(na.range_warnings(), 1);
}
