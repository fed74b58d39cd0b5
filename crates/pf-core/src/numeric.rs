use crate::PfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Reject the first NaN or infinite entry of a field.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> Result<(), PfError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(PfError::NonFinite {
            what,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Largest absolute entry, 0 for an empty slice.
pub fn max_abs(values: &[Real]) -> Real {
    values.iter().fold(0.0, |acc: Real, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ensure_all_finite_reports_first_bad_index() {
        let err = ensure_all_finite(&[1.0, 2.0, Real::NAN, Real::INFINITY], "u").unwrap_err();
        match err {
            PfError::NonFinite { what, index, .. } => {
                assert_eq!(what, "u");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(ensure_all_finite(&[0.0, -1.0], "p").is_ok());
    }

    #[test]
    fn max_abs_picks_largest_magnitude() {
        assert_eq!(max_abs(&[]), 0.0);
        assert_eq!(max_abs(&[0.5, -3.0, 2.0]), 3.0);
    }

    proptest! {
        #[test]
        fn max_abs_bounds_every_entry(values in prop::collection::vec(-1e6f64..1e6, 0..64)) {
            let m = max_abs(&values);
            prop_assert!(values.iter().all(|v| v.abs() <= m));
            prop_assert!(values.is_empty() || values.iter().any(|v| v.abs() == m));
        }
    }
}
