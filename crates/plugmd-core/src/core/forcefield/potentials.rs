//! Unshifted Lennard-Jones pair functions in reduced units.
//!
//! Both functions take the *squared* separation, so the pairwise loop never
//! needs a square root.

/// Lennard-Jones pair potential `4 (r⁻¹² - r⁻⁶)` for squared separation `r2`.
#[inline]
pub fn lennard_jones(r2: f64) -> f64 {
    let inv_r2 = 1.0 / r2;
    let inv_r6 = inv_r2 * inv_r2 * inv_r2;
    4.0 * (inv_r6 * inv_r6 - inv_r6)
}

/// Lennard-Jones force magnitude factor `24 r⁻² (2 r⁻¹² - r⁻⁶)`.
///
/// Multiplying the factor by the separation vector yields the force on the
/// first particle of the pair.
#[inline]
pub fn lennard_jones_force_factor(r2: f64) -> f64 {
    let inv_r2 = 1.0 / r2;
    let inv_r6 = inv_r2 * inv_r2 * inv_r2;
    24.0 * inv_r2 * (2.0 * inv_r6 * inv_r6 - inv_r6)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn potential_is_zero_at_unit_separation() {
        assert!(f64_approx_equal(lennard_jones(1.0), 0.0));
    }

    #[test]
    fn potential_reaches_minus_one_at_its_minimum() {
        // The minimum sits at r = 2^(1/6), i.e. r2 = 2^(1/3).
        let r2_min = 2.0f64.powf(1.0 / 3.0);
        assert!(f64_approx_equal(lennard_jones(r2_min), -1.0));
    }

    #[test]
    fn force_factor_vanishes_at_the_potential_minimum() {
        let r2_min = 2.0f64.powf(1.0 / 3.0);
        assert!(lennard_jones_force_factor(r2_min).abs() < 1e-12);
    }

    #[test]
    fn force_is_repulsive_inside_and_attractive_outside_the_minimum() {
        let r2_min = 2.0f64.powf(1.0 / 3.0);
        assert!(lennard_jones_force_factor(0.9 * r2_min) > 0.0);
        assert!(lennard_jones_force_factor(1.1 * r2_min) < 0.0);
    }

    #[test]
    fn potential_decays_toward_zero_at_long_range() {
        assert!(lennard_jones(100.0).abs() < 1e-5);
    }
}
