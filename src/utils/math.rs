//! Small math helpers shared between the scene and its configuration.

/// Converts a "fraction of velocity retained per second" into rapier's
/// exponential damping coefficient.
///
/// Some physics spaces express damping as the velocity fraction a body
/// keeps after one second of coasting. Rapier instead integrates
/// `v' = -c * v`, so the retained fraction after one second is `e^(-c)`.
/// Inverting that gives `c = -ln(retained)`.
///
/// Only meaningful for `retained` in `(0, 1]`; the scene config validates
/// that range before calling this.
pub fn damping_coefficient(retained_per_second: f32) -> f32 {
    -retained_per_second.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn no_damping_maps_to_zero_coefficient() {
        assert_relative_eq!(damping_coefficient(1.0), 0.0);
    }

    #[test]
    fn stronger_damping_maps_to_larger_coefficient() {
        let strong = damping_coefficient(0.2);
        let weak = damping_coefficient(0.9);
        assert!(strong > weak);
        assert_relative_eq!(strong, 1.6094379, epsilon = 1e-5);
    }
}
