//! The Bortle scale and the classifier that maps mitigation onto it.
use crate::units::Dimensionless;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A class on the Bortle night-sky darkness scale.
///
/// 1 is a pristine dark sky, 9 is inner-city brightness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct BortleClass(u8);

/// The darkest class on the scale
pub const DARKEST: BortleClass = BortleClass(1);

/// The brightest class on the scale
pub const BRIGHTEST: BortleClass = BortleClass(9);

impl BortleClass {
    /// Create a class, checking it lies on the 1-9 scale
    pub fn new(class: u8) -> Result<Self, InvalidBortleClass> {
        if (DARKEST.0..=BRIGHTEST.0).contains(&class) {
            Ok(BortleClass(class))
        } else {
            Err(InvalidBortleClass(class))
        }
    }

    /// The class as an integer
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for BortleClass {
    type Error = InvalidBortleClass;

    fn try_from(class: u8) -> Result<Self, Self::Error> {
        BortleClass::new(class)
    }
}

impl From<BortleClass> for u8 {
    fn from(class: BortleClass) -> u8 {
        class.0
    }
}

impl fmt::Display for BortleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The error raised for integers outside the 1-9 scale
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Bortle class must be between 1 and 9, got {0}")]
pub struct InvalidBortleClass(u8);

/// Derive the improved Bortle class for a zone from its unmitigated baseline
/// and the current mitigation factor.
///
/// The achievable improvement scales with how bright the zone starts: the
/// removed fraction of pollution (`1 - factor`) is applied to the zone's
/// headroom above class 1, so a class-9 core has more room to improve than a
/// class-4 preserve. The result is rounded half away from zero and never
/// leaves `[1, base]`.
pub fn compute_bortle_class(base: BortleClass, factor: Dimensionless) -> BortleClass {
    let base = f64::from(base.value());
    let improvement = 1.0 - factor.value();
    let reduction = improvement * (base - 1.0);
    let class = (base - reduction).round().max(1.0);

    BortleClass(class as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_class_bounds() {
        assert!(BortleClass::new(0).is_err());
        assert!(BortleClass::new(10).is_err());
        for class in 1..=9 {
            assert_eq!(BortleClass::new(class).unwrap().value(), class);
        }
    }

    #[rstest]
    #[case(9, 1.0, 9)] // no mitigation leaves the baseline untouched
    #[case(9, 0.44625, 5)] // 9 - 0.55375 * 8 = 4.57
    #[case(9, 0.2, 3)] // floor: 9 - 0.8 * 8 = 2.6
    #[case(3, 0.2, 1)] // 3 - 0.8 * 2 = 1.4
    #[case(1, 0.2, 1)] // a pristine zone cannot improve
    #[case(4, 0.5, 3)] // 4 - 0.5 * 3 = 2.5, rounds half away from zero
    fn test_compute_bortle_class(#[case] base: u8, #[case] factor: f64, #[case] expected: u8) {
        let base = BortleClass::new(base).unwrap();
        let result = compute_bortle_class(base, Dimensionless(factor));
        assert_eq!(result.value(), expected);
    }

    #[rstest]
    fn test_result_stays_within_scale(
        #[values(1, 3, 5, 6, 7, 8, 9)] base: u8,
        #[values(0.2, 0.25, 0.4, 0.6, 0.8, 1.0)] factor: f64,
    ) {
        let base = BortleClass::new(base).unwrap();
        let result = compute_bortle_class(base, Dimensionless(factor));
        assert!(result >= DARKEST);
        assert!(result <= base);
    }

    #[test]
    fn test_more_mitigation_never_brightens() {
        let base = BortleClass::new(7).unwrap();
        let mut factor = 1.0;
        let mut previous = compute_bortle_class(base, Dimensionless(factor));
        while factor > 0.2 {
            factor -= 0.01;
            let current = compute_bortle_class(base, Dimensionless(factor));
            assert!(current <= previous);
            previous = current;
        }
    }
}
