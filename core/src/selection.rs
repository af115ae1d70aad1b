use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::config::SelectionPenalties;
use crate::error::{GenerationError, Result};
use crate::landscape::LandscapeShape;
use crate::segment::AvailableSpace;

// Base chance scaled down for repetition and for shapes that do not fit
pub fn effective_weight(
    shape: &LandscapeShape,
    previous: Option<&str>,
    space: &AvailableSpace,
    penalties: &SelectionPenalties,
) -> f64 {
    let mut weight = shape.chance_to_occur;
    if previous == Some(shape.name.as_str()) {
        weight *= penalties.repeat;
    }
    if shape.height > space.up {
        weight *= penalties.too_tall;
    }
    if shape.width > space.ahead {
        weight *= penalties.too_wide;
    }
    weight
}

/// Draw one shape from `shapes` in proportion to its effective weight.
pub fn pick_landscape<'a, R: Rng + ?Sized>(
    shapes: &'a [LandscapeShape],
    previous: Option<&str>,
    space: &AvailableSpace,
    penalties: &SelectionPenalties,
    rng: &mut R,
) -> Result<&'a LandscapeShape> {
    let weights: Vec<f64> = shapes
        .iter()
        .map(|s| effective_weight(s, previous, space, penalties))
        .collect();
    // WeightedIndex rejects an empty table and an all-zero table alike
    let dist = WeightedIndex::new(&weights).map_err(|_| GenerationError::NoEligibleLandscape)?;
    Ok(&shapes[dist.sample(rng)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landscape::{AnchorPoint, LengthRange};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn shape(name: &str, width: f64, height: f64, chance: f64) -> LandscapeShape {
        LandscapeShape::new(
            name,
            width,
            height,
            chance,
            vec![AnchorPoint::horizontal(1.0, 0.0, LengthRange::new(25.0, 50.0))],
        )
    }

    fn roomy() -> AvailableSpace {
        AvailableSpace {
            ahead: 1000.0,
            up: 1000.0,
            down: 1000.0,
        }
    }

    #[test]
    fn penalties_multiply() {
        let p = SelectionPenalties::default();
        let s = shape("hill", 500.0, 150.0, 2.0);
        let tight = AvailableSpace {
            ahead: 100.0,
            up: 100.0,
            down: 0.0,
        };
        assert_eq!(effective_weight(&s, None, &roomy(), &p), 2.0);
        assert!((effective_weight(&s, Some("hill"), &roomy(), &p) - 1.0).abs() < 1e-12);
        assert!((effective_weight(&s, None, &tight, &p) - 2.0 * 0.1 * 0.2).abs() < 1e-12);
        let both = effective_weight(&s, Some("hill"), &tight, &p);
        assert!((both - 2.0 * 0.5 * 0.1 * 0.2).abs() < 1e-12);
    }

    #[test]
    fn zero_weights_fail() {
        let shapes = vec![shape("a", 10.0, 0.0, 0.0), shape("b", 10.0, 0.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let err = pick_landscape(&shapes, None, &roomy(), &SelectionPenalties::default(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenerationError::NoEligibleLandscape));
    }

    #[test]
    fn zero_weight_shape_is_never_picked() {
        let shapes = vec![shape("never", 10.0, 0.0, 0.0), shape("always", 10.0, 0.0, 1.0)];
        let penalties = SelectionPenalties::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let s = pick_landscape(&shapes, None, &roomy(), &penalties, &mut rng).unwrap();
            assert_eq!(s.name, "always");
        }
    }
}
