//! This module places points inside spheres.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Get a random point inside a sphere of the given radius centred on the origin.
///
/// The direction is uniform over the sphere, and the distance from the centre is `sqrt(u) *
/// radius`, which spreads the points out towards the shell rather than clumping them at the
/// centre.
pub fn sphere_point<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2. * rng.gen::<f32>() - 1.).clamp(-1., 1.).acos();
    let r = rng.gen::<f32>().sqrt() * radius;

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{
        rngs::{mock::StepRng, StdRng},
        SeedableRng,
    };

    #[test]
    fn sphere_point_within_radius_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        for _ in 0..10_000 {
            let point = sphere_point(&mut rng, 20.);
            assert!(point.length() <= 20. + 1e-4, "{point:?} is outside the sphere");
        }
    }

    #[test]
    fn sphere_point_extreme_draws_test() {
        // Every draw is 0, so the radius is 0
        let point = sphere_point(&mut StepRng::new(0, 0), 20.);
        assert_eq!(point, Vec3::ZERO);

        // Every draw is just under 1, so we're right on the shell at the north pole
        let point = sphere_point(&mut StepRng::new(u64::MAX, 0), 20.);
        assert!(point.length() <= 20. + 1e-4);
        assert!(point.length() > 19.99);
        assert!(point.z > 19.99);
    }

    #[test]
    fn sphere_point_is_deterministic_test() {
        let first: Vec<Vec3> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..100).map(|_| sphere_point(&mut rng, 5.)).collect()
        };
        let second: Vec<Vec3> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..100).map(|_| sphere_point(&mut rng, 5.)).collect()
        };
        assert_eq!(first, second);
    }
}
