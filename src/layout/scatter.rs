use std::f32::consts::TAU;
use rand::Rng;
use crate::math::Vec3;

/// Sample a point uniformly inside a ball of `radius` centered at the origin.
///
/// The cube root on the radial draw and the arccos on the polar draw keep
/// the density uniform per unit volume instead of piling up at the center
/// or the poles.
pub fn sample_scatter<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let r = radius * rng.gen::<f32>().cbrt();
    let theta = rng.gen_range(0.0..TAU);
    let phi = rng.gen_range(-1.0f32..1.0).acos();
    Vec3::from_spherical(r, theta, phi)
}
