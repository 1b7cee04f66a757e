//! Small geometry helpers shared by the hitscan and spawn code.

use glam::{Vec2, Vec3};
use rand::Rng;

/// Squared distance on the XZ plane.
#[inline]
pub fn dist_sq_xz(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

/// Closest points between two segments `p1..q1` and `p2..q2`.
/// Returns (s, t, dist²) with s/t the segment parameters in [0, 1].
fn closest_segment_segment(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (f32, f32, f32) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);
    let (mut s, mut t);
    if a <= 1e-8 && e <= 1e-8 {
        return (0.0, 0.0, r.length_squared());
    }
    if a <= 1e-8 {
        s = 0.0;
        t = (f / e).clamp(0.0, 1.0);
    } else {
        let c = d1.dot(r);
        if e <= 1e-8 {
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            s = if denom > 1e-8 { ((b * f - c * e) / denom).clamp(0.0, 1.0) } else { 0.0 };
            t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
        }
    }
    let c1 = p1 + d1 * s;
    let c2 = p2 + d2 * t;
    (s, t, (c1 - c2).length_squared())
}

/// Ray (origin, unit dir, capped at `t_max`) against a capsule with axis
/// segment `a..b` and radius `r`. Returns the ray distance of the closest
/// approach when it comes within the radius.
pub fn ray_hits_capsule(origin: Vec3, dir: Vec3, t_max: f32, a: Vec3, b: Vec3, r: f32) -> Option<f32> {
    let (s, _t, d2) = closest_segment_segment(origin, origin + dir * t_max, a, b);
    if d2 <= r * r { Some(s * t_max) } else { None }
}

/// Area-uniform sample inside a disc of the given radius.
pub fn sample_in_disc(rng: &mut impl Rng, radius: f32) -> Vec2 {
    let r = rng.gen_range(0.0f32..1.0).sqrt() * radius;
    let t = rng.gen_range(0.0f32..std::f32::consts::TAU);
    Vec2::new(t.cos() * r, t.sin() * r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn ray_hits_vertical_capsule_dead_on() {
        let a = Vec3::new(5.0, 0.4, 0.0);
        let b = Vec3::new(5.0, 1.2, 0.0);
        let t = ray_hits_capsule(Vec3::new(0.0, 0.8, 0.0), Vec3::X, 100.0, a, b, 0.35);
        let t = t.expect("hit");
        assert!((t - 5.0).abs() < 0.4, "t={t}");
    }

    #[test]
    fn ray_misses_offset_capsule() {
        let a = Vec3::new(5.0, 0.4, 2.0);
        let b = Vec3::new(5.0, 1.2, 2.0);
        assert!(ray_hits_capsule(Vec3::new(0.0, 0.8, 0.0), Vec3::X, 100.0, a, b, 0.35).is_none());
    }

    #[test]
    fn ray_behind_capsule_does_not_hit() {
        let a = Vec3::new(-5.0, 0.4, 0.0);
        let b = Vec3::new(-5.0, 1.2, 0.0);
        // Closest approach is at t=0; distance 5 > radius.
        assert!(ray_hits_capsule(Vec3::new(0.0, 0.8, 0.0), Vec3::X, 100.0, a, b, 0.35).is_none());
    }

    #[test]
    fn disc_samples_stay_inside_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1000 {
            let p = sample_in_disc(&mut rng, 9.0);
            assert!(p.length() <= 9.0 + 1e-4);
        }
    }
}
