//! Random planar polygons in R^4 (radial jitter + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic source of convex planar faces in random
//!   2-planes of R^4 for property tests and benchmarks of the face pipeline.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, take the convex hull (CCW) in plane coordinates.
//! - The plane gets a random origin and an orthonormal basis from Gram–Schmidt
//!   on two random directions; hull points are lifted through it.
//!
//! Why this design
//! - Every draw is addressed by a replay token `(seed, index)` mixed into a single
//!   RNG, so a failing sample can be regenerated from its token alone.
//! - `FaceSampler` exposes both streaming (`generate_next`) and replay
//!   (`regenerate`) entry points backed by the same function.

use nalgebra::{Point2, Point4, Vector4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom2::predicates::orient2d;
use crate::geom4::{PlanarFrame, Polygon4};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude). Radii = `base_radius * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Base radius in plane coordinates.
    pub base_radius: f64,
    /// Plane origins are drawn uniformly from `[-origin_box, origin_box]^4`.
    pub origin_box: f64,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 3, max: 10 },
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            origin_box: 2.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// One drawn face together with the plane it was built in.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarSample {
    pub polygon: Polygon4,
    /// Plane chart used for lifting; `polygon` vertices are `plane.lift(hull[k])`.
    pub plane: PlanarFrame,
    /// Hull vertices in plane coordinates, CCW.
    pub hull: Vec<Point2<f64>>,
    pub replay: ReplayToken,
}

/// Draw a random convex polygon in a random 2-plane of R^4.
///
/// Returns `None` only if jitter collapses the hull below three vertices.
pub fn draw_planar_polygon(cfg: &RadialCfg, tok: ReplayToken) -> Option<PlanarSample> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.99);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / n as f64;
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    let pts: Vec<Point2<f64>> = (0..n)
        .map(|k| {
            let th = phase + k as f64 * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
            Point2::new(th.cos() * r, th.sin() * r)
        })
        .collect();
    let hull = convex_hull(&pts)?;

    let b = cfg.origin_box.abs();
    let origin = Point4::new(
        rng.gen_range(-b..=b),
        rng.gen_range(-b..=b),
        rng.gen_range(-b..=b),
        rng.gen_range(-b..=b),
    );
    let e1 = sample_unit_vector(&mut rng);
    let e2 = loop {
        let v = sample_unit_vector(&mut rng);
        if let Some(u) = (v - e1 * e1.dot(&v)).try_normalize(1e-6) {
            break u;
        }
    };
    let plane = PlanarFrame { origin, e1, e2 };
    let polygon = Polygon4::new(hull.iter().map(|q| plane.lift(q)).collect()).ok()?;
    Some(PlanarSample {
        polygon,
        plane,
        hull,
        replay: tok,
    })
}

/// Streaming sampler over consecutive replay indices of one seed.
#[derive(Clone, Debug)]
pub struct FaceSampler {
    cfg: RadialCfg,
    seed: u64,
    next_index: u64,
}

impl FaceSampler {
    pub fn new(cfg: RadialCfg, seed: u64) -> Self {
        Self {
            cfg,
            seed,
            next_index: 0,
        }
    }

    pub fn cfg(&self) -> &RadialCfg {
        &self.cfg
    }

    /// Next sample; indices that fail to produce a polygon are skipped.
    pub fn generate_next(&mut self) -> PlanarSample {
        loop {
            let tok = ReplayToken::new(self.seed, self.next_index);
            self.next_index = self.next_index.wrapping_add(1);
            if let Some(s) = draw_planar_polygon(&self.cfg, tok) {
                return s;
            }
        }
    }

    pub fn regenerate(&self, replay: ReplayToken) -> Option<PlanarSample> {
        draw_planar_polygon(&self.cfg, replay)
    }

    /// `count` consecutive faces.
    pub fn take_faces(&mut self, count: usize) -> Vec<Polygon4> {
        (0..count).map(|_| self.generate_next().polygon).collect()
    }
}

fn sample_unit_vector<R: Rng>(rng: &mut R) -> Vector4<f64> {
    loop {
        let v = Vector4::from_fn(|_, _| rng.gen_range(-1.0..=1.0));
        if let Some(u) = v.try_normalize(1e-12) {
            return u;
        }
    }
}

fn half_hull<'a>(points: impl Iterator<Item = &'a Point2<f64>>) -> Vec<Point2<f64>> {
    let mut half: Vec<Point2<f64>> = Vec::new();
    for p in points {
        while half.len() >= 2 && orient2d(&half[half.len() - 2], &half[half.len() - 1], p) <= 0.0 {
            half.pop();
        }
        half.push(*p);
    }
    half.pop();
    half
}

/// Andrew's monotone chain convex hull (CCW, collinear points dropped).
fn convex_hull(points: &[Point2<f64>]) -> Option<Vec<Point2<f64>>> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| (*a - *b).norm() < 1e-12);
    if pts.len() < 3 {
        return None;
    }
    let mut hull = half_hull(pts.iter());
    hull.extend(half_hull(pts.iter().rev()));
    (hull.len() >= 3).then_some(hull)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::RefineCfg;
    use crate::geom4::Rgba;
    use crate::mesh::refine_polygon;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn reproducible_draw() {
        let cfg = RadialCfg::default();
        let tok = ReplayToken::new(42, 7);
        let a = draw_planar_polygon(&cfg, tok).unwrap();
        let b = draw_planar_polygon(&cfg, tok).unwrap();
        assert_eq!(a, b);
        let c = draw_planar_polygon(&cfg, ReplayToken::new(42, 8)).unwrap();
        assert_ne!(a.polygon, c.polygon);
    }

    #[test]
    fn sampler_replays_its_stream() {
        let mut s = FaceSampler::new(RadialCfg::default(), 9);
        let drawn: Vec<PlanarSample> = (0..5).map(|_| s.generate_next()).collect();
        for d in &drawn {
            assert_eq!(s.regenerate(d.replay).as_ref(), Some(d));
        }
        assert_eq!(s.take_faces(3).len(), 3);
    }

    #[test]
    fn hull_is_convex_and_ccw() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Fixed(12),
            ..RadialCfg::default()
        };
        for index in 0..20 {
            let s = draw_planar_polygon(&cfg, ReplayToken::new(3, index)).unwrap();
            let h = &s.hull;
            assert!(h.len() >= 3);
            for k in 0..h.len() {
                let (a, b, c) = (h[k], h[(k + 1) % h.len()], h[(k + 2) % h.len()]);
                assert!(orient2d(&a, &b, &c) > 0.0);
            }
        }
    }

    #[test]
    fn hull_drops_interior_and_collinear_points() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.2),
        ];
        let hull = convex_hull(&pts).unwrap();
        assert_eq!(hull.len(), 3);
        assert!(convex_hull(&pts[..3]).is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn project_then_lift_is_identity_on_random_faces(seed in any::<u64>(), index in 0u64..1_000) {
            let s = draw_planar_polygon(&RadialCfg::default(), ReplayToken::new(seed, index)).unwrap();
            let frame = PlanarFrame::from_polygon(&s.polygon).unwrap();
            for v in s.polygon.vertices() {
                let back = frame.lift(&frame.project(v));
                prop_assert!((back - v).norm() < 1e-9);
            }
            prop_assert!(s.polygon.planarity_residual(&frame) < 1e-9);
        }

        #[test]
        fn refinement_preserves_area_of_random_faces(seed in any::<u64>(), index in 0u64..1_000) {
            let s = draw_planar_polygon(&RadialCfg::default(), ReplayToken::new(seed, index)).unwrap();
            let want = crate::geom2::predicates::signed_area(&s.hull);
            let mesh = refine_polygon(&s.polygon, &RefineCfg::new(0.125, 0.4), Rgba::DEFAULT_FACE).unwrap();
            assert_relative_eq!(mesh.area(), want, epsilon = 1e-8, max_relative = 1e-8);
        }
    }
}
