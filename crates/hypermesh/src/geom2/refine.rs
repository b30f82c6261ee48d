//! Quality refinement of a planar polygon (Ruppert-style Delaunay refinement).
//!
//! Purpose
//! - Turn a simple polygon into triangles that cover it exactly, with a lower
//!   bound on the smallest angle and an upper bound on edge length.
//!
//! Model
//! - Constrained Delaunay triangulation of the boundary (`Triangulation`), then
//!   repeatedly: split an encroached boundary segment at its midpoint, else
//!   insert the circumcenter of the oldest queued bad triangle. A circumcenter
//!   that would encroach segments is rejected and those segments are split instead.
//! - Only triangles created since the last step are tested; quality and
//!   encroachment of a triangle never change while it lives. Circumcenters are
//!   located by walking from their triangle.
//! - Small input angles cannot be repaired; triangles whose smallest angle sits
//!   between two boundary segments are exempt from the shape test.
//!
//! Invariants
//! - Output triangles are CCW and their union is the input polygon: boundary
//!   vertices are kept and only midpoints are added on the boundary.
//! - Deterministic: work queues are FIFO over creation order, so the same input
//!   and config give the same triangles in the same order.
//! - Terminates: every step adds a vertex (bounded by `max_steiner`) or retires a
//!   candidate that cannot be improved.

use std::collections::{HashSet, VecDeque};

use nalgebra::Point2;

use super::cdt::{TriId, Triangulation};
use super::cfg::{RefineCfg, Tolerances, AREA_REL_EPS, ENCROACH_REL_EPS};
use super::predicates::{
    circumcenter, encroaches, max_edge_sq, min_angle_sin2, min_edge_sq, signed_area,
};
use crate::error::{Error, Result};

/// Result of refining one polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Refinement {
    /// CCW triangles covering the polygon.
    pub triangles: Vec<[Point2<f64>; 3]>,
    /// Points added beyond the boundary vertices.
    pub steiner_points: usize,
    /// `true` if refinement stopped at `max_steiner` with work left.
    pub capped: bool,
}

/// Refine the polygon `boundary` (closed implicitly, either winding) under `cfg`.
///
/// Errors
/// - `InvalidQualityParameters` if `cfg` is out of range.
/// - `DegenerateProjection` for fewer than three distinct points or (near) zero area.
/// - `Triangulation` if the boundary cannot be triangulated (e.g. self-intersecting).
pub fn refine_polygon_2d(boundary: &[Point2<f64>], cfg: &RefineCfg) -> Result<Vec<[Point2<f64>; 3]>> {
    refine(boundary, cfg).map(|r| r.triangles)
}

/// Like [`refine_polygon_2d`] but also reports refinement statistics.
pub fn refine(boundary: &[Point2<f64>], cfg: &RefineCfg) -> Result<Refinement> {
    cfg.validate()?;
    let scale = extent(boundary);
    let ring = dedup_ring(boundary, scale);
    let area = signed_area(&ring);
    if ring.len() < 3
        || !scale.is_finite()
        || scale <= 0.0
        || !area.is_finite()
        || area.abs() <= AREA_REL_EPS * scale * scale
    {
        return Err(Error::DegenerateProjection { area });
    }

    let tol = Tolerances::for_scale(scale);
    let tri = Triangulation::from_polygon(&ring, tol)?;
    let mut refiner = Refiner {
        tri,
        cfg,
        tol,
        size_sq: cfg.max_edge_length * cfg.max_edge_length,
        suspect: VecDeque::new(),
        bad: VecDeque::new(),
        retired: HashSet::new(),
        frozen: HashSet::new(),
        steiner: 0,
    };
    let capped = refiner.run();
    if capped {
        tracing::warn!(
            steiner = refiner.steiner,
            "refinement stopped at max_steiner; quality bounds may not hold everywhere"
        );
    }
    let triangles = refiner.tri.triangle_points();
    tracing::debug!(
        boundary = ring.len(),
        vertices = refiner.tri.vertex_count(),
        steiner = refiner.steiner,
        triangles = triangles.len(),
        "refined polygon"
    );
    Ok(Refinement {
        triangles,
        steiner_points: refiner.steiner,
        capped,
    })
}

/// Larger side of the axis-aligned bounding box.
fn extent(points: &[Point2<f64>]) -> f64 {
    let (mut lo, mut hi) = (
        Point2::new(f64::INFINITY, f64::INFINITY),
        Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
    );
    for p in points {
        lo = lo.inf(p);
        hi = hi.sup(p);
    }
    let d = hi - lo;
    d.x.max(d.y)
}

/// Drop consecutive near-duplicates (including last vs first).
fn dedup_ring(points: &[Point2<f64>], scale: f64) -> Vec<Point2<f64>> {
    let eps_sq = (1e-12 * scale).powi(2);
    let mut out: Vec<Point2<f64>> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().map_or(true, |q| (p - q).norm_squared() > eps_sq) {
            out.push(*p);
        }
    }
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm_squared() <= eps_sq {
        out.pop();
    }
    out
}

struct Refiner<'a> {
    tri: Triangulation,
    cfg: &'a RefineCfg,
    tol: Tolerances,
    size_sq: f64,
    /// Segments whose apex changed since they were last checked.
    suspect: VecDeque<(usize, usize)>,
    /// Triangles that failed a quality test, oldest first.
    bad: VecDeque<TriId>,
    /// Triangles whose circumcenter could not be inserted.
    retired: HashSet<TriId>,
    /// Segments that failed to split.
    frozen: HashSet<(usize, usize)>,
    steiner: usize,
}

impl Refiner<'_> {
    /// Returns `true` if stopped by the Steiner cap.
    fn run(&mut self) -> bool {
        loop {
            self.absorb_fresh();
            if self.steiner >= self.cfg.max_steiner {
                return self.next_encroached().is_some() || self.next_bad().is_some();
            }
            if let Some((a, b)) = self.next_encroached() {
                self.split_segment(a, b);
                continue;
            }
            let Some(id) = self.next_bad() else {
                return false;
            };
            self.refine_triangle(id);
        }
    }

    /// Queue the segments and bad triangles among newly created triangles.
    fn absorb_fresh(&mut self) {
        for id in self.tri.take_fresh() {
            let Some(t @ [a, b, c]) = self.tri.triangle(id) else {
                continue;
            };
            for (x, y) in [(a, b), (b, c), (c, a)] {
                if self.tri.is_segment(x, y) {
                    self.suspect.push_back((x, y));
                }
            }
            if self.is_bad(t) {
                self.bad.push_back(id);
            }
        }
    }

    /// Segments long enough to split: both halves stay above the minimum feature size.
    fn splittable(&self, a: usize, b: usize) -> bool {
        !self.frozen.contains(&(a, b))
            && (self.tri.point(b) - self.tri.point(a)).norm_squared() >= 4.0 * self.tol.min_len_sq
    }

    fn next_encroached(&mut self) -> Option<(usize, usize)> {
        while let Some((a, b)) = self.suspect.pop_front() {
            let Some(c) = self.tri.segment_apex(a, b) else {
                continue;
            };
            if self.tri.is_segment(a, b)
                && self.splittable(a, b)
                && encroaches(self.tri.point(c), self.tri.point(a), self.tri.point(b), ENCROACH_REL_EPS)
            {
                return Some((a, b));
            }
        }
        None
    }

    fn next_bad(&mut self) -> Option<TriId> {
        while let Some(id) = self.bad.pop_front() {
            if self.tri.triangle(id).is_some() && !self.retired.contains(&id) {
                return Some(id);
            }
        }
        None
    }

    fn is_bad(&self, t: [usize; 3]) -> bool {
        let [pa, pb, pc] = t.map(|v| *self.tri.point(v));
        if min_edge_sq(&pa, &pb, &pc) < 4.0 * self.tol.min_len_sq {
            return false;
        }
        if max_edge_sq(&pa, &pb, &pc) > self.size_sq {
            return true;
        }
        min_angle_sin2(&pa, &pb, &pc) < self.cfg.shape_ratio && !self.is_input_corner(t)
    }

    /// `true` if the smallest angle of `t` lies between two boundary segments.
    fn is_input_corner(&self, t: [usize; 3]) -> bool {
        let [a, b, c] = t;
        let p = |v: usize| *self.tri.point(v);
        // Smallest angle is opposite the shortest edge.
        let lens = [
            (p(c) - p(b)).norm_squared(),
            (p(a) - p(c)).norm_squared(),
            (p(b) - p(a)).norm_squared(),
        ];
        let i = (0..3)
            .min_by(|&i, &j| lens[i].total_cmp(&lens[j]))
            .unwrap_or(0);
        let v = t[i];
        let next = t[(i + 1) % 3];
        let prev = t[(i + 2) % 3];
        self.tri.is_segment(v, next) && self.tri.is_segment(prev, v)
    }

    fn split_segment(&mut self, a: usize, b: usize) {
        if self.tri.split_segment(a, b).is_some() {
            self.steiner += 1;
        } else {
            self.frozen.insert((a, b));
        }
    }

    fn refine_triangle(&mut self, id: TriId) {
        let Some(t) = self.tri.triangle(id) else {
            return;
        };
        let [pa, pb, pc] = t.map(|v| *self.tri.point(v));
        let Some(cc) = circumcenter(&pa, &pb, &pc) else {
            self.retired.insert(id);
            return;
        };
        let encroached: Vec<(usize, usize)> = self
            .tri
            .segments()
            .filter(|&(a, b, _)| {
                self.splittable(a, b)
                    && encroaches(&cc, self.tri.point(a), self.tri.point(b), ENCROACH_REL_EPS)
            })
            .map(|(a, b, _)| (a, b))
            .collect();
        if !encroached.is_empty() {
            for (a, b) in encroached {
                if self.tri.is_segment(a, b) {
                    self.split_segment(a, b);
                }
            }
            // Still bad if it survived the splits; try again once the segments settle.
            if self.tri.triangle(id).is_some() {
                self.bad.push_front(id);
            }
            return;
        }
        match self.tri.insert_point(cc, Some(id)) {
            Some(_) => self.steiner += 1,
            None => {
                tracing::trace!(triangle = id, "circumcenter not insertable; retiring triangle");
                self.retired.insert(id);
            }
        }
    }
}
