//! Constrained triangulation of a simple polygon, kept Delaunay by edge flips.
//!
//! Model
//! - Only triangles inside the polygon are stored. A half-edge without a twin is
//!   therefore a boundary segment; segments are never flipped, so the boundary
//!   constraint holds by construction.
//! - The initial triangulation comes from ear clipping (`earcutr`); Lawson flips
//!   then make every interior edge locally Delaunay.
//! - Triangles live in a slot vector (`None` = removed). Slots are never reused,
//!   so a live `TriId` always names the same three vertices.
//! - Every triangle created is also logged in `fresh`; the refiner drains that
//!   log instead of rescanning the mesh.
//! - Boundary segments are kept in an ordered set so iteration is deterministic.

use std::collections::{BTreeSet, HashMap};

use nalgebra::Point2;

use super::cfg::Tolerances;
use super::predicates::{in_circle, orient2d};
use crate::error::{Error, Result};

pub(crate) type TriId = usize;

/// Where a point falls relative to the stored triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Location {
    Inside(TriId),
    /// On half-edge `(a, b)` of a stored triangle (the segment itself if it has no twin).
    OnEdge(usize, usize),
    Vertex(usize),
    Outside,
}

#[derive(Clone, Debug)]
pub(crate) struct Triangulation {
    points: Vec<Point2<f64>>,
    tris: Vec<Option<[usize; 3]>>,
    half_edges: HashMap<(usize, usize), TriId>,
    /// Boundary segments as CCW half-edges `(a, b)`.
    constrained: BTreeSet<(usize, usize)>,
    fresh: Vec<TriId>,
    tol: Tolerances,
}

/// Vertex opposite half-edge `(a, b)` in CCW triangle `tri`.
#[inline]
fn apex(tri: [usize; 3], a: usize, b: usize) -> Option<usize> {
    (0..3)
        .find(|&i| tri[i] == a && tri[(i + 1) % 3] == b)
        .map(|i| tri[(i + 2) % 3])
}

impl Triangulation {
    /// Triangulate the closed polygon `boundary` (either winding, no repeated
    /// consecutive points) and restore the Delaunay property on interior edges.
    pub fn from_polygon(boundary: &[Point2<f64>], tol: Tolerances) -> Result<Self> {
        let mut flat = Vec::with_capacity(boundary.len() * 2);
        for p in boundary {
            flat.push(p.x);
            flat.push(p.y);
        }
        let indices = earcutr::earcut(&flat, &[], 2)
            .map_err(|e| Error::Triangulation(format!("{:?}", e)))?;

        let mut t = Self {
            points: boundary.to_vec(),
            tris: Vec::with_capacity(indices.len()),
            half_edges: HashMap::with_capacity(indices.len() * 2),
            constrained: BTreeSet::new(),
            fresh: Vec::new(),
            tol,
        };
        for tri in indices.chunks_exact(3) {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let o = orient2d(&t.points[a], &t.points[b], &t.points[c]);
            if o.abs() <= tol.orient {
                continue;
            }
            if o > 0.0 {
                t.add(a, b, c);
            } else {
                t.add(a, c, b);
            }
        }
        if t.triangle_count() == 0 {
            return Err(Error::Triangulation(
                "ear clipping produced no proper triangles".to_string(),
            ));
        }

        // The ear clipper drops collinear boundary points; put them back on their segment.
        let mut used = vec![false; boundary.len()];
        for tri in t.tris.iter().flatten() {
            for &v in tri {
                used[v] = true;
            }
        }
        for (v, _) in used.iter().enumerate().filter(|(_, &u)| !u) {
            t.insert_vertex(v, None);
        }
        t.constrained = t
            .live()
            .flat_map(|(_, [a, b, c])| [(a, b), (b, c), (c, a)])
            .filter(|&(a, b)| !t.half_edges.contains_key(&(b, a)))
            .collect();

        let interior: Vec<(usize, usize)> = t
            .live()
            .flat_map(|(_, [a, b, c])| [(a, b), (b, c), (c, a)])
            .filter(|&(a, b)| a < b)
            .collect();
        t.legalize(interior);
        Ok(t)
    }

    #[inline]
    pub fn point(&self, v: usize) -> &Point2<f64> {
        &self.points[v]
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn triangle(&self, id: TriId) -> Option<[usize; 3]> {
        self.tris.get(id).copied().flatten()
    }

    pub fn triangle_count(&self) -> usize {
        self.tris.iter().flatten().count()
    }

    /// Stored triangles (CCW vertex indices) in slot order.
    pub fn live(&self) -> impl Iterator<Item = (TriId, [usize; 3])> + '_ {
        self.tris
            .iter()
            .enumerate()
            .filter_map(|(id, t)| t.map(|t| (id, t)))
    }

    /// Boundary segments as `(a, b, apex)`, ordered by vertex indices.
    pub fn segments(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.constrained
            .iter()
            .filter_map(|&(a, b)| Some((a, b, self.segment_apex(a, b)?)))
    }

    /// Vertex opposite boundary segment `(a, b)`.
    pub fn segment_apex(&self, a: usize, b: usize) -> Option<usize> {
        let t = *self.half_edges.get(&(a, b))?;
        apex(self.triangle(t)?, a, b)
    }

    /// Triangles created since the last call, oldest first. Some may already be removed.
    pub fn take_fresh(&mut self) -> Vec<TriId> {
        std::mem::take(&mut self.fresh)
    }

    #[inline]
    pub fn is_segment(&self, a: usize, b: usize) -> bool {
        self.half_edges.contains_key(&(a, b)) && !self.half_edges.contains_key(&(b, a))
    }

    /// Triangles as coordinate triples, CCW, in slot order.
    pub fn triangle_points(&self) -> Vec<[Point2<f64>; 3]> {
        self.live()
            .map(|(_, [a, b, c])| [self.points[a], self.points[b], self.points[c]])
            .collect()
    }

    /// Locate `p` by scanning every stored triangle.
    pub fn locate(&self, p: &Point2<f64>) -> Location {
        let eps = self.tol.orient;
        for (id, tri) in self.live() {
            let o = self.orientations(tri, p);
            if o.iter().all(|&x| x >= -eps) {
                return self.classify(id, tri, o, p);
            }
        }
        Location::Outside
    }

    /// Locate `p` by walking across edges from triangle `start`. Falls back to a
    /// full scan when the walk reaches the boundary or does not settle.
    pub fn locate_from(&self, start: TriId, p: &Point2<f64>) -> Location {
        let eps = self.tol.orient;
        let Some(mut tri) = self.triangle(start) else {
            return self.locate(p);
        };
        let mut id = start;
        for _ in 0..self.tris.len() {
            let o = self.orientations(tri, p);
            let i = if o[0] <= o[1] && o[0] <= o[2] {
                0
            } else if o[1] <= o[2] {
                1
            } else {
                2
            };
            if o[i] >= -eps {
                return self.classify(id, tri, o, p);
            }
            // Cross the edge opposite tri[i].
            let (a, b) = (tri[(i + 1) % 3], tri[(i + 2) % 3]);
            match self
                .half_edges
                .get(&(b, a))
                .and_then(|&next| Some((next, self.triangle(next)?)))
            {
                Some((next, t)) => {
                    id = next;
                    tri = t;
                }
                None => break,
            }
        }
        self.locate(p)
    }

    /// o[i] is the orientation of `p` against the edge opposite tri[i].
    #[inline]
    fn orientations(&self, tri: [usize; 3], p: &Point2<f64>) -> [f64; 3] {
        let [pa, pb, pc] = tri.map(|v| self.points[v]);
        [
            orient2d(&pb, &pc, p),
            orient2d(&pc, &pa, p),
            orient2d(&pa, &pb, p),
        ]
    }

    /// Classify `p` within triangle `tri` (all orientations `>= -eps`).
    fn classify(&self, id: TriId, tri: [usize; 3], o: [f64; 3], p: &Point2<f64>) -> Location {
        let eps = self.tol.orient;
        if let Some(&v) = tri
            .iter()
            .find(|&&v| (self.points[v] - p).norm_squared() <= self.tol.min_len_sq)
        {
            return Location::Vertex(v);
        }
        let near: Vec<usize> = (0..3).filter(|&i| o[i] <= eps).collect();
        match near.as_slice() {
            [] => Location::Inside(id),
            [i] => Location::OnEdge(tri[(i + 1) % 3], tri[(i + 2) % 3]),
            [i, j, ..] => Location::Vertex(tri[3 - i - j]),
        }
    }

    /// Insert existing vertex `v` (already in `points`), searching from `near`
    /// if given. `false` if it could not be placed.
    pub fn insert_vertex(&mut self, v: usize, near: Option<TriId>) -> bool {
        let p = self.points[v];
        let at = match near {
            Some(t) => self.locate_from(t, &p),
            None => self.locate(&p),
        };
        match at {
            Location::Inside(t) => self.split_triangle(t, v).is_some(),
            Location::OnEdge(a, b) => self.split_edge(a, b, v).is_some(),
            Location::Vertex(_) | Location::Outside => false,
        }
    }

    /// Add a new point and insert it. Returns its index, or `None` (and leaves
    /// the triangulation unchanged) if it falls outside or on an existing vertex.
    pub fn insert_point(&mut self, p: Point2<f64>, near: Option<TriId>) -> Option<usize> {
        self.points.push(p);
        let v = self.points.len() - 1;
        if self.insert_vertex(v, near) {
            Some(v)
        } else {
            self.points.pop();
            None
        }
    }

    /// Split segment `(a, b)` at its midpoint. Returns the new vertex.
    pub fn split_segment(&mut self, a: usize, b: usize) -> Option<usize> {
        let mid = nalgebra::center(&self.points[a], &self.points[b]);
        self.points.push(mid);
        let v = self.points.len() - 1;
        if self.split_edge(a, b, v).is_some() {
            Some(v)
        } else {
            self.points.pop();
            None
        }
    }

    fn add(&mut self, a: usize, b: usize, c: usize) -> TriId {
        let id = self.tris.len();
        self.tris.push(Some([a, b, c]));
        self.half_edges.insert((a, b), id);
        self.half_edges.insert((b, c), id);
        self.half_edges.insert((c, a), id);
        self.fresh.push(id);
        id
    }

    fn remove(&mut self, id: TriId) -> Option<[usize; 3]> {
        let tri = self.tris.get_mut(id)?.take()?;
        let [a, b, c] = tri;
        for e in [(a, b), (b, c), (c, a)] {
            if self.half_edges.get(&e) == Some(&id) {
                self.half_edges.remove(&e);
            }
        }
        Some(tri)
    }

    fn split_triangle(&mut self, t: TriId, v: usize) -> Option<()> {
        let [a, b, c] = self.remove(t)?;
        self.add(a, b, v);
        self.add(b, c, v);
        self.add(c, a, v);
        self.legalize(vec![(a, b), (b, c), (c, a)]);
        Some(())
    }

    /// Split half-edge `(a, b)` at vertex `v`, together with its twin if any.
    fn split_edge(&mut self, a: usize, b: usize, v: usize) -> Option<()> {
        let t1 = *self.half_edges.get(&(a, b))?;
        let c = apex(self.triangle(t1)?, a, b)?;
        let twin = match self.half_edges.get(&(b, a)) {
            Some(&t2) => Some((t2, apex(self.triangle(t2)?, b, a)?)),
            None => None,
        };
        self.remove(t1);
        self.add(a, v, c);
        self.add(v, b, c);
        if twin.is_none() && self.constrained.remove(&(a, b)) {
            self.constrained.insert((a, v));
            self.constrained.insert((v, b));
        }
        let mut stack = vec![(b, c), (c, a)];
        if let Some((t2, d)) = twin {
            self.remove(t2);
            self.add(b, v, d);
            self.add(v, a, d);
            stack.extend([(a, d), (d, b)]);
        }
        self.legalize(stack);
        Some(())
    }

    fn legalize(&mut self, mut stack: Vec<(usize, usize)>) {
        while let Some((a, b)) = stack.pop() {
            if let Some(outer) = self.flip_if_illegal(a, b) {
                stack.extend(outer);
            }
        }
    }

    /// Flip interior edge `ab` if the opposite apex lies inside the circumcircle.
    /// Returns the four edges of the surrounding quad, which may now be illegal.
    fn flip_if_illegal(&mut self, a: usize, b: usize) -> Option<[(usize, usize); 4]> {
        let t1 = *self.half_edges.get(&(a, b))?;
        let t2 = *self.half_edges.get(&(b, a))?;
        let c = apex(self.triangle(t1)?, a, b)?;
        let d = apex(self.triangle(t2)?, b, a)?;
        let (pa, pb, pc, pd) = (self.points[a], self.points[b], self.points[c], self.points[d]);
        if in_circle(&pa, &pb, &pc, &pd) <= self.tol.circle {
            return None;
        }
        // Quad a-d-b-c must be strictly convex for the flipped pair to be valid.
        if orient2d(&pa, &pd, &pc) <= self.tol.orient || orient2d(&pd, &pb, &pc) <= self.tol.orient
        {
            return None;
        }
        self.remove(t1);
        self.remove(t2);
        self.add(a, d, c);
        self.add(d, b, c);
        Some([(a, d), (d, b), (b, c), (c, a)])
    }

    /// `true` if every interior edge is locally Delaunay (within tolerance).
    #[cfg(test)]
    pub fn is_delaunay(&self) -> bool {
        self.live().all(|(_, [a, b, c])| {
            [(a, b, c), (b, c, a), (c, a, b)].into_iter().all(|(x, y, z)| {
                let Some(&t2) = self.half_edges.get(&(y, x)) else {
                    return true;
                };
                let Some(w) = self.triangle(t2).and_then(|t| apex(t, y, x)) else {
                    return false;
                };
                in_circle(&self.points[x], &self.points[y], &self.points[z], &self.points[w])
                    <= self.tol.circle
            })
        })
    }
}
