use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// UV sphere with deduplicated vertices.
///
/// The vertex list holds each position exactly once: the top pole, the
/// interior rings, then the bottom pole. Seam and pole duplicates are never
/// emitted, so consumers that place one object per vertex (a light rig, a
/// marker cloud) never produce coincident instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereGeometry {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub vertices: Vec<Vec3>,
    pub indices: Vec<[u32; 3]>,
}

impl SphereGeometry {
    /// Builds a sphere of `radius` split into `width_segments` around the
    /// equator and `height_segments` from pole to pole.
    ///
    /// Inputs are not validated; degenerate tessellations still produce the
    /// two poles but may have an empty index list.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let vertices = build_vertices(radius, width_segments, height_segments);
        let indices = build_indices(width_segments, height_segments);
        Self {
            radius,
            width_segments,
            height_segments,
            vertices,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

fn build_vertices(radius: f32, width_segments: u32, height_segments: u32) -> Vec<Vec3> {
    let mut vertices = Vec::new();
    vertices.push(Vec3::new(0.0, radius, 0.0));
    for iy in 1..height_segments {
        let polar = PI * iy as f32 / height_segments as f32;
        let (ring_sin, ring_cos) = polar.sin_cos();
        for ix in 0..width_segments {
            let azimuth = 2.0 * PI * ix as f32 / width_segments as f32;
            vertices.push(Vec3::new(
                radius * ring_sin * azimuth.cos(),
                radius * ring_cos,
                radius * ring_sin * azimuth.sin(),
            ));
        }
    }
    vertices.push(Vec3::new(0.0, -radius, 0.0));
    vertices
}

fn build_indices(width_segments: u32, height_segments: u32) -> Vec<[u32; 3]> {
    let mut indices = Vec::new();
    if width_segments < 3 || height_segments < 2 {
        return indices;
    }

    let w = width_segments;
    // Vertex layout: 0 = top pole, then (height_segments - 1) rings of w
    // vertices, then the bottom pole.
    let ring = |iy: u32, ix: u32| 1 + iy * w + (ix % w);
    let bottom = 1 + (height_segments - 1) * w;

    for ix in 0..w {
        indices.push([0, ring(0, ix + 1), ring(0, ix)]);
    }
    for iy in 0..height_segments - 2 {
        for ix in 0..w {
            let a = ring(iy, ix);
            let b = ring(iy, ix + 1);
            let c = ring(iy + 1, ix + 1);
            let d = ring(iy + 1, ix);
            indices.push([a, b, c]);
            indices.push([a, c, d]);
        }
    }
    for ix in 0..w {
        indices.push([bottom, ring(height_segments - 2, ix), ring(height_segments - 2, ix + 1)]);
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_matches_formula() {
        for (w, h) in [(3, 2), (4, 4), (8, 6), (16, 16)] {
            let sphere = SphereGeometry::new(1.0, w, h);
            assert_eq!(sphere.vertex_count() as u32, w * (h - 1) + 2);
        }
    }

    #[test]
    fn degenerate_tessellation_keeps_poles() {
        let sphere = SphereGeometry::new(2.0, 1, 1);
        assert_eq!(sphere.vertices.len(), 2);
        assert!(sphere.indices.is_empty());
        assert_eq!(sphere.vertices[0], Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(sphere.vertices[1], Vec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn all_vertices_lie_on_the_sphere() {
        let sphere = SphereGeometry::new(5.0, 4, 4);
        for vertex in &sphere.vertices {
            assert!((vertex.length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn vertices_are_unique() {
        let sphere = SphereGeometry::new(1.0, 8, 6);
        for (i, a) in sphere.vertices.iter().enumerate() {
            for b in &sphere.vertices[i + 1..] {
                assert!(a.distance(*b) > 1e-5);
            }
        }
    }

    #[test]
    fn triangle_count_closes_the_surface() {
        // Cap fans plus two triangles per ring quad: 2 * w * (h - 1).
        for (w, h) in [(3u32, 2u32), (4, 4), (8, 6)] {
            let sphere = SphereGeometry::new(1.0, w, h);
            assert_eq!(sphere.triangle_count() as u32, 2 * w * (h - 1));
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        let sphere = SphereGeometry::new(1.0, 4, 4);
        let count = sphere.vertex_count() as u32;
        for tri in &sphere.indices {
            for &index in tri {
                assert!(index < count);
            }
        }
    }
}
