//! PlanetSurface: angular radius samples with lookup, intersection and mutation.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use gravwar_core::constants::*;
use gravwar_core::types::{degrees_of, unit_from_degrees, Circle};

use crate::geometry::{circle_intersects_triangle, is_degenerate, ray_circle};

/// Degrees covered by one sample bucket.
const DEGREES_PER_BUCKET: f32 = 360.0 / TERRAIN_SAMPLES as f32;

/// Bucket index for an angle in degrees. Always in `[0, TERRAIN_SAMPLES)`,
/// including negative, huge and non-finite angles.
pub fn bucket_for_degrees(degrees: f32) -> usize {
    if !degrees.is_finite() {
        return 0;
    }
    let bucket = (degrees / DEGREES_PER_BUCKET).floor() as i64;
    bucket.rem_euclid(TERRAIN_SAMPLES as i64) as usize
}

/// Wrap a signed bucket index into `[0, TERRAIN_SAMPLES)`.
fn wrap(index: isize) -> usize {
    index.rem_euclid(TERRAIN_SAMPLES as isize) as usize
}

/// Angle of a (signed) bucket in radians.
fn bucket_radians(index: isize) -> f32 {
    TAU * index as f32 / TERRAIN_SAMPLES as f32
}

/// One puff of crater smoke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokePuff {
    pub position: Vec2,
    /// Drift toward the planet center.
    pub velocity: Vec2,
    pub scale: f32,
}

/// The surface of one planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSurface {
    pub center: Vec2,
    pub sealevel_radius: f32,
    pub core_radius: f32,
    samples: Vec<f32>,
    min_altitude: f32,
    max_altitude: f32,
}

impl PlanetSurface {
    /// Build a surface from absolute radius samples.
    ///
    /// Short or long sample vectors are padded with sea level or truncated,
    /// and every sample is lifted to the core floor.
    pub fn from_samples(center: Vec2, sealevel_radius: f32, mut samples: Vec<f32>) -> Self {
        samples.resize(TERRAIN_SAMPLES, sealevel_radius);
        let mut surface = Self {
            center,
            sealevel_radius,
            core_radius: sealevel_radius * CORE_RADIUS_FRACTION,
            samples,
            min_altitude: sealevel_radius,
            max_altitude: sealevel_radius,
        };
        let floor = surface.floor();
        for sample in &mut surface.samples {
            if !sample.is_finite() || *sample < floor {
                *sample = floor;
            }
        }
        surface.recompute_envelope();
        surface
    }

    /// A perfectly round surface at sea level.
    pub fn flat(center: Vec2, sealevel_radius: f32) -> Self {
        Self::from_samples(center, sealevel_radius, vec![sealevel_radius; TERRAIN_SAMPLES])
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn min_altitude(&self) -> f32 {
        self.min_altitude
    }

    pub fn max_altitude(&self) -> f32 {
        self.max_altitude
    }

    /// Lowest radius any sample may take.
    pub fn floor(&self) -> f32 {
        self.core_radius + CORE_MARGIN
    }

    /// Impassable core circle.
    pub fn core(&self) -> Circle {
        Circle::new(self.center, self.core_radius)
    }

    /// Circle through the tallest sample.
    pub fn envelope(&self) -> Circle {
        Circle::new(self.center, self.max_altitude)
    }

    /// Move the planet, keeping its shape.
    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.center += offset;
    }

    pub fn recompute_envelope(&mut self) {
        let (min, max) = self
            .samples
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
        self.min_altitude = min;
        self.max_altitude = max;
    }

    // ---- Lookup ----

    /// Radius of the sample under `degrees`.
    pub fn altitude_at_degrees(&self, degrees: f32) -> f32 {
        self.samples[bucket_for_degrees(degrees)]
    }

    /// Bucket whose wedge contains `point`.
    pub fn bucket_under_point(&self, point: Vec2) -> usize {
        bucket_for_degrees(degrees_of(point - self.center))
    }

    /// Surface vertex of a bucket relative to the planet center.
    fn local_surface_point(&self, index: isize) -> Vec2 {
        let angle = bucket_radians(index);
        self.samples[wrap(index)] * Vec2::new(angle.cos(), angle.sin())
    }

    /// Surface vertex of a bucket in world space. Any signed index is accepted.
    pub fn surface_point(&self, index: isize) -> Vec2 {
        self.center + self.local_surface_point(index)
    }

    /// Point on the surface straight out along `degrees`.
    pub fn surface_point_at_degrees(&self, degrees: f32) -> Vec2 {
        self.center + self.altitude_at_degrees(degrees) * unit_from_degrees(degrees)
    }

    /// Direction of the surface (degrees) at a longitude, from the central
    /// difference of the neighbouring vertices.
    pub fn slope_at_degrees(&self, degrees: f32) -> f32 {
        let bucket = bucket_for_degrees(degrees) as isize;
        let diff = self.local_surface_point(bucket + 1) - self.local_surface_point(bucket - 1);
        degrees_of(diff)
    }

    // ---- Intersection ----

    /// Whether `circle` touches the core or the surface polygon near it.
    pub fn intersects(&self, circle: &Circle) -> bool {
        // Work relative to the planet center.
        let local = Circle::new(circle.center - self.center, circle.radius);
        let origin = Circle::new(Vec2::ZERO, self.core_radius);
        if local.intersects(&origin) {
            return true;
        }
        if !local.intersects(&Circle::new(Vec2::ZERO, self.max_altitude)) {
            return false;
        }

        let bucket = bucket_for_degrees(degrees_of(local.center)) as isize;
        (bucket - TERRAIN_TRIANGLE_WINDOW..bucket + TERRAIN_TRIANGLE_WINDOW).any(|i| {
            let v0 = self.local_surface_point(i);
            let v1 = self.local_surface_point(i + 1);
            !is_degenerate(Vec2::ZERO, v0, v1)
                && circle_intersects_triangle(&local, Vec2::ZERO, v0, v1)
        })
    }

    // ---- Mutation ----

    /// Signed bucket range `[start, end)` swept by an explosion circle.
    fn affected_range(&self, circle: &Circle) -> (isize, isize) {
        let h = circle.center.distance(self.center);
        if h <= f32::EPSILON || circle.radius >= h {
            return (0, TERRAIN_SAMPLES as isize);
        }
        let delta = (circle.radius / h).min(1.0).asin().abs();
        let width = (delta * TERRAIN_SAMPLES as f32 / TAU).ceil() as isize;
        let bucket = self.bucket_under_point(circle.center) as isize;
        (bucket - width, bucket + width)
    }

    /// Carve a crater. Returns the smoke burst along the affected arc.
    pub fn crater(&mut self, circle: &Circle) -> Vec<SmokePuff> {
        let (start, end) = self.affected_range(circle);
        let smoke = self.smoke_burst(start, end);
        let floor = self.floor();

        for i in start..end {
            let angle = bucket_radians(i);
            let dir = Vec2::new(angle.cos(), angle.sin());
            let index = wrap(i);
            let mut sample = self.samples[index];
            if sample > floor {
                if let Some(hit) = ray_circle(self.center, dir, circle) {
                    if sample >= hit.near {
                        sample = hit.near.max(sample - hit.chord());
                    }
                }
            }
            self.samples[index] = sample.max(floor);
        }
        self.recompute_envelope();
        smoke
    }

    /// Raise terrain by the part of the circle above the current surface.
    pub fn deposit(&mut self, circle: &Circle) {
        let (start, end) = self.affected_range(circle);
        for i in start..end {
            let angle = bucket_radians(i);
            let dir = Vec2::new(angle.cos(), angle.sin());
            let index = wrap(i);
            let sample = self.samples[index];
            if let Some(hit) = ray_circle(self.center, dir, circle) {
                if sample < hit.far {
                    self.samples[index] = sample + (hit.far - hit.near.max(sample));
                }
            }
        }
        self.recompute_envelope();
    }

    /// Gaussian-scaled smoke puffs for buckets `[start, end)`.
    fn smoke_burst(&self, start: isize, end: isize) -> Vec<SmokePuff> {
        let interval = (end - start) as f32;
        (start..end)
            .map(|i| {
                let offset = 0.1 * (i as f32 - start as f32 - interval / 2.0).abs();
                let scale = 3.0 * (-(offset * offset)).exp();
                let position = self.surface_point(i);
                let velocity = (self.center - position).normalize_or_zero() * 10.0 * scale;
                SmokePuff {
                    position,
                    velocity,
                    scale,
                }
            })
            .collect()
    }
}
