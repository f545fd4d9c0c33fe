//! Static scenery geometry queries
//!
//! The simulation's only geometry dependency is a single operation:
//! cast a ray straight down against the static scenery and report the
//! nearest hit. The default scenery is the arena floor plus a few raised
//! platforms; hosts embedding the core can swap in their own layout.

use bevy::prelude::*;

use super::constants::{ARENA_SIZE, GROUND_RAY_LENGTH};

/// Result of a downward ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the surface.
    pub distance: f32,
    /// The surface point that was hit.
    pub point: Vec3,
}

/// An axis-aligned walkable block. Only the top face matters for the
/// downward ray.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub min: Vec2,
    pub max: Vec2,
    pub top: f32,
}

impl Platform {
    fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.y && z <= self.max.y
    }
}

/// Static walkable geometry for the arena.
#[derive(Resource)]
pub struct Scenery {
    /// Height of the arena floor, covering `±ARENA_SIZE/2` on both axes.
    /// `None` disables the floor (used to exercise the ray-miss fallback).
    pub floor_height: Option<f32>,
    pub platforms: Vec<Platform>,
}

impl Default for Scenery {
    fn default() -> Self {
        Self {
            floor_height: Some(0.0),
            platforms: vec![
                Platform {
                    min: Vec2::new(-14.0, -14.0),
                    max: Vec2::new(-8.0, -8.0),
                    top: 1.5,
                },
                Platform {
                    min: Vec2::new(8.0, 8.0),
                    max: Vec2::new(14.0, 14.0),
                    top: 2.5,
                },
            ],
        }
    }
}

impl Scenery {
    /// Empty scenery: every ray misses.
    pub fn empty() -> Self {
        Self {
            floor_height: None,
            platforms: Vec::new(),
        }
    }

    /// Cast a ray straight down from `origin`, at most `max_length`
    /// units, against the floor and platform tops. Returns the nearest
    /// hit. Surfaces above the origin are never hit.
    pub fn raycast_down(&self, origin: Vec3, max_length: f32) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;

        let mut consider = |surface_y: f32| {
            let distance = origin.y - surface_y;
            if distance < 0.0 || distance > max_length {
                return;
            }
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(RayHit {
                    distance,
                    point: Vec3::new(origin.x, surface_y, origin.z),
                });
            }
        };

        if let Some(floor) = self.floor_height {
            let half = ARENA_SIZE / 2.0;
            if origin.x.abs() <= half && origin.z.abs() <= half {
                consider(floor);
            }
        }
        for platform in &self.platforms {
            if platform.contains(origin.x, origin.z) {
                consider(platform.top);
            }
        }

        nearest
    }

    /// Convenience wrapper using the standard ground-detection length.
    pub fn ground_hit(&self, feet: Vec3) -> Option<RayHit> {
        self.raycast_down(feet, GROUND_RAY_LENGTH)
    }
}
