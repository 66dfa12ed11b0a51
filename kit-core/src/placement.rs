// Where a decal sits on the garment. Depth sign picks the face.

use serde::{Deserialize, Serialize};

/// Distance from the garment center to the printable surface, front or back.
pub const SURFACE_DEPTH: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    /// Negative depth is the back face; zero and positive are the front.
    pub fn of_depth(z: f32) -> Side {
        if z < 0.0 {
            Side::Back
        } else {
            Side::Front
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }

    pub fn depth(self) -> f32 {
        match self {
            Side::Front => SURFACE_DEPTH,
            Side::Back => -SURFACE_DEPTH,
        }
    }
}

/// Position plus uniform scale of one decal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub scale: f32,
}

impl Placement {
    pub const fn new(x: f32, y: f32, z: f32, scale: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            scale,
        }
    }

    pub fn side(&self) -> Side {
        Side::of_depth(self.position.z)
    }

    /// Same x/y/scale, moved onto the surface of `side`.
    pub fn on_side(mut self, side: Side) -> Self {
        self.position.z = side.depth();
        self
    }

    pub fn flipped(self) -> Self {
        self.on_side(self.side().opposite())
    }
}
