use std::ops::Add;

use geo::{coord, Coord, CoordsIter, Rect};
use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;

/// An axis-aligned extent `(minx, miny, maxx, maxy)` that grows as coordinates are added.
///
/// A fresh `BoundingRect` is empty: its minimums are `+∞` and its maximums `-∞`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    minx: f64,
    miny: f64,
    maxx: f64,
    maxy: f64,
}

impl BoundingRect {
    /// New
    pub fn new() -> Self {
        BoundingRect {
            minx: f64::INFINITY,
            miny: f64::INFINITY,
            maxx: -f64::INFINITY,
            maxy: -f64::INFINITY,
        }
    }

    pub fn minx(&self) -> f64 {
        self.minx
    }

    pub fn miny(&self) -> f64 {
        self.miny
    }

    pub fn maxx(&self) -> f64 {
        self.maxx
    }

    pub fn maxy(&self) -> f64 {
        self.maxy
    }

    /// `true` until at least one coordinate has been added.
    pub fn is_empty(&self) -> bool {
        self.minx > self.maxx || self.miny > self.maxy
    }

    pub fn add_coord(&mut self, coord: Coord) {
        if coord.x < self.minx {
            self.minx = coord.x;
        }
        if coord.y < self.miny {
            self.miny = coord.y;
        }
        if coord.x > self.maxx {
            self.maxx = coord.x;
        }
        if coord.y > self.maxy {
            self.maxy = coord.y;
        }
    }

    pub fn add_geometry(&mut self, geometry: &Geometry) {
        for coord in geometry.coords_iter() {
            self.add_coord(coord);
        }
    }

    /// Bounds of a single geometry, or `None` if it has no coordinates.
    pub fn from_geometry(geometry: &Geometry) -> Option<Self> {
        let mut rect = Self::new();
        rect.add_geometry(geometry);
        (!rect.is_empty()).then_some(rect)
    }
}

impl Default for BoundingRect {
    fn default() -> Self {
        Self::new()
    }
}

impl Add for BoundingRect {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        BoundingRect {
            minx: self.minx.min(rhs.minx),
            miny: self.miny.min(rhs.miny),
            maxx: self.maxx.max(rhs.maxx),
            maxy: self.maxy.max(rhs.maxy),
        }
    }
}

impl From<Rect> for BoundingRect {
    fn from(value: Rect) -> Self {
        BoundingRect {
            minx: value.min().x,
            miny: value.min().y,
            maxx: value.max().x,
            maxy: value.max().y,
        }
    }
}

impl From<BoundingRect> for Rect {
    fn from(value: BoundingRect) -> Self {
        let min_coord = coord! { x: value.minx, y: value.miny };
        let max_coord = coord! { x: value.maxx, y: value.maxy };
        Rect::new(min_coord, max_coord)
    }
}

impl From<BoundingRect> for [f64; 4] {
    fn from(value: BoundingRect) -> Self {
        [value.minx, value.miny, value.maxx, value.maxy]
    }
}
