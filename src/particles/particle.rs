use crate::foundation::core::{Point, Rgba8};

/// The label line a particle was sampled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Heading or closing line (the smaller title-sized lines).
    Title,
    /// First emphasis line.
    Shadow,
    /// Second emphasis line.
    Apocalypse,
}

/// A single animated point seeded from the text mask.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Current position.
    pub x: f64,
    pub y: f64,
    /// Rest position (the sampled mask pixel).
    pub base_x: f64,
    pub base_y: f64,
    /// Edge length of the square dot.
    pub size: f64,
    /// Color while settling toward the rest position.
    pub color: Rgba8,
    /// Color while pushed away by the pointer.
    pub scattered_color: Rgba8,
    pub category: Category,
    /// Remaining ticks; the particle is replaced once this reaches zero.
    pub life: f64,
}

impl Particle {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn base(&self) -> Point {
        Point::new(self.base_x, self.base_y)
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}

/// One square drawn by a tick, in sweep order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: Rgba8,
}
