use crate::foundation::core::{Point, SurfaceSize};

/// Kind of input device the banner is shown on.
///
/// On pointer devices the cursor always repels particles; on touch devices only an active touch
/// does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    #[default]
    Pointer,
    Touch,
}

/// Host input delivered to the banner, in surface pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer moved over the surface.
    Move { x: f64, y: f64 },
    /// Pointer left the surface.
    Leave,
    TouchStart,
    /// Primary touch moved; the host should suppress default scrolling.
    TouchMove { x: f64, y: f64 },
    TouchEnd,
    /// The surface's layout box changed size.
    Resize { width: u32, height: u32 },
}

impl InputEvent {
    pub fn resize(surface: SurfaceSize) -> Self {
        Self::Resize {
            width: surface.width,
            height: surface.height,
        }
    }
}

/// Pointer position and touch flag read by every animation tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub is_touching: bool,
    device: DeviceKind,
}

impl PointerState {
    pub fn new(device: DeviceKind) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            is_touching: false,
            device,
        }
    }

    pub fn device(&self) -> DeviceKind {
        self.device
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether the pointer currently repels particles.
    pub fn is_active(&self) -> bool {
        match self.device {
            DeviceKind::Pointer => true,
            DeviceKind::Touch => self.is_touching,
        }
    }

    /// Apply one input event.
    ///
    /// Returns `true` when the host should suppress its default handling (scrolling on touch
    /// move). `Resize` is ignored here; the scene owns surface changes.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Move { x, y } => {
                self.x = x;
                self.y = y;
                false
            }
            InputEvent::Leave => {
                if self.device == DeviceKind::Pointer {
                    self.x = 0.0;
                    self.y = 0.0;
                }
                false
            }
            InputEvent::TouchStart => {
                self.is_touching = true;
                false
            }
            InputEvent::TouchMove { x, y } => {
                self.x = x;
                self.y = y;
                true
            }
            InputEvent::TouchEnd => {
                self.is_touching = false;
                self.x = 0.0;
                self.y = 0.0;
                false
            }
            InputEvent::Resize { .. } => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/pointer.rs"]
mod tests;
