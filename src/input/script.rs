use std::collections::BTreeMap;
use std::path::Path;

use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{BannerError, BannerResult};
use crate::input::pointer::InputEvent;

/// One scripted event, delivered just before the given tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedEvent {
    pub tick: u64,
    pub event: InputEvent,
}

/// A timeline of input events replayed by the animation loop.
///
/// JSON form: `{ "events": [ { "tick": 0, "event": { "type": "move", "x": 10, "y": 20 } } ] }`.
/// Events sharing a tick are delivered in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventScript {
    by_tick: BTreeMap<u64, Vec<InputEvent>>,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct EventScriptRepr {
    events: Vec<ScriptedEvent>,
}

impl serde::Serialize for EventScript {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        EventScriptRepr {
            events: self.iter().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for EventScript {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = EventScriptRepr::deserialize(deserializer)?;
        let mut out = EventScript::new();
        for e in repr.events {
            out.push(e.tick, e.event);
        }
        Ok(out)
    }
}

impl EventScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> BannerResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> BannerResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            BannerError::validation(format!(
                "failed to read event script '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&s)
    }

    pub fn push(&mut self, tick: u64, event: InputEvent) {
        self.by_tick.entry(tick).or_default().push(event);
    }

    pub fn events_at(&self, tick: u64) -> &[InputEvent] {
        self.by_tick.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_tick.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_tick.values().map(Vec::len).sum()
    }

    /// Last tick that carries an event.
    pub fn last_tick(&self) -> Option<u64> {
        self.by_tick.keys().next_back().copied()
    }

    /// `true` when any event resizes the surface.
    pub fn has_resize(&self) -> bool {
        self.by_tick
            .values()
            .flatten()
            .any(|e| matches!(e, InputEvent::Resize { .. }))
    }

    pub fn iter(&self) -> impl Iterator<Item = ScriptedEvent> + '_ {
        self.by_tick.iter().flat_map(|(&tick, evs)| {
            evs.iter().map(move |&event| ScriptedEvent { tick, event })
        })
    }

    /// Demo timeline that fits in `ticks` frames: the pointer sweeps left to right across the
    /// vertical center of `surface` on every tick but the last, and leaves on the last one.
    pub fn horizontal_sweep(surface: SurfaceSize, ticks: u64) -> Self {
        let mut out = Self::new();
        if ticks == 0 || surface.is_empty() {
            return out;
        }
        let last = ticks - 1;
        let y = f64::from(surface.height) / 2.0;
        let w = f64::from(surface.width);
        for t in 0..last {
            let x = if last == 1 {
                w / 2.0
            } else {
                w * (t as f64) / ((last - 1) as f64)
            };
            out.push(t, InputEvent::Move { x, y });
        }
        out.push(last, InputEvent::Leave);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/script.rs"]
mod tests;
