use std::collections::BTreeMap;

use crate::models::LatLng;

/// Handle for a pin placed on a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinStyle {
    /// Read-only premade pin.
    Landmark,
    /// A persisted user marker.
    User,
    /// The single pin of a live edit session.
    Editing,
}

/// The pin layer of a map widget.
///
/// Implementations own the drawing; the [`MapView`](super::MapView) owns the
/// bookkeeping of which pin means what.
pub trait MapSurface {
    fn set_viewport(&mut self, center: LatLng, zoom: u8);
    fn add_pin(&mut self, position: LatLng, style: PinStyle) -> PinId;
    /// Returns `false` when the pin was not on the surface.
    fn remove_pin(&mut self, pin: PinId) -> bool;
    /// Text shown in the info bubble when the pin is clicked.
    fn attach_info(&mut self, pin: PinId, content: &str);
    /// Opens the text box and submit control anchored at `pin`.
    fn open_input(&mut self, pin: PinId);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub position: LatLng,
    pub style: PinStyle,
    pub info: Option<String>,
}

/// A surface that only remembers what was drawn. Used by the CLI, the GUI's
/// canvas and the tests.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_id: u64,
    pins: BTreeMap<PinId, Pin>,
    viewport: Option<(LatLng, u8)>,
    input_at: Option<PinId>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pins(&self) -> impl Iterator<Item = (PinId, &Pin)> {
        self.pins.iter().map(|(id, pin)| (*id, pin))
    }

    pub fn pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.get(&id)
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn count_style(&self, style: PinStyle) -> usize {
        self.pins.values().filter(|pin| pin.style == style).count()
    }

    pub fn landmark_count(&self) -> usize {
        self.count_style(PinStyle::Landmark)
    }

    pub fn viewport(&self) -> Option<(LatLng, u8)> {
        self.viewport
    }

    /// The pin whose input box is open, if that pin is still on the map.
    pub fn open_input_pin(&self) -> Option<PinId> {
        self.input_at.filter(|id| self.pins.contains_key(id))
    }

    /// What clicking the pin would show.
    pub fn click_pin(&self, id: PinId) -> Option<&str> {
        self.pins.get(&id)?.info.as_deref()
    }
}

impl MapSurface for HeadlessSurface {
    fn set_viewport(&mut self, center: LatLng, zoom: u8) {
        self.viewport = Some((center, zoom));
    }

    fn add_pin(&mut self, position: LatLng, style: PinStyle) -> PinId {
        self.next_id += 1;
        let id = PinId(self.next_id);
        self.pins.insert(
            id,
            Pin {
                position,
                style,
                info: None,
            },
        );
        id
    }

    fn remove_pin(&mut self, pin: PinId) -> bool {
        if self.input_at == Some(pin) {
            self.input_at = None;
        }
        self.pins.remove(&pin).is_some()
    }

    fn attach_info(&mut self, pin: PinId, content: &str) {
        if let Some(p) = self.pins.get_mut(&pin) {
            p.info = Some(content.to_string());
        }
    }

    fn open_input(&mut self, pin: PinId) {
        self.input_at = Some(pin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_get_fresh_ids() {
        let mut surface = HeadlessSurface::new();
        let a = surface.add_pin(LatLng::new(0.0, 0.0), PinStyle::User);
        let b = surface.add_pin(LatLng::new(1.0, 1.0), PinStyle::User);
        assert_ne!(a, b);
        assert!(surface.remove_pin(a));
        assert!(!surface.remove_pin(a));
        let c = surface.add_pin(LatLng::new(2.0, 2.0), PinStyle::Editing);
        assert_ne!(a, c);
        assert_eq!(surface.pin_count(), 2);
    }

    #[test]
    fn removing_input_pin_closes_input() {
        let mut surface = HeadlessSurface::new();
        let pin = surface.add_pin(LatLng::new(0.0, 0.0), PinStyle::Editing);
        surface.open_input(pin);
        assert_eq!(surface.open_input_pin(), Some(pin));
        surface.remove_pin(pin);
        assert_eq!(surface.open_input_pin(), None);
    }
}
