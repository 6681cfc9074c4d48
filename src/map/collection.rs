use crate::models::Marker;

use super::surface::PinId;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMarker {
    pub pin: PinId,
    pub marker: Marker,
}

/// Rendered user markers in render order. Grows by appending and is only
/// emptied wholesale, except when a failed save is rolled back.
#[derive(Debug, Default)]
pub struct MarkerCollection {
    entries: Vec<RenderedMarker>,
}

impl MarkerCollection {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedMarker> {
        self.entries.iter()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.entries.iter().map(|entry| &entry.marker)
    }

    pub(crate) fn push(&mut self, pin: PinId, marker: Marker) {
        self.entries.push(RenderedMarker { pin, marker });
    }

    pub(crate) fn remove_pin(&mut self, pin: PinId) -> Option<RenderedMarker> {
        let index = self.entries.iter().position(|entry| entry.pin == pin)?;
        Some(self.entries.remove(index))
    }

    pub(crate) fn take_all(&mut self) -> Vec<RenderedMarker> {
        std::mem::take(&mut self.entries)
    }

    /// Removes and returns the entries matching `take`, keeping the order of
    /// both halves.
    pub(crate) fn take_where(
        &mut self,
        mut take: impl FnMut(&RenderedMarker) -> bool,
    ) -> Vec<RenderedMarker> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| take(entry));
        self.entries = kept;
        taken
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ListLine {
    pin: PinId,
    text: String,
}

/// The visible text list below the map, one line per rendered marker.
#[derive(Debug, Default)]
pub struct MarkerList {
    lines: Vec<ListLine>,
}

impl MarkerList {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    pub(crate) fn push(&mut self, pin: PinId, text: String) {
        self.lines.push(ListLine { pin, text });
    }

    pub(crate) fn remove_pin(&mut self, pin: PinId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.pin != pin);
        self.lines.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LatLng;

    #[test]
    fn remove_pin_keeps_order_of_the_rest() {
        let mut collection = MarkerCollection::default();
        for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
            collection.push(PinId(i as u64), Marker::new(LatLng::new(0.0, 0.0), name));
        }
        let removed = collection.remove_pin(PinId(1)).unwrap();
        assert_eq!(removed.marker.content, "b");
        let left: Vec<_> = collection.markers().map(|m| m.content.as_str()).collect();
        assert_eq!(left, ["a", "c"]);
        assert!(collection.remove_pin(PinId(1)).is_none());
    }

    #[test]
    fn list_removes_only_matching_line() {
        let mut list = MarkerList::default();
        list.push(PinId(1), "one".into());
        list.push(PinId(2), "two".into());
        assert!(list.remove_pin(PinId(1)));
        assert!(!list.remove_pin(PinId(1)));
        assert_eq!(list.lines().collect::<Vec<_>>(), ["two"]);
    }
}
