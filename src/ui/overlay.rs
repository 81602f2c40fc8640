/// Dropdown-style overlays of the list toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayId {
    DateRange,
    PageSize,
}

/// The single open overlay, if any.
///
/// The app renders its dismiss layer (outside click and Escape handlers)
/// only while `open` is set, so the handlers come and go with the overlay
/// and switching overlays never stacks a second one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    open: Option<OverlayId>,
}

impl OverlayState {
    pub fn is_open(&self, id: OverlayId) -> bool {
        self.open == Some(id)
    }

    pub fn current(&self) -> Option<OverlayId> {
        self.open
    }

    /// Whether the dismiss layer should be mounted.
    pub fn any_open(&self) -> bool {
        self.open.is_some()
    }

    /// Replaces whatever overlay was open.
    pub fn open(&mut self, id: OverlayId) {
        self.open = Some(id);
    }

    pub fn toggle(&mut self, id: OverlayId) {
        if self.is_open(id) {
            self.dismiss();
        } else {
            self.open(id);
        }
    }

    /// Outside click or Escape. Returns whether something was closed.
    pub fn dismiss(&mut self) -> bool {
        self.open.take().is_some()
    }
}
