// Process-wide suppression of ambient page scrolling over wheel regions.
//
// Every wheel holds one `ScrollLock` for its lifetime. The app asks
// `intercepts` before applying a mouse-wheel scroll to the page; a point
// inside any registered region is swallowed.

use parking_lot::{const_mutex, Mutex};
use ratatui::layout::Rect;

struct Region {
    id: u64,
    bounds: Option<Rect>,
}

struct Registry {
    next_id: u64,
    regions: Vec<Region>,
}

static REGISTRY: Mutex<Registry> = const_mutex(Registry {
    next_id: 0,
    regions: Vec::new(),
});

/// Registration of one wheel region. Released on drop.
#[derive(Debug)]
pub struct ScrollLock {
    id: u64,
}

impl ScrollLock {
    pub fn acquire() -> Self {
        let mut registry = REGISTRY.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.regions.push(Region { id, bounds: None });
        log::trace!("scroll lock {} acquired", id);
        Self { id }
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.update(Some(bounds));
    }

    pub fn clear_bounds(&self) {
        self.update(None);
    }

    fn update(&self, bounds: Option<Rect>) {
        let mut registry = REGISTRY.lock();
        if let Some(region) = registry.regions.iter_mut().find(|r| r.id == self.id) {
            region.bounds = bounds;
        }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        REGISTRY.lock().regions.retain(|r| r.id != self.id);
        log::trace!("scroll lock {} released", self.id);
    }
}

pub fn intercepts(column: u16, row: u16) -> bool {
    REGISTRY.lock().regions.iter().any(|region| {
        region
            .bounds
            .map(|b| contains(b, column, row))
            .unwrap_or(false)
    })
}

pub fn active_count() -> usize {
    REGISTRY.lock().regions.len()
}

pub(crate) fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
fn is_registered(id: u64) -> bool {
    REGISTRY.lock().regions.iter().any(|r| r.id == id)
}
