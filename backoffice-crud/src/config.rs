use std::time::Duration;

/// Fixed debounce applied to remote search input.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Geometry of the row action menu, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuGeometry {
    pub width: f64,
    /// Height of one menu entry; the menu is `item_height × actions` tall.
    pub item_height: f64,
    /// Minimum distance kept from the viewport edges.
    pub margin: f64,
    /// Gap between the trigger and the menu.
    pub gap: f64,
}

impl Default for MenuGeometry {
    fn default() -> Self {
        Self {
            width: 192.0,
            item_height: 40.0,
            margin: 8.0,
            gap: 8.0,
        }
    }
}

/// Simulated round-trip times of the in-memory data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub list: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub search: Duration,
}

impl Latency {
    /// No delay at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            list: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            search: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(500),
            create: Duration::from_millis(1000),
            update: Duration::from_millis(1000),
            delete: Duration::from_millis(500),
            search: Duration::from_millis(300),
        }
    }
}

/// Engine-wide settings that are not part of a page config.
#[derive(Debug, Clone, PartialEq)]
pub struct CrudConfig {
    pub search_debounce: Duration,
    pub menu: MenuGeometry,
    pub latency: Latency,
}

impl Default for CrudConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(SEARCH_DEBOUNCE_MS),
            menu: MenuGeometry::default(),
            latency: Latency::default(),
        }
    }
}
