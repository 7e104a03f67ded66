//! Row action menu: viewport-aware placement and open/closed state.

use backoffice_model::RecordId;

use crate::config::MenuGeometry;

/// Axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Where the menu ends up and which way it flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPlacement {
    pub left: f64,
    pub top: f64,
    pub opens_left: bool,
    pub opens_up: bool,
}

/// Size of a menu listing `actions` entries.
pub fn menu_size(geometry: &MenuGeometry, actions: usize) -> Size {
    Size::new(geometry.width, geometry.item_height * actions as f64)
}

/// Places a menu of `menu` size next to `anchor` inside `viewport`.
///
/// The menu opens below the anchor, aligned to its left edge; it flips
/// left when there is not enough room on the right, and up when there is not
/// enough room below but enough above. The result is then kept `margin` away
/// from every viewport edge.
pub fn place_menu(
    anchor: Rect,
    viewport: Size,
    menu: Size,
    geometry: &MenuGeometry,
) -> MenuPlacement {
    let space_right = viewport.width - anchor.right();
    let space_below = viewport.height - anchor.bottom();
    let space_above = anchor.top;

    let opens_left = space_right < menu.width;
    let left = if opens_left {
        anchor.left - menu.width + anchor.width
    } else {
        anchor.left
    };

    let opens_up = space_below < menu.height && space_above > menu.height;
    let top = if opens_up {
        anchor.top - menu.height - geometry.gap
    } else {
        anchor.bottom() + geometry.gap
    };

    // min before max: a viewport smaller than the menu pins it to the margin.
    let left = left
        .min(viewport.width - menu.width - geometry.margin)
        .max(geometry.margin);
    let top = top
        .min(viewport.height - menu.height - geometry.margin)
        .max(geometry.margin);

    MenuPlacement {
        left,
        top,
        opens_left,
        opens_up,
    }
}

/// Open/closed state of the single row action menu.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open {
        row: RecordId,
        anchor: Rect,
        placement: MenuPlacement,
    },
}

/// The row action menu. At most one row's menu is open at a time.
#[derive(Debug, Clone)]
pub struct ActionMenu {
    geometry: MenuGeometry,
    actions: usize,
    state: MenuState,
}

impl ActionMenu {
    pub fn new(geometry: MenuGeometry, actions: usize) -> Self {
        Self {
            geometry,
            actions,
            state: MenuState::Closed,
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open { .. })
    }

    /// Row whose menu is open.
    pub fn open_row(&self) -> Option<&RecordId> {
        match &self.state {
            MenuState::Open { row, .. } => Some(row),
            MenuState::Closed => None,
        }
    }

    /// Trigger click: opens the row's menu, or closes it if it is already open.
    pub fn toggle(&mut self, row: RecordId, anchor: Rect, viewport: Size) {
        if self.open_row() == Some(&row) {
            self.state = MenuState::Closed;
            return;
        }
        let placement = self.place(anchor, viewport);
        self.state = MenuState::Open {
            row,
            anchor,
            placement,
        };
    }

    /// Scroll or resize. Repositions against the trigger's new box when it is
    /// known, otherwise closes.
    pub fn reposition(&mut self, anchor: Option<Rect>, viewport: Size) {
        let MenuState::Open { row, .. } = &self.state else {
            return;
        };
        match anchor {
            Some(anchor) => {
                let placement = self.place(anchor, viewport);
                self.state = MenuState::Open {
                    row: row.clone(),
                    anchor,
                    placement,
                };
            }
            None => self.state = MenuState::Closed,
        }
    }

    pub fn close(&mut self) {
        self.state = MenuState::Closed;
    }

    /// Closes the menu and hands back the row it was open for.
    pub fn take(&mut self) -> Option<RecordId> {
        match std::mem::take(&mut self.state) {
            MenuState::Open { row, .. } => Some(row),
            MenuState::Closed => None,
        }
    }

    fn place(&self, anchor: Rect, viewport: Size) -> MenuPlacement {
        place_menu(
            anchor,
            viewport,
            menu_size(&self.geometry, self.actions),
            &self.geometry,
        )
    }
}
