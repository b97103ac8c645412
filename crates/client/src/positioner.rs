//! Dropdown placement and keyboard navigation for searchable selects.
//!
//! The popup is positioned in viewport coordinates from the trigger's
//! rectangle, flipping above the trigger when there is not enough room
//! below. All of the geometry here is pure arithmetic so it can be tested
//! without a rendering surface.

/// Height of one option row, in pixels.
pub const ROW_HEIGHT: f64 = 36.0;

/// Gap between the trigger edge and the popup, and the minimum distance the
/// popup keeps from every viewport edge.
pub const EDGE_MARGIN: f64 = 6.0;

/// Preferred space below the trigger before flipping above.
pub const FLIP_THRESHOLD: f64 = 200.0;

/// Default number of option rows visible before the list scrolls.
pub const DEFAULT_MAX_VISIBLE_ROWS: usize = 8;

/// An axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Computed popup placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    /// Popup matches the trigger's width as a minimum.
    pub min_width: f64,
    pub max_height: f64,
    pub open_below: bool,
}

/// Place the popup relative to `trigger` within a `viewport_width` x
/// `viewport_height` viewport.
///
/// The popup opens below when the space below fits the popup (or at least
/// [`FLIP_THRESHOLD`]) or when below simply has more room than above; it
/// flips above otherwise. Its height is capped both by `max_visible_rows`
/// and by the larger of the two available spaces, and its final position is
/// clamped so it never sits closer than [`EDGE_MARGIN`] to the top or left
/// viewport edge.
pub fn place_dropdown(
    trigger: Rect,
    viewport_width: f64,
    viewport_height: f64,
    max_visible_rows: usize,
) -> Placement {
    let space_below = viewport_height - trigger.bottom();
    let space_above = trigger.top;

    let rows_height = (max_visible_rows as f64 + 0.5) * ROW_HEIGHT;
    let fit_height = (space_below.max(space_above) - 40.0).floor().max(120.0);
    let max_height = rows_height.min(fit_height);

    let open_below =
        space_below >= FLIP_THRESHOLD.min(max_height) || space_below >= space_above;

    let top = if open_below {
        trigger.bottom() + EDGE_MARGIN
    } else {
        trigger.top - EDGE_MARGIN - max_height
    };

    let left = trigger
        .left
        .min(viewport_width - trigger.width - EDGE_MARGIN);

    Placement {
        left: left.max(EDGE_MARGIN),
        top: top.max(EDGE_MARGIN),
        min_width: trigger.width,
        max_height,
        open_below,
    }
}

/// A selectable option row.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption<V> {
    pub value: V,
    pub label: String,
    pub disabled: bool,
}

/// What a keyboard or pointer event did to the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent<V> {
    /// Nothing observable changed.
    None,
    /// The popup opened.
    Opened,
    /// The popup closed without a selection.
    Closed,
    /// An enabled option was committed and the popup closed.
    Committed(V),
}

/// Keys the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Open/closed state plus the keyboard highlight.
///
/// The highlight starts unset when the popup opens; ArrowDown seeds it at
/// the first enabled option and ArrowUp at the last, and both wrap around,
/// skipping disabled rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownState {
    pub open: bool,
    pub highlighted: Option<usize>,
}

impl Default for DropdownState {
    fn default() -> Self {
        Self::new()
    }
}

impl DropdownState {
    pub fn new() -> Self {
        Self {
            open: false,
            highlighted: None,
        }
    }

    /// Pointer activation of the trigger toggles the popup.
    pub fn toggle<V: Clone>(&mut self, _options: &[SelectOption<V>]) -> DropdownEvent<V> {
        if self.open {
            self.close();
            DropdownEvent::Closed
        } else {
            self.open = true;
            self.highlighted = None;
            DropdownEvent::Opened
        }
    }

    /// Pointer selection of a row. Disabled rows are inert.
    pub fn select<V: Clone>(&mut self, options: &[SelectOption<V>], index: usize) -> DropdownEvent<V> {
        match options.get(index) {
            Some(option) if !option.disabled => {
                self.close();
                DropdownEvent::Committed(option.value.clone())
            }
            _ => DropdownEvent::None,
        }
    }

    /// A pointer press outside both the trigger and the popup closes the
    /// popup; inside either, it does not.
    pub fn pointer_down_at<V: Clone>(
        &mut self,
        trigger: Rect,
        popup: Rect,
        x: f64,
        y: f64,
    ) -> DropdownEvent<V> {
        if !self.open || trigger.contains(x, y) || popup.contains(x, y) {
            return DropdownEvent::None;
        }
        self.close();
        DropdownEvent::Closed
    }

    pub fn key_down<V: Clone>(&mut self, options: &[SelectOption<V>], key: Key) -> DropdownEvent<V> {
        if !self.open {
            return match key {
                Key::ArrowDown | Key::ArrowUp | Key::Enter => {
                    self.open = true;
                    self.highlighted = None;
                    DropdownEvent::Opened
                }
                Key::Escape => DropdownEvent::None,
            };
        }

        match key {
            Key::ArrowDown => {
                self.highlighted = next_enabled(options, self.highlighted, 1);
                DropdownEvent::None
            }
            Key::ArrowUp => {
                self.highlighted = next_enabled(options, self.highlighted, -1);
                DropdownEvent::None
            }
            Key::Enter => match self.highlighted {
                Some(index) => self.select(options, index),
                None => DropdownEvent::None,
            },
            Key::Escape => {
                self.close();
                DropdownEvent::Closed
            }
        }
    }

    fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }
}

/// Step the highlight by `direction`, wrapping around and skipping disabled
/// rows. With no current highlight, ArrowDown lands on the first enabled
/// option and ArrowUp on the last.
fn next_enabled<V>(
    options: &[SelectOption<V>],
    current: Option<usize>,
    direction: i64,
) -> Option<usize> {
    let len = options.len() as i64;
    if len == 0 || options.iter().all(|o| o.disabled) {
        return None;
    }
    let start = match current {
        Some(index) => index as i64,
        None if direction > 0 => -1,
        None => len,
    };
    let mut index = start;
    for _ in 0..len {
        index = (index + direction).rem_euclid(len);
        if !options[index as usize].disabled {
            return Some(index as usize);
        }
    }
    None
}
