//! Tab strip controller.
//!
//! Owns the per-tab display data and the pointer interaction state machine.
//! The strip never touches sessions: every user intent leaves as a
//! [`TabStripAction`] for the window controller to apply.
//!
//! ## Module layout
//!
//! - [`layout`]: DPI-scaled metrics, tab/close/image rectangles, hit testing.
//! - [`state`]: `TabItem`, notification, hover, drag and blink timer state.
//! - `pointer`: press, move, release, leave and capture-loss handling.
//! - `drag_drop`: in-place tab exchange while dragging.
//! - `notify`: attention notifications and the shared blink timer.
//! - [`tab_rendering`]: deterministic per-tab visuals.

pub mod layout;
mod drag_drop;
mod notify;
mod pointer;
pub mod state;
pub mod tab_rendering;

pub use layout::TabMetrics;
pub use state::{BlinkTimer, DragState, HoverState, NotifyState, TabItem};
pub use tab_rendering::{CloseButtonLook, TabDrawInput, TabVisual};

use crate::config::TabStripConfig;
use crate::geometry::Dpi;
use egui::{Pos2, Rect};
use std::time::Duration;

/// Intents raised by pointer interaction with the strip.
#[derive(Debug, Clone, PartialEq)]
pub enum TabStripAction {
    /// The user selected a different tab
    SelectionChanged(usize),
    /// The close button of a tab was clicked
    CloseRequested(usize),
    /// A dragged tab moved from `from` to `to`; entries in between shifted by one
    Reordered { from: usize, to: usize },
    /// Secondary click released over a tab
    ContextMenuRequested { index: usize, position: Pos2 },
}

pub struct TabStrip {
    pub(crate) items: Vec<TabItem>,
    pub(crate) selected: Option<usize>,
    pub(crate) metrics: TabMetrics,
    pub(crate) origin: Pos2,
    pub(crate) config: TabStripConfig,
    pub(crate) hover: HoverState,
    /// Tab whose close button is held down
    pub(crate) close_pressed: Option<usize>,
    pub(crate) drag: DragState,
    /// Pointer captured for an active drag
    pub(crate) captured: bool,
    pub(crate) blink: BlinkTimer,
    /// Rectangles needing a repaint since the last `take_damage`
    pub(crate) damage: Vec<Rect>,
}

impl TabStrip {
    pub fn new(config: &TabStripConfig, dpi: Dpi) -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            metrics: TabMetrics::new(dpi, config),
            origin: Pos2::ZERO,
            config: config.clone(),
            hover: HoverState::default(),
            close_pressed: None,
            drag: DragState::Idle,
            captured: false,
            blink: BlinkTimer::new(Duration::from_millis(config.blink_interval_ms)),
            damage: Vec::new(),
        }
    }

    /// Re-measure every metric for a new DPI.
    pub fn set_dpi(&mut self, dpi: Dpi) {
        self.metrics = TabMetrics::new(dpi, &self.config);
        self.hover = HoverState::default();
        self.invalidate_all();
        log::debug!("Tab strip re-measured for {}x{} DPI", dpi.x, dpi.y);
    }

    pub fn set_origin(&mut self, origin: Pos2) {
        self.origin = origin;
        self.invalidate_all();
    }

    pub fn metrics(&self) -> &TabMetrics {
        &self.metrics
    }

    /// Vertical chrome the strip adds to the window client area.
    pub fn extra_height(&self) -> u32 {
        self.metrics.extra_height()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&TabItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[TabItem] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn close_pressed(&self) -> Option<usize> {
        self.close_pressed
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn has_capture(&self) -> bool {
        self.captured
    }

    pub fn tab_rect(&self, index: usize) -> Rect {
        self.metrics.tab_rect(self.origin, index)
    }

    pub fn close_button_rect(&self, index: usize) -> Rect {
        self.metrics.close_button_rect(self.tab_rect(index))
    }

    pub fn tab_at(&self, pos: Pos2) -> Option<usize> {
        self.metrics.hit_test(self.origin, self.items.len(), pos)
    }

    /// Insert a tab; a selection at or after `index` moves right with its tab.
    pub fn insert_tab(&mut self, index: usize, item: TabItem) {
        assert!(
            index <= self.items.len(),
            "tab insert index {index} out of range (len {})",
            self.items.len()
        );
        self.items.insert(index, item);
        if let Some(selected) = self.selected
            && selected >= index
        {
            self.selected = Some(selected + 1);
        }
        self.reset_pointer_state();
        self.invalidate_from(index);
    }

    /// Remove a tab. Removing the selected tab leaves nothing selected.
    pub fn remove_tab(&mut self, index: usize) -> TabItem {
        assert!(
            index < self.items.len(),
            "tab remove index {index} out of range (len {})",
            self.items.len()
        );
        self.invalidate_from(index);
        let item = self.items.remove(index);
        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        self.reset_pointer_state();
        self.refresh_blink_timer();
        item
    }

    /// Select a tab without raising `SelectionChanged`.
    pub fn select(&mut self, index: usize) {
        assert!(
            index < self.items.len(),
            "tab select index {index} out of range (len {})",
            self.items.len()
        );
        if self.selected == Some(index) {
            return;
        }
        if let Some(old) = self.selected {
            self.invalidate_tab(old);
        }
        self.selected = Some(index);
        self.invalidate_tab(index);
    }

    pub fn set_label(&mut self, index: usize, label: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            item.label = label.into();
            self.invalidate_tab(index);
        }
    }

    /// Mark a tab inert (remote closed) or usable again. Clears its notification.
    pub fn set_unusable(&mut self, index: usize, unusable: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.unusable = unusable;
            item.notify = NotifyState::Clear;
            self.invalidate_tab(index);
            self.refresh_blink_timer();
        }
    }

    /// Rectangles to repaint since the last call.
    pub fn take_damage(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.damage)
    }

    /// Drop any press, hover or drag in progress without raising actions.
    pub fn cancel_interaction(&mut self) {
        if self.is_dragging() {
            log::debug!("Tab drag cancelled");
        }
        self.reset_pointer_state();
    }

    fn reset_pointer_state(&mut self) {
        self.clear_hover();
        if let Some(pressed) = self.close_pressed.take()
            && pressed < self.items.len()
        {
            let rect = self.close_button_rect(pressed);
            self.invalidate(rect);
        }
        self.drag = DragState::Idle;
        self.captured = false;
    }

    pub(crate) fn invalidate(&mut self, rect: Rect) {
        if rect.is_positive() && !self.damage.contains(&rect) {
            self.damage.push(rect);
        }
    }

    pub(crate) fn invalidate_tab(&mut self, index: usize) {
        let rect = self.tab_rect(index).expand2(egui::vec2(self.metrics.edge, self.metrics.edge));
        self.invalidate(rect);
    }

    fn invalidate_from(&mut self, index: usize) {
        for i in index..self.items.len() {
            self.invalidate_tab(i);
        }
    }

    fn invalidate_all(&mut self) {
        self.invalidate_from(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_with(labels: &[&str]) -> TabStrip {
        let mut strip = TabStrip::new(&TabStripConfig::default(), Dpi::default());
        for (i, label) in labels.iter().enumerate() {
            strip.insert_tab(i, TabItem::new(*label, 0, i as u64 + 1));
        }
        strip
    }

    #[test]
    fn test_insert_before_selection_shifts_it() {
        let mut strip = strip_with(&["a", "b"]);
        strip.select(1);
        strip.insert_tab(0, TabItem::new("c", 0, 3));
        assert_eq!(strip.selected(), Some(2));
        assert_eq!(strip.items()[2].label, "b");
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let mut strip = strip_with(&["a", "b", "c"]);
        strip.select(1);
        strip.remove_tab(1);
        assert_eq!(strip.selected(), None);

        strip.select(1);
        strip.remove_tab(0);
        assert_eq!(strip.selected(), Some(0));
    }

    #[test]
    fn test_select_damages_old_and_new() {
        let mut strip = strip_with(&["a", "b"]);
        strip.select(0);
        strip.take_damage();
        strip.select(1);
        assert_eq!(strip.take_damage().len(), 2);
        strip.select(1);
        assert!(strip.take_damage().is_empty());
    }

    #[test]
    fn test_extra_height_includes_edge() {
        let strip = strip_with(&[]);
        assert_eq!(strip.extra_height(), 26);
    }
}
