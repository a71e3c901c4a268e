//! In-place tab exchange while a drag is active.
//!
//! The strip only moves its own display data. The session registry follows
//! through the `Reordered` action the window controller consumes.

use super::{DragState, TabStrip, TabStripAction};
use egui::Pos2;

impl TabStrip {
    /// Hit-test the dragged pointer and move the dragged tab under it.
    pub(crate) fn drag_over(&mut self, pos: Pos2) -> Option<TabStripAction> {
        let DragState::Dragging {
            dragged,
            last_swapped,
        } = self.drag
        else {
            return None;
        };

        let target = match self.tab_at(pos) {
            Some(target) if target != dragged => target,
            _ => {
                self.drag = DragState::Dragging {
                    dragged,
                    last_swapped: None,
                };
                return None;
            }
        };

        // Tabs of unequal width can leave the pointer over the tab just swapped
        if last_swapped == Some(target) {
            return None;
        }

        self.exchange_tabs(dragged, target);
        self.drag = DragState::Dragging {
            dragged: target,
            last_swapped: Some(dragged),
        };
        Some(TabStripAction::Reordered {
            from: dragged,
            to: target,
        })
    }

    /// Move tab `from` to `to`, shifting the tabs between by one, and select it.
    pub fn exchange_tabs(&mut self, from: usize, to: usize) {
        assert!(
            from < self.items.len() && to < self.items.len(),
            "tab exchange {from} -> {to} out of range (len {})",
            self.items.len()
        );
        if from == to {
            return;
        }
        if from < to {
            self.items[from..=to].rotate_left(1);
        } else {
            self.items[to..=from].rotate_right(1);
        }
        for i in from.min(to)..=from.max(to) {
            self.invalidate_tab(i);
        }
        self.selected = Some(to);
        log::debug!("Tab moved from {} to {}", from, to);
    }
}
