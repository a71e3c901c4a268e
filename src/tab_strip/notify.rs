//! Attention notifications and the shared blink timer.
//!
//! First notification recolours the label. A second one starts blinking,
//! which runs the strip's single timer; each tick flips every blinking tab's
//! glyph. The timer stops as soon as no tab is blinking.

use super::{NotifyState, TabStrip};
use std::time::Instant;

impl TabStrip {
    /// Raise attention on tab `index`. Unusable tabs ignore notifications.
    pub fn notify(&mut self, index: usize, now: Instant) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if item.unusable {
            return;
        }

        let next = match item.notify {
            NotifyState::Clear => NotifyState::Set,
            NotifyState::Set => NotifyState::SetBlink,
            blinking => blinking,
        };
        if next == item.notify {
            return;
        }
        item.notify = next;
        log::trace!("Tab {} notification state {:?}", index, next);

        self.invalidate_tab(index);
        if next.is_blinking() {
            self.blink.start(now);
        }
    }

    /// Reset tab `index` to no notification.
    pub fn clear_notification(&mut self, index: usize) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if item.notify == NotifyState::Clear {
            return;
        }
        item.notify = NotifyState::Clear;
        self.invalidate_tab(index);
        self.refresh_blink_timer();
    }

    /// Run one timer tick if it is due. Returns whether a tick happened.
    pub fn poll_blink(&mut self, now: Instant) -> bool {
        if !self.blink.fire(now) {
            return false;
        }
        self.blink_tick();
        true
    }

    /// Flip the glyph of every blinking tab.
    pub fn blink_tick(&mut self) {
        let mut flipped = Vec::new();
        for (index, item) in self.items.iter_mut().enumerate() {
            item.notify = match item.notify {
                NotifyState::SetBlink => NotifyState::Blink,
                NotifyState::Blink => NotifyState::SetBlink,
                other => other,
            };
            if item.notify.is_blinking() {
                flipped.push(index);
            }
        }
        for index in flipped {
            let image = self.metrics.image_rect(self.tab_rect(index));
            let glyph = self.metrics.blink_rect(image);
            self.invalidate(glyph);
        }
        self.refresh_blink_timer();
    }

    pub fn blink_timer_running(&self) -> bool {
        self.blink.is_running()
    }

    /// When the host should next call [`TabStrip::poll_blink`].
    pub fn next_blink_deadline(&self) -> Option<Instant> {
        self.blink.next_due()
    }

    pub(crate) fn refresh_blink_timer(&mut self) {
        if !self.items.iter().any(|item| item.notify.is_blinking()) && self.blink.is_running() {
            self.blink.stop();
            log::trace!("Blink timer stopped");
        }
    }
}
