//! Push button debouncing and press classification
//!
//! The button is sampled periodically. A level has to be stable for the
//! debounce time before it counts. A press released before the long-press
//! time is a click. Holding past it reports a long press once, while the
//! button is still down, and the release that follows is swallowed.

use dealerbot_core::config::ButtonConfig;
use dealerbot_core::input::InputEvent;

/// Classified button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Short press, reported on release
    Click,
    /// Held past the long-press time
    LongPress,
}

impl From<ButtonEvent> for InputEvent {
    fn from(event: ButtonEvent) -> Self {
        match event {
            ButtonEvent::Click => InputEvent::Click,
            ButtonEvent::LongPress => InputEvent::LongPress,
        }
    }
}

/// Button debouncer
#[derive(Debug, Clone)]
pub struct ButtonDebouncer {
    debounce_ms: u32,
    long_press_ms: u32,
    /// Debounced level (true = pressed)
    stable: bool,
    /// Most recent raw level
    candidate: bool,
    /// How long the raw level has matched `candidate`
    candidate_ms: u32,
    /// How long the debounced press has lasted
    held_ms: u32,
    /// Long press already reported for this press
    long_reported: bool,
}

impl ButtonDebouncer {
    /// Create a debouncer with the button released
    pub fn new(debounce_ms: u32, long_press_ms: u32) -> Self {
        Self {
            debounce_ms,
            long_press_ms,
            stable: false,
            candidate: false,
            candidate_ms: 0,
            held_ms: 0,
            long_reported: false,
        }
    }

    /// Create a debouncer from its configuration section
    pub fn from_config(config: &ButtonConfig) -> Self {
        Self::new(config.debounce_ms, config.long_press_ms)
    }

    /// Debounced button level
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Feed one sample taken `delta_ms` after the previous one
    ///
    /// `pressed` is the logical level, polarity already applied.
    pub fn update(&mut self, pressed: bool, delta_ms: u32) -> Option<ButtonEvent> {
        if pressed == self.candidate {
            self.candidate_ms = self.candidate_ms.saturating_add(delta_ms);
        } else {
            self.candidate = pressed;
            self.candidate_ms = 0;
        }

        if self.candidate != self.stable && self.candidate_ms >= self.debounce_ms {
            self.stable = self.candidate;
            if self.stable {
                self.held_ms = 0;
                self.long_reported = false;
            } else if !self.long_reported {
                return Some(ButtonEvent::Click);
            }
            return None;
        }

        if self.stable {
            self.held_ms = self.held_ms.saturating_add(delta_ms);
            if !self.long_reported && self.held_ms >= self.long_press_ms {
                self.long_reported = true;
                return Some(ButtonEvent::LongPress);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLL: u32 = 10;

    /// Feed `ms` worth of identical samples, collecting the first event
    fn hold(button: &mut ButtonDebouncer, pressed: bool, ms: u32) -> Option<ButtonEvent> {
        let mut event = None;
        for _ in 0..ms / POLL {
            if let Some(e) = button.update(pressed, POLL) {
                event = event.or(Some(e));
            }
        }
        event
    }

    #[test]
    fn test_click() {
        let mut button = ButtonDebouncer::new(30, 1500);
        assert_eq!(hold(&mut button, true, 200), None);
        assert!(button.is_pressed());
        assert_eq!(hold(&mut button, false, 100), Some(ButtonEvent::Click));
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut button = ButtonDebouncer::new(30, 1500);
        for _ in 0..10 {
            assert_eq!(button.update(true, POLL), None);
            assert_eq!(button.update(false, POLL), None);
        }
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_long_press_reported_once() {
        let mut button = ButtonDebouncer::new(30, 1500);
        assert_eq!(hold(&mut button, true, 1000), None);
        assert_eq!(hold(&mut button, true, 600), Some(ButtonEvent::LongPress));
        assert_eq!(hold(&mut button, true, 3000), None);
        // Release after a long press is not a click
        assert_eq!(hold(&mut button, false, 100), None);
    }

    #[test]
    fn test_next_press_after_long_press() {
        let mut button = ButtonDebouncer::new(30, 1500);
        hold(&mut button, true, 2000);
        hold(&mut button, false, 100);
        assert_eq!(hold(&mut button, true, 100), None);
        assert_eq!(hold(&mut button, false, 100), Some(ButtonEvent::Click));
    }

    #[test]
    fn test_into_input_event() {
        assert_eq!(InputEvent::from(ButtonEvent::Click), InputEvent::Click);
        assert_eq!(InputEvent::from(ButtonEvent::LongPress), InputEvent::LongPress);
    }
}
