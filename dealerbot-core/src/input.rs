//! User input events
//!
//! Produced by the firmware's input task from the potentiometer and the
//! push button, consumed by the [`Controller`](crate::controller::Controller).

/// Input events from the knob and button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Knob moved to a new raw ADC reading
    Knob(u16),
    /// Short button press, reported on release
    Click,
    /// Button held past the long-press time
    LongPress,
}
