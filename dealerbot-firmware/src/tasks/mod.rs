//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod dealer;
pub mod display;
pub mod input;

pub use controller::controller_task;
pub use dealer::dealer_task;
pub use display::display_task;
pub use input::input_task;
