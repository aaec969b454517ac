//! Sensor implementations

pub mod proximity;

pub use proximity::GpioProximity;
