//! Drive a TM1637 style LED controller wired up as a 5x6 dot matrix ("S6xG5"), or as a 4 digit
//! 7 segment display, plus the other bits found on small Arduino-style I/O boards: an RTC, a PWM
//! board driving two motors, a bank of LEDs on an I/O expander and a couple of RGB LEDs.
//!
//! Everything here is meant to be called from a single cooperative polling loop.  Nothing
//! blocks, and nothing keeps global state: the [`Matrix5x6`] renderer, the [`Scroller`] and the
//! [`PatternPlayer`] are plain values owned by the loop.
//!
//! The hardware itself is behind small traits ([`SegmentSink`], [`Clock`], [`LedBank`],
//! [`PwmOutputs`]) so the chip drivers of your choice can be plugged in; the RTC talks to any
//! `embedded-hal` I2C bus directly.
#![no_std]

#[cfg(feature = "ascii-font")]
pub mod font;
pub mod font5x6;
pub mod indicator;
pub mod matrix;
pub mod motor;
pub mod pattern;
pub mod rtc;
mod scroll;
mod sink;
mod text;

pub use indicator::{set_rgb, RgbColor, RgbLed};
pub use matrix::{Bitmap, Matrix5x6, Orientation};
pub use motor::{Direction, DrivePlan, PwmOutputs};
pub use pattern::{LedBank, PatternError, PatternPlayer};
pub use rtc::{Rtc, RtcError, TimeOfDay};
pub use scroll::*;
pub use sink::*;
pub use text::*;
