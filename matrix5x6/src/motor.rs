//! Two DC motors on the last four channels of a 16 channel PWM board, through an H-bridge
//! driver like the L9110.
//!
//! Motor A is on channels 12 (forward) and 13 (backward), motor B on 14 and 15.  Besides the
//! duty cycles, every drive command picks how the board's indicators reflect it: the two RGB
//! LEDs, an LED pattern and a short label for the 4 digit display.

use crate::indicator::{set_rgb, RgbColor, RgbLed};
use crate::SegmentSink;

/// A 16 channel, 12 bit PWM controller (PCA9685 or similar).
///
/// `on` and `off` are the counts within the 4096 count cycle at which the output switches.  An
/// `off` of [`FULL_OFF`] holds the output low for the whole cycle.
pub trait PwmOutputs {
    type Error;

    fn set_frequency(&mut self, hz: u16) -> Result<(), Self::Error>;

    fn set_pwm(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Self::Error>;
}

/// Number of channels on the controller
pub const CHANNELS: u8 = 16;

/// `off` count that turns a channel fully off
pub const FULL_OFF: u16 = 4096;

/// Highest speed a motor can be driven at; speeds are scaled by 4 into 12 bit duty cycles
pub const MAX_SPEED: u16 = 1023;

/// PWM frequency while the motors are idle and the outputs can be used for LEDs
pub const IDLE_FREQUENCY_HZ: u16 = 1000;

/// PWM frequency when driving the motors
pub const DRIVE_FREQUENCY_HZ: u16 = 200;

/// First of the four motor channels
const FIRST_MOTOR_CHANNEL: u8 = 12;

/// How much faster one motor must run than the other to count as turning
const TURN_THRESHOLD: i32 = 50;

/// LED pattern shown when stopped
const STOP_PATTERN: u8 = 2;

/// Which way the motors turn
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Backward,
}

/// Everything that follows from one drive command: the motor channel duty cycles and the
/// indicators
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrivePlan {
    /// `off` counts for channels 12 to 15
    pub duties: [u16; 4],

    pub rgb: [RgbColor; 2],

    /// LED pattern index and speed for the [`crate::PatternPlayer`]
    pub pattern: u8,
    pub pattern_speed_ms: u8,

    /// What to print on the 4 digit display
    pub label: &'static str,
}

impl DrivePlan {
    /// Work out how to drive motor A at `speed_a` and motor B at `speed_b` in `direction`.
    ///
    /// Speeds are clamped to `0..=MAX_SPEED`.  Both speeds 0 means stop, whatever the direction.
    pub fn new(direction: Direction, speed_a: u16, speed_b: u16) -> Self {
        let speed_a = speed_a.min(MAX_SPEED);
        let speed_b = speed_b.min(MAX_SPEED);

        let plan = if speed_a == 0 && speed_b == 0 {
            Self::stop()
        } else {
            let duty_a = speed_a * 4;
            let duty_b = speed_b * 4;

            let a_faster = i32::from(speed_a) - i32::from(speed_b) > TURN_THRESHOLD;
            let b_faster = i32::from(speed_b) - i32::from(speed_a) > TURN_THRESHOLD;

            // The faster the motors, the faster the LEDs run
            let pattern_speed_ms = (255 - ((speed_a + speed_b) / 10) % 255) as u8;

            let (duties, fast, even, straight_pattern, label) = match direction {
                Direction::Forward => (
                    [duty_a, FULL_OFF, duty_b, FULL_OFF],
                    RgbColor::Green,
                    RgbColor::Yellow,
                    5,
                    "for",
                ),
                Direction::Backward => (
                    [FULL_OFF, duty_a, FULL_OFF, duty_b],
                    RgbColor::Red,
                    RgbColor::Magenta,
                    6,
                    "bck",
                ),
            };

            Self {
                duties,
                rgb: [
                    if a_faster { fast } else { even },
                    if b_faster { fast } else { even },
                ],
                pattern: if a_faster {
                    3
                } else if b_faster {
                    4
                } else {
                    straight_pattern
                },
                pattern_speed_ms,
                label,
            }
        };

        #[cfg(feature = "defmt")]
        defmt::info!(
            "motors {}: {=u16}, {=u16} -> {}",
            direction,
            speed_a,
            speed_b,
            plan
        );

        plan
    }

    /// Both motors off
    pub fn stop() -> Self {
        Self {
            duties: [FULL_OFF; 4],
            rgb: [RgbColor::Off; 2],
            pattern: STOP_PATTERN,
            pattern_speed_ms: 0,
            label: "stop",
        }
    }

    pub fn is_stop(&self) -> bool {
        self.duties == [FULL_OFF; 4]
    }

    /// Write the duty cycles to the motor channels
    pub fn apply<P: PwmOutputs>(&self, pwm: &mut P) -> Result<(), P::Error> {
        pwm.set_frequency(DRIVE_FREQUENCY_HZ)?;

        for (channel, duty) in (FIRST_MOTOR_CHANNEL..).zip(self.duties) {
            pwm.set_pwm(channel, 0, duty)?;
        }

        Ok(())
    }

    /// Set the two RGB LEDs on the segment controller
    pub fn indicate<S: SegmentSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        set_rgb(sink, RgbLed::One, self.rgb[0])?;
        set_rgb(sink, RgbLed::Two, self.rgb[1])
    }
}

/// Put the controller at its idle frequency with every channel off
pub fn all_off<P: PwmOutputs>(pwm: &mut P) -> Result<(), P::Error> {
    pwm.set_frequency(IDLE_FREQUENCY_HZ)?;

    for channel in 0..CHANNELS {
        pwm.set_pwm(channel, 0, FULL_OFF)?;
    }

    Ok(())
}
