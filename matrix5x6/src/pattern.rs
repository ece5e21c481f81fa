//! Blink patterns for a bank of 8 LEDs, like the ones on P4-P11 of the board's I/O expander.
//!
//! Like the scroller, the [`PatternPlayer`] never blocks; poll it from the main loop and it
//! moves to the next frame when the pattern's speed says so.

use crate::Clock;

/// Eight LEDs that can be switched all at once.
///
/// Bit 0 of the mask is the first LED.  On the D1 multi-I/O board the LEDs are on expander pins
/// P4 to P11, so bit `n` goes to pin `4 + n`.
pub trait LedBank {
    type Error;

    fn show(&mut self, leds: u8) -> Result<(), Self::Error>;
}

/// A looping sequence of LED masks
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    /// Milliseconds each frame stays up
    pub speed_ms: u8,

    pub frames: &'static [u8],
}

/// The built-in patterns
pub const PATTERNS: &[Pattern] = &[
    // A single LED hopping between the two ends
    Pattern {
        speed_ms: 100,
        frames: &[0x80, 0, 0, 0, 0, 0x01, 0, 0, 0, 0],
    },
    // Alternating halves
    Pattern {
        speed_ms: 200,
        frames: &[0xAA, 0x55],
    },
    // Bouncing from one end to the other and back
    Pattern {
        speed_ms: 100,
        frames: &[
            0b0000_0001,
            0b0000_0010,
            0b0000_0100,
            0b0000_1000,
            0b0001_0000,
            0b0010_0000,
            0b0100_0000,
            0b1000_0000,
            0b0100_0000,
            0b0010_0000,
            0b0001_0000,
            0b0000_1000,
            0b0000_0100,
            0b0000_0010,
        ],
    },
    // Running up
    Pattern {
        speed_ms: 100,
        frames: &[
            0b0000_0001,
            0b0000_0010,
            0b0000_0100,
            0b0000_1000,
            0b0001_0000,
            0b0010_0000,
            0b0100_0000,
            0b1000_0000,
        ],
    },
    // Running down
    Pattern {
        speed_ms: 100,
        frames: &[
            0b1000_0000,
            0b0100_0000,
            0b0010_0000,
            0b0001_0000,
            0b0000_1000,
            0b0000_0100,
            0b0000_0010,
            0b0000_0001,
        ],
    },
    // Closing in from both ends
    Pattern {
        speed_ms: 100,
        frames: &[0b1000_0001, 0b0100_0010, 0b0010_0100, 0b0001_1000],
    },
    // Opening out from the middle
    Pattern {
        speed_ms: 100,
        frames: &[0b0001_1000, 0b0010_0100, 0b0100_0010, 0b1000_0001],
    },
    // Closing in and opening out again
    Pattern {
        speed_ms: 100,
        frames: &[
            0b1000_0001,
            0b0100_0010,
            0b0010_0100,
            0b0001_1000,
            0b0001_1000,
            0b0010_0100,
            0b0100_0010,
            0b1000_0001,
        ],
    },
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternError {
    /// There is no built-in pattern with this index
    UnknownPattern(u8),
}

/// Plays one of the [`PATTERNS`] on a [`LedBank`]
#[derive(Clone, Debug)]
pub struct PatternPlayer {
    pattern: u8,
    speed_ms: u8,

    /// Index of the frame on display, `None` before the first one
    frame: Option<usize>,

    last_update: u64,
}

impl Default for PatternPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternPlayer {
    pub const fn new() -> Self {
        Self {
            pattern: 0,
            speed_ms: PATTERNS[0].speed_ms,
            frame: None,
            last_update: 0,
        }
    }

    /// Switch to pattern `index`.
    ///
    /// A `speed_ms` of 0 plays the pattern at its own speed.  The new pattern starts from its
    /// first frame on the next due poll.
    pub fn set_pattern(&mut self, index: u8, speed_ms: u8) -> Result<(), PatternError> {
        let pattern = PATTERNS
            .get(index as usize)
            .ok_or(PatternError::UnknownPattern(index))?;

        self.pattern = index;
        self.speed_ms = if speed_ms == 0 {
            pattern.speed_ms
        } else {
            speed_ms
        };
        self.frame = None;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "LED pattern {=u8} [size {=usize}], speed {=u8}",
            index,
            pattern.frames.len(),
            self.speed_ms
        );

        Ok(())
    }

    pub fn pattern(&self) -> u8 {
        self.pattern
    }

    pub fn speed_ms(&self) -> u8 {
        self.speed_ms
    }

    /// Show the next frame once more than the pattern's speed has passed since the last one.
    ///
    /// Returns whether the LEDs were updated.
    pub fn poll<C: Clock, B: LedBank>(&mut self, clock: &C, bank: &mut B) -> Result<bool, B::Error> {
        let now = clock.now_ms();
        if now <= self.last_update + u64::from(self.speed_ms) {
            return Ok(false);
        }
        self.last_update = now;

        let frames = PATTERNS[self.pattern as usize].frames;
        let frame = match self.frame {
            Some(frame) if frame + 1 < frames.len() => frame + 1,
            _ => 0,
        };
        self.frame = Some(frame);

        bank.show(frames[frame])?;
        Ok(true)
    }
}

/// Masks that light each LED in turn with a blank frame after each one, for checking at startup
/// that all LEDs work.  Show each for a few milliseconds.
pub fn sweep_frames() -> impl Iterator<Item = u8> {
    (0..8).flat_map(|n| [1u8 << n, 0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::fakes::FakeClock;
    use core::convert::Infallible;

    #[derive(Default)]
    struct FakeBank {
        leds: Option<u8>,
        updates: usize,
    }

    impl LedBank for FakeBank {
        type Error = Infallible;

        fn show(&mut self, leds: u8) -> Result<(), Self::Error> {
            self.leds = Some(leds);
            self.updates += 1;
            Ok(())
        }
    }

    #[test]
    fn patterns_match_the_board_demo() {
        let sizes: [usize; 8] = core::array::from_fn(|i| PATTERNS[i].frames.len());
        assert_eq!(sizes, [10, 2, 14, 8, 8, 4, 4, 8]);
        assert_eq!(PATTERNS[1].speed_ms, 200);
    }

    #[test]
    fn unknown_pattern_is_rejected() {
        let mut player = PatternPlayer::new();
        player.set_pattern(3, 50).unwrap();

        assert_eq!(player.set_pattern(8, 0), Err(PatternError::UnknownPattern(8)));
        // The current pattern carries on
        assert_eq!(player.pattern(), 3);
        assert_eq!(player.speed_ms(), 50);
    }

    #[test]
    fn zero_speed_uses_the_pattern_speed() {
        let mut player = PatternPlayer::new();
        player.set_pattern(1, 0).unwrap();
        assert_eq!(player.speed_ms(), 200);
        player.set_pattern(1, 30).unwrap();
        assert_eq!(player.speed_ms(), 30);
    }

    #[test]
    fn plays_and_loops() {
        let clock = FakeClock::at(1_000);
        let mut bank = FakeBank::default();
        let mut player = PatternPlayer::new();
        player.set_pattern(5, 0).unwrap();

        let mut shown = [0u8; 9];
        for frame in shown.iter_mut() {
            assert!(player.poll(&clock, &mut bank).unwrap());
            *frame = bank.leds.unwrap();

            // Exactly the speed isn't enough, it has to be longer
            clock.advance(100);
            assert!(!player.poll(&clock, &mut bank).unwrap());
            clock.advance(1);
        }

        assert_eq!(
            shown,
            [0x81, 0x42, 0x24, 0x18, 0x81, 0x42, 0x24, 0x18, 0x81]
        );
        assert_eq!(bank.updates, 9);
    }

    #[test]
    fn switching_restarts_from_the_first_frame() {
        let clock = FakeClock::at(1_000);
        let mut bank = FakeBank::default();
        let mut player = PatternPlayer::new();

        player.set_pattern(2, 0).unwrap();
        for _ in 0..10 {
            player.poll(&clock, &mut bank).unwrap();
            clock.advance(250);
        }

        player.set_pattern(1, 0).unwrap();
        player.poll(&clock, &mut bank).unwrap();
        assert_eq!(bank.leds, Some(0xAA));
    }

    #[test]
    fn sweep_lights_each_led_once() {
        let mut frames = sweep_frames();
        for n in 0..8 {
            assert_eq!(frames.next(), Some(1 << n));
            assert_eq!(frames.next(), Some(0));
        }
        assert_eq!(frames.next(), None);
    }
}
