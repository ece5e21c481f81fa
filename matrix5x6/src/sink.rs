//! Module describing the [`SegmentSink`] and [`Clock`] traits, the two seams through which this
//! crate talks to the hardware, and the implementations available depending on enabled features.

/// This trait represents whatever ends up writing segment masks to the LED controller, likely a
/// TM1637 driver built on some platform-specific HAL.
///
/// The controller addresses its outputs as a series of grid positions, each of which holds one
/// byte of segment enablement bits.  Wired as a dot matrix, each of the 5 grid positions carries
/// one 6-bit column of pixels.  Wired as a 4-digit 7-segment display, positions 0-3 are the
/// digits (bit 7 is the dot) and positions 4 and 5 drive the two RGB LEDs on the board.
///
/// How the bytes get to the chip (bit-banged two-wire bus, PIO, whatever) is of no concern to
/// this crate.
pub trait SegmentSink {
    type Error;

    /// Set the segments at grid `position` to `mask`.
    fn set_segments(&mut self, mask: u8, position: u8) -> Result<(), Self::Error>;
}

impl<T: SegmentSink + ?Sized> SegmentSink for &mut T {
    type Error = T::Error;

    fn set_segments(&mut self, mask: u8, position: u8) -> Result<(), Self::Error> {
        (**self).set_segments(mask, position)
    }
}

/// A free-running millisecond clock, used to pace anything that updates on a fixed interval.
///
/// Like the bus timing in a bit-banged driver, there is no single timer abstraction everyone
/// agrees on in embedded Rust.  Implement this in terms of whatever your platform offers.
pub trait Clock {
    /// Milliseconds since some arbitrary, fixed point in the past.  Must never go backwards.
    fn now_ms(&self) -> u64;
}

#[cfg(feature = "embassy-time")]
mod embassy_time_clock {
    use embassy_time::Instant;

    /// [`super::Clock`] implementation backed by the `embassy-time` time driver
    #[derive(Clone, Copy, Default)]
    pub struct EmbassyTimeClock;

    impl super::Clock for EmbassyTimeClock {
        fn now_ms(&self) -> u64 {
            Instant::now().as_millis()
        }
    }
}

#[cfg(feature = "embassy-time")]
pub use embassy_time_clock::EmbassyTimeClock;

#[cfg(test)]
pub(crate) mod fakes {
    //! Fakes of the hardware seams shared by the tests of the other modules

    use core::cell::Cell;
    use core::convert::Infallible;

    /// Records the last mask written to each of the first 8 positions, plus a count of writes
    #[derive(Default)]
    pub struct RecordingSink {
        pub positions: [Option<u8>; 8],
        pub writes: usize,
    }

    impl RecordingSink {
        pub fn mask(&self, position: u8) -> Option<u8> {
            self.positions[position as usize]
        }
    }

    impl super::SegmentSink for RecordingSink {
        type Error = Infallible;

        fn set_segments(&mut self, mask: u8, position: u8) -> Result<(), Self::Error> {
            self.positions[position as usize] = Some(mask);
            self.writes += 1;
            Ok(())
        }
    }

    /// Sink that refuses every write, for checking errors are propagated rather than swallowed
    pub struct BrokenSink;

    #[derive(Debug, PartialEq, Eq)]
    pub struct SinkFault;

    impl super::SegmentSink for BrokenSink {
        type Error = SinkFault;

        fn set_segments(&mut self, _mask: u8, _position: u8) -> Result<(), Self::Error> {
            Err(SinkFault)
        }
    }

    /// Clock whose time only moves when a test says so
    #[derive(Default)]
    pub struct FakeClock(Cell<u64>);

    impl FakeClock {
        pub fn at(ms: u64) -> Self {
            Self(Cell::new(ms))
        }

        pub fn advance(&self, ms: u64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl super::Clock for FakeClock {
        fn now_ms(&self) -> u64 {
            self.0.get()
        }
    }
}
