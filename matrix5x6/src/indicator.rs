//! The two RGB LEDs hanging off the LED controller next to the 4 digit display.
//!
//! Each LED is wired to segments A, B and C of an otherwise unused grid output (digits 5 and 6),
//! so a color is just a 3 bit segment mask.

use crate::SegmentSink;

/// Colors an RGB LED can show with each of its three dies either fully on or off
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::VariantArray)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbColor {
    Off,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Aqua,
    White,
}

impl RgbColor {
    /// The segment mask for this color: red on segment A, green on B, blue on C
    pub fn to_mask(self) -> u8 {
        match self {
            Self::Off => 0b000,
            Self::Red => 0b001,
            Self::Green => 0b010,
            Self::Yellow => 0b011,
            Self::Blue => 0b100,
            Self::Magenta => 0b101,
            Self::Aqua => 0b110,
            Self::White => 0b111,
        }
    }

    /// The color a 3 bit mask lights up.  Bits above the third are ignored.
    pub fn from_mask(mask: u8) -> Self {
        match mask & 0b111 {
            0b000 => Self::Off,
            0b001 => Self::Red,
            0b010 => Self::Green,
            0b011 => Self::Yellow,
            0b100 => Self::Blue,
            0b101 => Self::Magenta,
            0b110 => Self::Aqua,
            _ => Self::White,
        }
    }
}

/// Which of the two RGB LEDs
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::VariantArray)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbLed {
    One,
    Two,
}

impl RgbLed {
    /// The grid position the LED is wired to.  RGB1 is on digit 5, RGB2 on digit 6.
    pub fn position(self) -> u8 {
        match self {
            Self::One => 4,
            Self::Two => 5,
        }
    }
}

/// Set `led` to `color`
pub fn set_rgb<S: SegmentSink>(sink: &mut S, led: RgbLed, color: RgbColor) -> Result<(), S::Error> {
    #[cfg(feature = "defmt")]
    defmt::trace!("{} -> {}", led, color);

    sink.set_segments(color.to_mask(), led.position())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::fakes::RecordingSink;
    use strum::VariantArray;

    #[test]
    fn colors_round_trip_through_masks() {
        for color in RgbColor::VARIANTS {
            assert_eq!(RgbColor::from_mask(color.to_mask()), *color);
        }

        // Every 3 bit mask is a distinct color
        assert_eq!(RgbColor::VARIANTS.len(), 8);
        assert_eq!(RgbColor::from_mask(0b1111_1010), RgbColor::Green);
    }

    #[test]
    fn leds_sit_after_the_digits() {
        let mut sink = RecordingSink::default();

        set_rgb(&mut sink, RgbLed::One, RgbColor::Yellow).unwrap();
        set_rgb(&mut sink, RgbLed::Two, RgbColor::Magenta).unwrap();

        assert_eq!(sink.mask(4), Some(0b011));
        assert_eq!(sink.mask(5), Some(0b101));
        for digit in 0..4 {
            assert_eq!(sink.mask(digit), None, "digit {digit} should be untouched");
        }
    }
}
