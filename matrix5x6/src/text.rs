//! Displays that can show a window onto a line of text.

use crate::matrix::{Matrix5x6, HEIGHT, WIDTH};
use crate::SegmentSink;

/// A display that shows text one char per cell, through a window [`Self::DIGITS`] cells wide.
///
/// This is the interface the [`crate::Scroller`] drives.
pub trait TextDisplay {
    /// Number of char cells visible at once
    const DIGITS: usize;

    type Error;

    /// Blank the whole display
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Show `text` with its first char in cell `cursor`.
    ///
    /// `cursor` may be negative, in which case the text starts off the left edge of the display,
    /// or at least [`Self::DIGITS`], in which case none of it is visible yet.  Cells the text
    /// doesn't cover are blanked.
    fn show_at(&mut self, text: &str, cursor: i16) -> Result<(), Self::Error>;
}

/// A row of 7 segment digits behind a [`SegmentSink`], 4 of them unless told otherwise.
///
/// Digit `d` is at grid position `d`.  Positions past the digits are left alone, so the same
/// sink can also be used for other outputs on the controller, like the RGB LEDs in
/// [`crate::indicator`].
#[cfg(feature = "ascii-font")]
pub struct SegmentTextDisplay<S, const N: usize = 4> {
    sink: S,
}

#[cfg(feature = "ascii-font")]
impl<S: SegmentSink, const N: usize> SegmentTextDisplay<S, N> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Show `text` left-aligned, with any `.` folded into the previous digit.  Whatever doesn't
    /// fit is cut off.
    pub fn print(&mut self, text: &str) -> Result<(), S::Error> {
        let mut digits = [0u8; N];
        crate::font::render_text(text, &mut digits);
        self.write_digits(&digits)
    }

    fn write_digits(&mut self, digits: &[u8; N]) -> Result<(), S::Error> {
        for (position, mask) in digits.iter().enumerate() {
            self.sink.set_segments(*mask, position as u8)?;
        }

        Ok(())
    }
}

#[cfg(feature = "ascii-font")]
impl<S: SegmentSink, const N: usize> TextDisplay for SegmentTextDisplay<S, N> {
    const DIGITS: usize = N;

    type Error = S::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.write_digits(&[0u8; N])
    }

    fn show_at(&mut self, text: &str, cursor: i16) -> Result<(), Self::Error> {
        let mut digits = [0u8; N];
        crate::font::render_window(text, cursor, &mut digits);
        self.write_digits(&digits)
    }
}

/// The dot matrix is big enough for exactly one char from the 5x6 font, so as a text display it
/// is a window one cell wide.  Scrolling text across it shows one char at a time.
impl<S: SegmentSink> TextDisplay for Matrix5x6<S> {
    const DIGITS: usize = 1;

    type Error = S::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.update(|bitmap| bitmap.set_all(false))
    }

    fn show_at(&mut self, text: &str, cursor: i16) -> Result<(), Self::Error> {
        self.update(|bitmap| {
            bitmap.set_all(false);

            // Only the char that lands in cell 0 is visible
            if let Some(c) = usize::try_from(-(cursor as i32))
                .ok()
                .and_then(|index| text.chars().nth(index))
            {
                bitmap.draw_char(c, 0, 0);
            }
        })
    }
}

// Keep the char cell and the matrix in step; the text display above relies on a glyph covering
// the whole matrix.
const _: () = assert!(
    crate::font5x6::GLYPH_WIDTH == WIDTH && crate::font5x6::GLYPH_HEIGHT == HEIGHT
);
