//! The 5x6 dot matrix: an in-memory bitmap and the renderer that flushes it to the controller.
//!
//! The "S6xG5" matrix is a TM1637 wired so each of its 5 grid outputs drives one column of 6
//! LEDs.  The whole screen is therefore 30 pixels, which fit comfortably in a single `u32`.

use crate::font5x6::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::SegmentSink;

/// Number of pixel columns; one per grid output on the controller
pub const WIDTH: i8 = 5;

/// Number of pixel rows; one per segment output on the controller
pub const HEIGHT: i8 = 6;

/// Mask of the 30 bits that hold pixels
const ALL_PIXELS: u32 = 0x3FFF_FFFF;

/// Mask of one column's worth of pixels
const COLUMN_MASK: u32 = 0x3F;

/// The pixels of the matrix, packed column-major into the low 30 bits of a `u32`.
///
/// The pixel at `(x, y)` lives at bit `29 - (x * 6 + y)`, so the top-left pixel is the most
/// significant of the 30 bits.  That is the order in which the columns are sent to the
/// controller; see [`Bitmap::column_chunk`].  Bits 30 and 31 are never set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitmap(u32);

impl Bitmap {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Construct a bitmap from its packed representation.  Bits past the 30th are dropped.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & ALL_PIXELS)
    }

    /// The packed representation of the bitmap
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Turn the pixel at `(x, y)` on or off.
    ///
    /// Coordinates outside the matrix are silently ignored, which is what makes it possible to
    /// draw characters that are only partially visible.
    pub fn set_pixel(&mut self, x: i8, y: i8, on: bool) {
        if let Some(mask) = Self::pixel_mask(x, y) {
            if on {
                self.0 |= mask;
            } else {
                self.0 &= !mask;
            }
        }
    }

    /// Read back the pixel at `(x, y)`.  Coordinates outside the matrix are always off.
    pub fn pixel(&self, x: i8, y: i8) -> bool {
        Self::pixel_mask(x, y).is_some_and(|mask| self.0 & mask != 0)
    }

    /// Turn all pixels on or off in one go
    pub fn set_all(&mut self, on: bool) {
        self.0 = if on { ALL_PIXELS } else { 0 };
    }

    /// Number of pixels that are on
    pub fn count_lit(&self) -> u32 {
        self.0.count_ones()
    }

    /// Extract the 6 bits of chunk `n` (0..5), counting from the least significant end of the
    /// packed bitmap.
    ///
    /// Given the bit layout, chunk `n` holds column `4 - n`, with the top row in bit 5.  There
    /// are no pixels past chunk 4, so any higher `n` gives an empty chunk.
    pub fn column_chunk(&self, n: u8) -> u8 {
        let shifted = self.0.checked_shr(HEIGHT as u32 * u32::from(n)).unwrap_or(0);
        (shifted & COLUMN_MASK) as u8
    }

    /// Draw character `c` from the 5x6 font with its top-left corner at `(x, y)`.
    ///
    /// The whole 5x6 cell is written, so the glyph's blank pixels turn off whatever was there
    /// before.  The cell may hang off any edge of the matrix; a character that lies entirely
    /// outside it is skipped without touching the bitmap.
    pub fn draw_char(&mut self, c: char, x: i8, y: i8) {
        // Work in i16 so that coordinates near the ends of the i8 range can't overflow
        let (x, y) = (x as i16, y as i16);
        let (width, height) = (GLYPH_WIDTH as i16, GLYPH_HEIGHT as i16);

        if x >= WIDTH as i16 || y >= HEIGHT as i16 || x + width - 1 < 0 || y + height - 1 < 0 {
            return;
        }

        for (i, column) in font5x6::glyph(c).iter().enumerate() {
            let mut line = *column;
            for j in 0..8i16 {
                // Anything that doesn't fit in an i8 is off the matrix anyway
                if let (Ok(px), Ok(py)) = (i8::try_from(x + i as i16), i8::try_from(y + j)) {
                    self.set_pixel(px, py, line & 1 != 0);
                }
                line >>= 1;
            }
        }
    }

    fn pixel_mask(x: i8, y: i8) -> Option<u32> {
        if !(0..WIDTH).contains(&x) || !(0..HEIGHT).contains(&y) {
            return None;
        }

        let index = (x as u32) * HEIGHT as u32 + y as u32;
        Some(1 << (29 - index))
    }
}

/// How the grid outputs of the controller are wired relative to the matrix columns.
///
/// Whether grid 1 ends up on the left or on the right depends on how the board was built, and
/// there's no way to tell from software, so this must always be chosen explicitly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::VariantArray)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Chunk `n` of the bitmap goes to grid position `n`.  Since chunk 0 is the right-most
    /// column, this shows the bitmap mirrored when grid 1 is on the left.
    Normal,

    /// Chunk `n` of the bitmap goes to grid position `4 - n`, for boards on which grid 1 and
    /// segment 1 are in the top-right corner.
    Mirrored,
}

impl Orientation {
    /// The grid position that chunk `n` of the bitmap is sent to.  `n` is clamped to the last
    /// chunk, 4.
    pub fn position_of_chunk(self, n: u8) -> u8 {
        let n = n.min(WIDTH as u8 - 1);
        match self {
            Self::Normal => n,
            Self::Mirrored => (WIDTH as u8 - 1) - n,
        }
    }
}

/// Renderer for the 5x6 dot matrix.
///
/// Holds the [`Bitmap`] in memory and pushes it to a [`SegmentSink`] whenever it changes.  By
/// default every mutation is flushed immediately; turn that off with
/// [`Self::with_auto_flush`], or use [`Self::update`] to batch several writes into one flush.
///
/// ```
/// # use core::convert::Infallible;
/// # struct Sink;
/// # impl matrix5x6::SegmentSink for Sink {
/// #     type Error = Infallible;
/// #     fn set_segments(&mut self, _mask: u8, _position: u8) -> Result<(), Infallible> { Ok(()) }
/// # }
/// use matrix5x6::{Matrix5x6, Orientation};
///
/// let mut matrix = Matrix5x6::new(Sink, Orientation::Mirrored);
/// matrix.draw_char('7', 0, 0).unwrap();
/// matrix
///     .update(|bitmap| {
///         bitmap.set_pixel(4, 5, true);
///         bitmap.set_pixel(3, 5, true);
///     })
///     .unwrap();
/// ```
pub struct Matrix5x6<S> {
    sink: S,
    bitmap: Bitmap,
    orientation: Orientation,
    auto_flush: bool,
}

impl<S: SegmentSink> Matrix5x6<S> {
    pub fn new(sink: S, orientation: Orientation) -> Self {
        Self {
            sink,
            bitmap: Bitmap::new(),
            orientation,
            auto_flush: true,
        }
    }

    /// Choose whether mutations are flushed to the display immediately (the default) or only
    /// when [`Self::display`] is called.
    pub fn with_auto_flush(mut self, auto_flush: bool) -> Self {
        self.auto_flush = auto_flush;
        self
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Give back the sink this renderer was writing to
    pub fn release(self) -> S {
        self.sink
    }

    /// Set a single pixel.  See [`Bitmap::set_pixel`].
    pub fn set_pixel(&mut self, x: i8, y: i8, on: bool) -> Result<(), S::Error> {
        self.bitmap.set_pixel(x, y, on);
        self.flush_if_auto()
    }

    /// Turn every pixel on or off
    pub fn set_all_pixels(&mut self, on: bool) -> Result<(), S::Error> {
        self.bitmap.set_all(on);
        self.flush_if_auto()
    }

    /// Same as [`Self::set_all_pixels`], for those used to graphics library naming
    pub fn fill_screen(&mut self, on: bool) -> Result<(), S::Error> {
        self.set_all_pixels(on)
    }

    /// Draw a character.  See [`Bitmap::draw_char`].
    pub fn draw_char(&mut self, c: char, x: i8, y: i8) -> Result<(), S::Error> {
        self.bitmap.draw_char(c, x, y);
        self.flush_if_auto()
    }

    /// Make any number of changes to the bitmap, then flush it once regardless of the auto
    /// flush setting.
    pub fn update(&mut self, f: impl FnOnce(&mut Bitmap)) -> Result<(), S::Error> {
        f(&mut self.bitmap);
        self.display()
    }

    /// Send the whole bitmap to the display, one 6-bit column chunk per grid position.
    pub fn display(&mut self) -> Result<(), S::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("flushing bitmap {=u32:08x}", self.bitmap.bits());

        for n in 0..WIDTH as u8 {
            let column = self.bitmap.column_chunk(n);
            self.sink
                .set_segments(column, self.orientation.position_of_chunk(n))?;
        }

        Ok(())
    }

    fn flush_if_auto(&mut self) -> Result<(), S::Error> {
        if self.auto_flush {
            self.display()
        } else {
            Ok(())
        }
    }
}
