//! A tiny 5x6 pixel font for the dot matrix.
//!
//! Each glyph is 5 column bytes, left to right.  In each byte bit 0 is the top row; only the low
//! 6 bits are used.  Glyphs are drawn in the top 5 rows, with the 6th row reserved for
//! descenders and `_`.

/// Width of every glyph, in pixel columns
pub const GLYPH_WIDTH: i8 = 5;

/// Height of every glyph, in pixel rows
pub const GLYPH_HEIGHT: i8 = 6;

/// The first character in the table.  Lookups are offset by this value.
const FIRST_CHAR: u8 = b' ';

/// Look up the columns of the glyph for `c`.
///
/// Anything that isn't printable ASCII is rendered as `?`, the same fallback the 7 segment font
/// uses.
pub fn glyph(c: char) -> &'static [u8; 5] {
    let index = match u8::try_from(c) {
        Ok(ascii) if (FIRST_CHAR..FIRST_CHAR + FONT_5X6.len() as u8).contains(&ascii) => {
            ascii - FIRST_CHAR
        }
        _ => b'?' - FIRST_CHAR,
    };

    &FONT_5X6[index as usize]
}

/// Font data table for printable ASCII, offset to position 32.
const FONT_5X6: &[[u8; 5]] = &[
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x17, 0x00, 0x00], // '!'
    [0x00, 0x03, 0x00, 0x03, 0x00], // '"'
    [0x0A, 0x1F, 0x0A, 0x1F, 0x0A], // '#'
    [0x12, 0x15, 0x1F, 0x15, 0x09], // '$'
    [0x13, 0x0B, 0x04, 0x1A, 0x19], // '%'
    [0x0A, 0x15, 0x15, 0x0A, 0x10], // '&'
    [0x00, 0x00, 0x03, 0x00, 0x00], // "'"
    [0x00, 0x00, 0x0E, 0x11, 0x00], // '('
    [0x00, 0x11, 0x0E, 0x00, 0x00], // ')'
    [0x00, 0x0A, 0x04, 0x0A, 0x00], // '*'
    [0x00, 0x04, 0x0E, 0x04, 0x00], // '+'
    [0x00, 0x20, 0x18, 0x00, 0x00], // ','
    [0x00, 0x04, 0x04, 0x04, 0x00], // '-'
    [0x00, 0x00, 0x10, 0x00, 0x00], // '.'
    [0x10, 0x08, 0x04, 0x02, 0x01], // '/'
    [0x0E, 0x19, 0x15, 0x13, 0x0E], // '0'
    [0x00, 0x12, 0x1F, 0x10, 0x00], // '1'
    [0x12, 0x19, 0x15, 0x15, 0x12], // '2'
    [0x11, 0x15, 0x15, 0x15, 0x0A], // '3'
    [0x07, 0x04, 0x04, 0x1F, 0x04], // '4'
    [0x17, 0x15, 0x15, 0x15, 0x09], // '5'
    [0x0E, 0x15, 0x15, 0x15, 0x08], // '6'
    [0x01, 0x19, 0x05, 0x03, 0x01], // '7'
    [0x0A, 0x15, 0x15, 0x15, 0x0A], // '8'
    [0x02, 0x15, 0x15, 0x15, 0x0E], // '9'
    [0x00, 0x00, 0x0A, 0x00, 0x00], // ':'
    [0x00, 0x20, 0x1A, 0x00, 0x00], // ';'
    [0x00, 0x04, 0x0A, 0x11, 0x00], // '<'
    [0x00, 0x0A, 0x0A, 0x0A, 0x00], // '='
    [0x00, 0x11, 0x0A, 0x04, 0x00], // '>'
    [0x02, 0x01, 0x15, 0x05, 0x02], // '?'
    [0x0E, 0x11, 0x1F, 0x1B, 0x06], // '@'
    [0x1E, 0x05, 0x05, 0x05, 0x1E], // 'A'
    [0x1F, 0x15, 0x15, 0x15, 0x0A], // 'B'
    [0x0E, 0x11, 0x11, 0x11, 0x11], // 'C'
    [0x1F, 0x11, 0x11, 0x11, 0x0E], // 'D'
    [0x1F, 0x15, 0x15, 0x11, 0x11], // 'E'
    [0x1F, 0x05, 0x05, 0x01, 0x01], // 'F'
    [0x0E, 0x11, 0x11, 0x15, 0x0D], // 'G'
    [0x1F, 0x04, 0x04, 0x04, 0x1F], // 'H'
    [0x00, 0x11, 0x1F, 0x11, 0x00], // 'I'
    [0x08, 0x10, 0x11, 0x0F, 0x01], // 'J'
    [0x1F, 0x04, 0x0A, 0x11, 0x00], // 'K'
    [0x1F, 0x10, 0x10, 0x10, 0x10], // 'L'
    [0x1F, 0x02, 0x04, 0x02, 0x1F], // 'M'
    [0x1F, 0x02, 0x04, 0x08, 0x1F], // 'N'
    [0x0E, 0x11, 0x11, 0x11, 0x0E], // 'O'
    [0x1F, 0x05, 0x05, 0x05, 0x02], // 'P'
    [0x0E, 0x11, 0x15, 0x09, 0x16], // 'Q'
    [0x1F, 0x05, 0x05, 0x0D, 0x12], // 'R'
    [0x12, 0x15, 0x15, 0x15, 0x09], // 'S'
    [0x01, 0x01, 0x1F, 0x01, 0x01], // 'T'
    [0x0F, 0x10, 0x10, 0x10, 0x0F], // 'U'
    [0x03, 0x0C, 0x10, 0x0C, 0x03], // 'V'
    [0x1F, 0x08, 0x04, 0x08, 0x1F], // 'W'
    [0x11, 0x0A, 0x04, 0x0A, 0x11], // 'X'
    [0x01, 0x02, 0x1C, 0x02, 0x01], // 'Y'
    [0x11, 0x19, 0x15, 0x13, 0x11], // 'Z'
    [0x00, 0x1F, 0x11, 0x11, 0x00], // '['
    [0x01, 0x02, 0x04, 0x08, 0x10], // '\\'
    [0x00, 0x11, 0x11, 0x1F, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x20, 0x20, 0x20, 0x20, 0x20], // '_'
    [0x00, 0x01, 0x02, 0x00, 0x00], // '`'
    [0x0C, 0x12, 0x12, 0x1E, 0x10], // 'a'
    [0x1F, 0x12, 0x12, 0x12, 0x0C], // 'b'
    [0x0C, 0x12, 0x12, 0x12, 0x00], // 'c'
    [0x0C, 0x12, 0x12, 0x12, 0x1F], // 'd'
    [0x0C, 0x16, 0x16, 0x16, 0x04], // 'e'
    [0x04, 0x1E, 0x05, 0x01, 0x00], // 'f'
    [0x04, 0x2A, 0x2A, 0x2A, 0x1E], // 'g'
    [0x1F, 0x02, 0x02, 0x02, 0x1C], // 'h'
    [0x00, 0x14, 0x1D, 0x10, 0x00], // 'i'
    [0x10, 0x20, 0x20, 0x1D, 0x00], // 'j'
    [0x1F, 0x04, 0x04, 0x0A, 0x10], // 'k'
    [0x00, 0x11, 0x1F, 0x10, 0x00], // 'l'
    [0x1E, 0x02, 0x0C, 0x02, 0x1C], // 'm'
    [0x1E, 0x02, 0x02, 0x02, 0x1C], // 'n'
    [0x0C, 0x12, 0x12, 0x12, 0x0C], // 'o'
    [0x3E, 0x0A, 0x0A, 0x0A, 0x04], // 'p'
    [0x04, 0x0A, 0x0A, 0x0A, 0x3E], // 'q'
    [0x1E, 0x04, 0x02, 0x02, 0x00], // 'r'
    [0x10, 0x16, 0x16, 0x1A, 0x0A], // 's'
    [0x02, 0x0F, 0x12, 0x10, 0x08], // 't'
    [0x0E, 0x10, 0x10, 0x10, 0x1E], // 'u'
    [0x06, 0x08, 0x10, 0x08, 0x06], // 'v'
    [0x0E, 0x10, 0x0C, 0x10, 0x0E], // 'w'
    [0x12, 0x0C, 0x0C, 0x0C, 0x12], // 'x'
    [0x06, 0x28, 0x28, 0x28, 0x1E], // 'y'
    [0x12, 0x1A, 0x1E, 0x16, 0x12], // 'z'
    [0x00, 0x04, 0x0E, 0x11, 0x00], // '{'
    [0x00, 0x00, 0x1F, 0x00, 0x00], // '|'
    [0x00, 0x11, 0x0E, 0x04, 0x00], // '}'
    [0x04, 0x02, 0x04, 0x08, 0x04], // '~'
];
