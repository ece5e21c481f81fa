//! A primitive font that lights the 7 segments (+ dot) of each digit to display lower ASCII
//! chars, and the helpers that lay text out over a row of digits.

/// The bit that lights the `.` in the bottom right of a digit
pub const DOT: u8 = 0b1000_0000;

/// The segment mask that displays `c`.
///
/// Anything without a glyph in the table, including all non-ASCII chars, is shown as `?`.
pub fn segments_for(c: char) -> u8 {
    let index = match u8::try_from(c) {
        Ok(ascii) if ascii >= b' ' && ((ascii - b' ') as usize) < ASCII_FONT_TABLE.len() => {
            ascii - b' '
        }
        _ => b'?' - b' ',
    };

    ASCII_FONT_TABLE[index as usize]
}

/// Given a string of text, build a byte string which will render the text left-aligned on a
/// series of 7 segment displays.
///
/// If `bytes` is too small to hold the entire string in `text`, will fill up `bytes` and then
/// return `bytes.len()`.
///
/// Returns the number of bytes used to render the text.  It can be less than the length of the
/// text because the '.' character doesn't require an extra byte on the 7 seg display.  Will never
/// be more than the number of chars in `text`
pub fn render_text(text: &str, bytes: &mut [u8]) -> usize {
    let mut index = 0;

    for c in text.chars() {
        if index == bytes.len() {
            // Buffer is full so we can stop
            break;
        }

        if c == '.' && index > 0 {
            // If there's a previous character, light its dot instead of spending a whole digit on
            // the '.'.  A leading '.' has nothing to attach to, so it gets its own digit
            bytes[index - 1] |= DOT;
            continue;
        }

        bytes[index] = segments_for(c);
        index += 1;
    }

    index
}

/// Render the part of `text` that is visible through a window of `bytes.len()` digits, with the
/// first char of `text` placed at digit `cursor`.
///
/// `cursor` may be negative, in which case the first `-cursor` chars are off the left edge, or
/// past the last digit, in which case nothing is visible yet.  Digits not covered by the text are
/// blanked.  This is what moving a text cursor and printing looks like on a 7 segment display,
/// and is what makes scrolling work.
///
/// Every char gets its own digit here, including '.', so that scrolling advances one char per
/// step.
pub fn render_window(text: &str, cursor: i16, bytes: &mut [u8]) {
    bytes.fill(0);

    for (i, c) in text.chars().enumerate() {
        let Ok(i) = i16::try_from(i) else {
            break;
        };
        let digit = cursor.saturating_add(i);

        if digit < 0 {
            continue;
        }

        match bytes.get_mut(digit as usize) {
            Some(byte) => *byte = segments_for(c),
            // Past the right edge, and every char after this one will be too
            None => break,
        }
    }
}

/// Map of ASCII values to 7-segment masks, offset to position 32.
///
/// Taken from https://github.com/gavinlyonsrepo/TM1638plus_PICO/blob/main/src/tm1638plus_common.cpp
const ASCII_FONT_TABLE: &[u8] = &[
    0x00, /* (space) */
    0x86, /* ! */
    0x22, /* " */
    0x7E, /* # */
    0x6D, /* $ */
    0xD2, /* % */
    0x46, /* & */
    0x20, /* ' */
    0x29, /* ( */
    0x0B, /* ) */
    0x21, /* * */
    0x70, /* + */
    0x10, /* , */
    0x40, /* - */
    0x80, /* . */
    0x52, /* / */
    0x3F, /* 0 */
    0x06, /* 1 */
    0x5B, /* 2 */
    0x4F, /* 3 */
    0x66, /* 4 */
    0x6D, /* 5 */
    0x7D, /* 6 */
    0x07, /* 7 */
    0x7F, /* 8 */
    0x6F, /* 9 */
    0x09, /* : */
    0x0D, /* ; */
    0x61, /* < */
    0x48, /* = */
    0x43, /* > */
    0xD3, /* ? */
    0x5F, /* @ */
    0x77, /* A */
    0x7C, /* B */
    0x39, /* C */
    0x5E, /* D */
    0x79, /* E */
    0x71, /* F */
    0x3D, /* G */
    0x76, /* H */
    0x30, /* I */
    0x1E, /* J */
    0x75, /* K */
    0x38, /* L */
    0x15, /* M */
    0x37, /* N */
    0x3F, /* O */
    0x73, /* P */
    0x6B, /* Q */
    0x33, /* R */
    0x6D, /* S */
    0x78, /* T */
    0x3E, /* U */
    0x3E, /* V */
    0x2A, /* W */
    0x76, /* X */
    0x6E, /* Y */
    0x5B, /* Z */
    0x39, /* [ */
    0x64, /* \ */
    0x0F, /* ] */
    0x23, /* ^ */
    0x08, /* _ */
    0x02, /* ` */
    0x5F, /* a */
    0x7C, /* b */
    0x58, /* c */
    0x5E, /* d */
    0x7B, /* e */
    0x71, /* f */
    0x6F, /* g */
    0x74, /* h */
    0x10, /* i */
    0x0C, /* j */
    0x75, /* k */
    0x30, /* l */
    0x14, /* m */
    0x54, /* n */
    0x5C, /* o */
    0x73, /* p */
    0x67, /* q */
    0x50, /* r */
    0x6D, /* s */
    0x78, /* t */
    0x1C, /* u */
    0x1C, /* v */
    0x14, /* w */
    0x76, /* x */
    0x6E, /* y */
    0x5B, /* z */
    0x46, /* { */
    0x30, /* | */
    0x70, /* } */
    0x01, /* ~ */
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_glyphs() {
        assert_eq!(segments_for(' '), 0x00);
        assert_eq!(segments_for('0'), 0x3F);
        assert_eq!(segments_for('8'), 0x7F);
        assert_eq!(segments_for('A'), 0x77);
        assert_eq!(segments_for('-'), 0x40);
    }

    #[test]
    fn unsupported_chars_render_as_question_mark() {
        let question = segments_for('?');
        for c in ['\u{7f}', '\t', 'ü', '\u{1F600}'] {
            assert_eq!(segments_for(c), question, "{c:?}");
        }
    }

    #[test]
    fn render_text_merges_dots() {
        let mut bytes = [0u8; 4];
        let used = render_text("1.2.3", &mut bytes);
        assert_eq!(used, 3);
        assert_eq!(bytes, [0x06 | DOT, 0x5B | DOT, 0x4F, 0x00]);

        // A leading dot has nothing to merge with
        let mut bytes = [0u8; 4];
        assert_eq!(render_text(".5", &mut bytes), 2);
        assert_eq!(bytes[0], segments_for('.'));
    }

    #[test]
    fn render_text_truncates() {
        let mut bytes = [0u8; 4];
        assert_eq!(render_text("boot up", &mut bytes), 4);
        assert_eq!(bytes, [0x7C, 0x5C, 0x5C, 0x78]);
    }

    #[test]
    fn render_window_positions() {
        struct TestCase {
            cursor: i16,
            expected: &'static str,
        }

        // The expected text is what the window would show if printed left-aligned
        const TEST_CASES: &[TestCase] = &[
            TestCase { cursor: 0, expected: "AB  " },
            TestCase { cursor: 1, expected: " AB " },
            TestCase { cursor: 3, expected: "   A" },
            TestCase { cursor: 4, expected: "    " },
            TestCase { cursor: -1, expected: "B   " },
            TestCase { cursor: -2, expected: "    " },
            TestCase { cursor: i16::MIN, expected: "    " },
            TestCase { cursor: i16::MAX, expected: "    " },
        ];

        for tc in TEST_CASES {
            let mut window = [0xffu8; 4];
            render_window("AB", tc.cursor, &mut window);

            let mut expected = [0u8; 4];
            for (byte, c) in expected.iter_mut().zip(tc.expected.chars()) {
                *byte = segments_for(c);
            }

            assert_eq!(window, expected, "cursor {}", tc.cursor);
        }
    }

    #[test]
    fn render_window_long_text() {
        let mut window = [0u8; 4];
        render_window("scroll", -2, &mut window);
        let mut expected = [0u8; 4];
        render_text("roll", &mut expected);
        assert_eq!(window, expected);
    }
}
