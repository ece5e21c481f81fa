//! Scroll a line of text across a [`TextDisplay`] that is too narrow to show all of it.
//!
//! Nothing here blocks.  Start a session with [`Scroller::start`], then call [`Scroller::poll`]
//! from the main loop as often as you like; the text only moves once each
//! [`ScrollConfig::delay_ms`] has passed.

use crate::{Clock, TextDisplay};

/// Default time between scroll steps
pub const DEFAULT_DELAY_MS: u32 = 333;

/// How a scroll session behaves
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollConfig {
    /// Start over from the right edge once the text has scrolled off, forever
    pub repeat: bool,

    /// Milliseconds between scroll steps
    pub delay_ms: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            repeat: false,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl ScrollConfig {
    pub fn repeating(self) -> Self {
        Self {
            repeat: true,
            ..self
        }
    }

    pub fn with_delay_ms(self, delay_ms: u32) -> Self {
        Self { delay_ms, ..self }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State<'a> {
    /// No text has been given yet, or the last text given was empty
    Idle,

    /// Text is moving across the display
    Scrolling {
        text: &'a str,

        /// Cell of the display where the first char of `text` is drawn next
        cursor: i16,

        /// When the display last changed.  `None` until the first step, which then happens on
        /// the first poll regardless of the delay
        last_update: Option<u64>,
    },

    /// The text has scrolled off the display and isn't repeating
    Done,
}

/// Drives one scrolling text session at a time.
///
/// The text is borrowed for the duration of the session; starting a new session replaces the
/// current one.
///
/// ```
/// # use core::convert::Infallible;
/// # struct Digits;
/// # impl matrix5x6::TextDisplay for Digits {
/// #     const DIGITS: usize = 4;
/// #     type Error = Infallible;
/// #     fn clear(&mut self) -> Result<(), Infallible> { Ok(()) }
/// #     fn show_at(&mut self, _text: &str, _cursor: i16) -> Result<(), Infallible> { Ok(()) }
/// # }
/// # struct Millis(u64);
/// # impl matrix5x6::Clock for Millis {
/// #     fn now_ms(&self) -> u64 { self.0 }
/// # }
/// use matrix5x6::{ScrollConfig, Scroller};
///
/// let mut display = Digits;
/// let mut scroller = Scroller::new();
/// scroller.start("hello", ScrollConfig::default(), &mut display).unwrap();
///
/// let clock = Millis(0);
/// while scroller.poll(&clock, &mut display).unwrap() {
/// #   break;
///     // do other work in the meantime
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Scroller<'a> {
    state: State<'a>,
    config: ScrollConfig,
}

impl<'a> Default for Scroller<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Scroller<'a> {
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            config: ScrollConfig {
                repeat: false,
                delay_ms: DEFAULT_DELAY_MS,
            },
        }
    }

    /// Start scrolling `text`, replacing whatever was scrolling before.
    ///
    /// The display is cleared and the text is set up flush left; the first poll draws it.
    /// Returns `true` if there is something to scroll, `false` if `text` is empty, in which case
    /// the display is left alone and the scroller goes idle.
    pub fn start<D: TextDisplay>(
        &mut self,
        text: &'a str,
        config: ScrollConfig,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        self.config = config;
        self.state = State::Idle;

        if text.is_empty() {
            return Ok(false);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "scrolling {=str} ({=usize} chars), repeat={=bool}, delay={=u32}ms",
            text,
            text.chars().count(),
            config.repeat,
            config.delay_ms
        );

        // A display that can't be cleared leaves the scroller idle
        display.clear()?;
        self.state = State::Scrolling {
            text,
            cursor: 0,
            last_update: None,
        };

        Ok(true)
    }

    /// Advance the scroll if it's due.
    ///
    /// A step the display fails to show is not taken: the cursor and the time of the last update
    /// stay as they were, so the next poll tries the same step again.
    ///
    /// Returns `true` while a session is in progress, including when it isn't yet time to move
    /// the text, and `false` once the text has scrolled off (and for every poll after that) or
    /// if there was never anything to scroll.
    pub fn poll<C: Clock, D: TextDisplay>(
        &mut self,
        clock: &C,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        let State::Scrolling {
            text,
            cursor,
            last_update,
        } = &mut self.state
        else {
            return Ok(false);
        };

        let text: &'a str = *text;
        let now = clock.now_ms();
        if let Some(last) = *last_update {
            if now.saturating_sub(last) < u64::from(self.config.delay_ms) {
                return Ok(true);
            }
        }

        // The last step shows the text one cell past fully scrolled off, and only then is the
        // session over
        let end = end_cursor(text);

        if *cursor > end {
            display.show_at(text, *cursor)?;
            *last_update = Some(now);
            *cursor -= 1;

            #[cfg(feature = "defmt")]
            defmt::trace!("scroll cursor now {=i16}", *cursor);

            return Ok(true);
        }

        display.clear()?;
        *last_update = Some(now);

        if self.config.repeat {
            *cursor = i16::try_from(D::DIGITS).unwrap_or(i16::MAX);

            #[cfg(feature = "defmt")]
            defmt::trace!("scroll repeating");

            Ok(true)
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("scroll done");

            self.state = State::Done;
            Ok(false)
        }
    }

    /// Whether a session is in progress
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Scrolling { .. })
    }

    /// Whether the last session ran to completion
    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    /// Where the first char of the text will be drawn next, if a session is in progress
    pub fn cursor(&self) -> Option<i16> {
        match self.state {
            State::Scrolling { cursor, .. } => Some(cursor),
            _ => None,
        }
    }

    /// When the display last moved, if a session is in progress and has moved at all
    pub fn last_update(&self) -> Option<u64> {
        match self.state {
            State::Scrolling { last_update, .. } => last_update,
            _ => None,
        }
    }

    pub fn config(&self) -> ScrollConfig {
        self.config
    }
}

/// The cursor value at which `text` has fully left the display: `-(len + 1)`
fn end_cursor(text: &str) -> i16 {
    let len = i16::try_from(text.chars().count()).unwrap_or(i16::MAX - 1);
    -(len + 1)
}
