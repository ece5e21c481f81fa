//! Ticker clock on an RP2040 board like the Pi Pico: read the time from a DS1307 on I2C0 and
//! scroll it across both the 5x6 dot matrix and a 4 digit display, while an LED pattern runs.
//!
//! The LED controller and I/O expander drivers aren't part of this demo, so their output goes to
//! the defmt log instead.

#![no_std]
#![no_main]

use core::convert::Infallible;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_time::Timer;
use heapless::String;
use {defmt_rtt as _, panic_probe as _};

use matrix5x6::{
    EmbassyTimeClock, LedBank, Matrix5x6, Orientation, PatternPlayer, Rtc, ScrollConfig,
    Scroller, SegmentSink, SegmentTextDisplay,
};

/// Logs segment masks rather than sending them to a controller
struct LogSink(&'static str);

impl SegmentSink for LogSink {
    type Error = Infallible;

    fn set_segments(&mut self, mask: u8, position: u8) -> Result<(), Self::Error> {
        trace!("{=str} grid {=u8} <- {=u8:08b}", self.0, position, mask);
        Ok(())
    }
}

/// Logs the LED states rather than sending them to an I/O expander
struct LogBank;

impl LedBank for LogBank {
    type Error = Infallible;

    fn show(&mut self, leds: u8) -> Result<(), Self::Error> {
        debug!("leds {=u8:08b}", leds);
        Ok(())
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let mut rtc = Rtc::new(i2c);
    if let Err(e) = rtc.probe() {
        error!("RTC missing: {}", e);
    }

    let clock = EmbassyTimeClock;
    let mut matrix = Matrix5x6::new(LogSink("matrix"), Orientation::Mirrored);
    let mut digits: SegmentTextDisplay<LogSink> = SegmentTextDisplay::new(LogSink("digits"));
    let mut leds = LogBank;
    let mut pattern = PatternPlayer::new();

    // Check all pixels and LEDs work
    matrix.fill_screen(true).unwrap();
    digits.print("boot").unwrap();
    for frame in matrix5x6::pattern::sweep_frames() {
        leds.show(frame).unwrap();
        Timer::after_millis(10).await;
    }
    matrix.fill_screen(false).unwrap();
    pattern.set_pattern(0, 0).unwrap();

    loop {
        let label: String<8> = match rtc.time() {
            Ok(time) => time.label(),
            Err(e) => {
                warn!("Failed to read the time: {}", e);
                let mut label = String::new();
                label.push_str("--:--").unwrap();
                label
            }
        };
        info!("time {=str}", label.as_str());

        let config = ScrollConfig::default();
        let mut on_matrix = Scroller::new();
        let mut on_digits = Scroller::new();
        on_matrix.start(&label, config, &mut matrix).unwrap();
        on_digits.start(&label, config, &mut digits).unwrap();

        loop {
            let matrix_busy = on_matrix.poll(&clock, &mut matrix).unwrap();
            let digits_busy = on_digits.poll(&clock, &mut digits).unwrap();
            pattern.poll(&clock, &mut leds).unwrap();

            if !matrix_busy && !digits_busy {
                break;
            }

            Timer::after_millis(10).await;
        }
    }
}
