//! Time of day from a DS1307 (or compatible, like the DS3231) real-time clock on the I2C bus.
//!
//! Only the first three registers are used: seconds, minutes and hours, all BCD encoded.

use core::fmt::Write;

use embedded_hal_1::i2c::{Error as _, ErrorKind, I2c};
use heapless::String;

/// The fixed I2C address of the DS1307
pub const ADDRESS: u8 = 0x68;

/// Register holding the seconds, followed by minutes and hours
const REG_SECONDS: u8 = 0x00;

/// In the seconds register, the clock halt bit.  Not part of the value
const CLOCK_HALT: u8 = 0b1000_0000;

/// In the hours register, set when the clock runs in 12 hour mode
const TWELVE_HOUR: u8 = 0b0100_0000;

/// In the hours register in 12 hour mode, set for PM
const PM: u8 = 0b0010_0000;

/// Convert a two-digit BCD value to binary
pub fn bcd_to_u8(value: u8) -> u8 {
    value - 6 * (value >> 4)
}

/// Convert a binary value from 0 to 99 to two-digit BCD.  Larger values give a meaningless
/// result, but never panic.
pub fn u8_to_bcd(value: u8) -> u8 {
    value.wrapping_add(6 * (value / 10))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError<E> {
    /// The I2C transaction failed
    Bus(E),

    /// Nothing acknowledged the clock's address
    NotFound,

    /// The time read from the clock, or given to set it to, is out of range
    InvalidTime,
}

/// A time of day, 24 hour clock
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    fn is_valid(&self) -> bool {
        self.hours < 24 && self.minutes < 60 && self.seconds < 60
    }

    /// The time as `HH:MM`, ready to be scrolled across a display
    pub fn label(&self) -> String<8> {
        let mut label = String::new();
        // Five chars always fit
        let _ = write!(label, "{:02}:{:02}", self.hours, self.minutes);
        label
    }
}

/// Driver for the clock, generic over any `embedded-hal` I2C implementation
pub struct Rtc<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Rtc<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Check that the clock answers on the bus.  Only a missing acknowledge counts as
    /// [`RtcError::NotFound`]; any other failure is reported as the bus error it is.
    pub fn probe(&mut self) -> Result<(), RtcError<I2C::Error>> {
        self.i2c.write(ADDRESS, &[]).map_err(|e| match e.kind() {
            ErrorKind::NoAcknowledge(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("No I2C device found at address {=u8:#x}", ADDRESS);

                RtcError::NotFound
            }
            _ => RtcError::Bus(e),
        })
    }

    /// Read the current time
    pub fn time(&mut self) -> Result<TimeOfDay, RtcError<I2C::Error>> {
        let mut registers = [0u8; 3];
        self.i2c
            .write_read(ADDRESS, &[REG_SECONDS], &mut registers)
            .map_err(RtcError::Bus)?;

        let [seconds, minutes, hours] = registers;

        let hours = if hours & TWELVE_HOUR != 0 {
            // 12 hour mode counts 12, 1, 2, ... 11
            let hour = bcd_to_u8(hours & 0b0001_1111) % 12;
            if hours & PM != 0 {
                hour + 12
            } else {
                hour
            }
        } else {
            bcd_to_u8(hours & 0b0011_1111)
        };

        let time = TimeOfDay {
            hours,
            minutes: bcd_to_u8(minutes & 0b0111_1111),
            seconds: bcd_to_u8(seconds & !CLOCK_HALT),
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("rtc registers {=[u8]:x} -> {}", &registers[..], time);

        if time.is_valid() {
            Ok(time)
        } else {
            Err(RtcError::InvalidTime)
        }
    }

    /// Set the time to `hours:minutes:00`, in 24 hour mode.  This also clears the clock halt bit,
    /// so a clock that was stopped starts running.
    pub fn set_time(&mut self, hours: u8, minutes: u8) -> Result<(), RtcError<I2C::Error>> {
        let time = TimeOfDay {
            hours,
            minutes,
            seconds: 0,
        };
        if !time.is_valid() {
            return Err(RtcError::InvalidTime);
        }

        self.i2c
            .write(
                ADDRESS,
                &[REG_SECONDS, 0, u8_to_bcd(minutes), u8_to_bcd(hours)],
            )
            .map_err(RtcError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_1::i2c::{ErrorType, NoAcknowledgeSource, Operation};

    /// Register file of a clock chip, with the register pointer auto-incrementing like the real
    /// thing
    struct FakeClockChip {
        present: bool,
        /// Fail every transaction with this, whether or not the chip is present
        fault: Option<ErrorKind>,
        registers: [u8; 8],
        pointer: usize,
    }

    impl FakeClockChip {
        fn with_registers(seconds: u8, minutes: u8, hours: u8) -> Self {
            let mut registers = [0u8; 8];
            registers[..3].copy_from_slice(&[seconds, minutes, hours]);
            Self {
                present: true,
                fault: None,
                registers,
                pointer: 0,
            }
        }
    }

    impl ErrorType for FakeClockChip {
        type Error = ErrorKind;
    }

    impl I2c for FakeClockChip {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if let Some(fault) = self.fault {
                return Err(fault);
            }
            if !self.present || address != ADDRESS {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }

            for operation in operations {
                match operation {
                    Operation::Write(bytes) => {
                        if let Some((pointer, data)) = bytes.split_first() {
                            self.pointer = *pointer as usize;
                            for byte in data {
                                self.registers[self.pointer] = *byte;
                                self.pointer += 1;
                            }
                        }
                    }
                    Operation::Read(buffer) => {
                        for byte in buffer.iter_mut() {
                            *byte = self.registers[self.pointer];
                            self.pointer += 1;
                        }
                    }
                }
            }

            Ok(())
        }
    }

    #[test]
    fn bcd_conversions() {
        for value in 0..100u8 {
            let bcd = u8_to_bcd(value);
            assert_eq!(bcd >> 4, value / 10);
            assert_eq!(bcd & 0x0f, value % 10);
            assert_eq!(bcd_to_u8(bcd), value);
        }
        assert_eq!(u8_to_bcd(59), 0x59);
        assert_eq!(bcd_to_u8(0x23), 23);

        // Out of range, but no overflow
        for value in 100..=u8::MAX {
            let _ = u8_to_bcd(value);
        }
        for value in 0..=u8::MAX {
            let _ = bcd_to_u8(value);
        }
    }

    #[test]
    fn reads_24_hour_time() {
        let mut rtc = Rtc::new(FakeClockChip::with_registers(0x07, 0x34, 0x12));
        assert_eq!(
            rtc.time(),
            Ok(TimeOfDay {
                hours: 12,
                minutes: 34,
                seconds: 7
            })
        );

        // The clock halt bit isn't part of the seconds
        let mut rtc = Rtc::new(FakeClockChip::with_registers(0x80 | 0x45, 0x00, 0x23));
        let time = rtc.time().unwrap();
        assert_eq!((time.hours, time.minutes, time.seconds), (23, 0, 45));
    }

    #[test]
    fn reads_12_hour_time() {
        struct TestCase {
            register: u8,
            hours: u8,
        }

        const TEST_CASES: &[TestCase] = &[
            // 12 AM is midnight
            TestCase {
                register: TWELVE_HOUR | 0x12,
                hours: 0,
            },
            TestCase {
                register: TWELVE_HOUR | 0x09,
                hours: 9,
            },
            // 12 PM is noon
            TestCase {
                register: TWELVE_HOUR | PM | 0x12,
                hours: 12,
            },
            TestCase {
                register: TWELVE_HOUR | PM | 0x11,
                hours: 23,
            },
        ];

        for tc in TEST_CASES {
            let mut rtc = Rtc::new(FakeClockChip::with_registers(0, 0, tc.register));
            assert_eq!(rtc.time().unwrap().hours, tc.hours, "register {:#04x}", tc.register);
        }
    }

    #[test]
    fn garbage_registers_are_rejected() {
        let mut rtc = Rtc::new(FakeClockChip::with_registers(0x00, 0x7A, 0x10));
        assert_eq!(rtc.time(), Err(RtcError::InvalidTime));
    }

    #[test]
    fn set_time_writes_bcd_and_restarts_the_clock() {
        let mut rtc = Rtc::new(FakeClockChip::with_registers(0x80 | 0x30, 0, 0));
        rtc.set_time(21, 5).unwrap();

        let chip = rtc.release();
        assert_eq!(&chip.registers[..3], &[0x00, 0x05, 0x21]);

        let mut rtc = Rtc::new(chip);
        assert_eq!(rtc.time().unwrap().label().as_str(), "21:05");
    }

    #[test]
    fn set_time_rejects_impossible_times() {
        let mut rtc = Rtc::new(FakeClockChip::with_registers(0, 0, 0));
        assert_eq!(rtc.set_time(24, 0), Err(RtcError::InvalidTime));
        assert_eq!(rtc.set_time(0, 60), Err(RtcError::InvalidTime));
        assert_eq!(rtc.release().registers[..3], [0, 0, 0]);
    }

    #[test]
    fn missing_clock() {
        let mut chip = FakeClockChip::with_registers(0, 0, 0);
        chip.present = false;
        let mut rtc = Rtc::new(chip);

        assert_eq!(rtc.probe(), Err(RtcError::NotFound));
        assert_eq!(
            rtc.time(),
            Err(RtcError::Bus(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address
            )))
        );
    }

    #[test]
    fn probe_keeps_other_bus_errors() {
        for fault in [ErrorKind::ArbitrationLoss, ErrorKind::Bus, ErrorKind::Other] {
            let mut chip = FakeClockChip::with_registers(0, 0, 0);
            chip.fault = Some(fault);
            let mut rtc = Rtc::new(chip);

            assert_eq!(rtc.probe(), Err(RtcError::Bus(fault)), "{fault:?}");
        }

        let mut chip = FakeClockChip::with_registers(0, 0, 0);
        chip.fault = Some(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown));
        assert_eq!(Rtc::new(chip).probe(), Err(RtcError::NotFound));

        assert_eq!(Rtc::new(FakeClockChip::with_registers(0, 0, 0)).probe(), Ok(()));
    }

    #[test]
    fn label_pads_with_zeros() {
        let time = TimeOfDay {
            hours: 7,
            minutes: 3,
            seconds: 59,
        };
        assert_eq!(time.label().as_str(), "07:03");
    }
}
