//! Static pin metadata for the Mega 2560 PWM header pins.
//!
//! This table is read-only wiring data: which port and bit a digital pin
//! lives on, and which timer family owns its output-compare channel. The
//! servo code reads it for pin bring-up and diagnostics; it never writes it.

use crate::registers::addr;

/// Timer family behind a pin's output-compare channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinFamily {
    /// 16-bit timer: long frames, servo-grade resolution.
    #[display("16-bit PWM")]
    Pwm16,
    /// 8-bit timer: fast PWM for LEDs and fans, no 20 ms frame.
    #[display("8-bit PWM")]
    Pwm8,
}

impl PinFamily {
    /// Family name as a plain string, for the logging facade.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pwm16 => "16-bit PWM",
            Self::Pwm8 => "8-bit PWM",
        }
    }
}

/// Identity and port wiring of one digital pin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinDescriptor {
    /// Digital pin number on the board silkscreen.
    pub number: u8,
    /// Port bit and output-compare name, e.g. `"PE4/OC3B"`.
    pub name: &'static str,
    /// Timer family grouping, used in diagnostics.
    pub family: PinFamily,
    /// Output port data register.
    pub port: u16,
    /// Data-direction register.
    pub ddr: u16,
    /// Bit mask of this pin within its port.
    pub mask: u8,
}

/// The board's PWM-capable header pins, 2 through 13.
pub static PINOUT: [PinDescriptor; 12] = [
    PinDescriptor {
        number: 2,
        name: "PE4/OC3B",
        family: PinFamily::Pwm16,
        port: addr::PORTE,
        ddr: addr::DDRE,
        mask: 1 << 4,
    },
    PinDescriptor {
        number: 3,
        name: "PE5/OC3C",
        family: PinFamily::Pwm16,
        port: addr::PORTE,
        ddr: addr::DDRE,
        mask: 1 << 5,
    },
    PinDescriptor {
        number: 4,
        name: "PG5/OC0B",
        family: PinFamily::Pwm8,
        port: addr::PORTG,
        ddr: addr::DDRG,
        mask: 1 << 5,
    },
    PinDescriptor {
        number: 5,
        name: "PE3/OC3A",
        family: PinFamily::Pwm16,
        port: addr::PORTE,
        ddr: addr::DDRE,
        mask: 1 << 3,
    },
    PinDescriptor {
        number: 6,
        name: "PH3/OC4A",
        family: PinFamily::Pwm16,
        port: addr::PORTH,
        ddr: addr::DDRH,
        mask: 1 << 3,
    },
    PinDescriptor {
        number: 7,
        name: "PH4/OC4B",
        family: PinFamily::Pwm16,
        port: addr::PORTH,
        ddr: addr::DDRH,
        mask: 1 << 4,
    },
    PinDescriptor {
        number: 8,
        name: "PH5/OC4C",
        family: PinFamily::Pwm16,
        port: addr::PORTH,
        ddr: addr::DDRH,
        mask: 1 << 5,
    },
    PinDescriptor {
        number: 9,
        name: "PB3/OC2B",
        family: PinFamily::Pwm8,
        port: addr::PORTB,
        ddr: addr::DDRB,
        mask: 1 << 3,
    },
    PinDescriptor {
        number: 10,
        name: "PB4/OC2A",
        family: PinFamily::Pwm8,
        port: addr::PORTB,
        ddr: addr::DDRB,
        mask: 1 << 4,
    },
    PinDescriptor {
        number: 11,
        name: "PB5/OC1A",
        family: PinFamily::Pwm16,
        port: addr::PORTB,
        ddr: addr::DDRB,
        mask: 1 << 5,
    },
    PinDescriptor {
        number: 12,
        name: "PB6/OC1B",
        family: PinFamily::Pwm16,
        port: addr::PORTB,
        ddr: addr::DDRB,
        mask: 1 << 6,
    },
    PinDescriptor {
        number: 13,
        name: "PB7/OC0A",
        family: PinFamily::Pwm8,
        port: addr::PORTB,
        ddr: addr::DDRB,
        mask: 1 << 7,
    },
];

/// Look up the descriptor for a digital pin.
#[must_use]
pub fn lookup(pin: u8) -> Option<&'static PinDescriptor> {
    PINOUT.iter().find(|descriptor| descriptor.number == pin)
}
