#![allow(missing_docs)]
#![cfg(feature = "host")]
//! Host-level tests for pin → timer-channel resolution and configuration.

use mega_servo::registers::{MemRegisters, Registers, addr};
use mega_servo::servo::is_servo_pin;
use mega_servo::timer::{self, NEUTRAL_TICKS, TOP_TICKS};

#[test]
fn resolve_matches_the_datasheet_map() {
    // (pin, timer number, channel letter, OCR address)
    const EXPECTED: [(u8, u8, &str, u16); 8] = [
        (2, 3, "B", addr::OCR3B),
        (3, 3, "C", addr::OCR3C),
        (5, 3, "A", addr::OCR3A),
        (6, 4, "A", addr::OCR4A),
        (7, 4, "B", addr::OCR4B),
        (8, 4, "C", addr::OCR4C),
        (11, 1, "A", addr::OCR1A),
        (12, 1, "B", addr::OCR1B),
    ];
    for (pin, number, channel, ocr) in EXPECTED {
        let binding = timer::resolve(pin).expect("supported pin");
        assert_eq!(binding.pin, pin);
        assert_eq!(binding.timer.number(), number, "pin {pin}");
        assert_eq!(binding.channel.as_str(), channel, "pin {pin}");
        assert_eq!(binding.ocr, ocr, "pin {pin}");
    }
}

#[test]
fn unsupported_pins_do_not_resolve() {
    for pin in [0u8, 1, 4, 9, 10, 13, 44, 255] {
        assert!(timer::resolve(pin).is_none(), "pin {pin}");
    }
}

#[test]
fn configure_programs_frame_and_channel() {
    for pin in [2u8, 3, 5, 6, 7, 8, 11, 12] {
        let regs = MemRegisters::new();
        let binding = timer::resolve(pin).expect("supported pin");
        timer::configure(binding, &regs);

        // WGM = 0b1110 (Fast PWM, TOP = ICRn), CS = 0b010 (clk/8), and the
        // bound channel's COM pair at 10 (clear on compare match, set at TOP).
        let com1 = binding.channel.com1_bit();
        assert_eq!(regs.read8(binding.tccra), 1 << 1 | 1 << com1, "pin {pin}");
        assert_eq!(
            regs.read8(binding.tccrb),
            1 << 4 | 1 << 3 | 1 << 1,
            "pin {pin}"
        );
        assert_eq!(regs.read16(binding.icr), TOP_TICKS, "pin {pin}");
        assert_eq!(regs.read16(binding.ocr), NEUTRAL_TICKS, "pin {pin}");
    }
}

#[test]
fn configure_preserves_unrelated_control_bits() {
    let regs = MemRegisters::new();
    let binding = timer::resolve(2).expect("pin 2"); // timer 3, channel B
    regs.write8(binding.tccra, 0xFF);
    regs.write8(binding.tccrb, 0xFF);
    timer::configure(binding, &regs);

    // Channel B's COM pair (bits 5:4) is rewritten; A and C keep theirs.
    assert_eq!(regs.read8(binding.tccra), 0b1110_1110);
    // Input-capture bits 7:6 and the reserved bit 5 survive.
    assert_eq!(regs.read8(binding.tccrb), 0b1111_1010);
}

#[test]
fn pin10_is_eligible_but_unbound() {
    assert!(is_servo_pin(10));
    assert!(timer::resolve(10).is_none());
}

#[test]
fn audit_reports_exactly_pin10() {
    let unbound: Vec<u8> = timer::unbound_servo_pins().collect();
    assert_eq!(unbound, [10]);
}

#[test]
fn every_other_eligible_pin_is_bound() {
    for pin in mega_servo::servo::SERVO_PINS {
        if pin == 10 {
            continue;
        }
        assert!(timer::resolve(pin).is_some(), "pin {pin}");
    }
}
