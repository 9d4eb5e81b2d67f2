#![allow(missing_docs)]
#![cfg(feature = "host")]
//! Host-level tests for the angle → pulse-width mapping.

use mega_servo::servo::{PULSE_MAX_US, PULSE_MIN_US, pulse_ticks, pulse_us};

#[test]
fn endpoints_match_the_pulse_constants() {
    assert_eq!(pulse_us(0), PULSE_MIN_US);
    assert_eq!(pulse_us(180), PULSE_MAX_US);
}

#[test]
fn reference_angles_match_the_table() {
    // Fixed reference values (truncating division), not re-derived.
    const EXPECTED: [(u8, u16, u16); 9] = [
        (0, 544, 1_088),
        (1, 554, 1_108),
        (29, 843, 1_686),
        (45, 1_008, 2_016),
        (90, 1_472, 2_944),
        (91, 1_482, 2_964),
        (135, 1_936, 3_872),
        (179, 2_389, 4_778),
        (180, 2_400, 4_800),
    ];
    for (degrees, us, ticks) in EXPECTED {
        assert_eq!(pulse_us(degrees), us, "{degrees}°");
        assert_eq!(pulse_ticks(degrees), ticks, "{degrees}°");
    }
}

#[test]
fn angles_above_180_extrapolate_unclamped() {
    assert_eq!(pulse_us(181), 2_410);
    assert_eq!(pulse_us(200), 2_606);
    assert_eq!(pulse_us(255), 3_173);
    // Worst case still fits a 16-bit compare register with room to spare.
    assert_eq!(pulse_ticks(255), 6_346);
}

#[test]
fn mapping_is_monotonic() {
    for degrees in 0..u8::MAX {
        assert!(
            pulse_us(degrees + 1) >= pulse_us(degrees),
            "{degrees}° -> {}°",
            degrees + 1
        );
    }
}

#[test]
fn ticks_are_twice_the_microseconds() {
    for degrees in [0u8, 37, 90, 180, 255] {
        assert_eq!(pulse_ticks(degrees), pulse_us(degrees) * 2, "{degrees}°");
    }
}
