//! Pin-to-timer-channel resolution and waveform configuration.
//!
//! Every supported pin is bound to one output-compare channel of one 16-bit
//! timer. The binding is static data rather than per-timer branching: each
//! entry carries the register addresses the configuration routine needs, and
//! the field positions that differ per channel come from companion lookups on
//! [`OcChannel`]. Programming a binding is therefore one routine, identical
//! for timers 1, 3, and 4.

use crate::fmt::info;
use crate::registers::{Registers, addr};
use portable_atomic::{AtomicU16, Ordering};

// ============================================================================
// Constants
// ============================================================================

/// Counter TOP: 40000 ticks of 0.5 µs = the 20 ms servo frame.
pub const TOP_TICKS: u16 = 40_000;

/// Pulse written at configuration: 3000 ticks = 1.5 ms, the centered position.
pub const NEUTRAL_TICKS: u16 = 3_000;

/// Clock divider programmed into the clock-select field. 16 MHz / 8 gives one
/// tick per 0.5 µs.
pub const PRESCALER: u8 = 8;

// Waveform-generation bit positions, common to the 16-bit timer family.
// Mode 14 (Fast PWM, TOP = ICRn) is WGMn3:0 = 0b1110.
const WGM0: u8 = 0; // TCCRnA
const WGM1: u8 = 1; // TCCRnA
const WGM2: u8 = 3; // TCCRnB
const WGM3: u8 = 4; // TCCRnB

// Clock-select bit positions in TCCRnB. CS = 0b010 selects clk/8.
const CS0: u8 = 0;
const CS1: u8 = 1;
const CS2: u8 = 2;

// ============================================================================
// Timer and channel identifiers
// ============================================================================

/// The 16-bit timers able to hold a 20 ms frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerId {
    /// Timer/Counter 1 (pins 11, 12).
    Timer1,
    /// Timer/Counter 3 (pins 2, 3, 5).
    Timer3,
    /// Timer/Counter 4 (pins 6, 7, 8).
    Timer4,
}

impl TimerId {
    /// Datasheet unit number (1, 3, or 4), for diagnostics.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Timer1 => 1,
            Self::Timer3 => 3,
            Self::Timer4 => 4,
        }
    }

    const fn index(self) -> u8 {
        match self {
            Self::Timer1 => 0,
            Self::Timer3 => 1,
            Self::Timer4 => 2,
        }
    }
}

/// Output-compare channels of a 16-bit timer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OcChannel {
    /// Channel A, COMnA bits 7:6 of TCCRnA.
    A,
    /// Channel B, COMnB bits 5:4 of TCCRnA.
    B,
    /// Channel C, COMnC bits 3:2 of TCCRnA.
    C,
}

impl OcChannel {
    /// Position of this channel's COMnx1 bit within TCCRnA. COMnx0 sits one
    /// bit below.
    #[must_use]
    pub const fn com1_bit(self) -> u8 {
        match self {
            Self::A => 7,
            Self::B => 5,
            Self::C => 3,
        }
    }

    /// Channel letter, for the logging facade.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    const fn index(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }
}

// ============================================================================
// Bindings
// ============================================================================

/// Registers needed to drive one pin from its timer channel.
///
/// Immutable once resolved; the table below holds one entry per supported
/// pin and [`resolve`] hands out references into it.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerBinding {
    /// Digital pin this binding drives.
    pub pin: u8,
    /// Owning timer unit.
    pub timer: TimerId,
    /// Output-compare channel within the timer.
    pub channel: OcChannel,
    /// Control register A (COM and low WGM bits).
    pub tccra: u16,
    /// Control register B (high WGM bits and clock select).
    pub tccrb: u16,
    /// Input capture register, used as TOP.
    pub icr: u16,
    /// This channel's output-compare register.
    pub ocr: u16,
}

/// Pin → timer-channel bindings for every pin with a 16-bit channel.
///
/// Pins 4, 9, 10, and 13 sit on the 8-bit timers 0 and 2, which cannot hold
/// a 40000-tick frame, so they have no entry here.
static PIN_BINDINGS: [TimerBinding; 8] = [
    TimerBinding {
        pin: 2,
        timer: TimerId::Timer3,
        channel: OcChannel::B,
        tccra: addr::TCCR3A,
        tccrb: addr::TCCR3B,
        icr: addr::ICR3,
        ocr: addr::OCR3B,
    },
    TimerBinding {
        pin: 3,
        timer: TimerId::Timer3,
        channel: OcChannel::C,
        tccra: addr::TCCR3A,
        tccrb: addr::TCCR3B,
        icr: addr::ICR3,
        ocr: addr::OCR3C,
    },
    TimerBinding {
        pin: 5,
        timer: TimerId::Timer3,
        channel: OcChannel::A,
        tccra: addr::TCCR3A,
        tccrb: addr::TCCR3B,
        icr: addr::ICR3,
        ocr: addr::OCR3A,
    },
    TimerBinding {
        pin: 6,
        timer: TimerId::Timer4,
        channel: OcChannel::A,
        tccra: addr::TCCR4A,
        tccrb: addr::TCCR4B,
        icr: addr::ICR4,
        ocr: addr::OCR4A,
    },
    TimerBinding {
        pin: 7,
        timer: TimerId::Timer4,
        channel: OcChannel::B,
        tccra: addr::TCCR4A,
        tccrb: addr::TCCR4B,
        icr: addr::ICR4,
        ocr: addr::OCR4B,
    },
    TimerBinding {
        pin: 8,
        timer: TimerId::Timer4,
        channel: OcChannel::C,
        tccra: addr::TCCR4A,
        tccrb: addr::TCCR4B,
        icr: addr::ICR4,
        ocr: addr::OCR4C,
    },
    TimerBinding {
        pin: 11,
        timer: TimerId::Timer1,
        channel: OcChannel::A,
        tccra: addr::TCCR1A,
        tccrb: addr::TCCR1B,
        icr: addr::ICR1,
        ocr: addr::OCR1A,
    },
    TimerBinding {
        pin: 12,
        timer: TimerId::Timer1,
        channel: OcChannel::B,
        tccra: addr::TCCR1A,
        tccrb: addr::TCCR1B,
        icr: addr::ICR1,
        ocr: addr::OCR1B,
    },
];

/// Look up the timer binding for a digital pin.
///
/// Returns `None` for pins with no 16-bit output-compare channel - including
/// pin 10, which passes the servo allow-list but lives on 8-bit timer 2. The
/// allow-list and this table intentionally disagree there; see
/// [`unbound_servo_pins`].
#[must_use]
pub fn resolve(pin: u8) -> Option<&'static TimerBinding> {
    PIN_BINDINGS.iter().find(|binding| binding.pin == pin)
}

/// Servo-eligible pins that resolve to no binding.
///
/// The allow-list ships with pin 10 in it even though pin 10 has no 16-bit
/// channel. This audit keeps the mismatch visible to tests instead of
/// reconciling the two sets.
pub fn unbound_servo_pins() -> impl Iterator<Item = u8> {
    crate::servo::SERVO_PINS
        .into_iter()
        .filter(|&pin| resolve(pin).is_none())
}

// ============================================================================
// Configuration
// ============================================================================

/// Program the binding's timer for the 20 ms servo frame.
///
/// The same sequence applies to every binding: clear the waveform and
/// clock-select fields, select Fast PWM with TOP = ICRn (mode 14), put the
/// bound channel in non-inverted PWM (clear on compare match, set at TOP),
/// start the clock at clk/8, then write TOP = 40000 and a centered 3000-tick
/// pulse. Cannot fail for a binding obtained from [`resolve`].
///
/// Bits outside the programmed fields are preserved, so configuring one
/// channel leaves a sibling channel's COM bits alone.
pub fn configure<R: Registers>(binding: &TimerBinding, regs: &R) {
    // Clock off and waveform fields cleared while reprogramming.
    regs.update8(binding.tccra, |v| v & !(1 << WGM0 | 1 << WGM1));
    regs.update8(binding.tccrb, |v| v & !(1 << WGM2 | 1 << WGM3));
    regs.update8(binding.tccrb, |v| v & !(1 << CS0 | 1 << CS1 | 1 << CS2));

    // Fast PWM, TOP = ICRn.
    regs.update8(binding.tccra, |v| v | 1 << WGM1);
    regs.update8(binding.tccrb, |v| v | 1 << WGM3 | 1 << WGM2);

    // Non-inverted PWM on the bound channel only.
    let com1 = binding.channel.com1_bit();
    regs.update8(binding.tccra, |v| v & !(1 << com1 | 1 << (com1 - 1)));
    regs.update8(binding.tccra, |v| v | 1 << com1);

    // clk/8: one tick per 0.5 µs.
    regs.update8(binding.tccrb, |v| v | 1 << CS1);

    regs.write16(binding.icr, TOP_TICKS);
    regs.write16(binding.ocr, NEUTRAL_TICKS);

    info!(
        "timer{} channel {} configured: TCCRA={:#x} TCCRB={:#x} prescaler={} top={} compare={}",
        binding.timer.number(),
        binding.channel.as_str(),
        regs.read8(binding.tccra),
        regs.read8(binding.tccrb),
        PRESCALER,
        regs.read16(binding.icr),
        regs.read16(binding.ocr),
    );
}

// ============================================================================
// Channel ownership
// ============================================================================

/// Construction-time registry of claimed timer-channel pairs.
///
/// The hardware has no defense against two controllers programming the same
/// compare channel; claiming here turns that into a construction error. One
/// bit per pair, nine pairs across the three timers.
pub struct ChannelClaims {
    bits: AtomicU16,
}

impl ChannelClaims {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bits: AtomicU16::new(0),
        }
    }

    /// Whether the pair is currently claimed.
    #[must_use]
    pub fn is_claimed(&self, timer: TimerId, channel: OcChannel) -> bool {
        (self.bits.load(Ordering::SeqCst) & pair_bit(timer, channel)) != 0
    }

    /// Claim a pair. Returns `false` if it was already claimed.
    pub(crate) fn claim(&self, timer: TimerId, channel: OcChannel) -> bool {
        let bit = pair_bit(timer, channel);
        (self.bits.fetch_or(bit, Ordering::SeqCst) & bit) == 0
    }

    /// Return a pair to the pool.
    pub(crate) fn release(&self, timer: TimerId, channel: OcChannel) {
        self.bits.fetch_and(!pair_bit(timer, channel), Ordering::SeqCst);
    }
}

impl Default for ChannelClaims {
    fn default() -> Self {
        Self::new()
    }
}

const fn pair_bit(timer: TimerId, channel: OcChannel) -> u16 {
    1 << (timer.index() * 3 + channel.index())
}

/// Process-wide claim registry used by [`Servo::new`](crate::servo::Servo::new).
pub static CLAIMS: ChannelClaims = ChannelClaims::new();
