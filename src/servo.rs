//! A device abstraction for SG90 servo motors.
//!
//! Construction binds a pin to its timer channel and programs the 20 ms
//! frame; after that each angle command is a single compare-register write.
//! See [`Servo`] for usage examples.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use crate::fmt::{info, warn};
use crate::pinout::{self, PinDescriptor};
use crate::registers::Registers;
use crate::timer::{self, ChannelClaims, NEUTRAL_TICKS, PRESCALER, TOP_TICKS, TimerBinding};
use crate::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Pins accepted for servo control.
///
/// This is the allow-list the hardware bring-up validated, kept verbatim: it
/// contains pin 10, which never resolves to a 16-bit timer channel, and it
/// omits pin 8, which would. See [`timer::unbound_servo_pins`] for the audit
/// of the difference.
pub const SERVO_PINS: [u8; 8] = [2, 3, 5, 6, 7, 10, 11, 12];

/// Pulse width commanded at 0 degrees (microseconds).
pub const PULSE_MIN_US: u16 = 544;

/// Pulse width commanded at 180 degrees (microseconds).
pub const PULSE_MAX_US: u16 = 2_400;

/// Membership test against [`SERVO_PINS`]. Pure; touches no hardware.
#[must_use]
pub fn is_servo_pin(pin: u8) -> bool {
    SERVO_PINS.contains(&pin)
}

// ============================================================================
// Angle mapping
// ============================================================================

/// Map degrees to pulse width in microseconds.
///
/// Linear from 544 µs at 0° to 2400 µs at 180°, with truncating integer
/// division. There is no clamp: inputs above 180 extrapolate on the same
/// line (255 → 3173 µs), which still fits the 16-bit compare register, so
/// the historical unclamped behavior is kept rather than fixed.
#[must_use]
pub const fn pulse_us(degrees: u8) -> u16 {
    let span = (PULSE_MAX_US - PULSE_MIN_US) as u32;
    (PULSE_MIN_US as u32 + degrees as u32 * span / 180) as u16
}

/// Map degrees to compare-register ticks. One tick is 0.5 µs, so ticks are
/// twice the microseconds.
#[must_use]
pub const fn pulse_ticks(degrees: u8) -> u16 {
    pulse_us(degrees) * 2
}

// ============================================================================
// Servo Virtual Device
// ============================================================================

/// A device abstraction for one SG90 servo bound to a timer channel.
///
/// Construction walks the gates in order - allow-list, pin bring-up, timer
/// resolution, channel claim, waveform configuration - and returns an error
/// before touching the timer if any gate fails. A constructed `Servo` is
/// therefore always ready: every angle command reaches the hardware.
///
/// Dropping a servo releases its channel claim but leaves the waveform
/// running at the last commanded pulse.
///
/// # Example
///
/// ```rust
/// use mega_servo::registers::MemRegisters;
/// use mega_servo::servo::Servo;
/// use mega_servo::timer::ChannelClaims;
///
/// # fn main() -> mega_servo::Result<()> {
/// let regs = MemRegisters::new();
/// let claims = ChannelClaims::new();
///
/// // Pin 11 drives output-compare channel A of timer 1.
/// let mut servo = Servo::with_claims(11, &regs, &claims)?;
///
/// servo.set_degrees(45); // move to 45 degrees
/// servo.center(); // back to the midpoint
///
/// // Pin 4 sits on an 8-bit timer and is refused up front.
/// assert!(Servo::with_claims(4, &regs, &claims).is_err());
/// # Ok(())
/// # }
/// ```
pub struct Servo<'a, R: Registers> {
    regs: &'a R,
    claims: &'a ChannelClaims,
    binding: &'static TimerBinding,
    descriptor: &'static PinDescriptor,
    degrees: Option<u8>,
    pulse_us: u16,
    ticks: u16,
}

impl<'a, R: Registers> Servo<'a, R> {
    /// Create a servo on `pin`, claiming its channel in the process-wide
    /// registry.
    ///
    /// See the [struct-level example](Self) for usage.
    ///
    /// # Errors
    ///
    /// [`Error::PinNotServo`] if the pin is not allow-listed (nothing is
    /// written), [`Error::PinUnbound`] if it resolves to no timer channel
    /// (pin 10; only the pin's DDR/PORT bits were touched), and
    /// [`Error::ChannelClaimed`] if another live controller owns the channel.
    pub fn new(pin: u8, regs: &'a R) -> Result<Self> {
        Self::with_claims(pin, regs, &timer::CLAIMS)
    }

    /// Create a servo with an explicit claim registry.
    ///
    /// Host tests use this to stay isolated from the process-wide registry;
    /// on the chip there is rarely a reason to prefer it over [`Self::new`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_claims(pin: u8, regs: &'a R, claims: &'a ChannelClaims) -> Result<Self> {
        if !is_servo_pin(pin) {
            warn!("pin {} refused: not in the servo allow-list", pin);
            return Err(Error::PinNotServo { pin });
        }
        let descriptor = pinout::lookup(pin).ok_or(Error::PinNotServo { pin })?;

        // Pin bring-up: output mode, driven low until the waveform starts.
        regs.update8(descriptor.ddr, |v| v | descriptor.mask);
        regs.update8(descriptor.port, |v| v & !descriptor.mask);

        let Some(binding) = timer::resolve(pin) else {
            warn!(
                "pin {} ({}) refused: allow-listed but no output-compare binding",
                pin, descriptor.name
            );
            return Err(Error::PinUnbound { pin });
        };

        if !claims.claim(binding.timer, binding.channel) {
            warn!(
                "pin {} refused: timer{} channel {} already claimed",
                pin,
                binding.timer.number(),
                binding.channel.as_str()
            );
            return Err(Error::ChannelClaimed { pin });
        }

        timer::configure(binding, regs);

        info!(
            "servo ready on pin {} ({}, {}): port={:#x} mask={:#x} timer{} channel {}",
            pin,
            descriptor.name,
            descriptor.family.as_str(),
            descriptor.port,
            descriptor.mask,
            binding.timer.number(),
            binding.channel.as_str()
        );

        Ok(Self {
            regs,
            claims,
            binding,
            descriptor,
            degrees: None,
            pulse_us: NEUTRAL_TICKS / 2,
            ticks: NEUTRAL_TICKS,
        })
    }

    /// Command an angle and return the tick count written to the compare
    /// register.
    ///
    /// A constructed servo is always bound and configured, so the write
    /// cannot fail. Angles above 180 extrapolate; see [`pulse_us`].
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn set_degrees(&mut self, degrees: u8) -> u16 {
        let us = pulse_us(degrees);
        let ticks = pulse_ticks(degrees);
        self.regs.write16(self.binding.ocr, ticks);
        self.degrees = Some(degrees);
        self.pulse_us = us;
        self.ticks = ticks;
        info!(
            "servo pin {}: {}° -> {} µs, compare={}",
            self.descriptor.number, degrees, us, ticks
        );
        ticks
    }

    /// Move to the midpoint of the travel range (90°).
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn center(&mut self) -> u16 {
        self.set_degrees(90)
    }

    /// Last commanded angle, or `None` if only the configuration-time
    /// neutral pulse has been written so far.
    #[must_use]
    pub fn degrees(&self) -> Option<u8> {
        self.degrees
    }

    /// Pulse width currently on the wire, in microseconds.
    #[must_use]
    pub fn pulse_width_us(&self) -> u16 {
        self.pulse_us
    }

    /// Tick count last written to the compare register.
    #[must_use]
    pub fn ticks(&self) -> u16 {
        self.ticks
    }

    /// The clock divider the frame runs at.
    #[must_use]
    pub const fn prescaler(&self) -> u8 {
        PRESCALER
    }

    /// The resolved timer binding.
    #[must_use]
    pub fn binding(&self) -> &'static TimerBinding {
        self.binding
    }

    /// The pin's wiring metadata.
    #[must_use]
    pub fn descriptor(&self) -> &'static PinDescriptor {
        self.descriptor
    }
}

impl<R: Registers> Drop for Servo<'_, R> {
    fn drop(&mut self) {
        // The waveform keeps running; only the claim is returned.
        self.claims
            .release(self.binding.timer, self.binding.channel);
    }
}

impl<R: Registers> ErrorType for Servo<'_, R> {
    type Error = Infallible;
}

/// Raw duty-cycle access for ecosystem drivers, in ticks against the
/// 40000-tick frame. Bypasses the angle mapping.
impl<R: Registers> SetDutyCycle for Servo<'_, R> {
    fn max_duty_cycle(&self) -> u16 {
        TOP_TICKS
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let ticks = duty.min(TOP_TICKS);
        self.regs.write16(self.binding.ocr, ticks);
        self.degrees = None;
        self.pulse_us = ticks / 2;
        self.ticks = ticks;
        Ok(())
    }
}
