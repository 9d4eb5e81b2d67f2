//! Error and result types shared across the crate.

/// Errors reported while binding a servo to a timer channel.
///
/// Every variant is a construction-time rejection: once a
/// [`Servo`](crate::servo::Servo) exists, its commands cannot fail.
#[derive(Clone, Copy, Debug, derive_more::Display, derive_more::Error, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The pin is not in the servo allow-list; no register was touched.
    #[display("pin {pin} is not available for servo control")]
    PinNotServo {
        /// The refused digital pin number.
        pin: u8,
    },

    /// The pin passed the allow-list but resolves to no output-compare
    /// channel. Pin 10 is the known case: allow-listed, yet its channel
    /// belongs to an 8-bit timer that cannot hold a 20 ms frame.
    #[display("pin {pin} has no output-compare binding")]
    PinUnbound {
        /// The unbound digital pin number.
        pin: u8,
    },

    /// The resolved timer channel is already driven by another controller.
    #[display("timer channel for pin {pin} is already claimed")]
    ChannelClaimed {
        /// The pin whose channel is taken.
        pin: u8,
    },
}

/// Result type used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
