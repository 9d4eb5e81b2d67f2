//! Logging facade: `defmt` on the chip, `log` on the host.
//!
//! Modules import `info!`/`warn!` from here so call sites read the same in
//! both configurations. Arguments are kept to integers and string slices,
//! which both back ends format identically.

#[cfg(feature = "host")]
pub(crate) use log::{info, warn};

#[cfg(all(feature = "defmt", not(feature = "host")))]
pub(crate) use defmt::{info, warn};
