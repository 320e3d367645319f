//! Per-chip constants, selected at compile time via feature flags.
//!
//! Both supported chips expose the host link through the built-in
//! USB-Serial-JTAG controller, whose bulk endpoints carry 64-byte packets.

#[cfg(feature = "esp32s3")]
mod hw {
    pub const USB_PACKET_SIZE: usize = 64;
    pub const BOARD_NAME: &str = "esp32s3";
}

#[cfg(all(feature = "esp32c3", not(feature = "esp32s3")))]
mod hw {
    pub const USB_PACKET_SIZE: usize = 64;
    pub const BOARD_NAME: &str = "esp32c3";
}

#[cfg(not(any(feature = "esp32s3", feature = "esp32c3")))]
mod hw {
    pub const USB_PACKET_SIZE: usize = 64;
    pub const BOARD_NAME: &str = "unknown";
}

pub use hw::*;

/// Period of the command loop tick in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1;

/// Period of the status log line in seconds
pub const STATUS_INTERVAL_SECS: u64 = 30;
