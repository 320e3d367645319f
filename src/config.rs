//! Runtime configuration for command parsing.

use crate::protocol::FRAME_PREFIX;

/// How the two prefix bytes of a frame are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixCheck {
    /// Both bytes must equal the configured prefix.
    Strict,
    /// Accept the frame when either byte matches. Older firmware validated
    /// the prefix this way and some host tools send sloppy markers.
    Lenient,
}

/// How the digits of a layer argument are turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentEncoding {
    /// Positional base-10: `"12"` is 12.
    Decimal,
    /// Sum of the digit values: `"12"` is 3. Matches older firmware.
    DigitSum,
}

/// Parser settings. Defaults follow the documented wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlConfig {
    /// Marker bytes that open every frame
    pub prefix: [u8; 2],
    pub prefix_check: PrefixCheck,
    pub argument: ArgumentEncoding,
}

impl ControlConfig {
    pub const fn new() -> Self {
        Self {
            prefix: FRAME_PREFIX,
            prefix_check: PrefixCheck::Strict,
            argument: ArgumentEncoding::Decimal,
        }
    }

    /// Settings that reproduce the behavior of older firmware bit for bit.
    pub const fn legacy() -> Self {
        Self {
            prefix: FRAME_PREFIX,
            prefix_check: PrefixCheck::Lenient,
            argument: ArgumentEncoding::DigitSum,
        }
    }

    /// Whether `header` (the first two frame bytes) carries the prefix.
    pub fn prefix_matches(&self, header: [u8; 2]) -> bool {
        let first = header[0] == self.prefix[0];
        let second = header[1] == self.prefix[1];
        match self.prefix_check {
            PrefixCheck::Strict => first && second,
            PrefixCheck::Lenient => first || second,
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict_decimal() {
        let config = ControlConfig::default();
        assert_eq!(config.prefix, *b"KB");
        assert_eq!(config.prefix_check, PrefixCheck::Strict);
        assert_eq!(config.argument, ArgumentEncoding::Decimal);
    }

    #[test]
    fn strict_prefix_needs_both_bytes() {
        let config = ControlConfig::new();
        assert!(config.prefix_matches(*b"KB"));
        assert!(!config.prefix_matches(*b"KX"));
        assert!(!config.prefix_matches(*b"XB"));
        assert!(!config.prefix_matches(*b"AB"));
    }

    #[test]
    fn lenient_prefix_accepts_either_byte() {
        let config = ControlConfig::legacy();
        assert!(config.prefix_matches(*b"KB"));
        assert!(config.prefix_matches(*b"KX"));
        assert!(config.prefix_matches(*b"XB"));
        assert!(!config.prefix_matches(*b"XY"));
    }
}
