//! Layer state store.
//!
//! The dispatcher only talks to [`LayerStore`]; keymap lookup lives elsewhere
//! and reads the resulting state. [`LayerState`] is the bitmask store the
//! firmware uses: one bit per layer, layers 0..=31.

/// Number of layers a [`LayerState`] can track.
pub const MAX_LAYERS: u8 = 32;

/// Receiver of layer commands.
pub trait LayerStore {
    fn layer_on(&mut self, layer: u8);
    fn layer_off(&mut self, layer: u8);
    fn layer_invert(&mut self, layer: u8);
}

/// Active layers as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerState {
    mask: u32,
}

impl LayerState {
    pub const fn new() -> Self {
        Self { mask: 0 }
    }

    pub fn state(&self) -> u32 {
        self.mask
    }

    pub fn is_on(&self, layer: u8) -> bool {
        layer < MAX_LAYERS && self.mask & (1 << layer) != 0
    }

    /// Highest active layer, or 0 when none is on.
    pub fn highest(&self) -> u8 {
        if self.mask == 0 {
            0
        } else {
            (31 - self.mask.leading_zeros()) as u8
        }
    }

    pub fn clear(&mut self) {
        self.set_state(0);
    }

    fn set_state(&mut self, mask: u32) {
        if mask != self.mask {
            log::info!("layer state: {:08X} -> {:08X}", self.mask, mask);
        }
        self.mask = mask;
    }

    fn bit(layer: u8) -> Option<u32> {
        if layer < MAX_LAYERS {
            Some(1 << layer)
        } else {
            log::warn!("layer {} out of range (max {})", layer, MAX_LAYERS - 1);
            None
        }
    }
}

impl LayerStore for LayerState {
    fn layer_on(&mut self, layer: u8) {
        if let Some(bit) = Self::bit(layer) {
            self.set_state(self.mask | bit);
        }
    }

    fn layer_off(&mut self, layer: u8) {
        if let Some(bit) = Self::bit(layer) {
            self.set_state(self.mask & !bit);
        }
    }

    fn layer_invert(&mut self, layer: u8) {
        if let Some(bit) = Self::bit(layer) {
            self.set_state(self.mask ^ bit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_on_creation() {
        let state = LayerState::new();
        assert_eq!(state.state(), 0);
        assert_eq!(state.highest(), 0);
        assert!(!state.is_on(0));
    }

    #[test]
    fn on_off_invert() {
        let mut state = LayerState::new();
        state.layer_on(3);
        assert!(state.is_on(3));
        assert_eq!(state.state(), 0b1000);

        state.layer_invert(1);
        assert_eq!(state.state(), 0b1010);
        state.layer_invert(1);
        assert_eq!(state.state(), 0b1000);

        state.layer_off(3);
        assert_eq!(state.state(), 0);
    }

    #[test]
    fn layer_on_is_idempotent() {
        let mut state = LayerState::new();
        state.layer_on(5);
        state.layer_on(5);
        assert_eq!(state.state(), 1 << 5);
    }

    #[test]
    fn highest_active_layer() {
        let mut state = LayerState::new();
        state.layer_on(2);
        state.layer_on(9);
        assert_eq!(state.highest(), 9);
        state.layer_on(31);
        assert_eq!(state.highest(), 31);
    }

    #[test]
    fn out_of_range_ignored() {
        let mut state = LayerState::new();
        state.layer_on(32);
        state.layer_invert(255);
        assert_eq!(state.state(), 0);
        assert!(!state.is_on(32));
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut state = LayerState::new();
        state.layer_on(0);
        state.layer_on(7);
        state.clear();
        assert_eq!(state.state(), 0);
    }
}
