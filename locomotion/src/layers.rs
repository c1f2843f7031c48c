use std::fmt;

use serde::{Deserialize, Serialize};

/// Collision layer index (0..32).
///
/// Layers tag world surfaces so a character can decide which ones count as ground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Layer(u8);

impl Layer {
    /// Number of addressable layers. Masks are backed by a `u32`.
    pub const COUNT: u8 = 32;

    pub const DEFAULT: Layer = Layer(0);

    /// Returns `None` if `index` does not fit in a [`LayerMask`].
    pub const fn new(index: u8) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    const fn bit(self) -> u32 {
        1u32 << self.0
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {}", self.0)
    }
}

/// Set of layers, one bit per [`Layer`].
///
/// Serialized as the raw `u32` so TOML configs can write `ground_layer_mask = 0b101`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask {
    bits: u32,
}

impl LayerMask {
    pub const ALL: LayerMask = LayerMask { bits: u32::MAX };
    pub const NONE: LayerMask = LayerMask { bits: 0 };

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    pub fn from_layers(layers: &[Layer]) -> Self {
        layers.iter().fold(Self::NONE, |mask, &layer| mask.with(layer))
    }

    #[inline]
    pub const fn contains(self, layer: Layer) -> bool {
        self.bits & layer.bit() != 0
    }

    #[inline]
    pub const fn with(self, layer: Layer) -> Self {
        Self {
            bits: self.bits | layer.bit(),
        }
    }

    #[inline]
    pub const fn without(self, layer: Layer) -> Self {
        Self {
            bits: self.bits & !layer.bit(),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(i: u8) -> Layer {
        Layer::new(i).unwrap()
    }

    #[test]
    fn layer_indices_past_mask_width_are_rejected() {
        assert!(Layer::new(31).is_some());
        assert!(Layer::new(32).is_none());
    }

    #[test]
    fn mask_membership_follows_with_and_without() {
        let mask = LayerMask::NONE.with(layer(3)).with(layer(7));
        assert!(mask.contains(layer(3)));
        assert!(mask.contains(layer(7)));
        assert!(!mask.contains(layer(0)));

        let mask = mask.without(layer(3));
        assert!(!mask.contains(layer(3)));
        assert_eq!(mask.bits(), 1 << 7);
    }

    #[test]
    fn default_mask_accepts_every_layer() {
        let mask = LayerMask::default();
        assert!((0..Layer::COUNT).all(|i| mask.contains(layer(i))));
        assert!(LayerMask::NONE.is_empty());
    }

    #[test]
    fn from_layers_matches_manual_bits() {
        let mask = LayerMask::from_layers(&[layer(0), layer(2), layer(31)]);
        assert_eq!(mask.bits(), 1 | (1 << 2) | (1 << 31));
    }
}
