use super::ZIndex;

/// Stable sort key for draw items.
///
/// Field order matters: the derived ordering compares `z` first, then the
/// insertion `order`, which keeps equal layers in submission order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}
