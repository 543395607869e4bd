/// Paint layer of a draw. Lower layers are painted first.
///
/// There is no depth buffer; the layer and submission order alone decide
/// what ends up on top.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZIndex(pub i32);

impl ZIndex {
    /// Wireframe shapes.
    pub const BACKGROUND: ZIndex = ZIndex(0);
    /// Additive particles.
    pub const FOREGROUND: ZIndex = ZIndex(1);
}
