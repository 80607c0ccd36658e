/// A widget that a host keeps in a pool and rebinds to new items.
///
/// Hosts group pooled instances by [`REUSE_IDENTIFIER`](Self::REUSE_IDENTIFIER)
/// and call [`prepare_for_reuse`](Self::prepare_for_reuse) every time an
/// instance goes back to the pool.
pub trait Reusable {
    /// Stable identifier for pooling instances of this widget type.
    const REUSE_IDENTIFIER: &'static str;

    /// Clear transient content so a recycled instance never shows data of the
    /// item it was last bound to.
    fn prepare_for_reuse(&mut self);
}
