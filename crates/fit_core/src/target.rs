//! The render-target handle the engine measures and resizes.

use crate::geometry::{EdgeInsets, Rect, Size};
use anyhow::Error;

/// Opaque handle to a mounted, resizable visual surface.
///
/// The handle is owned by the caller (the preview or export boundary);
/// the engine never creates or destroys a surface, it only reads the
/// surface's geometry and writes its box size. A handle may observe the
/// surface unmounting and remounting between polls, which is why
/// [`RenderTarget::box_size`] is re-read every cycle rather than cached.
///
/// Concurrency contract: at most one stability probe or search session
/// may be active against a given target at a time. The box size is
/// written and read without synchronization, so concurrent sessions
/// against the same target are a caller error. Sessions against
/// *different* targets share no state and may run concurrently.
pub trait RenderTarget {
    /// Current border-box size, or `None` while the surface is not
    /// mounted.
    fn box_size(&self) -> Option<Size>;

    /// Resize the surface's box. This is the only write the engine
    /// performs on a target.
    fn set_box_size(&mut self, size: Size);

    /// Client extents: inside the border, outside any scrollbar.
    fn client_size(&self) -> Size;

    /// Scroll extents: the full rendered extent including content that
    /// overflows the client area.
    fn scroll_size(&self) -> Size;

    /// The container's padding insets.
    fn padding(&self) -> EdgeInsets;

    /// The container's border box in its own coordinate space.
    fn outer_rect(&self) -> Rect;

    /// Border boxes of every descendant visual node, in the container's
    /// coordinate space. This is the one geometry query allowed to fail;
    /// callers fold a failure into already-computed results rather than
    /// propagating it.
    fn descendant_rects(&self) -> Result<Vec<Rect>, Error>;
}
