//! Shared synthetic render targets and clocks for engine tests.

#![allow(dead_code)]

use fit_core::{EdgeInsets, Rect, RenderTarget, Size};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

/// Surface whose content has a fixed natural extent: it fits exactly
/// when the box grows to that extent. The fit oracle is monotonic in
/// both axes, which is the regime the search is specified for.
pub struct ContentSurface {
    mounted: bool,
    box_size: Size,
    content: Size,
    /// Every width applied by the search, in probe order.
    resize_log: Vec<u32>,
}

impl ContentSurface {
    pub fn new(box_size: Size, content: Size) -> Self {
        Self {
            mounted: true,
            box_size,
            content,
            resize_log: Vec::new(),
        }
    }

    pub fn unmounted(mut self) -> Self {
        self.mounted = false;
        self
    }

    pub fn resize_log(&self) -> &[u32] {
        &self.resize_log
    }
}

impl RenderTarget for ContentSurface {
    fn box_size(&self) -> Option<Size> {
        self.mounted.then_some(self.box_size)
    }

    fn set_box_size(&mut self, size: Size) {
        self.box_size = size;
        self.resize_log.push(size.width.round() as u32);
    }

    fn client_size(&self) -> Size {
        self.box_size
    }

    fn scroll_size(&self) -> Size {
        Size::new(
            self.content.width.max(self.box_size.width),
            self.content.height.max(self.box_size.height),
        )
    }

    fn padding(&self) -> EdgeInsets {
        EdgeInsets::ZERO
    }

    fn outer_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.box_size.width, self.box_size.height)
    }

    fn descendant_rects(&self) -> Result<Vec<Rect>, anyhow::Error> {
        Ok(Vec::new())
    }
}

/// Surface that replays a scripted sequence of box-size observations,
/// one per read, holding the last entry once the script runs out.
/// `None` entries model an unmounted surface.
pub struct ScriptedSurface {
    samples: Vec<Option<Size>>,
    cursor: Cell<usize>,
}

impl ScriptedSurface {
    pub fn new(samples: Vec<Option<Size>>) -> Self {
        assert!(!samples.is_empty(), "script needs at least one sample");
        Self {
            samples,
            cursor: Cell::new(0),
        }
    }

    pub fn constant(size: Size) -> Self {
        Self::new(vec![Some(size)])
    }
}

impl RenderTarget for ScriptedSurface {
    fn box_size(&self) -> Option<Size> {
        let index = self.cursor.get();
        self.cursor.set(index + 1);
        self.samples[index.min(self.samples.len() - 1)]
    }

    fn set_box_size(&mut self, _size: Size) {}

    fn client_size(&self) -> Size {
        Size::ZERO
    }

    fn scroll_size(&self) -> Size {
        Size::ZERO
    }

    fn padding(&self) -> EdgeInsets {
        EdgeInsets::ZERO
    }

    fn outer_rect(&self) -> Rect {
        Rect::default()
    }

    fn descendant_rects(&self) -> Result<Vec<Rect>, anyhow::Error> {
        Ok(Vec::new())
    }
}

/// Frame clock that yields immediately and counts how many cycle
/// boundaries were crossed.
#[derive(Default)]
pub struct CountingClock {
    ticks: AtomicU64,
}

impl CountingClock {
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl fit_engine::FrameClock for CountingClock {
    async fn next_frame(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        tokio::task::yield_now().await;
    }
}
