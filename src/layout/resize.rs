//! Drag-resize session state.
//!
//! A session starts on pointer-down over a resize handle and ends on
//! pointer-up. Only one column can be grabbed at a time. Pointer moves are
//! coalesced: the host requests one animation frame when the first move of a
//! burst arrives and applies only the latest intent when the frame fires.

use log::{debug, warn};

/// Default inactivity window after which a drag is considered abandoned
pub const DEFAULT_SESSION_TIMEOUT_MS: f64 = 10_000.0;

/// A pointer position delivered while dragging a resize handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeIntent {
    /// Registry index of the column being resized
    pub target_column: usize,
    /// Pointer x in client coordinates
    pub client_x: f32,
    /// Horizontal scroll offset of the document
    pub scroll_offset: f32,
}

impl ResizeIntent {
    /// Desired column width given the header cell's left edge
    pub fn width(&self, offset_left: f32) -> f32 {
        self.scroll_offset + self.client_x - offset_left
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    column: usize,
    last_event_ms: f64,
}

/// Exclusive drag session with per-frame coalescing
#[derive(Debug, Clone)]
pub struct ResizeSession {
    active: Option<ActiveDrag>,
    pending: Option<ResizeIntent>,
    timeout_ms: f64,
}

impl Default for ResizeSession {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TIMEOUT_MS)
    }
}

impl ResizeSession {
    pub fn new(timeout_ms: f64) -> Self {
        Self {
            active: None,
            pending: None,
            timeout_ms,
        }
    }

    /// Column currently being resized
    pub fn active_column(&self) -> Option<usize> {
        self.active.map(|drag| drag.column)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start dragging `column`.
    ///
    /// Rejected while another drag is in progress, or when the column has no
    /// usable resize handle.
    pub fn grab(&mut self, column: usize, has_handle: bool, now_ms: f64) -> bool {
        if let Some(drag) = self.active {
            warn!(
                "resize grab on column {column} ignored: column {} still held",
                drag.column
            );
            return false;
        }
        if !has_handle {
            debug!("column {column} has no resize handle");
            return false;
        }
        debug!("resize grab on column {column}");
        self.active = Some(ActiveDrag {
            column,
            last_event_ms: now_ms,
        });
        self.pending = None;
        true
    }

    /// Queue a pointer move.
    ///
    /// Returns true when the caller should schedule an animation frame, i.e.
    /// for the first move since the last frame. Moves for a column other than
    /// the grabbed one are dropped.
    pub fn pointer_move(&mut self, intent: ResizeIntent, now_ms: f64) -> bool {
        let Some(drag) = self.active.as_mut() else {
            return false;
        };
        if drag.column != intent.target_column {
            return false;
        }
        drag.last_event_ms = now_ms;
        self.pending.replace(intent).is_none()
    }

    /// Take the latest queued move for this frame
    pub fn take_frame(&mut self) -> Option<ResizeIntent> {
        if self.active.is_none() {
            self.pending = None;
        }
        self.pending.take()
    }

    /// End the drag on pointer-up, returning the released column
    pub fn release(&mut self) -> Option<usize> {
        self.pending = None;
        let column = self.active.take().map(|drag| drag.column);
        if let Some(column) = column {
            debug!("resize released on column {column}");
        }
        column
    }

    /// Abandon the drag without a pointer-up (window blur, hidden tab)
    pub fn cancel(&mut self) -> Option<usize> {
        let column = self.release();
        if let Some(column) = column {
            debug!("resize on column {column} cancelled");
        }
        column
    }

    /// Cancel the drag if no pointer event arrived within the timeout
    pub fn expire_if_stale(&mut self, now_ms: f64) -> bool {
        match self.active {
            Some(drag) if now_ms - drag.last_event_ms > self.timeout_ms => {
                warn!(
                    "resize on column {} expired after {}ms without pointer events",
                    drag.column, self.timeout_ms
                );
                self.cancel();
                true
            }
            _ => false,
        }
    }
}
