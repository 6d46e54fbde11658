//! Host frame-scheduling capability.
//!
//! Handle ids double as the frame counter used for `frame % N` gating, so schedulers must hand
//! out strictly increasing ids.

/// Identifier of one requested frame callback.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameHandle(pub u64);

/// Request/cancel "next frame" callbacks.
pub trait FrameScheduler {
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;
    /// Drop a pending callback. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Counter-based scheduler for offline hosts: every vsync fires all pending callbacks.
#[derive(Debug, Default)]
pub struct VsyncScheduler {
    last_id: u64,
    pending: Vec<FrameHandle>,
    cancelled: u64,
}

impl VsyncScheduler {
    /// Create a scheduler whose first handle is `FrameHandle(1)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire a vsync: return the pending callbacks in request order.
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    /// Callbacks waiting for the next vsync.
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Number of callbacks cancelled so far.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for VsyncScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.last_id += 1;
        let handle = FrameHandle(self.last_id);
        self.pending.push(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}
