//! Animation frame bookkeeping
//!
//! Tracks the handle of the one outstanding `requestAnimationFrame` so
//! repeated requests coalesce and teardown can cancel it before the frame
//! callback is released.

use std::cell::Cell;

/// At most one pending frame request
#[derive(Debug, Default)]
pub struct FrameSlot {
    pending: Cell<Option<i32>>,
}

impl FrameSlot {
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Schedule through `request` unless a frame is already pending.
    ///
    /// Returns whether `request` was called and succeeded.
    pub fn request<E>(&self, request: impl FnOnce() -> Result<i32, E>) -> Result<bool, E> {
        if self.is_pending() {
            return Ok(false);
        }
        let handle = request()?;
        self.pending.set(Some(handle));
        Ok(true)
    }

    /// The pending frame was delivered
    pub fn fired(&self) {
        self.pending.set(None);
    }

    /// Hand over the pending handle for cancellation
    pub fn take_pending(&self) -> Option<i32> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_coalesce_until_fired() {
        let slot = FrameSlot::default();
        let mut calls = 0;
        assert_eq!(slot.request(|| -> Result<i32, ()> { calls += 1; Ok(7) }), Ok(true));
        assert_eq!(slot.request(|| -> Result<i32, ()> { calls += 1; Ok(8) }), Ok(false));
        assert_eq!(calls, 1);

        slot.fired();
        assert!(!slot.is_pending());
        assert_eq!(slot.request(|| -> Result<i32, ()> { Ok(9) }), Ok(true));
    }

    #[test]
    fn test_teardown_takes_pending_handle_once() {
        let slot = FrameSlot::default();
        slot.request(|| -> Result<i32, ()> { Ok(42) }).unwrap();
        assert_eq!(slot.take_pending(), Some(42));
        assert_eq!(slot.take_pending(), None);
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_failed_request_leaves_nothing_pending() {
        let slot = FrameSlot::default();
        assert_eq!(slot.request(|| Err("denied")), Err("denied"));
        assert_eq!(slot.take_pending(), None);
    }
}
