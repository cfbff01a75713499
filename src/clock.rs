//! Millisecond timestamps from a wrapping monotonic counter.
//!
//! The counter is 32 bits wide and wraps after ~49 days. Every
//! threshold check goes through [`elapsed`], whose wrapping subtraction
//! stays correct across the wrap.

/// Milliseconds since boot, modulo 2³².
pub type Millis = u32;

/// Milliseconds from `since` to `now`.
#[inline]
pub fn elapsed(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

/// `true` once at least `threshold` ms have passed since `since`.
#[inline]
pub fn has_elapsed(now: Millis, since: Millis, threshold: Millis) -> bool {
    elapsed(now, since) >= threshold
}
