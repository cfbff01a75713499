//! Retry policy for peripheral bring-up.

/// How often a fallible operation is attempted before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RetryPolicy {
    /// Keep trying until it succeeds. Never returns an error.
    Forever,
    /// At most this many attempts; `Attempts(0)` still tries once.
    Attempts(u32),
}

impl RetryPolicy {
    /// Run `op` until it succeeds or the policy is exhausted.
    ///
    /// Returns the last error if every attempt failed.
    pub fn run<T, E>(&self, mut op: impl FnMut() -> Result<T, E>) -> Result<T, E> {
        let mut attempt: u32 = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) => match *self {
                    RetryPolicy::Attempts(max) if attempt >= max => return Err(e),
                    RetryPolicy::Attempts(_) | RetryPolicy::Forever => {
                        attempt = attempt.saturating_add(1);
                    }
                },
            }
        }
    }
}
