use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;

use super::request_seq::RequestSeq;

/// Runs the callback once input has been quiet for `delay_ms`.
/// A newer call cancels the pending one.
#[derive(Clone, Copy)]
pub struct Debouncer {
    delay_ms: u32,
    seq: RequestSeq,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            seq: RequestSeq::new(),
        }
    }

    pub fn call<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        let ticket = self.seq.next();
        let seq = self.seq;
        let delay = self.delay_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if seq.is_current(ticket) {
                f();
            }
        });
    }

    pub fn cancel(&self) {
        self.seq.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_makes_pending_call_stale() {
        let debouncer = Debouncer::new(300);
        let pending = debouncer.seq.next();
        debouncer.cancel();
        assert!(!debouncer.seq.is_current(pending));
    }
}
