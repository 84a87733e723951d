//! Abort handle for the one markup request a component has in flight.
//!
//! Previews and the picker keep the request tied to the [`FetchTicket`]
//! that is still wanted. When the ticket changes (new reference, new
//! selection) or the component unmounts, the request is aborted through its
//! `AbortController`; the ticket check still drops any response that lands
//! anyway.
//!
//! [`FetchTicket`]: rooms::preview::FetchTicket

#[cfg(test)]
#[path = "abort_test.rs"]
mod abort_test;

/// Something that can cancel an outstanding request.
pub trait Abort {
    fn abort(&self);
}

#[cfg(feature = "csr")]
impl Abort for web_sys::AbortController {
    fn abort(&self) {
        web_sys::AbortController::abort(self);
    }
}

/// The in-flight request, keyed by ticket id.
pub struct InFlight<H> {
    current: Option<(u64, H)>,
}

impl<H> Default for InFlight<H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<H: Abort> InFlight<H> {
    /// Track the request for ticket `id`, aborting any previous one.
    pub fn track(&mut self, id: u64, handle: H) {
        self.abort();
        self.current = Some((id, handle));
    }

    /// Abort the tracked request unless it belongs to `wanted`.
    /// Returns whether a request was aborted.
    pub fn retain(&mut self, wanted: Option<u64>) -> bool {
        match self.current.take() {
            Some((id, handle)) if Some(id) != wanted => {
                handle.abort();
                true
            }
            other => {
                self.current = other;
                false
            }
        }
    }

    /// Forget the handle for a request that finished on its own.
    pub fn finish(&mut self, id: u64) {
        if self.active() == Some(id) {
            self.current = None;
        }
    }

    pub fn abort(&mut self) -> bool {
        self.retain(None)
    }

    pub fn active(&self) -> Option<u64> {
        self.current.as_ref().map(|(id, _)| *id)
    }
}

/// A fresh controller, or `None` (request runs unabortable) when the
/// browser refuses to create one.
#[cfg(feature = "csr")]
pub fn controller() -> Option<web_sys::AbortController> {
    match web_sys::AbortController::new() {
        Ok(controller) => Some(controller),
        Err(err) => {
            log::warn!("AbortController unavailable: {err:?}");
            None
        }
    }
}

/// Start tracking ticket `id` and return the signal to attach to its request.
#[cfg(feature = "csr")]
pub fn start(in_flight: &mut InFlight<web_sys::AbortController>, id: u64) -> Option<web_sys::AbortSignal> {
    in_flight.abort();
    let controller = controller()?;
    let signal = controller.signal();
    in_flight.track(id, controller);
    Some(signal)
}
