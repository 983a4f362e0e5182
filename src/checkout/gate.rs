//! In-flight guard for checkout submissions
//!
//! Only one checkout request may be outstanding at a time. The permit clears
//! the flag when dropped, whether the request succeeded or not.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CheckoutGate {
    in_flight: Arc<AtomicBool>,
}

#[derive(Debug)]
pub struct CheckoutPermit {
    in_flight: Arc<AtomicBool>,
}

impl CheckoutGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or `None` if a checkout is already outstanding
    pub fn try_begin(&self) -> Option<CheckoutPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CheckoutPermit {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for CheckoutPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
