//! Single-use completion signal shared by the event monitor and the timer.
//!
//! Any number of [`Resolver`] clones may race to resolve; exactly one wins
//! and its [`Resolution`] is delivered to the single [`Waiter`].

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

const PENDING: u8 = 0;
const CONFIRMED: u8 = 1;
const TIMED_OUT: u8 = 2;

/// How a posted event's wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The monitor saw the event pass the tap
    Confirmed,
    /// The timer fired first
    TimedOut,
}

impl Resolution {
    fn encode(self) -> u8 {
        match self {
            Resolution::Confirmed => CONFIRMED,
            Resolution::TimedOut => TIMED_OUT,
        }
    }
}

struct Shared {
    state: AtomicU8,
    sender: Mutex<Option<oneshot::Sender<Resolution>>>,
}

/// Producer half. Cheap to clone; only the first `resolve` has an effect.
#[derive(Clone)]
pub struct Resolver {
    shared: Arc<Shared>,
}

impl Resolver {
    /// Resolve the signal. Returns `false` if it was already resolved.
    pub fn resolve(&self, resolution: Resolution) -> bool {
        if self
            .shared
            .state
            .compare_exchange(
                PENDING,
                resolution.encode(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return false;
        }

        let sender = match self.shared.sender.lock() {
            Ok(mut slot) => slot.take(),
            Err(e) => e.into_inner().take(),
        };
        if let Some(sender) = sender {
            // The waiter may already be gone when its caller was cancelled.
            let _ = sender.send(resolution);
        }
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.shared.state.load(Ordering::Acquire) != PENDING
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Consumer half
#[derive(Debug)]
pub struct Waiter {
    receiver: oneshot::Receiver<Resolution>,
}

impl Waiter {
    /// Wait for the winning resolution.
    ///
    /// Returns `None` if every resolver was dropped without resolving.
    pub async fn wait(self) -> Option<Resolution> {
        self.receiver.await.ok()
    }
}

/// Create a fresh, unresolved completion signal.
pub fn completion() -> (Resolver, Waiter) {
    let (sender, receiver) = oneshot::channel();
    let resolver = Resolver {
        shared: Arc::new(Shared {
            state: AtomicU8::new(PENDING),
            sender: Mutex::new(Some(sender)),
        }),
    };
    (resolver, Waiter { receiver })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_resolution_wins() {
        let (resolver, waiter) = completion();
        let timer = resolver.clone();

        assert!(resolver.resolve(Resolution::Confirmed));
        assert!(!timer.resolve(Resolution::TimedOut));
        assert!(timer.is_resolved());

        assert_eq!(waiter.wait().await, Some(Resolution::Confirmed));
    }

    #[tokio::test]
    async fn test_dropped_resolvers_yield_none() {
        let (resolver, waiter) = completion();
        drop(resolver);
        assert_eq!(waiter.wait().await, None);
    }

    #[test]
    fn test_resolve_after_waiter_dropped() {
        let (resolver, waiter) = completion();
        drop(waiter);
        assert!(resolver.resolve(Resolution::TimedOut));
        assert!(!resolver.resolve(Resolution::Confirmed));
    }

    #[tokio::test]
    async fn test_racing_producers_resolve_exactly_once() {
        let (resolver, waiter) = completion();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let resolver = resolver.clone();
                std::thread::spawn(move || {
                    let resolution = if i % 2 == 0 {
                        Resolution::Confirmed
                    } else {
                        Resolution::TimedOut
                    };
                    resolver.resolve(resolution)
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert!(waiter.wait().await.is_some());
    }
}
