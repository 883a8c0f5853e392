//! Shared state handle.
//!
//! [`Store`] owns the state tree, applies events through [`reduce`](super::reduce)
//! and tracks which request in each slot is the latest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::{reduce, Event, PlayerState};

/// Kinds of fetch that replace the same part of the state.
///
/// Two requests in the same slot race for the same fields; only the most
/// recently started one may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestSlot {
    Token,
    Featured,
    Genres,
    CategoryPlaylist,
    NewReleases,
    /// The playing context (`playlist_show` and `tracklist`).
    Playing,
    /// The previewed context (`playlist_view` and `tracklist_view`).
    View,
}

impl RequestSlot {
    const COUNT: usize = 7;

    fn index(self) -> usize {
        match self {
            RequestSlot::Token => 0,
            RequestSlot::Featured => 1,
            RequestSlot::Genres => 2,
            RequestSlot::CategoryPlaylist => 3,
            RequestSlot::NewReleases => 4,
            RequestSlot::Playing => 5,
            RequestSlot::View => 6,
        }
    }
}

/// Proof that a request was started, checked before its result commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    slot: RequestSlot,
    id: u64,
}

impl RequestTicket {
    pub fn slot(&self) -> RequestSlot {
        self.slot
    }
}

#[derive(Debug, Default)]
struct RequestCounters {
    latest: [AtomicU64; RequestSlot::COUNT],
}

/// Shared handle to the player state.
///
/// Cloning is cheap; all clones see the same state. Events are committed one
/// at a time through [`reduce`], and subscribers are woken after every
/// recognized event.
#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<watch::Sender<PlayerState>>,
    requests: Arc<RequestCounters>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a store holding the initial state.
    pub fn new() -> Self {
        Self::with_state(PlayerState::default())
    }

    /// Create a store holding `state`.
    pub fn with_state(state: PlayerState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self {
            state: Arc::new(tx),
            requests: Arc::new(RequestCounters::default()),
        }
    }

    /// Commit an event.
    pub fn dispatch(&self, event: Event) {
        debug!(event = event.name(), "dispatch");
        let known = event.is_known();
        self.state.send_if_modified(|state| {
            let prev = std::mem::take(state);
            *state = reduce(prev, event);
            known
        });
    }

    /// Read the current state without cloning it.
    ///
    /// Do not dispatch from inside `f`.
    pub fn read<R>(&self, f: impl FnOnce(&PlayerState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Clone the current state.
    pub fn snapshot(&self) -> PlayerState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified whenever state changes.
    pub fn subscribe(&self) -> watch::Receiver<PlayerState> {
        self.state.subscribe()
    }

    /// Start a request in `slot`, superseding any request already in flight.
    pub fn begin_request(&self, slot: RequestSlot) -> RequestTicket {
        let id = self.requests.latest[slot.index()].fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { slot, id }
    }

    /// Invalidate whatever request is in flight in `slot`.
    pub fn cancel_requests(&self, slot: RequestSlot) {
        self.begin_request(slot);
    }

    /// Whether no newer request in the same slot has started.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.requests.latest[ticket.slot.index()].load(Ordering::SeqCst) == ticket.id
    }

    /// Commit `event` only if `ticket` is still the latest in its slot.
    ///
    /// Returns whether the event was committed.
    pub fn dispatch_if_latest(&self, ticket: RequestTicket, event: Event) -> bool {
        if !self.is_latest(ticket) {
            warn!(
                slot = ?ticket.slot,
                event = event.name(),
                "Discarding response superseded by a newer request"
            );
            return false;
        }
        self.dispatch(event);
        true
    }
}
