//! Session-scoped deferred tasks
//!
//! Game flow logic schedules work to happen "in N milliseconds". Every
//! scheduled task carries the session token that was current when it was
//! queued. Invalidating the session turns all older tasks into no-ops, so a
//! reset can never be followed by a stale respawn or level change.

use log::trace;

/// Identifies the session a deferred task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(u64);

#[derive(Debug)]
struct Pending<T> {
    due_ms: f64,
    sequence: u64,
    token: SessionToken,
    task: T,
}

/// Queue of tasks released once their delay has elapsed
#[derive(Debug)]
pub struct DeferredQueue<T> {
    now_ms: f64,
    session: SessionToken,
    next_sequence: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    /// Create an empty queue at time zero
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            session: SessionToken(0),
            next_sequence: 0,
            pending: Vec::new(),
        }
    }

    /// The token new tasks are scheduled under
    pub fn session(&self) -> SessionToken {
        self.session
    }

    /// Start a new session; tasks from earlier sessions will never run
    pub fn invalidate(&mut self) -> SessionToken {
        self.session = SessionToken(self.session.0 + 1);
        let before = self.pending.len();
        let session = self.session;
        self.pending.retain(|pending| pending.token == session);
        trace!(
            "Deferred session advanced to {:?}, dropped {} stale tasks",
            session,
            before - self.pending.len()
        );
        session
    }

    /// Queue `task` to be released after `delay_ms`
    pub fn schedule(&mut self, delay_ms: f64, task: T) -> SessionToken {
        self.pending.push(Pending {
            due_ms: self.now_ms + delay_ms.max(0.0),
            sequence: self.next_sequence,
            token: self.session,
            task,
        });
        self.next_sequence += 1;
        self.session
    }

    /// Advance time and return the due tasks of the current session
    ///
    /// Tasks come back ordered by due time, then by scheduling order.
    pub fn advance(&mut self, delta_ms: f64) -> Vec<T> {
        self.now_ms += delta_ms.max(0.0);
        let now = self.now_ms;
        let session = self.session;

        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .filter(|pending| pending.token == session)
            .partition(|pending| pending.due_ms <= now);
        self.pending = waiting;

        due.sort_by(|a, b| {
            a.due_ms
                .total_cmp(&b.due_ms)
                .then(a.sequence.cmp(&b.sequence))
        });
        due.into_iter().map(|pending| pending.task).collect()
    }

    /// Number of tasks still waiting in the current session
    pub fn len(&self) -> usize {
        self.pending
            .iter()
            .filter(|pending| pending.token == self.session)
            .count()
    }

    /// Whether no current-session task is waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Milliseconds advanced so far
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}
