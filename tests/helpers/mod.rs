use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use syllabus_import::driver::{GraphStore, WriteSession};
use syllabus_import::errors::{ImportError, Result};
use syllabus_import::ops::{UpsertOp, MAIN_NODE_NAME};

/// What a scripted write attempt should do instead of succeeding.
#[derive(Debug, Clone, Copy)]
pub enum PlannedFault {
    /// Transient bookmark rejection — the retryable class.
    Coordination,
    /// Anything else — must propagate without a second attempt.
    Fatal,
}

/// Snapshot of the in-memory graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphState {
    /// `(label, name)` pairs — node identity is exactly the merge key.
    pub nodes: BTreeSet<(String, String)>,
    /// `(relationship, source, target)` with endpoints as `(label, name)`.
    pub edges: BTreeSet<(String, (String, String), (String, String))>,
}

impl GraphState {
    fn merge_node(&mut self, label: &str, name: &str) {
        self.nodes.insert((label.to_string(), name.to_string()));
    }

    /// MATCH both endpoints, then MERGE the relationship. A missing
    /// endpoint makes this a zero-row no-op, like the Cypher it stands for.
    fn merge_edge(&mut self, rel: &str, source: (&str, &str), target: (&str, &str)) {
        let source = (source.0.to_string(), source.1.to_string());
        let target = (target.0.to_string(), target.1.to_string());
        if self.nodes.contains(&source) && self.nodes.contains(&target) {
            self.edges.insert((rel.to_string(), source, target));
        }
    }

    pub fn apply(&mut self, op: &UpsertOp) {
        match op {
            UpsertOp::EnsureMain => self.merge_node("Main", MAIN_NODE_NAME),
            UpsertOp::EnsureUnit { unit } => self.merge_node("Unit", unit),
            UpsertOp::EnsureChapter { chapter } => self.merge_node("Chapter", chapter),
            UpsertOp::EnsureSection { section } => self.merge_node("Section", section),
            UpsertOp::EnsureIncludeEdge { unit } => {
                self.merge_edge("include", ("Main", MAIN_NODE_NAME), ("Unit", unit));
            }
            UpsertOp::EnsureHasChapterEdge { unit, chapter } => {
                self.merge_edge("has_chapter", ("Unit", unit), ("Chapter", chapter));
            }
            UpsertOp::EnsureHasSectionEdge { chapter, section } => {
                self.merge_edge("has_section", ("Chapter", chapter), ("Section", section));
            }
        }
    }

    pub fn node_count(&self, label: &str) -> usize {
        self.nodes.iter().filter(|(l, _)| l == label).count()
    }

    pub fn edge_count(&self, rel: &str) -> usize {
        self.edges.iter().filter(|(r, _, _)| r == rel).count()
    }

    pub fn has_node(&self, label: &str, name: &str) -> bool {
        self.nodes.contains(&(label.to_string(), name.to_string()))
    }

    pub fn has_edge(&self, rel: &str, source: (&str, &str), target: (&str, &str)) -> bool {
        self.edges.contains(&(
            rel.to_string(),
            (source.0.to_string(), source.1.to_string()),
            (target.0.to_string(), target.1.to_string()),
        ))
    }
}

struct Inner {
    state: Mutex<GraphState>,
    /// 1-based attempt number → fault to inject for that `run_write` call.
    faults: Mutex<HashMap<u64, PlannedFault>>,
    attempts: AtomicU64,
    sessions_opened: AtomicU64,
    fresh_sessions_opened: AtomicU64,
    sessions_closed: AtomicU64,
}

/// In-memory [`GraphStore`] with real merge semantics and scripted faults.
///
/// A faulted attempt fails BEFORE applying its operation, so tests can
/// assert that a recovered retry applied the effect exactly once.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(GraphState::default()),
                faults: Mutex::new(HashMap::new()),
                attempts: AtomicU64::new(0),
                sessions_opened: AtomicU64::new(0),
                fresh_sessions_opened: AtomicU64::new(0),
                sessions_closed: AtomicU64::new(0),
            }),
        }
    }

    /// Script the `attempt`-th `run_write` call (1-based, counted across
    /// all sessions) to fail with `fault`.
    pub fn fail_attempt(&self, attempt: u64, fault: PlannedFault) {
        self.inner.faults.lock().unwrap().insert(attempt, fault);
    }

    pub fn state(&self) -> GraphState {
        self.inner.state.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> u64 {
        self.inner.attempts.load(Ordering::SeqCst)
    }

    pub fn sessions_opened(&self) -> u64 {
        self.inner.sessions_opened.load(Ordering::SeqCst)
    }

    pub fn fresh_sessions_opened(&self) -> u64 {
        self.inner.fresh_sessions_opened.load(Ordering::SeqCst)
    }

    pub fn sessions_closed(&self) -> u64 {
        self.inner.sessions_closed.load(Ordering::SeqCst)
    }
}

impl GraphStore for MemoryStore {
    type Session = MemorySession;

    async fn open_session(&self) -> Result<MemorySession> {
        self.inner.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(MemorySession {
            inner: self.inner.clone(),
        })
    }

    async fn open_fresh_session(&self) -> Result<MemorySession> {
        self.inner.fresh_sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(MemorySession {
            inner: self.inner.clone(),
        })
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

pub struct MemorySession {
    inner: Arc<Inner>,
}

impl WriteSession for MemorySession {
    async fn run_write(&mut self, op: &UpsertOp) -> Result<()> {
        let attempt = self.inner.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(fault) = self.inner.faults.lock().unwrap().remove(&attempt) {
            return Err(match fault {
                PlannedFault::Coordination => {
                    ImportError::Coordination("InvalidBookmark".to_string())
                }
                PlannedFault::Fatal => ImportError::Driver("constraint violation".to_string()),
            });
        }
        self.inner.state.lock().unwrap().apply(op);
        Ok(())
    }

    async fn close(self) -> Result<()> {
        self.inner.sessions_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
