//! Fan-out combinator: run N independent members, aggregate on completion.
//!
//! Each member is a full pipeline in its own right (a single operation is
//! just a one-stage pipeline). Members run concurrently with no ordering
//! guarantee between them; the group handler fires exactly once, after the
//! last member completes.

use std::sync::{Arc, Mutex};

use crate::errors::{FrameworkFault, Status};
use crate::operation::{Operation, OperationKind};
use crate::pipeline::Pipeline;

type MemberRunner = Box<dyn FnOnce(MemberProbe) -> Status + Send>;
type GroupHandlerFn = Box<dyn FnOnce(Status, Vec<Status>) + Send>;

struct GroupOutcomes {
    slots:         Vec<Option<Status>>,
    remaining:     usize,
    first_failure: Option<Status>,
}

struct GroupState {
    outcomes: Mutex<GroupOutcomes>,
    handler:  Mutex<Option<GroupHandlerFn>>,
}

/// One-shot completion probe handed to each member's terminal handler.
struct MemberProbe {
    state: Arc<GroupState>,
    index: usize,
}

impl MemberProbe {
    /// Records the member's final status. When the last member reports, the
    /// group handler is taken from its slot and invoked.
    ///
    /// The overall status is the status of the first member to FAIL, in
    /// completion order, not in declaration order; `Status::ok()` if none
    /// failed. Per-member statuses keep declaration order.
    fn complete(self, status: Status) {
        let fire = {
            let mut outcomes = self.state.outcomes.lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if outcomes.slots[self.index].is_some() {
                debug_assert!(false, "member completed twice");
                return;
            }
            if !status.is_ok() && outcomes.first_failure.is_none() {
                outcomes.first_failure = Some(status.clone());
            }
            outcomes.slots[self.index] = Some(status);
            outcomes.remaining -= 1;
            outcomes.remaining == 0
        };
        if !fire {
            return;
        }

        let handler = self.state.handler.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        let Some(handler) = handler else { return };

        let mut outcomes = self.state.outcomes.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let overall = outcomes.first_failure.take().unwrap_or_else(Status::ok);
        let members = outcomes.slots
            .iter_mut()
            .map(|slot| slot.take().unwrap_or_else(|| {
                FrameworkFault::Internal("parallel member never reported".into()).into()
            }))
            .collect();
        drop(outcomes);
        handler(overall, members);
    }
}

/// Group of independent members, still without a group handler.
pub struct Parallel {
    members: Vec<MemberRunner>,
}

impl Parallel {
    pub fn new() -> Self {
        Self { members: Vec::new() }
    }

    /// Adds a single operation as a member.
    pub fn add<K: OperationKind>(self, op: Operation<K>) -> Self {
        self.add_pipeline(Pipeline::new(op))
    }

    /// Adds a whole pipeline as a member; only its terminal status feeds
    /// the aggregation, intermediate stage results stay internal.
    pub fn add_pipeline<K: OperationKind>(mut self, pipeline: Pipeline<K>) -> Self {
        self.members.push(Box::new(move |probe: MemberProbe| {
            pipeline
                .with_handler(move |status: Status, _response: Option<K::Response>| {
                    probe.complete(status);
                })
                .run()
        }));
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Attaches the group handler, `(overall, per_member_statuses)`.
    pub fn with_handler<H>(self, handler: H) -> RunnableParallel
        where H: FnOnce(Status, Vec<Status>) + Send + 'static
    {
        let state = Arc::new(GroupState {
            outcomes: Mutex::new(GroupOutcomes { slots:         vec![None; self.members.len()],
                                                 remaining:     self.members.len(),
                                                 first_failure: None }),
            handler:  Mutex::new(Some(Box::new(handler))),
        });
        RunnableParallel { members: self.members, state }
    }
}

impl Default for Parallel {
    fn default() -> Self {
        Self::new()
    }
}

/// Parallel group with group handler attached; exposes `run()`.
pub struct RunnableParallel {
    members: Vec<MemberRunner>,
    state:   Arc<GroupState>,
}

impl RunnableParallel {
    /// Starts every member. An empty group completes immediately with
    /// `Status::ok()` and an empty member list.
    ///
    /// The sync return only says the group was launched; per-member local
    /// rejections are reported through the aggregation like any other
    /// member failure, so the group handler still fires exactly once.
    pub fn run(self) -> Status {
        if self.members.is_empty() {
            let handler = self.state.handler.lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .take();
            if let Some(handler) = handler {
                handler(Status::ok(), Vec::new());
            }
            return Status::ok();
        }

        for (index, member) in self.members.into_iter().enumerate() {
            let probe = MemberProbe { state: Arc::clone(&self.state), index };
            let _ = member(probe);
        }
        Status::ok()
    }
}
