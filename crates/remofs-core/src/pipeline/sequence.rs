//! Linear pipeline combinator.
//!
//! Chains operations so that stage K's completion handler runs to
//! completion (its `Resp` slot written) strictly before stage K+1's
//! `run()` is invoked. That ordering is what makes forwarding safe with no
//! extra locking inside a single pipeline. The first failing stage aborts
//! the remainder: later stages never resolve arguments and never reach the
//! endpoint adapter.
//!
//! Usage:
//!   let status = Pipeline::new(op_a).then(op_b).with_handler(h).run();

use std::sync::{Arc, Mutex};

use crate::errors::{FrameworkFault, Status};
use crate::handler::{BoxedHandler, ResponseHandler};
use crate::operation::{Operation, OperationKind};

/// Continuation used to short-circuit straight to the terminal handler.
type AbortFn = Box<dyn FnOnce(Status) + Send>;

/// A type-erased pipeline stage. `rest` holds the stages after this one in
/// reverse order, so `pop()` yields the immediate successor.
trait Stage: Send {
    fn run_stage(self: Box<Self>, rest: Vec<Box<dyn Stage>>, abort: AbortFn) -> Status;
}

/// Intermediate stage: its handler is synthesized here, the forwarding
/// handler of the chain. On success it starts the next stage; on failure it
/// short-circuits to the terminal handler with the failing status tagged
/// with this stage's name. After dispatching either way its responsibility
/// ends; the take-once terminal slot makes double delivery impossible.
struct SeqStage<K: OperationKind>(Operation<K>);

impl<K: OperationKind> Stage for SeqStage<K> {
    fn run_stage(self: Box<Self>, mut rest: Vec<Box<dyn Stage>>, abort: AbortFn) -> Status {
        let stage_name = self.0.name();
        let forwarding = move |status: Status, _response: Option<K::Response>| {
            if !status.is_ok() {
                abort(status.tagged(stage_name));
                return;
            }
            match rest.pop() {
                // the successor's own run() reports local failures through
                // its handler chain, so the sync status is not re-routed
                Some(next) => {
                    let _ = next.run_stage(rest, abort);
                }
                None => abort(FrameworkFault::Internal("pipeline stage without successor".into()).into()),
            }
        };
        self.0.with_handler(forwarding).run()
    }
}

/// Last stage: keeps the caller's terminal handler.
struct TailStage<K: OperationKind> {
    op: Operation<K>,
    handler: BoxedHandler<K::Response>,
}

impl<K: OperationKind> Stage for TailStage<K> {
    fn run_stage(self: Box<Self>, rest: Vec<Box<dyn Stage>>, _abort: AbortFn) -> Status {
        debug_assert!(rest.is_empty(), "tail stage must be last");
        let handler = self.handler;
        self.op
            .with_handler(move |status: Status, response: Option<K::Response>| {
                handler.handle(status, response)
            })
            .run()
    }
}

/// Ordered sequence of operations, still without a terminal handler.
///
/// The generic parameter tracks the last operation added, so the terminal
/// handler attached by `with_handler` is typed over the final response.
/// Forwarding between stages is declared beforehand by binding a later
/// operation's `Arg` to an earlier operation's `Resp`. The linear builder
/// cannot express a cycle, so malformed wiring surfaces as a `Forwarding`
/// error when the argument resolves.
pub struct Pipeline<K: OperationKind> {
    head: Vec<Box<dyn Stage>>,
    last: Operation<K>,
}

impl<K: OperationKind> Pipeline<K> {
    pub fn new(first: Operation<K>) -> Self {
        Self { head: Vec::new(), last: first }
    }

    /// Appends the next stage, wiring the previous one's terminal entry
    /// point to be the forwarding handler pointing at it.
    pub fn then<N: OperationKind>(mut self, next: Operation<N>) -> Pipeline<N> {
        self.head.push(Box::new(SeqStage(self.last)));
        Pipeline { head: self.head, last: next }
    }

    /// Attaches the caller's terminal handler to the last stage and yields
    /// the runnable form. The handler is delivered to exactly once, whether
    /// the chain completes or any stage short-circuits.
    pub fn with_handler<H>(self, handler: H) -> RunnablePipeline
        where H: ResponseHandler<K::Response> + 'static
    {
        let terminal: Arc<Mutex<Option<BoxedHandler<K::Response>>>> =
            Arc::new(Mutex::new(Some(Box::new(handler))));
        let on_abort = Arc::clone(&terminal);

        let tail = move |status: Status, response: Option<K::Response>| {
            if let Some(h) = take_once(&terminal) {
                h.handle(status, response);
            }
        };
        let abort: AbortFn = Box::new(move |status: Status| {
            if let Some(h) = take_once(&on_abort) {
                h.handle(status, None);
            }
        });

        let mut stages = self.head;
        stages.push(Box::new(TailStage { op: self.last, handler: Box::new(tail) }));
        stages.reverse();
        let first = stages.pop().expect("pipeline holds at least its tail stage");
        RunnablePipeline { first, rest: stages, abort }
    }
}

fn take_once<R>(slot: &Arc<Mutex<Option<BoxedHandler<R>>>>) -> Option<BoxedHandler<R>> {
    slot.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take()
}

/// Pipeline with terminal handler attached; exposes `run()`.
pub struct RunnablePipeline {
    first: Box<dyn Stage>,
    rest: Vec<Box<dyn Stage>>,
    abort: AbortFn,
}

impl RunnablePipeline {
    /// Starts the first stage. As with a single operation, the return value
    /// is only the synchronous submission status of that first stage; the
    /// chain's outcome arrives through the terminal handler.
    pub fn run(self) -> Status {
        self.first.run_stage(self.rest, self.abort)
    }
}
