//! Pipeline lineal: orden de etapas, reenvío entre etapas, corte en el
//! primer fallo y etiquetado del fallo con la etapa que lo produjo.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use remofs_core::{
    sync_handler, Arg, CompletionFn, ErrorOrigin, Operation, OperationKind, Pipeline, Status,
    Submit,
};

/// Registro compartido del orden de ejecución de etapas.
type Trace = Arc<Mutex<Vec<&'static str>>>;

struct Step {
    label:   &'static str,
    trace:   Trace,
    payload: Arg<String>,
    outcome: Status,
}

impl OperationKind for Step {
    type Response = String;

    fn name(&self) -> &'static str { self.label }

    fn dispatch(&mut self, complete: CompletionFn<String>) -> Submit<String> {
        let payload = match self.payload.get() {
            Ok(value) => value,
            Err(status) => return Submit::Rejected { status, handler: complete },
        };
        self.trace.lock().expect("trace lock").push(self.label);
        if self.outcome.is_ok() {
            complete(Status::ok(), Some(payload));
        } else {
            complete(self.outcome.clone(), None);
        }
        Submit::Accepted
    }
}

fn step(label: &'static str, trace: &Trace, payload: impl Into<Arg<String>>) -> Operation<Step> {
    Operation::new(Step { label,
                          trace: Arc::clone(trace),
                          payload: payload.into(),
                          outcome: Status::ok() })
}

fn failing_step(label: &'static str,
                trace: &Trace,
                payload: impl Into<Arg<String>>,
                outcome: Status)
                -> Operation<Step> {
    Operation::new(Step { label,
                          trace: Arc::clone(trace),
                          payload: payload.into(),
                          outcome })
}

#[test]
fn stages_run_in_declaration_order() {
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));

    let (handler, response) = sync_handler();
    let submit = Pipeline::new(step("a", &trace, "x"))
        .then(step("b", &trace, "x"))
        .then(step("c", &trace, "x"))
        .with_handler(handler)
        .run();
    assert!(submit.is_ok());

    let (status, _) = response.wait();
    assert!(status.is_ok());
    assert_eq!(*trace.lock().expect("trace lock"), vec!["a", "b", "c"]);
}

#[test]
fn terminal_handler_sees_last_stage_response() {
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));

    let (handler, response) = sync_handler();
    Pipeline::new(step("a", &trace, "primero"))
        .then(step("b", &trace, "último"))
        .with_handler(handler)
        .run();

    let (status, value) = response.wait();
    assert!(status.is_ok());
    assert_eq!(value.as_deref(), Some("último"));
}

#[test]
fn forwarded_value_crosses_stage_boundary_exactly() {
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));

    let producer = step("a", &trace, "valor-exacto");
    let consumer = step("b", &trace, producer.resp());

    let (handler, response) = sync_handler();
    Pipeline::new(producer).then(consumer).with_handler(handler).run();

    let (status, value) = response.wait();
    assert!(status.is_ok());
    assert_eq!(value.as_deref(), Some("valor-exacto"));
}

#[test]
fn first_failure_short_circuits_later_stages() {
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));

    let (handler, response) = sync_handler();
    Pipeline::new(step("a", &trace, "x"))
        .then(failing_step("b", &trace, "x", Status::protocol(3011, "no such file")))
        .then(step("c", &trace, "x"))
        .with_handler(handler)
        .run();

    let (status, value) = response.wait();
    assert_eq!(status.origin, ErrorOrigin::Protocol);
    assert_eq!(status.code, 3011);
    assert_eq!(value, None);
    // la etapa c nunca llegó al adaptador
    assert_eq!(*trace.lock().expect("trace lock"), vec!["a", "b"]);
}

#[test]
fn failure_is_tagged_with_the_failing_stage_name() {
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));

    let (handler, response) = sync_handler();
    Pipeline::new(failing_step("DeepLocate", &trace, "x", Status::protocol(3011, "no such file")))
        .then(step("DirList", &trace, "x"))
        .with_handler(handler)
        .run();

    let (status, _) = response.wait();
    assert!(status.message.starts_with("[DeepLocate] "));
    assert_eq!(status.origin, ErrorOrigin::Protocol);
    assert_eq!(status.code, 3011);
}

#[test]
fn skipped_stage_leaves_its_resp_unset() {
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));

    let skipped = step("c", &trace, "x");
    let skipped_resp = skipped.resp().clone();

    let (handler, response) = sync_handler();
    Pipeline::new(failing_step("b", &trace, "x", Status::transport(5, "timed out")))
        .then(skipped)
        .with_handler(handler)
        .run();

    let (status, _) = response.wait();
    assert_eq!(status.origin, ErrorOrigin::Transport);
    assert!(!skipped_resp.is_set());
}

#[test]
fn forwarding_failure_inside_pipeline_aborts_with_forwarding_origin() {
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));

    // el Arg de b apunta a una celda que ninguna etapa del pipeline escribe
    let orphan = remofs_core::Resp::<String>::new();

    let (handler, response) = sync_handler();
    Pipeline::new(step("a", &trace, "x"))
        .then(step("b", &trace, &orphan))
        .with_handler(handler)
        .run();

    let (status, value) = response.wait();
    assert_eq!(status.origin, ErrorOrigin::Forwarding);
    assert_eq!(value, None);
}

#[test]
fn terminal_handler_fires_exactly_once_on_failure() {
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    Pipeline::new(failing_step("a", &trace, "x", Status::local(1, "boom")))
        .then(step("b", &trace, "x"))
        .with_handler(move |_status: Status, _response: Option<String>| {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .run();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn single_stage_pipeline_behaves_like_the_operation() {
    let trace: Trace = Arc::new(Mutex::new(Vec::new()));

    let (handler, response) = sync_handler();
    let submit = Pipeline::new(step("solo", &trace, "uno")).with_handler(handler).run();
    assert!(submit.is_ok());

    let (status, value) = response.wait();
    assert!(status.is_ok());
    assert_eq!(value.as_deref(), Some("uno"));
}
