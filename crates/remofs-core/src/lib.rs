//! remofs-core: motor de operaciones y pipelines cliente
pub mod constants;
pub mod errors;
pub mod handler;
pub mod operation;
pub mod pipeline;
pub mod value;

pub use errors::{ErrorOrigin, FrameworkFault, Status};
pub use handler::{sync_handler, BoxedHandler, CompletionFn, ResponseHandler, SyncResponse};
pub use operation::{Operation, OperationKind, RunnableOperation, Submit};
pub use pipeline::{Parallel, Pipeline, RunnableParallel, RunnablePipeline};
pub use value::{Arg, Resp};

// La macro remote_operation! ya queda en la raíz vía #[macro_export].

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    // Clase mínima de operación: responde en línea con el valor fijado.
    struct Echo {
        payload: Arg<String>,
    }

    impl OperationKind for Echo {
        type Response = String;

        fn name(&self) -> &'static str { "Echo" }

        fn dispatch(&mut self, complete: CompletionFn<String>) -> Submit<String> {
            let payload = match self.payload.get() {
                Ok(value) => value,
                Err(status) => return Submit::Rejected { status, handler: complete },
            };
            complete(Status::ok(), Some(payload));
            Submit::Accepted
        }
    }

    fn echo(payload: impl Into<Arg<String>>) -> Operation<Echo> {
        Operation::new(Echo { payload: payload.into() })
    }

    #[test]
    fn operation_delivers_response_through_handler() {
        let (tx, rx) = mpsc::channel();
        let status = echo("hola")
            .with_handler(move |status: Status, response: Option<String>| {
                tx.send((status, response)).expect("receiver alive");
            })
            .run();
        assert!(status.is_ok());

        let (status, response) = rx.recv().expect("handler fired");
        assert!(status.is_ok());
        assert_eq!(response.as_deref(), Some("hola"));
    }

    #[test]
    fn pipeline_forwards_response_between_stages() {
        let first = echo("reenviado");
        let second = echo(first.resp());

        let (tx, rx) = mpsc::channel();
        let status = Pipeline::new(first)
            .then(second)
            .with_handler(move |status: Status, response: Option<String>| {
                tx.send((status, response)).expect("receiver alive");
            })
            .run();
        assert!(status.is_ok());

        let (status, response) = rx.recv().expect("terminal handler fired");
        assert!(status.is_ok());
        assert_eq!(response.as_deref(), Some("reenviado"));
    }
}
