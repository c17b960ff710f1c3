//! La pareja type-state `Operation` / `RunnableOperation`.

use crate::errors::Status;
use crate::handler::{BoxedHandler, CompletionFn, ResponseHandler};
use crate::operation::{OperationKind, Submit};
use crate::value::Resp;

/// Operación configurada pero no ejecutable: aún sin handler terminal.
///
/// Posee en exclusiva sus argumentos y su celda `Resp`. La única
/// transición legal es `with_handler`, que consume este valor y devuelve
/// una `RunnableOperation`; no existe transición inversa.
pub struct Operation<K: OperationKind> {
    kind: K,
    resp: Resp<K::Response>,
}

impl<K: OperationKind> Operation<K> {
    pub fn new(kind: K) -> Self {
        Self { kind, resp: Resp::new() }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Celda de resultado de esta operación. Ligarla a un `Arg` de una
    /// etapa posterior es la forma de reenvío (`Arg::forwarded`).
    pub fn resp(&self) -> &Resp<K::Response> {
        &self.resp
    }

    /// Adjunta el handler terminal y transiciona al estado ejecutable.
    pub fn with_handler<H>(self, handler: H) -> RunnableOperation<K>
        where H: ResponseHandler<K::Response> + 'static
    {
        RunnableOperation { kind: self.kind,
                            resp: self.resp,
                            handler: Box::new(handler) }
    }
}

/// Operación ejecutable: handler adjunto, expone `run()`.
pub struct RunnableOperation<K: OperationKind> {
    kind: K,
    resp: Resp<K::Response>,
    handler: BoxedHandler<K::Response>,
}

impl<K: OperationKind> RunnableOperation<K> {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Ejecuta la operación.
    ///
    /// El valor de retorno es únicamente el estado síncrono de emisión
    /// (error local de resolución de argumentos, o "aceptada para
    /// procesamiento asíncrono"); el desenlace remoto llega siempre por el
    /// handler. Canal doble intencional: el uso síncrono bloquea dentro de
    /// su handler, el asíncrono retorna de inmediato.
    ///
    /// Garantía: el handler adjunto se invoca exactamente una vez, haya
    /// éxito, fallo local, de reenvío o remoto. En el camino de éxito la
    /// celda `Resp` queda escrita antes de invocar el handler, que es lo
    /// que hace seguro el reenvío dentro de un pipeline sin locking extra.
    pub fn run(mut self) -> Status {
        let resp = self.resp;
        let handler = self.handler;
        let complete: CompletionFn<K::Response> = Box::new(move |status: Status, response: Option<K::Response>| {
            if !status.is_ok() {
                handler.handle(status, None);
                return;
            }
            if let Some(value) = &response {
                if let Err(fault) = resp.set(value.clone()) {
                    // doble escritura: bug del framework/adaptador, origen Local
                    handler.handle(fault, None);
                    return;
                }
            }
            handler.handle(status, response);
        });

        match self.kind.dispatch(complete) {
            Submit::Accepted => Status::ok(),
            Submit::Rejected { status, handler } => {
                // rechazo síncrono: la propiedad del handler volvió; la
                // entrega exactamente-una-vez ocurre aquí
                handler(status.clone(), None);
                status
            }
        }
    }
}
