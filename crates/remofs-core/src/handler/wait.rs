//! Puente síncrono sobre el canal de finalización.
//!
//! El core nunca bloquea esperando la respuesta remota; el bloqueo que el
//! llamador quiera para emular llamadas síncronas es responsabilidad suya,
//! vía una primitiva señalada desde dentro del handler terminal. Este módulo
//! empaqueta ese patrón: un handler que publica en un canal y un receptor
//! bloqueante.

use std::sync::mpsc;

use crate::errors::{FrameworkFault, Status};

/// Receptor bloqueante del resultado de una operación.
pub struct SyncResponse<R> {
    rx: mpsc::Receiver<(Status, Option<R>)>,
}

impl<R> SyncResponse<R> {
    /// Bloquea hasta que el handler terminal entregue el resultado.
    ///
    /// Si el adaptador descartó el handler sin invocarlo (violación de su
    /// contrato), el canal se cierra y se reporta como error `Local`.
    pub fn wait(self) -> (Status, Option<R>) {
        match self.rx.recv() {
            Ok(outcome) => outcome,
            Err(_) => (FrameworkFault::HandlerDropped.into(), None),
        }
    }
}

/// Crea la pareja (handler terminal, receptor bloqueante).
///
/// Uso típico:
/// ```ignore
/// let (handler, response) = sync_handler();
/// let submit = stat(&fs, "/a/file").with_handler(handler).run();
/// let (status, info) = response.wait();
/// ```
pub fn sync_handler<R: Send + 'static>() -> (impl FnOnce(Status, Option<R>) + Send, SyncResponse<R>) {
    let (tx, rx) = mpsc::channel();
    let handler = move |status: Status, response: Option<R>| {
        // Si el llamador soltó el receptor, el resultado simplemente se
        // descarta; el envío fallido no es un error del framework.
        let _ = tx.send((status, response));
    };
    (handler, SyncResponse { rx })
}
