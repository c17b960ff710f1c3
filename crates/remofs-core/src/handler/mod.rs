//! Handlers de finalización.
//!
//! Un handler se invoca exactamente una vez, de forma asíncrona, con el
//! `Status` final y (si hubo éxito) la respuesta tipada de una operación.
//! Dos roles:
//! - *handler terminal*: lo aporta el llamador original; entregarle el
//!   resultado termina el pipeline.
//! - *handler de reenvío*: lo sintetiza el combinador de pipeline; en éxito
//!   arranca la etapa siguiente, en fallo corta directo al terminal.
//!
//! El consumo por `Box<Self>` expresa el contrato de invocación única en el
//! sistema de tipos: un handler ya entregado no puede reentrar.

mod wait;

pub use wait::{sync_handler, SyncResponse};

use crate::errors::Status;

/// Callback de finalización de una operación.
pub trait ResponseHandler<R>: Send {
    /// Invocado exactamente una vez con el resultado final. `response` es
    /// `Some` únicamente cuando `status.is_ok()`.
    fn handle(self: Box<Self>, status: Status, response: Option<R>);
}

/// Cualquier closure `FnOnce(Status, Option<R>)` es un handler válido.
impl<R, F> ResponseHandler<R> for F where F: FnOnce(Status, Option<R>) + Send
{
    fn handle(self: Box<Self>, status: Status, response: Option<R>) {
        self(status, response)
    }
}

/// Handler empaquetado, listo para cruzar la frontera del adaptador.
pub type BoxedHandler<R> = Box<dyn ResponseHandler<R>>;

/// Forma plana del handler usada en el contrato del adaptador de endpoint.
pub type CompletionFn<R> = Box<dyn FnOnce(Status, Option<R>) + Send>;
