//! Contrato entre el core y las clases concretas de operación.

use crate::errors::Status;
use crate::handler::CompletionFn;

/// Resultado inmediato de entregar una petición al adaptador de endpoint.
///
/// La propiedad del handler viaja con la llamada: si el adaptador acepta,
/// se queda con el handler y debe invocarlo exactamente una vez (quizá
/// desde otro hilo); si rechaza de forma síncrona, la propiedad vuelve al
/// framework dentro de `Rejected` y es el framework quien lo invoca. Nunca
/// hay liberación condicional manual.
pub enum Submit<R> {
    /// Petición aceptada para procesamiento asíncrono. Nunca transporta el
    /// resultado remoto.
    Accepted,
    /// Rechazo síncrono local; el handler vuelve sin haber sido invocado.
    Rejected { status: Status, handler: CompletionFn<R> },
}

/// Descripción de capacidad de una clase de operación remota.
///
/// Cada clase concreta (locate, stat, mv, ...) aporta su tipo de respuesta
/// y un único punto de despacho que resuelve los argumentos en su orden
/// declarado y emite la llamada sobre el endpoint. El core monomorfiza
/// sobre este trait; no hay despacho virtual por operación.
pub trait OperationKind: Send + 'static {
    type Response: Clone + Send + Sync + 'static;

    /// Nombre estable de la operación (para etiquetar fallos de etapa).
    fn name(&self) -> &'static str;

    /// Resuelve cada `Arg` en orden declarado y entrega la llamada al
    /// adaptador. Si un argumento no resuelve, debe devolver
    /// `Submit::Rejected` con ese error y el handler intacto, sin tocar la
    /// red. No debe bloquear esperando la respuesta remota ni invocar el
    /// handler por sí mismo.
    fn dispatch(&mut self, complete: CompletionFn<Self::Response>) -> Submit<Self::Response>;
}
