//! Operaciones remotas como entidades type-state.
//!
//! Una operación envuelve los argumentos de una llamada remota, su celda de
//! respuesta y (una vez aportado) el handler de finalización. Este módulo
//! define:
//! - `OperationKind`: descripción de capacidad de cada clase de llamada
//!   (tipo de respuesta + despacho sobre el adaptador de endpoint).
//! - `Submit`: resultado inmediato del adaptador, con devolución de
//!   propiedad del handler en el rechazo síncrono.
//! - `Operation` / `RunnableOperation`: la pareja type-state sin/con
//!   handler; `run()` sólo existe en la segunda.
//! - `remote_operation!`: macro que hace mecánica la instanciación del
//!   catálogo de operaciones concretas.

mod kind;
pub mod macros; // macro para instanciar operaciones concretas
mod op;

pub use kind::{OperationKind, Submit};
pub use op::{Operation, RunnableOperation};
