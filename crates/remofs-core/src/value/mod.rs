//! Modelo de valores tipados (Arg / Resp).
//!
//! Un `Resp<T>` es la celda de resultado que posee la operación que lo
//! produce; un `Arg<T>` es el parámetro tipado de una operación, ya sea
//! ligado a un valor concreto o reenviado desde el `Resp` de una etapa
//! anterior. La pareja `get()`/`set()` es el único punto con concurrencia;
//! la ligadura (`bind`) es puramente de construcción.

mod arg;
mod resp;

pub use arg::Arg;
pub use resp::Resp;
