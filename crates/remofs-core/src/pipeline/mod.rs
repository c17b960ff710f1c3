//! Combinadores de composición de operaciones.
//!
//! Dos formas, y sólo dos (esto no es un framework de dataflow general):
//! - `Pipeline`: secuencia lineal con reenvío de resultados y corte en el
//!   primer fallo.
//! - `Parallel`: grupo fan-out de miembros independientes, agregado al
//!   completar todos.

mod parallel;
mod sequence;

pub use parallel::{Parallel, RunnableParallel};
pub use sequence::{Pipeline, RunnablePipeline};
