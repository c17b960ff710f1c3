//! Parámetro tipado de una operación.

use crate::errors::Status;
use crate::value::Resp;

/// Celda de parámetro tipada. Dos estados:
/// - `Bound`: valor concreto, disponible de inmediato.
/// - `Forwarded`: referencia al slot de resultado de una etapa anterior;
///   el valor está ausente hasta que esa etapa complete con éxito.
#[derive(Debug, Clone)]
pub enum Arg<T> {
    Bound(T),
    Forwarded(Resp<T>),
}

impl<T: Clone> Arg<T> {
    /// Liga el argumento al `Resp` de una etapa productora. Operación de
    /// pura construcción: no resuelve nada todavía.
    pub fn forwarded(source: &Resp<T>) -> Self {
        Arg::Forwarded(source.clone())
    }

    /// Resuelve el valor en tiempo de `run()`.
    ///
    /// Sobre una celda `Bound` es legal e idempotente; sobre una celda
    /// `Forwarded` ya resuelta devuelve el mismo valor. Si la fuente aún no
    /// completó, falla con origen `Forwarding`.
    pub fn get(&self) -> Result<T, Status> {
        match self {
            Arg::Bound(value) => Ok(value.clone()),
            Arg::Forwarded(source) => source.try_get(),
        }
    }
}

impl<T> From<T> for Arg<T> {
    fn from(value: T) -> Self {
        Arg::Bound(value)
    }
}

impl<T: Clone> From<&Resp<T>> for Arg<T> {
    fn from(source: &Resp<T>) -> Self {
        Arg::forwarded(source)
    }
}

/// Conveniencia para paths y literales: `Arg<String>` desde `&str`.
impl From<&str> for Arg<String> {
    fn from(value: &str) -> Self {
        Arg::Bound(value.to_string())
    }
}
