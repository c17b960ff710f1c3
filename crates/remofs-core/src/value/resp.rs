//! Celda de respuesta write-once.

use std::sync::{Arc, OnceLock};

use crate::errors::{FrameworkFault, Status};

/// Celda de resultado tipada de una operación.
///
/// Ciclo de vida: vacía al construirse → escrita a lo sumo una vez al
/// completar con éxito → legible por cualquier `Arg` reenviado que la
/// referencie → descartada al terminar la ejecución del pipeline.
///
/// Clonar un `Resp` comparte la celda subyacente; eso es lo que permite a
/// los `Arg` reenviados mantener una referencia no propietaria al slot de
/// la etapa productora.
#[derive(Debug)]
pub struct Resp<T> {
    slot: Arc<OnceLock<T>>,
}

impl<T> Clone for Resp<T> {
    fn clone(&self) -> Self {
        Self { slot: Arc::clone(&self.slot) }
    }
}

impl<T> Default for Resp<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Resp<T> {
    pub fn new() -> Self {
        Self { slot: Arc::new(OnceLock::new()) }
    }

    /// Escribe el valor. La segunda escritura es una violación de contrato:
    /// devuelve un error de origen `Local` y deja intacto el primer valor.
    ///
    /// El chequeo write-once es atómico (`OnceLock`), de modo que una doble
    /// escritura accidental se convierte en error y nunca en data race.
    pub fn set(&self, value: T) -> Result<(), Status> {
        self.slot.set(value)
                 .map_err(|_| FrameworkFault::ResponseAlreadySet.into())
    }

    pub fn is_set(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<T: Clone> Resp<T> {
    /// Lee el valor ya materializado. Leer antes de que la etapa origen
    /// complete con éxito es violación de contrato: error `Forwarding`,
    /// nunca un valor por defecto silencioso.
    pub fn try_get(&self) -> Result<T, Status> {
        self.slot.get()
                 .cloned()
                 .ok_or_else(|| FrameworkFault::ForwardedValueNotReady.into())
    }
}
