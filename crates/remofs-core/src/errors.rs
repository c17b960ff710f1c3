//! Taxonomía de errores del core.
//!
//! Tres orígenes de fallo, mantenidos distintos de punta a punta:
//! - `Transport`/`Protocol`: el endpoint remoto reportó el fallo.
//! - `Local`: mal uso o fallo interno detectado antes de tocar la red.
//! - `Forwarding`: un argumento reenviado se leyó antes de que su etapa
//!   origen completara con éxito.
//!
//! Un `Status` nunca degrada su origen (un fallo de forwarding jamás se
//! reporta como si fuera de protocolo).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// Origen de un `Status`. `None` significa éxito.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorOrigin {
    None,
    Transport,
    Protocol,
    Local,
    Forwarding,
}

/// Fallos detectados por el propio framework, sin ida y vuelta de red.
///
/// Se convierten en `Status` en la frontera de `run()`; los que indican
/// un bug del framework (doble escritura, handler descartado) salen con
/// origen `Local`, la lectura prematura de un reenvío con `Forwarding`.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameworkFault {
    #[error("forwarded argument read before its source stage completed")]
    ForwardedValueNotReady,
    #[error("response slot written twice")]
    ResponseAlreadySet,
    #[error("completion handler dropped without being invoked")]
    HandlerDropped,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl FrameworkFault {
    fn origin(&self) -> ErrorOrigin {
        match self {
            FrameworkFault::ForwardedValueNotReady => ErrorOrigin::Forwarding,
            _ => ErrorOrigin::Local,
        }
    }

    fn code(&self) -> u32 {
        match self {
            FrameworkFault::ForwardedValueNotReady => constants::ERR_NOT_READY,
            FrameworkFault::ResponseAlreadySet => constants::ERR_RESP_ALREADY_SET,
            FrameworkFault::HandlerDropped => constants::ERR_HANDLER_DROPPED,
            FrameworkFault::InvalidArgument(_) => constants::ERR_INVALID_ARGUMENT,
            FrameworkFault::Internal(_) => constants::ERR_INTERNAL,
        }
    }
}

/// Valor de resultado uniforme producido en cada frontera de etapa.
///
/// Inmutable una vez construido; nunca parcialmente relleno. `is_ok()`
/// vale `true` si y sólo si `origin == ErrorOrigin::None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub origin: ErrorOrigin,
    pub code: u32,
    pub message: String,
}

impl Status {
    /// Éxito.
    pub fn ok() -> Self {
        Self { origin: ErrorOrigin::None,
               code: constants::OK,
               message: String::new() }
    }

    /// Fallo reportado por la capa de transporte (conexión, timeout).
    pub fn transport(code: u32, message: impl Into<String>) -> Self {
        Self { origin: ErrorOrigin::Transport,
               code,
               message: message.into() }
    }

    /// Fallo reportado por el servidor remoto.
    pub fn protocol(code: u32, message: impl Into<String>) -> Self {
        Self { origin: ErrorOrigin::Protocol,
               code,
               message: message.into() }
    }

    /// Fallo local (mal uso o bug del framework).
    pub fn local(code: u32, message: impl Into<String>) -> Self {
        Self { origin: ErrorOrigin::Local,
               code,
               message: message.into() }
    }

    pub fn is_ok(&self) -> bool {
        self.origin == ErrorOrigin::None
    }

    /// Etiqueta el mensaje con la etapa de pipeline que falló, sin tocar
    /// origen ni código.
    pub fn tagged(mut self, stage: &str) -> Self {
        if !self.is_ok() {
            self.message = format!("[{stage}] {}", self.message);
        }
        self
    }
}

impl From<FrameworkFault> for Status {
    fn from(fault: FrameworkFault) -> Self {
        Self { origin: fault.origin(),
               code: fault.code(),
               message: fault.to_string() }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_ok() {
            write!(f, "ok")
        } else {
            write!(f, "{:?} error {}: {}", self.origin, self.code, self.message)
        }
    }
}

impl std::error::Error for Status {}
