//! Constantes del core.
//!
//! Este módulo agrupa los códigos numéricos de los fallos detectados
//! localmente por el framework. Los códigos remotos (Transport/Protocol)
//! los asigna el servidor o el adaptador de endpoint; aquí sólo viven los
//! locales para que ningún fallo del framework colisione con un código
//! remoto.

/// Código de un `Status` exitoso.
pub const OK: u32 = 0;

/// Un `Arg` reenviado se leyó antes de que su etapa origen completara.
pub const ERR_NOT_READY: u32 = 101;

/// Se intentó escribir dos veces la misma celda `Resp`.
pub const ERR_RESP_ALREADY_SET: u32 = 102;

/// El adaptador descartó un handler aceptado sin invocarlo.
pub const ERR_HANDLER_DROPPED: u32 = 103;

/// Argumento inválido detectado antes de tocar la red.
pub const ERR_INVALID_ARGUMENT: u32 = 104;

/// Fallo interno del framework (bug, no error de usuario ni remoto).
pub const ERR_INTERNAL: u32 = 199;
