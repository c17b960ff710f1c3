//! Operaciones de servidor: vida, protocolo, consultas y colas de staging.

use remofs_core::{remote_operation, FrameworkFault, Submit};

use crate::fs::FsRef;
use crate::info::{Buffer, PrepareFlags, ProtocolInfo, QueryCode};

remote_operation! {
    /// Comprueba que el endpoint responde.
    Ping(FsRef) -> () {
        name: "Ping",
        issue(fs, complete) { fs.ping(complete) }
    }
    factory ping;
}

remote_operation! {
    /// Versión de protocolo del endpoint.
    Protocol(FsRef) -> ProtocolInfo {
        name: "Protocol",
        issue(fs, complete) { fs.protocol(complete) }
    }
    factory protocol;
}

remote_operation! {
    /// Consulta de información del servidor (configuración, checksums,
    /// espacio, estadísticas).
    Query(FsRef) -> Buffer {
        name: "Query",
        args { code: QueryCode, args: Buffer },
        issue(fs, complete) { fs.query(code, args, complete) }
    }
    factory query;
}

remote_operation! {
    /// Envía información opaca al servidor; la respuesta identifica la
    /// petición registrada.
    SendInfo(FsRef) -> Buffer {
        name: "SendInfo",
        args { info: String },
        issue(fs, complete) { fs.send_info(info, complete) }
    }
    factory send_info;
}

remote_operation! {
    /// Encola una petición de preparación (staging) sobre una lista de
    /// ficheros; la respuesta trae el id de la petición encolada.
    ///
    /// Una lista vacía es un error Local detectado aquí: el adaptador no
    /// llega a ver la petición.
    Prepare(FsRef) -> Buffer {
        name: "Prepare",
        args { files: Vec<String>, flags: PrepareFlags, priority: u8 },
        issue(fs, complete) {
            if files.is_empty() {
                let fault = FrameworkFault::InvalidArgument("prepare requires at least one file".into());
                return Submit::Rejected { status: fault.into(), handler: complete };
            }
            fs.prepare(files, flags, priority, complete)
        }
    }
    factory prepare;
}
