//! Localización de réplicas.

use remofs_core::remote_operation;

use crate::fs::FsRef;
use crate::info::{LocationInfo, OpenFlags};

remote_operation! {
    /// Localiza las réplicas de un path preguntando al primer nivel de la
    /// jerarquía (un manager puede responder por sus servidores).
    Locate(FsRef) -> LocationInfo {
        name: "Locate",
        args { path: String, flags: OpenFlags },
        issue(fs, complete) { fs.locate(path, flags, false, complete) }
    }
    factory locate;
}

remote_operation! {
    /// Como locate, pero desciende la jerarquía completa hasta los
    /// servidores de datos finales.
    DeepLocate(FsRef) -> LocationInfo {
        name: "DeepLocate",
        args { path: String, flags: OpenFlags },
        issue(fs, complete) { fs.locate(path, flags, true, complete) }
    }
    factory deep_locate;
}
