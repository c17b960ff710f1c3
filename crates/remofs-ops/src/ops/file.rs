//! Operaciones sobre nodos: movimiento, borrado, truncado, metadatos.

use remofs_core::remote_operation;

use crate::fs::FsRef;
use crate::info::{AccessMode, StatInfo, StatInfoVfs};

remote_operation! {
    /// Mueve o renombra un nodo. El path origen deja de existir.
    Mv(FsRef) -> () {
        name: "Mv",
        args { source: String, dest: String },
        issue(fs, complete) { fs.mv(source, dest, complete) }
    }
    factory mv;
}

remote_operation! {
    /// Borra un fichero.
    Rm(FsRef) -> () {
        name: "Rm",
        args { path: String },
        issue(fs, complete) { fs.rm(path, complete) }
    }
    factory rm;
}

remote_operation! {
    /// Trunca un fichero al tamaño dado.
    Truncate(FsRef) -> () {
        name: "Truncate",
        args { path: String, size: u64 },
        issue(fs, complete) { fs.truncate(path, size, complete) }
    }
    factory truncate;
}

remote_operation! {
    /// Cambia los bits de permisos de un nodo.
    ChMod(FsRef) -> () {
        name: "ChMod",
        args { path: String, mode: AccessMode },
        issue(fs, complete) { fs.chmod(path, mode, complete) }
    }
    factory chmod;
}

remote_operation! {
    /// Metadatos de un nodo.
    Stat(FsRef) -> StatInfo {
        name: "Stat",
        args { path: String },
        issue(fs, complete) { fs.stat(path, complete) }
    }
    factory stat;
}

remote_operation! {
    /// Metadatos agregados del sistema de ficheros virtual bajo un path.
    StatVfs(FsRef) -> StatInfoVfs {
        name: "StatVfs",
        args { path: String },
        issue(fs, complete) { fs.stat_vfs(path, complete) }
    }
    factory stat_vfs;
}
