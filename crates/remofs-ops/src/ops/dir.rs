//! Operaciones de directorio.

use remofs_core::remote_operation;

use crate::fs::FsRef;
use crate::info::{AccessMode, DirListFlags, DirectoryList, MkDirFlags};

remote_operation! {
    /// Crea un directorio; con `MkDirFlags::MAKE_PATH` crea también los
    /// intermedios que falten.
    MkDir(FsRef) -> () {
        name: "MkDir",
        args { path: String, flags: MkDirFlags, mode: AccessMode },
        issue(fs, complete) { fs.mkdir(path, flags, mode, complete) }
    }
    factory mkdir;
}

remote_operation! {
    /// Borra un directorio vacío.
    RmDir(FsRef) -> () {
        name: "RmDir",
        args { path: String },
        issue(fs, complete) { fs.rmdir(path, complete) }
    }
    factory rmdir;
}

remote_operation! {
    /// Lista las entradas de un directorio; con `DirListFlags::STAT` cada
    /// entrada trae sus metadatos.
    DirList(FsRef) -> DirectoryList {
        name: "DirList",
        args { path: String, flags: DirListFlags },
        issue(fs, complete) { fs.dir_list(path, flags, complete) }
    }
    factory dir_list;
}
