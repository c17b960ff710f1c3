//! Frontera del adaptador de endpoint.
//!
//! `RemoteFs` es el contrato que implementa cada adaptador concreto (el
//! mock in-memory aquí, un cliente de red en producción). Cada método
//! recibe los argumentos ya resueltos más el handler de finalización, y
//! responde con `Submit`: aceptación asíncrona o rechazo síncrono con
//! devolución del handler. Ningún método bloquea esperando la respuesta.

use std::sync::Arc;

use remofs_core::{CompletionFn, Submit};

use crate::info::{
    AccessMode, Buffer, DirListFlags, DirectoryList, LocationInfo, MkDirFlags, OpenFlags,
    PrepareFlags, ProtocolInfo, QueryCode, StatInfo, StatInfoVfs, XAttr, XAttrPair, XAttrStatus,
};

/// Códigos de error reportados por el servidor remoto (origen Protocol).
pub mod remote_errors {
    pub const INVALID_REQUEST: u32 = 3006;
    pub const NOT_FOUND: u32       = 3011;
    pub const NOT_FILE: u32        = 3015;
    pub const IS_DIRECTORY: u32    = 3016;
}

/// Handle compartido al endpoint; cada operación guarda el suyo.
pub type FsRef = Arc<dyn RemoteFs>;

/// Catálogo de llamadas que expone un endpoint remoto.
///
/// Contrato de cada método: si devuelve `Accepted`, el adaptador posee el
/// handler y debe invocarlo exactamente una vez, quizá desde otro hilo;
/// si devuelve `Rejected`, el handler vuelve intacto y lo invoca el
/// framework. Un timeout del adaptador se reporta por el handler como
/// `Status` de origen Transport.
pub trait RemoteFs: Send + Sync {
    fn locate(&self,
              path: String,
              flags: OpenFlags,
              deep: bool,
              complete: CompletionFn<LocationInfo>)
              -> Submit<LocationInfo>;

    fn mv(&self, source: String, dest: String, complete: CompletionFn<()>) -> Submit<()>;

    fn query(&self, code: QueryCode, args: Buffer, complete: CompletionFn<Buffer>)
             -> Submit<Buffer>;

    fn truncate(&self, path: String, size: u64, complete: CompletionFn<()>) -> Submit<()>;

    fn rm(&self, path: String, complete: CompletionFn<()>) -> Submit<()>;

    fn mkdir(&self,
             path: String,
             flags: MkDirFlags,
             mode: AccessMode,
             complete: CompletionFn<()>)
             -> Submit<()>;

    fn rmdir(&self, path: String, complete: CompletionFn<()>) -> Submit<()>;

    fn chmod(&self, path: String, mode: AccessMode, complete: CompletionFn<()>) -> Submit<()>;

    fn ping(&self, complete: CompletionFn<()>) -> Submit<()>;

    fn stat(&self, path: String, complete: CompletionFn<StatInfo>) -> Submit<StatInfo>;

    fn stat_vfs(&self, path: String, complete: CompletionFn<StatInfoVfs>) -> Submit<StatInfoVfs>;

    fn protocol(&self, complete: CompletionFn<ProtocolInfo>) -> Submit<ProtocolInfo>;

    fn dir_list(&self,
                path: String,
                flags: DirListFlags,
                complete: CompletionFn<DirectoryList>)
                -> Submit<DirectoryList>;

    fn send_info(&self, info: String, complete: CompletionFn<Buffer>) -> Submit<Buffer>;

    fn prepare(&self,
               files: Vec<String>,
               flags: PrepareFlags,
               priority: u8,
               complete: CompletionFn<Buffer>)
               -> Submit<Buffer>;

    /// Escritura masiva de atributos; un estado por atributo.
    fn set_xattr(&self,
                 path: String,
                 attrs: Vec<XAttrPair>,
                 complete: CompletionFn<Vec<XAttrStatus>>)
                 -> Submit<Vec<XAttrStatus>>;

    /// Lectura masiva de atributos; valor y estado por atributo.
    fn get_xattr(&self,
                 path: String,
                 names: Vec<String>,
                 complete: CompletionFn<Vec<XAttr>>)
                 -> Submit<Vec<XAttr>>;

    /// Borrado masivo de atributos; un estado por atributo.
    fn del_xattr(&self,
                 path: String,
                 names: Vec<String>,
                 complete: CompletionFn<Vec<XAttrStatus>>)
                 -> Submit<Vec<XAttrStatus>>;

    fn list_xattr(&self, path: String, complete: CompletionFn<Vec<XAttr>>) -> Submit<Vec<XAttr>>;
}
