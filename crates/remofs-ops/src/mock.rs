//! Endpoint in-memory para tests y demo.
//!
//! Implementa `RemoteFs` sobre un árbol de nodos en un `Mutex`. Dos modos
//! de entrega: inmediata (el handler corre dentro de la llamada, útil para
//! tests deterministas) y diferida (el handler corre en otro hilo, como
//! una respuesta remota real). Los fallos se reportan con origen Protocol
//! y los códigos de `remote_errors`, igual que haría un servidor.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use remofs_core::{CompletionFn, Status, Submit};
use uuid::Uuid;

use crate::fs::{remote_errors, FsRef, RemoteFs};
use crate::info::{
    AccessMode, AccessType, Buffer, DirEntry, DirListFlags, DirectoryList, Location, LocationInfo,
    LocationKind, MkDirFlags, OpenFlags, PrepareFlags, ProtocolInfo, QueryCode, StatFlags,
    StatInfo, StatInfoVfs, XAttr, XAttrPair, XAttrStatus,
};

/// Modo de entrega de las finalizaciones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// El handler corre dentro de la llamada al adaptador.
    Immediate,
    /// El handler corre en un hilo aparte, tras retornar `Accepted`.
    Deferred,
}

#[derive(Debug, Clone)]
struct Node {
    is_dir:   bool,
    size:     u64,
    mode:     AccessMode,
    mod_time: u64,
    xattrs:   BTreeMap<String, String>,
}

impl Node {
    fn dir(mode: AccessMode, mod_time: u64) -> Self {
        Self { is_dir: true, size: 0, mode, mod_time, xattrs: BTreeMap::new() }
    }

    fn file(size: u64, mod_time: u64) -> Self {
        Self { is_dir:   false,
               size,
               mode:     AccessMode::UR | AccessMode::UW,
               mod_time,
               xattrs:   BTreeMap::new() }
    }
}

/// Árbol in-memory que habla el contrato `RemoteFs`.
pub struct MockFs {
    address: String,
    mode:    Delivery,
    clock:   AtomicU64,
    nodes:   Mutex<BTreeMap<String, Node>>,
}

impl MockFs {
    pub fn new(mode: Delivery) -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::dir(default_dir_mode(), 0));
        Self { address: "mock.endpoint:1094".to_string(),
               mode,
               clock: AtomicU64::new(1),
               nodes: Mutex::new(nodes) }
    }

    /// Siembra un directorio (y sus intermedios) antes de arrancar.
    pub fn with_dir(self, path: &str) -> Self {
        let now = self.tick();
        {
            let mut nodes = self.lock_nodes();
            for ancestor in ancestors(path) {
                nodes.entry(ancestor).or_insert_with(|| Node::dir(default_dir_mode(), now));
            }
            nodes.insert(normalize(path), Node::dir(default_dir_mode(), now));
        }
        self
    }

    /// Siembra un fichero de tamaño dado (y sus directorios intermedios).
    pub fn with_file(self, path: &str, size: u64) -> Self {
        let now = self.tick();
        {
            let mut nodes = self.lock_nodes();
            for ancestor in ancestors(path) {
                nodes.entry(ancestor).or_insert_with(|| Node::dir(default_dir_mode(), now));
            }
            nodes.insert(normalize(path), Node::file(size, now));
        }
        self
    }

    pub fn into_ref(self) -> FsRef {
        Arc::new(self)
    }

    fn lock_nodes(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Node>> {
        self.nodes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::SeqCst)
    }

    /// Entrega el desenlace según el modo configurado y acepta la llamada.
    fn finish<R: Send + 'static>(&self,
                                 outcome: Result<R, Status>,
                                 complete: CompletionFn<R>)
                                 -> Submit<R> {
        let deliver = move || match outcome {
            Ok(value) => complete(Status::ok(), Some(value)),
            Err(status) => complete(status, None),
        };
        match self.mode {
            Delivery::Immediate => deliver(),
            Delivery::Deferred => {
                thread::spawn(deliver);
            }
        }
        Submit::Accepted
    }

    fn not_found(path: &str) -> Status {
        Status::protocol(remote_errors::NOT_FOUND, format!("no such node: {path}"))
    }

    fn stat_of(node: &Node) -> StatInfo {
        let mut flags = StatFlags::NONE;
        if node.is_dir {
            flags = flags | StatFlags::IS_DIR;
        }
        if node.mode.contains(AccessMode::UR) {
            flags = flags | StatFlags::IS_READABLE;
        }
        if node.mode.contains(AccessMode::UW) {
            flags = flags | StatFlags::IS_WRITABLE;
        }
        StatInfo { size: node.size, flags, mod_time: node.mod_time }
    }
}

fn default_dir_mode() -> AccessMode {
    AccessMode::UR | AccessMode::UW | AccessMode::UX | AccessMode::GR | AccessMode::GX
}

/// Normaliza un path: absoluto, sin barra final (salvo la raíz).
fn normalize(path: &str) -> String {
    if path == "/" || path.is_empty() {
        return "/".to_string();
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn parent_of(path: &str) -> String {
    let normalized = normalize(path);
    match normalized.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => normalized[..idx].to_string(),
    }
}

/// Directorios intermedios de un path, de la raíz hacia abajo, sin incluir
/// el propio path ni la raíz.
fn ancestors(path: &str) -> Vec<String> {
    let normalized = normalize(path);
    let mut out = Vec::new();
    let mut idx = 1;
    while let Some(next) = normalized[idx..].find('/') {
        out.push(normalized[..idx + next].to_string());
        idx += next + 1;
    }
    out
}

/// Hijos directos de un directorio.
fn children_of<'a>(nodes: &'a BTreeMap<String, Node>, dir: &str) -> Vec<(&'a str, &'a Node)> {
    let prefix = if dir == "/" { "/".to_string() } else { format!("{dir}/") };
    nodes.iter()
         .filter(|(path, _)| {
             path.starts_with(&prefix)
             && path.len() > prefix.len()
             && !path[prefix.len()..].contains('/')
         })
         .map(|(path, node)| (&path[prefix.len()..], node))
         .collect()
}

impl RemoteFs for MockFs {
    fn locate(&self,
              path: String,
              _flags: OpenFlags,
              deep: bool,
              complete: CompletionFn<LocationInfo>)
              -> Submit<LocationInfo> {
        let outcome = {
            let nodes = self.lock_nodes();
            if nodes.contains_key(&normalize(&path)) {
                let kind = if deep { LocationKind::ServerOnline } else { LocationKind::ManagerOnline };
                Ok(LocationInfo { locations: vec![Location { address: self.address.clone(),
                                                             kind,
                                                             access:  AccessType::ReadWrite }] })
            } else {
                Err(Self::not_found(&path))
            }
        };
        self.finish(outcome, complete)
    }

    fn mv(&self, source: String, dest: String, complete: CompletionFn<()>) -> Submit<()> {
        let now = self.tick();
        let outcome = {
            let mut nodes = self.lock_nodes();
            let source = normalize(&source);
            let dest = normalize(&dest);
            match nodes.remove(&source) {
                Some(mut node) => {
                    // un directorio arrastra su subárbol al nuevo path
                    let prefix = format!("{source}/");
                    let moved: Vec<(String, Node)> = nodes
                        .iter()
                        .filter(|(path, _)| path.starts_with(&prefix))
                        .map(|(path, child)| {
                            (format!("{dest}/{}", &path[prefix.len()..]), child.clone())
                        })
                        .collect();
                    nodes.retain(|path, _| !path.starts_with(&prefix));
                    node.mod_time = now;
                    nodes.insert(dest, node);
                    nodes.extend(moved);
                    Ok(())
                }
                None => Err(Self::not_found(&source)),
            }
        };
        self.finish(outcome, complete)
    }

    fn query(&self, code: QueryCode, args: Buffer, complete: CompletionFn<Buffer>)
             -> Submit<Buffer> {
        let reply = Buffer::from_text(format!("{code:?}:{}", args.as_text()));
        self.finish(Ok(reply), complete)
    }

    fn truncate(&self, path: String, size: u64, complete: CompletionFn<()>) -> Submit<()> {
        let now = self.tick();
        let outcome = {
            let mut nodes = self.lock_nodes();
            match nodes.get_mut(&normalize(&path)) {
                Some(node) if node.is_dir => {
                    Err(Status::protocol(remote_errors::IS_DIRECTORY,
                                         format!("cannot truncate a directory: {path}")))
                }
                Some(node) => {
                    node.size = size;
                    node.mod_time = now;
                    Ok(())
                }
                None => Err(Self::not_found(&path)),
            }
        };
        self.finish(outcome, complete)
    }

    fn rm(&self, path: String, complete: CompletionFn<()>) -> Submit<()> {
        let outcome = {
            let mut nodes = self.lock_nodes();
            let key = normalize(&path);
            match nodes.get(&key) {
                Some(node) if node.is_dir => {
                    Err(Status::protocol(remote_errors::IS_DIRECTORY,
                                         format!("rm on a directory: {path}")))
                }
                Some(_) => {
                    nodes.remove(&key);
                    Ok(())
                }
                None => Err(Self::not_found(&path)),
            }
        };
        self.finish(outcome, complete)
    }

    fn mkdir(&self,
             path: String,
             flags: MkDirFlags,
             mode: AccessMode,
             complete: CompletionFn<()>)
             -> Submit<()> {
        let now = self.tick();
        let outcome = {
            let mut nodes = self.lock_nodes();
            let key = normalize(&path);
            if nodes.contains_key(&key) {
                Err(Status::protocol(remote_errors::INVALID_REQUEST,
                                     format!("node already exists: {path}")))
            } else if flags.contains(MkDirFlags::MAKE_PATH) {
                for ancestor in ancestors(&key) {
                    nodes.entry(ancestor).or_insert_with(|| Node::dir(mode, now));
                }
                nodes.insert(key, Node::dir(mode, now));
                Ok(())
            } else if !nodes.contains_key(&parent_of(&key)) {
                Err(Self::not_found(&parent_of(&key)))
            } else {
                nodes.insert(key, Node::dir(mode, now));
                Ok(())
            }
        };
        self.finish(outcome, complete)
    }

    fn rmdir(&self, path: String, complete: CompletionFn<()>) -> Submit<()> {
        let outcome = {
            let mut nodes = self.lock_nodes();
            let key = normalize(&path);
            match nodes.get(&key) {
                Some(node) if !node.is_dir => {
                    Err(Status::protocol(remote_errors::NOT_FILE,
                                         format!("rmdir on a file: {path}")))
                }
                Some(_) if !children_of(&nodes, &key).is_empty() => {
                    Err(Status::protocol(remote_errors::INVALID_REQUEST,
                                         format!("directory not empty: {path}")))
                }
                Some(_) => {
                    nodes.remove(&key);
                    Ok(())
                }
                None => Err(Self::not_found(&path)),
            }
        };
        self.finish(outcome, complete)
    }

    fn chmod(&self, path: String, mode: AccessMode, complete: CompletionFn<()>) -> Submit<()> {
        let now = self.tick();
        let outcome = {
            let mut nodes = self.lock_nodes();
            match nodes.get_mut(&normalize(&path)) {
                Some(node) => {
                    node.mode = mode;
                    node.mod_time = now;
                    Ok(())
                }
                None => Err(Self::not_found(&path)),
            }
        };
        self.finish(outcome, complete)
    }

    fn ping(&self, complete: CompletionFn<()>) -> Submit<()> {
        self.finish(Ok(()), complete)
    }

    fn stat(&self, path: String, complete: CompletionFn<StatInfo>) -> Submit<StatInfo> {
        let outcome = {
            let nodes = self.lock_nodes();
            match nodes.get(&normalize(&path)) {
                Some(node) => Ok(Self::stat_of(node)),
                None => Err(Self::not_found(&path)),
            }
        };
        self.finish(outcome, complete)
    }

    fn stat_vfs(&self, path: String, complete: CompletionFn<StatInfoVfs>) -> Submit<StatInfoVfs> {
        let outcome = {
            let nodes = self.lock_nodes();
            let key = normalize(&path);
            if nodes.contains_key(&key) {
                let prefix = if key == "/" { "/".to_string() } else { format!("{key}/") };
                let under = nodes.keys().filter(|p| p.starts_with(&prefix)).count() as u64;
                Ok(StatInfoVfs { nodes_rw:            under,
                                 free_rw:             1 << 30,
                                 utilization_rw:      0,
                                 nodes_staging:       0,
                                 free_staging:        0,
                                 utilization_staging: 0 })
            } else {
                Err(Self::not_found(&path))
            }
        };
        self.finish(outcome, complete)
    }

    fn protocol(&self, complete: CompletionFn<ProtocolInfo>) -> Submit<ProtocolInfo> {
        self.finish(Ok(ProtocolInfo { version: 0x310, host_info: 0 }), complete)
    }

    fn dir_list(&self,
                path: String,
                flags: DirListFlags,
                complete: CompletionFn<DirectoryList>)
                -> Submit<DirectoryList> {
        let outcome = {
            let nodes = self.lock_nodes();
            let key = normalize(&path);
            match nodes.get(&key) {
                Some(node) if !node.is_dir => {
                    Err(Status::protocol(remote_errors::NOT_FILE,
                                         format!("dirlist on a file: {path}")))
                }
                Some(_) => {
                    let entries = children_of(&nodes, &key)
                        .into_iter()
                        .map(|(name, child)| DirEntry {
                            host_address: self.address.clone(),
                            name:         name.to_string(),
                            stat:         flags.contains(DirListFlags::STAT)
                                              .then(|| Self::stat_of(child)),
                        })
                        .collect();
                    Ok(DirectoryList { parent: key, entries })
                }
                None => Err(Self::not_found(&path)),
            }
        };
        self.finish(outcome, complete)
    }

    fn send_info(&self, info: String, complete: CompletionFn<Buffer>) -> Submit<Buffer> {
        let request_id = Uuid::new_v4();
        let reply = Buffer::from_text(format!("{request_id}:{info}"));
        self.finish(Ok(reply), complete)
    }

    fn prepare(&self,
               _files: Vec<String>,
               _flags: PrepareFlags,
               _priority: u8,
               complete: CompletionFn<Buffer>)
               -> Submit<Buffer> {
        let request_id = Uuid::new_v4();
        self.finish(Ok(Buffer::from_text(request_id.to_string())), complete)
    }

    fn set_xattr(&self,
                 path: String,
                 attrs: Vec<XAttrPair>,
                 complete: CompletionFn<Vec<XAttrStatus>>)
                 -> Submit<Vec<XAttrStatus>> {
        let now = self.tick();
        let outcome = {
            let mut nodes = self.lock_nodes();
            match nodes.get_mut(&normalize(&path)) {
                Some(node) => {
                    node.mod_time = now;
                    Ok(attrs.into_iter()
                            .map(|pair| {
                                node.xattrs.insert(pair.name.clone(), pair.value);
                                XAttrStatus { name: pair.name, status: Status::ok() }
                            })
                            .collect())
                }
                None => Err(Self::not_found(&path)),
            }
        };
        self.finish(outcome, complete)
    }

    fn get_xattr(&self,
                 path: String,
                 names: Vec<String>,
                 complete: CompletionFn<Vec<XAttr>>)
                 -> Submit<Vec<XAttr>> {
        let outcome = {
            let nodes = self.lock_nodes();
            match nodes.get(&normalize(&path)) {
                Some(node) => {
                    Ok(names.into_iter()
                            .map(|name| match node.xattrs.get(&name) {
                                Some(value) => XAttr { name,
                                                       value:  value.clone(),
                                                       status: Status::ok() },
                                None => {
                                    let status = Status::protocol(remote_errors::NOT_FOUND,
                                                                  format!("no such attribute: {name}"));
                                    XAttr { name, value: String::new(), status }
                                }
                            })
                            .collect())
                }
                None => Err(Self::not_found(&path)),
            }
        };
        self.finish(outcome, complete)
    }

    fn del_xattr(&self,
                 path: String,
                 names: Vec<String>,
                 complete: CompletionFn<Vec<XAttrStatus>>)
                 -> Submit<Vec<XAttrStatus>> {
        let now = self.tick();
        let outcome = {
            let mut nodes = self.lock_nodes();
            match nodes.get_mut(&normalize(&path)) {
                Some(node) => {
                    node.mod_time = now;
                    Ok(names.into_iter()
                            .map(|name| {
                                let status = if node.xattrs.remove(&name).is_some() {
                                    Status::ok()
                                } else {
                                    Status::protocol(remote_errors::NOT_FOUND,
                                                     format!("no such attribute: {name}"))
                                };
                                XAttrStatus { name, status }
                            })
                            .collect())
                }
                None => Err(Self::not_found(&path)),
            }
        };
        self.finish(outcome, complete)
    }

    fn list_xattr(&self, path: String, complete: CompletionFn<Vec<XAttr>>) -> Submit<Vec<XAttr>> {
        let outcome = {
            let nodes = self.lock_nodes();
            match nodes.get(&normalize(&path)) {
                Some(node) => {
                    Ok(node.xattrs
                           .iter()
                           .map(|(name, value)| XAttr { name:   name.clone(),
                                                        value:  value.clone(),
                                                        status: Status::ok() })
                           .collect())
                }
                None => Err(Self::not_found(&path)),
            }
        };
        self.finish(outcome, complete)
    }
}
