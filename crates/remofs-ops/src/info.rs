//! Modelo de datos de respuestas y flags de las llamadas remotas.
//!
//! Tipos puros de valor: el core no los conoce, sólo viajan como
//! `Response` de cada clase de operación. Todos derivan serde para poder
//! volcarse como JSON en diagnósticos y en el binario demo.

use std::ops::BitOr;

use remofs_core::Status;
use serde::{Deserialize, Serialize};

/// Carga binaria opaca (respuestas de query, prepare y sendinfo).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { data: text.into().into_bytes() }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Vista textual (los servidores reales responden texto en query).
    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Rol del nodo que respondió a un locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    ManagerOnline,
    ManagerPending,
    ServerOnline,
    ServerPending,
}

/// Modo de acceso que ofrece esa réplica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessType {
    Read,
    ReadWrite,
}

/// Una réplica localizada: dirección y capacidades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub kind:    LocationKind,
    pub access:  AccessType,
}

impl Location {
    pub fn is_server(&self) -> bool {
        matches!(self.kind, LocationKind::ServerOnline | LocationKind::ServerPending)
    }

    pub fn is_manager(&self) -> bool {
        matches!(self.kind, LocationKind::ManagerOnline | LocationKind::ManagerPending)
    }
}

/// Respuesta de locate/deep_locate: lista de réplicas.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationInfo {
    pub locations: Vec<Location>,
}

impl LocationInfo {
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Bits de estado de un nodo en stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatFlags(pub u32);

impl StatFlags {
    pub const NONE: StatFlags        = StatFlags(0);
    pub const IS_DIR: StatFlags      = StatFlags(1 << 1);
    pub const OTHER: StatFlags       = StatFlags(1 << 2);
    pub const OFFLINE: StatFlags     = StatFlags(1 << 3);
    pub const IS_READABLE: StatFlags = StatFlags(1 << 4);
    pub const IS_WRITABLE: StatFlags = StatFlags(1 << 5);

    pub fn contains(self, other: StatFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for StatFlags {
    type Output = StatFlags;

    fn bitor(self, rhs: StatFlags) -> StatFlags {
        StatFlags(self.0 | rhs.0)
    }
}

/// Metadatos de un nodo remoto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatInfo {
    pub size:     u64,
    pub flags:    StatFlags,
    pub mod_time: u64,
}

impl StatInfo {
    pub fn is_dir(&self) -> bool {
        self.flags.contains(StatFlags::IS_DIR)
    }
}

/// Metadatos agregados del sistema de ficheros virtual.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatInfoVfs {
    pub nodes_rw:            u64,
    pub free_rw:             u64,
    pub utilization_rw:      u8,
    pub nodes_staging:       u64,
    pub free_staging:        u64,
    pub utilization_staging: u8,
}

/// Versión de protocolo que habla el endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolInfo {
    pub version:   u32,
    pub host_info: u32,
}

/// Una entrada de listado de directorio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub host_address: String,
    pub name:         String,
    /// Presente sólo si el listado se pidió con `DirListFlags::STAT`.
    pub stat:         Option<StatInfo>,
}

/// Respuesta de dir_list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectoryList {
    pub parent:  String,
    pub entries: Vec<DirEntry>,
}

impl DirectoryList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Atributo extendido recuperado, con su estado por-atributo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XAttr {
    pub name:   String,
    pub value:  String,
    pub status: Status,
}

/// Estado por-atributo de una escritura o borrado masivo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XAttrStatus {
    pub name:   String,
    pub status: Status,
}

/// Pareja nombre/valor para escrituras de atributos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XAttrPair {
    pub name:  String,
    pub value: String,
}

impl XAttrPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Flags de locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpenFlags(pub u32);

impl OpenFlags {
    pub const NONE: OpenFlags        = OpenFlags(0);
    pub const REFRESH: OpenFlags     = OpenFlags(1 << 0);
    pub const PREFER_NAME: OpenFlags = OpenFlags(1 << 1);

    pub fn contains(self, other: OpenFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for OpenFlags {
    type Output = OpenFlags;

    fn bitor(self, rhs: OpenFlags) -> OpenFlags {
        OpenFlags(self.0 | rhs.0)
    }
}

/// Flags de mkdir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MkDirFlags(pub u32);

impl MkDirFlags {
    pub const NONE: MkDirFlags      = MkDirFlags(0);
    /// Crea también los directorios intermedios que falten.
    pub const MAKE_PATH: MkDirFlags = MkDirFlags(1 << 0);

    pub fn contains(self, other: MkDirFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for MkDirFlags {
    type Output = MkDirFlags;

    fn bitor(self, rhs: MkDirFlags) -> MkDirFlags {
        MkDirFlags(self.0 | rhs.0)
    }
}

/// Flags de dir_list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirListFlags(pub u32);

impl DirListFlags {
    pub const NONE: DirListFlags      = DirListFlags(0);
    /// Adjunta el stat de cada entrada.
    pub const STAT: DirListFlags      = DirListFlags(1 << 0);
    pub const LOCATE: DirListFlags    = DirListFlags(1 << 1);
    pub const RECURSIVE: DirListFlags = DirListFlags(1 << 2);

    pub fn contains(self, other: DirListFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DirListFlags {
    type Output = DirListFlags;

    fn bitor(self, rhs: DirListFlags) -> DirListFlags {
        DirListFlags(self.0 | rhs.0)
    }
}

/// Flags de prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrepareFlags(pub u32);

impl PrepareFlags {
    pub const NONE: PrepareFlags       = PrepareFlags(0);
    pub const STAGE: PrepareFlags      = PrepareFlags(1 << 0);
    pub const FRESH: PrepareFlags      = PrepareFlags(1 << 1);
    pub const WRITE_MODE: PrepareFlags = PrepareFlags(1 << 2);

    pub fn contains(self, other: PrepareFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for PrepareFlags {
    type Output = PrepareFlags;

    fn bitor(self, rhs: PrepareFlags) -> PrepareFlags {
        PrepareFlags(self.0 | rhs.0)
    }
}

/// Bits de permisos estilo POSIX de chmod/mkdir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessMode(pub u32);

impl AccessMode {
    pub const NONE: AccessMode = AccessMode(0);
    pub const UR: AccessMode   = AccessMode(0o400);
    pub const UW: AccessMode   = AccessMode(0o200);
    pub const UX: AccessMode   = AccessMode(0o100);
    pub const GR: AccessMode   = AccessMode(0o040);
    pub const GW: AccessMode   = AccessMode(0o020);
    pub const GX: AccessMode   = AccessMode(0o010);
    pub const OR: AccessMode   = AccessMode(0o004);
    pub const OW: AccessMode   = AccessMode(0o002);
    pub const OX: AccessMode   = AccessMode(0o001);

    pub fn contains(self, other: AccessMode) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for AccessMode {
    type Output = AccessMode;

    fn bitor(self, rhs: AccessMode) -> AccessMode {
        AccessMode(self.0 | rhs.0)
    }
}

/// Categoría de una consulta `query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryCode {
    Config,
    Checksum,
    Opaque,
    Prepare,
    Space,
    Stats,
}
