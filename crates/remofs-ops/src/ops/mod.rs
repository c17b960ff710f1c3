//! Catálogo de operaciones concretas.
//!
//! Cada entrada es mecánica sobre el core: un struct con endpoint y
//! `Arg`s, el impl de `OperationKind` y una fábrica en minúsculas, todo
//! generado por `remote_operation!`. Las variantes escalares de xattr son
//! las únicas escritas a mano, porque envuelven la llamada masiva.

mod dir;
mod file;
mod locate;
mod meta;
mod xattr;

pub use dir::{dir_list, mkdir, rmdir, DirList, MkDir, RmDir};
pub use file::{chmod, mv, rm, stat, stat_vfs, truncate, ChMod, Mv, Rm, Stat, StatVfs, Truncate};
pub use locate::{deep_locate, locate, DeepLocate, Locate};
pub use meta::{ping, prepare, protocol, query, send_info, Ping, Prepare, Protocol, Query, SendInfo};
pub use xattr::{
    del_xattr, del_xattr_bulk, get_xattr, get_xattr_bulk, list_xattr, set_xattr, set_xattr_bulk,
    DelXAttr, DelXAttrBulk, GetXAttr, GetXAttrBulk, ListXAttr, SetXAttr, SetXAttrBulk,
};
