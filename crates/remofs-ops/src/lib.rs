//! remofs-ops: catálogo de operaciones y frontera de endpoint
pub mod fs;
pub mod info;
pub mod mock;
pub mod ops;

pub use fs::{remote_errors, FsRef, RemoteFs};
pub use info::{
    AccessMode, AccessType, Buffer, DirEntry, DirListFlags, DirectoryList, Location, LocationInfo,
    LocationKind, MkDirFlags, OpenFlags, PrepareFlags, ProtocolInfo, QueryCode, StatFlags,
    StatInfo, StatInfoVfs, XAttr, XAttrPair, XAttrStatus,
};
pub use mock::{Delivery, MockFs};
pub use ops::*;

#[cfg(test)]
mod tests {
    use super::*;
    use remofs_core::sync_handler;

    #[test]
    fn stat_over_mock_reports_seeded_size() {
        let fs = MockFs::new(Delivery::Immediate).with_file("/data/file.root", 42).into_ref();

        let (handler, response) = sync_handler();
        let submit = stat(&fs, "/data/file.root").with_handler(handler).run();
        assert!(submit.is_ok());

        let (status, info) = response.wait();
        assert!(status.is_ok());
        assert_eq!(info.map(|i| i.size), Some(42));
    }

    #[test]
    fn missing_path_surfaces_protocol_not_found() {
        let fs = MockFs::new(Delivery::Immediate).into_ref();

        let (handler, response) = sync_handler();
        stat(&fs, "/nope").with_handler(handler).run();

        let (status, info) = response.wait();
        assert_eq!(status.code, remote_errors::NOT_FOUND);
        assert!(info.is_none());
    }
}
