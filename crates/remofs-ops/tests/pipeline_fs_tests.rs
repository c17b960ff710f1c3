//! Pipelines y fan-out sobre el catálogo completo contra el mock.

use remofs_core::{sync_handler, ErrorOrigin, Parallel, Pipeline, Status};
use remofs_ops::{
    deep_locate, dir_list, get_xattr, mkdir, remote_errors, rmdir, send_info, set_xattr, stat,
    AccessMode, Delivery, DirListFlags, MkDirFlags, MockFs, OpenFlags, QueryCode,
};

fn seeded(mode: Delivery) -> remofs_ops::FsRef {
    MockFs::new(mode)
        .with_dir("/data/subdir")
        .with_file("/data/a.root", 42)
        .into_ref()
}

#[test]
fn locate_failure_short_circuits_the_listing_stage() {
    let fs = seeded(Delivery::Immediate);

    let (handler, response) = sync_handler();
    Pipeline::new(deep_locate(&fs, "/missing/dir", OpenFlags::NONE))
        .then(dir_list(&fs, "/data", DirListFlags::NONE))
        .with_handler(handler)
        .run();

    let (status, listing) = response.wait();
    assert_eq!(status.origin, ErrorOrigin::Protocol);
    assert_eq!(status.code, remote_errors::NOT_FOUND);
    assert!(status.message.starts_with("[DeepLocate] "));
    assert!(listing.is_none());
}

#[test]
fn send_info_token_forwards_into_query() {
    let fs = seeded(Delivery::Immediate);

    let first = send_info(&fs, "staging batch 7");
    let token = first.resp().clone();
    let second = remofs_ops::query(&fs, QueryCode::Opaque, first.resp());

    let (handler, response) = sync_handler();
    Pipeline::new(first).then(second).with_handler(handler).run();

    let (status, reply) = response.wait();
    assert!(status.is_ok());

    // la consulta recibió exactamente el buffer producido por send_info
    let forwarded = token.try_get().expect("first stage resp populated");
    assert_eq!(reply.expect("query reply").as_text(),
               format!("Opaque:{}", forwarded.as_text()));
}

#[test]
fn xattr_value_forwards_into_send_info() {
    let fs = seeded(Delivery::Immediate);

    let (handler, response) = sync_handler();
    set_xattr(&fs, "/data/a.root", "user.tag", "hot").with_handler(handler).run();
    assert!(response.wait().0.is_ok());

    let read = get_xattr(&fs, "/data/a.root", "user.tag");
    let publish = send_info(&fs, read.resp());

    let (handler, response) = sync_handler();
    Pipeline::new(read).then(publish).with_handler(handler).run();

    let (status, reply) = response.wait();
    assert!(status.is_ok());
    assert!(reply.expect("sendinfo reply").as_text().ends_with(":hot"));
}

#[test]
fn mkdir_list_rmdir_pipeline_runs_in_order() {
    let fs = seeded(Delivery::Immediate);
    let mode = AccessMode::UR | AccessMode::UW | AccessMode::UX;

    let (handler, response) = sync_handler();
    Pipeline::new(mkdir(&fs, "/data/tmp", MkDirFlags::NONE, mode))
        .then(dir_list(&fs, "/data/tmp", DirListFlags::NONE))
        .then(rmdir(&fs, "/data/tmp"))
        .with_handler(handler)
        .run();

    let (status, _) = response.wait();
    assert!(status.is_ok());

    // el rmdir final dejó el árbol como estaba
    let (handler, response) = sync_handler();
    stat(&fs, "/data/tmp").with_handler(handler).run();
    assert_eq!(response.wait().0.code, remote_errors::NOT_FOUND);
}

#[test]
fn deferred_pipeline_still_delivers_in_stage_order() {
    let fs = seeded(Delivery::Deferred);

    let first = send_info(&fs, "deferred");
    let second = remofs_ops::query(&fs, QueryCode::Opaque, first.resp());

    let (handler, response) = sync_handler();
    let submit = Pipeline::new(first).then(second).with_handler(handler).run();
    assert!(submit.is_ok());

    let (status, reply) = response.wait();
    assert!(status.is_ok());
    assert!(reply.expect("query reply").as_text().starts_with("Opaque:"));
}

#[test]
fn parallel_stats_aggregate_with_one_missing_path() {
    let fs = seeded(Delivery::Deferred);

    let (tx, rx) = std::sync::mpsc::channel();
    Parallel::new()
        .add(stat(&fs, "/data/a.root"))
        .add(stat(&fs, "/missing"))
        .add(stat(&fs, "/data/subdir"))
        .with_handler(move |overall: Status, members: Vec<Status>| {
            tx.send((overall, members)).expect("receiver alive");
        })
        .run();

    let (overall, members) = rx.recv().expect("group handler fired");
    assert_eq!(overall.code, remote_errors::NOT_FOUND);
    assert_eq!(members.len(), 3);
    assert!(members[0].is_ok());
    assert_eq!(members[1].code, remote_errors::NOT_FOUND);
    assert!(members[2].is_ok());
}

#[test]
fn parallel_members_can_be_pipelines_over_the_catalogue() {
    let fs = seeded(Delivery::Deferred);

    let ok_member = Pipeline::new(deep_locate(&fs, "/data/a.root", OpenFlags::NONE))
        .then(stat(&fs, "/data/a.root"));
    let failing_member = Pipeline::new(deep_locate(&fs, "/missing", OpenFlags::NONE))
        .then(stat(&fs, "/data/a.root"));

    let (tx, rx) = std::sync::mpsc::channel();
    Parallel::new()
        .add_pipeline(ok_member)
        .add_pipeline(failing_member)
        .with_handler(move |overall: Status, members: Vec<Status>| {
            tx.send((overall, members)).expect("receiver alive");
        })
        .run();

    let (overall, members) = rx.recv().expect("group handler fired");
    assert_eq!(overall.code, remote_errors::NOT_FOUND);
    assert!(members[0].is_ok());
    assert!(members[1].message.starts_with("[DeepLocate] "));
}
