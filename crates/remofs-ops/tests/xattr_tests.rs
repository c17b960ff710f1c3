//! Atributos extendidos: ida y vuelta escalar y masiva, y la promoción
//! del estado por-atributo a estado de operación en las escalares.

use remofs_core::{sync_handler, ErrorOrigin};
use remofs_ops::{
    del_xattr, del_xattr_bulk, get_xattr, get_xattr_bulk, list_xattr, remote_errors, set_xattr,
    set_xattr_bulk, Delivery, MockFs, XAttrPair,
};

fn seeded() -> remofs_ops::FsRef {
    MockFs::new(Delivery::Immediate).with_file("/data/file.root", 10).into_ref()
}

#[test]
fn scalar_set_get_list_del_round_trip() {
    let fs = seeded();

    let (handler, response) = sync_handler();
    set_xattr(&fs, "/data/file.root", "user.checksum", "adler32 1234").with_handler(handler).run();
    let (status, unit) = response.wait();
    assert!(status.is_ok());
    assert_eq!(unit, Some(()));

    let (handler, response) = sync_handler();
    get_xattr(&fs, "/data/file.root", "user.checksum").with_handler(handler).run();
    let (status, value) = response.wait();
    assert!(status.is_ok());
    // el llamador escalar recibe el valor directamente, nunca una lista
    assert_eq!(value.as_deref(), Some("adler32 1234"));

    let (handler, response) = sync_handler();
    list_xattr(&fs, "/data/file.root").with_handler(handler).run();
    let (status, attrs) = response.wait();
    assert!(status.is_ok());
    let attrs = attrs.expect("attribute list");
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs[0].name, "user.checksum");

    let (handler, response) = sync_handler();
    del_xattr(&fs, "/data/file.root", "user.checksum").with_handler(handler).run();
    assert!(response.wait().0.is_ok());

    let (handler, response) = sync_handler();
    list_xattr(&fs, "/data/file.root").with_handler(handler).run();
    let (_, attrs) = response.wait();
    assert!(attrs.expect("attribute list").is_empty());
}

#[test]
fn scalar_get_of_a_missing_attribute_fails_as_a_scalar() {
    let fs = seeded();

    let (handler, response) = sync_handler();
    get_xattr(&fs, "/data/file.root", "user.nope").with_handler(handler).run();

    // el estado por-atributo se promociona: fallo de la operación entera
    let (status, value) = response.wait();
    assert_eq!(status.origin, ErrorOrigin::Protocol);
    assert_eq!(status.code, remote_errors::NOT_FOUND);
    assert_eq!(value, None);
}

#[test]
fn scalar_del_of_a_missing_attribute_fails_as_a_scalar() {
    let fs = seeded();

    let (handler, response) = sync_handler();
    del_xattr(&fs, "/data/file.root", "user.nope").with_handler(handler).run();

    let (status, unit) = response.wait();
    assert_eq!(status.code, remote_errors::NOT_FOUND);
    assert_eq!(unit, None);
}

#[test]
fn bulk_set_reports_one_status_per_attribute() {
    let fs = seeded();

    let attrs = vec![XAttrPair::new("user.a", "1"), XAttrPair::new("user.b", "2")];
    let (handler, response) = sync_handler();
    set_xattr_bulk(&fs, "/data/file.root", attrs).with_handler(handler).run();

    let (status, statuses) = response.wait();
    assert!(status.is_ok());
    let statuses = statuses.expect("per-attribute statuses");
    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|s| s.status.is_ok()));
}

#[test]
fn bulk_get_mixes_present_and_missing_attributes() {
    let fs = seeded();

    let (handler, response) = sync_handler();
    set_xattr(&fs, "/data/file.root", "user.a", "1").with_handler(handler).run();
    assert!(response.wait().0.is_ok());

    let names = vec!["user.a".to_string(), "user.missing".to_string()];
    let (handler, response) = sync_handler();
    get_xattr_bulk(&fs, "/data/file.root", names).with_handler(handler).run();

    // la masiva no falla: el detalle va en el estado de cada atributo
    let (status, attrs) = response.wait();
    assert!(status.is_ok());
    let attrs = attrs.expect("attribute list");
    assert_eq!(attrs.len(), 2);
    assert!(attrs[0].status.is_ok());
    assert_eq!(attrs[0].value, "1");
    assert_eq!(attrs[1].status.code, remote_errors::NOT_FOUND);
}

#[test]
fn bulk_del_keeps_declaration_order_in_statuses() {
    let fs = seeded();

    let attrs = vec![XAttrPair::new("user.a", "1"), XAttrPair::new("user.b", "2")];
    let (handler, response) = sync_handler();
    set_xattr_bulk(&fs, "/data/file.root", attrs).with_handler(handler).run();
    assert!(response.wait().0.is_ok());

    let names = vec!["user.b".to_string(), "user.nope".to_string(), "user.a".to_string()];
    let (handler, response) = sync_handler();
    del_xattr_bulk(&fs, "/data/file.root", names).with_handler(handler).run();

    let (status, statuses) = response.wait();
    assert!(status.is_ok());
    let statuses = statuses.expect("per-attribute statuses");
    assert_eq!(statuses.len(), 3);
    assert!(statuses[0].status.is_ok());
    assert_eq!(statuses[1].status.code, remote_errors::NOT_FOUND);
    assert!(statuses[2].status.is_ok());
}

#[test]
fn xattr_calls_on_a_missing_node_fail_whole() {
    let fs = seeded();

    let (handler, response) = sync_handler();
    set_xattr(&fs, "/missing", "user.a", "1").with_handler(handler).run();
    let (status, _) = response.wait();
    assert_eq!(status.origin, ErrorOrigin::Protocol);
    assert_eq!(status.code, remote_errors::NOT_FOUND);

    let (handler, response) = sync_handler();
    list_xattr(&fs, "/missing").with_handler(handler).run();
    assert_eq!(response.wait().0.code, remote_errors::NOT_FOUND);
}
