//! Demo del motor: uso síncrono, pipeline con reenvío y fan-out paralelo
//! sobre el endpoint in-memory.

use remofs_core::{sync_handler, Parallel, Pipeline, Status};
use remofs_ops::{
    deep_locate, dir_list, get_xattr, send_info, set_xattr, stat, Delivery, DirListFlags, MockFs,
    OpenFlags, QueryCode,
};

fn main() {
    let fs = MockFs::new(Delivery::Deferred)
        .with_dir("/data/empty")
        .with_file("/data/a.root", 42)
        .with_file("/data/b.root", 1024)
        .into_ref();

    // --- uso síncrono: bloquear dentro del handler terminal ---
    let (handler, response) = sync_handler();
    let submit = stat(&fs, "/data/a.root").with_handler(handler).run();
    let (status, info) = response.wait();
    println!("stat /data/a.root: submit={submit}, status={status}");
    if let Some(info) = info {
        println!("  info: {}", serde_json::to_string(&info).unwrap_or_default());
    }

    // --- pipeline con reenvío: el token de send_info alimenta la query ---
    let first = send_info(&fs, "demo batch");
    let second = remofs_ops::query(&fs, QueryCode::Opaque, first.resp());
    let (handler, response) = sync_handler();
    Pipeline::new(first).then(second).with_handler(handler).run();
    let (status, reply) = response.wait();
    println!("send_info |> query: status={status}");
    if let Some(reply) = reply {
        println!("  reply: {}", reply.as_text());
    }

    // --- pipeline que corta en el primer fallo ---
    let (handler, response) = sync_handler();
    Pipeline::new(deep_locate(&fs, "/missing", OpenFlags::NONE))
        .then(dir_list(&fs, "/data", DirListFlags::STAT))
        .with_handler(handler)
        .run();
    let (status, _) = response.wait();
    println!("deep_locate /missing |> dir_list: status={status}");

    // --- atributos extendidos encadenados ---
    let (handler, response) = sync_handler();
    set_xattr(&fs, "/data/b.root", "user.tag", "hot").with_handler(handler).run();
    let (status, _) = response.wait();
    println!("set_xattr user.tag: status={status}");

    let read = get_xattr(&fs, "/data/b.root", "user.tag");
    let publish = send_info(&fs, read.resp());
    let (handler, response) = sync_handler();
    Pipeline::new(read).then(publish).with_handler(handler).run();
    let (status, reply) = response.wait();
    println!("get_xattr |> send_info: status={status}, reply={}",
             reply.map(|b| b.as_text()).unwrap_or_default());

    // --- fan-out paralelo ---
    let (tx, rx) = std::sync::mpsc::channel();
    Parallel::new()
        .add(stat(&fs, "/data/a.root"))
        .add(stat(&fs, "/data/b.root"))
        .add(stat(&fs, "/missing"))
        .with_handler(move |overall: Status, members: Vec<Status>| {
            let _ = tx.send((overall, members));
        })
        .run();
    if let Ok((overall, members)) = rx.recv() {
        println!("parallel stats: overall={overall}");
        for (idx, member) in members.iter().enumerate() {
            println!("  member {idx}: {member}");
        }
    }
}
