//! Atributos extendidos.
//!
//! El protocolo remoto sólo conoce llamadas masivas (lista de atributos,
//! lista de estados). Las variantes escalares son conveniencias: envuelven
//! la masiva de un elemento y desempaquetan la lista de un elemento en un
//! resultado escalar. El llamador escalar nunca ve una lista de uno, ni en
//! éxito ni en fallo: el estado por-atributo se promociona a estado de la
//! operación.

use remofs_core::{
    remote_operation, Arg, CompletionFn, FrameworkFault, Operation, OperationKind, Status, Submit,
};

use crate::fs::FsRef;
use crate::info::{XAttr, XAttrPair, XAttrStatus};

remote_operation! {
    /// Escritura masiva de atributos; un estado por atributo.
    SetXAttrBulk(FsRef) -> Vec<XAttrStatus> {
        name: "SetXAttrBulk",
        args { path: String, attrs: Vec<XAttrPair> },
        issue(fs, complete) { fs.set_xattr(path, attrs, complete) }
    }
    factory set_xattr_bulk;
}

remote_operation! {
    /// Lectura masiva de atributos; valor y estado por atributo.
    GetXAttrBulk(FsRef) -> Vec<XAttr> {
        name: "GetXAttrBulk",
        args { path: String, names: Vec<String> },
        issue(fs, complete) { fs.get_xattr(path, names, complete) }
    }
    factory get_xattr_bulk;
}

remote_operation! {
    /// Borrado masivo de atributos; un estado por atributo.
    DelXAttrBulk(FsRef) -> Vec<XAttrStatus> {
        name: "DelXAttrBulk",
        args { path: String, names: Vec<String> },
        issue(fs, complete) { fs.del_xattr(path, names, complete) }
    }
    factory del_xattr_bulk;
}

remote_operation! {
    /// Lista todos los atributos de un nodo.
    ListXAttr(FsRef) -> Vec<XAttr> {
        name: "ListXAttr",
        args { path: String },
        issue(fs, complete) { fs.list_xattr(path, complete) }
    }
    factory list_xattr;
}

/// Escribe un único atributo. Conveniencia sobre `SetXAttrBulk`.
pub struct SetXAttr {
    endpoint: FsRef,
    path:     Arg<String>,
    name:     Arg<String>,
    value:    Arg<String>,
}

impl OperationKind for SetXAttr {
    type Response = ();

    fn name(&self) -> &'static str { "SetXAttr" }

    fn dispatch(&mut self, complete: CompletionFn<()>) -> Submit<()> {
        let path = match self.path.get() {
            Ok(value) => value,
            Err(status) => return Submit::Rejected { status, handler: complete },
        };
        let name = match self.name.get() {
            Ok(value) => value,
            Err(status) => return Submit::Rejected { status, handler: complete },
        };
        let value = match self.value.get() {
            Ok(value) => value,
            Err(status) => return Submit::Rejected { status, handler: complete },
        };

        let wrapped: CompletionFn<Vec<XAttrStatus>> =
            Box::new(move |status: Status, response: Option<Vec<XAttrStatus>>| {
                if !status.is_ok() {
                    complete(status, None);
                    return;
                }
                match single(response) {
                    Some(entry) if entry.status.is_ok() => complete(Status::ok(), Some(())),
                    Some(entry) => complete(entry.status, None),
                    None => complete(shape_mismatch(), None),
                }
            });

        match self.endpoint.set_xattr(path, vec![XAttrPair::new(name, value)], wrapped) {
            Submit::Accepted => Submit::Accepted,
            // el handler masivo envuelto no se puede desenvolver; se
            // devuelve un puente que entrega el fallo por el mismo camino
            Submit::Rejected { status, handler } => {
                let handler: CompletionFn<()> =
                    Box::new(move |st: Status, _resp: Option<()>| handler(st, None));
                Submit::Rejected { status, handler }
            }
        }
    }
}

pub fn set_xattr(endpoint: &FsRef,
                 path: impl Into<Arg<String>>,
                 name: impl Into<Arg<String>>,
                 value: impl Into<Arg<String>>)
                 -> Operation<SetXAttr> {
    Operation::new(SetXAttr { endpoint: endpoint.clone(),
                              path:     path.into(),
                              name:     name.into(),
                              value:    value.into() })
}

/// Lee un único atributo; responde sólo el valor. Conveniencia sobre
/// `GetXAttrBulk`.
pub struct GetXAttr {
    endpoint: FsRef,
    path:     Arg<String>,
    name:     Arg<String>,
}

impl OperationKind for GetXAttr {
    type Response = String;

    fn name(&self) -> &'static str { "GetXAttr" }

    fn dispatch(&mut self, complete: CompletionFn<String>) -> Submit<String> {
        let path = match self.path.get() {
            Ok(value) => value,
            Err(status) => return Submit::Rejected { status, handler: complete },
        };
        let name = match self.name.get() {
            Ok(value) => value,
            Err(status) => return Submit::Rejected { status, handler: complete },
        };

        let wrapped: CompletionFn<Vec<XAttr>> =
            Box::new(move |status: Status, response: Option<Vec<XAttr>>| {
                if !status.is_ok() {
                    complete(status, None);
                    return;
                }
                match single(response) {
                    Some(entry) if entry.status.is_ok() => {
                        complete(Status::ok(), Some(entry.value));
                    }
                    Some(entry) => complete(entry.status, None),
                    None => complete(shape_mismatch(), None),
                }
            });

        match self.endpoint.get_xattr(path, vec![name], wrapped) {
            Submit::Accepted => Submit::Accepted,
            Submit::Rejected { status, handler } => {
                let handler: CompletionFn<String> =
                    Box::new(move |st: Status, _resp: Option<String>| handler(st, None));
                Submit::Rejected { status, handler }
            }
        }
    }
}

pub fn get_xattr(endpoint: &FsRef,
                 path: impl Into<Arg<String>>,
                 name: impl Into<Arg<String>>)
                 -> Operation<GetXAttr> {
    Operation::new(GetXAttr { endpoint: endpoint.clone(),
                              path:     path.into(),
                              name:     name.into() })
}

/// Borra un único atributo. Conveniencia sobre `DelXAttrBulk`.
pub struct DelXAttr {
    endpoint: FsRef,
    path:     Arg<String>,
    name:     Arg<String>,
}

impl OperationKind for DelXAttr {
    type Response = ();

    fn name(&self) -> &'static str { "DelXAttr" }

    fn dispatch(&mut self, complete: CompletionFn<()>) -> Submit<()> {
        let path = match self.path.get() {
            Ok(value) => value,
            Err(status) => return Submit::Rejected { status, handler: complete },
        };
        let name = match self.name.get() {
            Ok(value) => value,
            Err(status) => return Submit::Rejected { status, handler: complete },
        };

        let wrapped: CompletionFn<Vec<XAttrStatus>> =
            Box::new(move |status: Status, response: Option<Vec<XAttrStatus>>| {
                if !status.is_ok() {
                    complete(status, None);
                    return;
                }
                match single(response) {
                    Some(entry) if entry.status.is_ok() => complete(Status::ok(), Some(())),
                    Some(entry) => complete(entry.status, None),
                    None => complete(shape_mismatch(), None),
                }
            });

        match self.endpoint.del_xattr(path, vec![name], wrapped) {
            Submit::Accepted => Submit::Accepted,
            Submit::Rejected { status, handler } => {
                let handler: CompletionFn<()> =
                    Box::new(move |st: Status, _resp: Option<()>| handler(st, None));
                Submit::Rejected { status, handler }
            }
        }
    }
}

pub fn del_xattr(endpoint: &FsRef,
                 path: impl Into<Arg<String>>,
                 name: impl Into<Arg<String>>)
                 -> Operation<DelXAttr> {
    Operation::new(DelXAttr { endpoint: endpoint.clone(),
                              path:     path.into(),
                              name:     name.into() })
}

/// Extrae el único elemento de una respuesta masiva de un elemento.
fn single<T>(response: Option<Vec<T>>) -> Option<T> {
    match response {
        Some(mut list) if list.len() == 1 => list.pop(),
        _ => None,
    }
}

/// La masiva de un elemento respondió con otra cardinalidad: bug del
/// adaptador, origen Local.
fn shape_mismatch() -> Status {
    FrameworkFault::Internal("single-attribute bulk call answered with unexpected cardinality".into()).into()
}
