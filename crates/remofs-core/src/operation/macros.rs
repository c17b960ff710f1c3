//! Macro utilitaria para instanciar clases concretas de operación.
//!
//! Cada entrada del catálogo remoto es mecánica: un struct con el endpoint
//! y sus `Arg`s tipados, un impl de `OperationKind` que los resuelve en
//! orden declarado, y una función fábrica en minúsculas. Exportada en la
//! raíz del crate para usarla como:
//!   use remofs_core::remote_operation;

/// Declara una operación remota concreta.
///
/// Formas soportadas:
/// - con argumentos:
///   remote_operation! {
///       Stat(FsRef) -> StatInfo {
///           name: "Stat",
///           args { path: String },
///           issue(fs, complete) { fs.stat(path, complete) }
///       }
///       factory stat;
///   }
/// - sin argumentos (ping, protocol):
///   remote_operation! {
///       Ping(FsRef) -> () {
///           name: "Ping",
///           issue(fs, complete) { fs.ping(complete) }
///       }
///       factory ping;
///   }
///
/// En el bloque `issue` los argumentos ya están resueltos y disponibles
/// por su nombre; si alguno no resuelve, el despacho devuelve
/// `Submit::Rejected` con ese error sin evaluar el bloque.
#[macro_export]
macro_rules! remote_operation {
    // ---------------- operación con argumentos ----------------
    (
        $(#[$meta:meta])*
        $kind:ident ( $endpoint:ty ) -> $resp:ty {
            name: $opname:expr,
            args { $($arg:ident : $aty:ty),+ $(,)? },
            issue($ep:ident, $complete:ident) $body:block
        }
        factory $factory:ident;
    ) => {
        $(#[$meta])*
        pub struct $kind {
            endpoint: $endpoint,
            $( $arg: $crate::Arg<$aty>, )+
        }

        impl $crate::OperationKind for $kind {
            type Response = $resp;

            fn name(&self) -> &'static str { $opname }

            fn dispatch(&mut self,
                        complete: $crate::CompletionFn<Self::Response>)
                        -> $crate::Submit<Self::Response> {
                $(
                    let $arg = match self.$arg.get() {
                        Ok(value) => value,
                        Err(status) => return $crate::Submit::Rejected { status, handler: complete },
                    };
                )+
                let $ep = &self.endpoint;
                let $complete = complete;
                $body
            }
        }

        pub fn $factory(endpoint: &$endpoint,
                        $( $arg: impl Into<$crate::Arg<$aty>>, )+)
                        -> $crate::Operation<$kind> {
            $crate::Operation::new($kind { endpoint: endpoint.clone(),
                                           $( $arg: $arg.into(), )+ })
        }
    };

    // ---------------- operación sin argumentos ----------------
    (
        $(#[$meta:meta])*
        $kind:ident ( $endpoint:ty ) -> $resp:ty {
            name: $opname:expr,
            issue($ep:ident, $complete:ident) $body:block
        }
        factory $factory:ident;
    ) => {
        $(#[$meta])*
        pub struct $kind {
            endpoint: $endpoint,
        }

        impl $crate::OperationKind for $kind {
            type Response = $resp;

            fn name(&self) -> &'static str { $opname }

            fn dispatch(&mut self,
                        complete: $crate::CompletionFn<Self::Response>)
                        -> $crate::Submit<Self::Response> {
                let $ep = &self.endpoint;
                let $complete = complete;
                $body
            }
        }

        pub fn $factory(endpoint: &$endpoint) -> $crate::Operation<$kind> {
            $crate::Operation::new($kind { endpoint: endpoint.clone() })
        }
    };
}
