/// Generates a protocol version's method table and dispatcher trait.
///
/// Each row names the enum variant, its `(class_id, method_id, "dotted.name")`,
/// the dispatcher method it routes to, and its fields in wire order:
///
/// ```text
/// amqp_methods! {
///     version: ProtocolVersion::V0_9_1;
///
///     BasicQos = (60, 10, "basic.qos") => dispatch_basic_qos {
///         prefetch_size: Long,
///         prefetch_count: Short,
///         global: Bit,
///     }
/// }
/// ```
///
/// Expands to:
/// - `enum Method` plus its `MethodTable` impl (schema table, `ALL`, and a
///   lazily built `MethodRegistry`);
/// - `trait MethodDispatcher` with one method per row. Every method has a
///   default body returning [`UnhandledMethod`](crate::method::UnhandledMethod),
///   so a role only overrides what it handles;
/// - `MethodBody<Method>::dispatch`, a single `match` on the method tag, and
///   the matching [`Dispatch`](crate::method::Dispatch) impl.
macro_rules! amqp_methods {
    (
        version: $version:expr;
        $(
            $variant:ident = ($class:literal, $method:literal, $name:literal) => $handler:ident {
                $($field:ident: $kind:ident),* $(,)?
            }
        )*
    ) => {
        /// Method tag of this protocol version.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Method {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        /// Schemas, indexed by `Method as usize`.
        static SPECS: &[$crate::method::MethodSpec] = &[
            $(
                $crate::method::MethodSpec {
                    name: $name,
                    class_id: $class,
                    method_id: $method,
                    fields: &[
                        $(
                            $crate::method::FieldSpec {
                                name: stringify!($field),
                                kind: $crate::method::FieldKind::$kind,
                            },
                        )*
                    ],
                },
            )*
        ];

        impl Method {
            /// Every method of this version, in declaration order.
            pub const ALL: &'static [Method] = &[$(Method::$variant),*];
        }

        impl $crate::method::MethodTable for Method {
            const VERSION: $crate::protocol::ProtocolVersion = $version;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn spec(self) -> &'static $crate::method::MethodSpec {
                &SPECS[self as usize]
            }

            fn registry() -> &'static $crate::method::MethodRegistry<Self> {
                static REGISTRY: ::std::sync::OnceLock<$crate::method::MethodRegistry<Method>> =
                    ::std::sync::OnceLock::new();
                REGISTRY.get_or_init($crate::method::MethodRegistry::new)
            }
        }

        /// Handler capability set: one operation per method of this version.
        pub trait MethodDispatcher {
            /// Handler failure type.
            type Error: From<$crate::method::UnhandledMethod>;

            $(
                #[doc = concat!("Handle `", $name, "`.")]
                fn $handler(
                    &mut self,
                    channel_id: u16,
                    body: &$crate::method::MethodBody<Method>,
                ) -> ::std::result::Result<(), Self::Error> {
                    let _ = body;
                    Err($crate::method::UnhandledMethod {
                        method: $name,
                        channel_id,
                    }
                    .into())
                }
            )*
        }

        impl $crate::method::MethodBody<Method> {
            /// Route this body to its dispatcher operation.
            pub fn dispatch<D: MethodDispatcher + ?Sized>(
                &self,
                dispatcher: &mut D,
                channel_id: u16,
            ) -> ::std::result::Result<(), D::Error> {
                match self.method() {
                    $(Method::$variant => dispatcher.$handler(channel_id, self),)*
                }
            }
        }

        impl<D: MethodDispatcher + ?Sized> $crate::method::Dispatch<D>
            for $crate::method::MethodBody<Method>
        {
            type Error = D::Error;

            fn dispatch(&self, dispatcher: &mut D, channel_id: u16) -> ::std::result::Result<(), D::Error> {
                $crate::method::MethodBody::<Method>::dispatch(self, dispatcher, channel_id)
            }
        }
    };
}
