//! Entity declarations over the attribute slots.
//!
//! [`def_entity!`](crate::def_entity) turns an attribute table into the
//! attribute enum, the immutable instance with its accessors, and the builder.

use super::provider::LoadExceptionTreeProvider;
use super::tree::TreeKey;

/// An entity declared with [`def_entity!`](crate::def_entity).
pub trait Entity: LoadExceptionTreeProvider + Default {
    /// Keys of the entity's attributes in its exception tree.
    type Attribute: TreeKey;
}

/// Implements [`TreeKey`] for attribute enums deriving `strum::IntoStaticStr`.
#[macro_export]
macro_rules! attribute_key {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::load::TreeKey for $ty {
                fn segment(&self) -> $crate::load::PathSegment {
                    $crate::load::PathSegment::Attribute(<&'static str>::from(*self))
                }
            }
        )+
    };
}

/// Declares an entity from its attribute table.
///
/// ```ignore
/// def_entity! {
///     /// An input or output port of a node.
///     pub struct PortDef with PortAttribute {
///         value index: i32 = 0,
///         text name: String,
///         opt_text port_type: String,
///     }
/// }
/// ```
///
/// Each row is `kind name: Type = default`. Lists and maps also name their
/// single element, `list bend_points(bend_point): CoordinateDef`, and take no
/// default. Kinds:
///
/// | kind | field | getter | extra accessors |
/// |---|---|---|---|
/// | `value` | `T: Copy` | `T` | `<name>_supply_exception` |
/// | `text` | `String` | `&str` | `<name>_supply_exception` |
/// | `opt_text` | `Option<String>` | `Option<&str>` | `<name>_supply_exception` |
/// | `entity` | `T` | `&T` | `<name>_exception_tree`, `faulty_<name>` |
/// | `opt_entity` | `Option<T>` | `Option<&T>` | `<name>_exception_tree`, `faulty_<name>` |
/// | `list` | `Vec<T>` | `&[T]` | `<name>_exception_tree`, `faulty_<name>` |
/// | `map` | `BTreeMap<String, T>` | `&BTreeMap<String, T>` | `<single>(key)`, `<name>_exception_tree`, `faulty_<name>` |
///
/// Builders get `set_<name>` and `set_<name>_with` for every row, plus
/// `add_<single>` / `add_<single>_with` for lists and `put_<single>` /
/// `put_<single>_with` for maps. A missing default is `Default::default()`.
#[macro_export]
macro_rules! def_entity {
    // Rows are normalized one at a time into
    // `{ [meta] kind name [single] (type) (field type) (slot type) (default) }`.
    (@normalize $meta:tt $name:ident $attr:ident [$($done:tt)*]) => {
        $crate::def_entity! { @emit $meta $name $attr $($done)* }
    };
    (@normalize $meta:tt $name:ident $attr:ident [$($done:tt)*]
        { $fm:tt list $field:ident [$single:ident] ($ty:ty) () } $($rest:tt)*
    ) => {
        $crate::def_entity! {
            @normalize $meta $name $attr [$($done)* {
                $fm list $field [$single] ($ty)
                (::std::vec::Vec<$ty>)
                ($crate::load::ListAttribute<$attr, $ty>)
                ()
            }] $($rest)*
        }
    };
    (@normalize $meta:tt $name:ident $attr:ident [$($done:tt)*]
        { $fm:tt map $field:ident [$single:ident] ($ty:ty) () } $($rest:tt)*
    ) => {
        $crate::def_entity! {
            @normalize $meta $name $attr [$($done)* {
                $fm map $field [$single] ($ty)
                (::std::collections::BTreeMap<::std::string::String, $ty>)
                ($crate::load::MapAttribute<$attr, ::std::string::String, $ty>)
                ()
            }] $($rest)*
        }
    };
    (@normalize $meta:tt $name:ident $attr:ident [$($done:tt)*]
        { $fm:tt opt_text $field:ident [] ($ty:ty) () } $($rest:tt)*
    ) => {
        $crate::def_entity! {
            @normalize $meta $name $attr [$($done)*] {
                $fm opt_text $field [] ($ty) (::std::option::Option::None)
            } $($rest)*
        }
    };
    (@normalize $meta:tt $name:ident $attr:ident [$($done:tt)*]
        { $fm:tt opt_entity $field:ident [] ($ty:ty) () } $($rest:tt)*
    ) => {
        $crate::def_entity! {
            @normalize $meta $name $attr [$($done)*] {
                $fm opt_entity $field [] ($ty) (::std::option::Option::None)
            } $($rest)*
        }
    };
    (@normalize $meta:tt $name:ident $attr:ident [$($done:tt)*]
        { $fm:tt opt_text $field:ident [] ($ty:ty) ($default:expr) } $($rest:tt)*
    ) => {
        $crate::def_entity! {
            @normalize $meta $name $attr [$($done)* {
                $fm opt_text $field [] ($ty)
                (::std::option::Option<$ty>)
                ($crate::load::Attribute<$attr, ::std::option::Option<$ty>>)
                ($default)
            }] $($rest)*
        }
    };
    (@normalize $meta:tt $name:ident $attr:ident [$($done:tt)*]
        { $fm:tt opt_entity $field:ident [] ($ty:ty) ($default:expr) } $($rest:tt)*
    ) => {
        $crate::def_entity! {
            @normalize $meta $name $attr [$($done)* {
                $fm opt_entity $field [] ($ty)
                (::std::option::Option<$ty>)
                ($crate::load::Attribute<$attr, ::std::option::Option<$ty>>)
                ($default)
            }] $($rest)*
        }
    };
    (@normalize $meta:tt $name:ident $attr:ident [$($done:tt)*]
        { $fm:tt $kind:ident $field:ident [] ($ty:ty) () } $($rest:tt)*
    ) => {
        $crate::def_entity! {
            @normalize $meta $name $attr [$($done)*] {
                $fm $kind $field [] ($ty) (::std::default::Default::default())
            } $($rest)*
        }
    };
    (@normalize $meta:tt $name:ident $attr:ident [$($done:tt)*]
        { $fm:tt $kind:ident $field:ident [] ($ty:ty) ($default:expr) } $($rest:tt)*
    ) => {
        $crate::def_entity! {
            @normalize $meta $name $attr [$($done)* {
                $fm $kind $field [] ($ty)
                ($ty)
                ($crate::load::Attribute<$attr, $ty>)
                ($default)
            }] $($rest)*
        }
    };

    (@emit [$(#[$meta:meta])*] $name:ident $attr:ident $(
        {
            [$(#[$field_meta:meta])*] $kind:ident $field:ident [$($single:ident)?] ($ty:ty)
            ($fty:ty) ($slot:ty) ($($default:expr)?)
        }
    )*) => {
        $crate::paste::paste! {
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::strum::IntoStaticStr)]
            #[strum(serialize_all = "snake_case")]
            pub enum $attr {
                $([<$field:camel>],)*
            }

            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize)]
            pub struct $name {
                $($(#[$field_meta])* $field: $fty,)*
                #[serde(skip)]
                provenance: $crate::load::Provenance<$attr>,
            }

            impl $name {
                pub fn builder() -> [<$name Builder>] {
                    [<$name Builder>]::default()
                }

                pub fn load_exception_tree(
                    &self,
                ) -> ::std::option::Option<&$crate::load::LoadExceptionTree<$attr>> {
                    self.provenance.tree()
                }
            }

            impl ::std::default::Default for $name {
                fn default() -> Self {
                    Self::builder().build()
                }
            }

            impl $crate::load::LoadExceptionTreeProvider for $name {
                fn exception_node(
                    &self,
                ) -> ::std::option::Option<&::std::sync::Arc<$crate::load::ExceptionNode>> {
                    self.provenance.node()
                }

                fn with_load_exception(self, fault: $crate::load::LoadException) -> Self {
                    Self {
                        provenance: self.provenance.with_exception(fault),
                        ..self
                    }
                }
            }

            impl $crate::load::Entity for $name {
                type Attribute = $attr;
            }

            #[derive(Debug)]
            pub struct [<$name Builder>] {
                $($field: $slot,)*
            }

            impl ::std::default::Default for [<$name Builder>] {
                fn default() -> Self {
                    Self {
                        $($field: <$slot>::new($attr::[<$field:camel>] $(, $default)?),)*
                    }
                }
            }

            impl [<$name Builder>] {
                pub fn build(self) -> $name {
                    let mut faults = $crate::load::ExceptionCollector::new();
                    $name {
                        $($field: self.$field.finish(&mut faults),)*
                        provenance: faults.finish(),
                    }
                }
            }
        }

        $crate::attribute_key!($attr);

        $(
            $crate::def_entity! { @accessors $name $attr $kind $field [$($single)?] ($ty) }
            $crate::def_entity! { @setters $name $attr $kind $field [$($single)?] ($ty) }
        )*
    };

    (@accessors $name:ident $attr:ident value $field:ident [] ($ty:ty)) => {
        impl $name {
            pub fn $field(&self) -> $ty {
                self.$field
            }
        }
        $crate::def_entity! { @supply_exception $name $attr $field }
    };
    (@accessors $name:ident $attr:ident text $field:ident [] ($ty:ty)) => {
        impl $name {
            pub fn $field(&self) -> &str {
                &self.$field
            }
        }
        $crate::def_entity! { @supply_exception $name $attr $field }
    };
    (@accessors $name:ident $attr:ident opt_text $field:ident [] ($ty:ty)) => {
        impl $name {
            pub fn $field(&self) -> ::std::option::Option<&str> {
                self.$field.as_deref()
            }
        }
        $crate::def_entity! { @supply_exception $name $attr $field }
    };
    (@accessors $name:ident $attr:ident entity $field:ident [] ($ty:ty)) => {
        $crate::paste::paste! {
            impl $name {
                pub fn $field(&self) -> &$ty {
                    &self.$field
                }

                pub fn [<faulty_ $field>](&self) -> ::std::option::Option<&$ty> {
                    ::std::option::Option::Some(&self.$field)
                        .filter(|value| $crate::load::LoadExceptionTreeProvider::has_exceptions(*value))
                }
            }
        }
        $crate::def_entity! { @nested_tree $name $attr $field ($ty) }
    };
    (@accessors $name:ident $attr:ident opt_entity $field:ident [] ($ty:ty)) => {
        $crate::paste::paste! {
            impl $name {
                pub fn $field(&self) -> ::std::option::Option<&$ty> {
                    self.$field.as_ref()
                }

                pub fn [<faulty_ $field>](&self) -> ::std::option::Option<&$ty> {
                    self.$field
                        .as_ref()
                        .filter(|value| $crate::load::LoadExceptionTreeProvider::has_exceptions(*value))
                }
            }
        }
        $crate::def_entity! { @nested_tree $name $attr $field ($ty) }
    };
    (@accessors $name:ident $attr:ident list $field:ident [$single:ident] ($ty:ty)) => {
        $crate::paste::paste! {
            impl $name {
                pub fn $field(&self) -> &[$ty] {
                    &self.$field
                }

                pub fn [<$field _exception_tree>](
                    &self,
                ) -> ::std::option::Option<$crate::load::LoadExceptionTree<usize>> {
                    self.provenance.exception_tree(&$attr::[<$field:camel>])
                }

                /// Elements with recorded faults, by index.
                pub fn [<faulty_ $field>](&self) -> impl Iterator<Item = (usize, &$ty)> {
                    let tree = self.[<$field _exception_tree>]();
                    self.$field.iter().enumerate().filter(move |(index, _)| {
                        tree.as_ref().is_some_and(|tree| tree.contains(index))
                    })
                }
            }
        }
    };
    (@accessors $name:ident $attr:ident map $field:ident [$single:ident] ($ty:ty)) => {
        $crate::paste::paste! {
            impl $name {
                pub fn $field(&self) -> &::std::collections::BTreeMap<::std::string::String, $ty> {
                    &self.$field
                }

                pub fn $single(&self, key: &str) -> ::std::option::Option<&$ty> {
                    self.$field.get(key)
                }

                pub fn [<$field _exception_tree>](
                    &self,
                ) -> ::std::option::Option<$crate::load::LoadExceptionTree<::std::string::String>> {
                    self.provenance.exception_tree(&$attr::[<$field:camel>])
                }

                /// Entries with recorded faults, in key order.
                pub fn [<faulty_ $field>](
                    &self,
                ) -> impl Iterator<Item = (&::std::string::String, &$ty)> {
                    let tree = self.[<$field _exception_tree>]();
                    self.$field.iter().filter(move |(key, _)| {
                        tree.as_ref().is_some_and(|tree| tree.contains(*key))
                    })
                }
            }
        }
    };

    (@supply_exception $name:ident $attr:ident $field:ident) => {
        $crate::paste::paste! {
            impl $name {
                pub fn [<$field _supply_exception>](
                    &self,
                ) -> ::std::option::Option<&$crate::load::LoadException> {
                    self.provenance.supply_exception(&$attr::[<$field:camel>])
                }
            }
        }
    };
    (@nested_tree $name:ident $attr:ident $field:ident ($ty:ty)) => {
        $crate::paste::paste! {
            impl $name {
                pub fn [<$field _exception_tree>](
                    &self,
                ) -> ::std::option::Option<
                    $crate::load::LoadExceptionTree< <$ty as $crate::load::Entity>::Attribute >,
                > {
                    self.provenance.exception_tree(&$attr::[<$field:camel>])
                }
            }
        }
    };

    (@setters $name:ident $attr:ident value $field:ident [] ($ty:ty)) => {
        $crate::def_entity! { @plain_setters $name $field ($ty) }
    };
    (@setters $name:ident $attr:ident entity $field:ident [] ($ty:ty)) => {
        $crate::def_entity! { @plain_setters $name $field ($ty) }
    };
    (@setters $name:ident $attr:ident opt_text $field:ident [] ($ty:ty)) => {
        $crate::def_entity! { @plain_setters $name $field (::std::option::Option<$ty>) }
    };
    (@setters $name:ident $attr:ident opt_entity $field:ident [] ($ty:ty)) => {
        $crate::def_entity! { @plain_setters $name $field (::std::option::Option<$ty>) }
    };
    (@setters $name:ident $attr:ident text $field:ident [] ($ty:ty)) => {
        $crate::paste::paste! {
            impl [<$name Builder>] {
                pub fn [<set_ $field>](
                    mut self,
                    $field: impl ::std::convert::Into<::std::string::String>,
                ) -> Self {
                    self.$field.set($field.into());
                    self
                }

                pub fn [<set_ $field _with>](
                    mut self,
                    $field: impl $crate::load::FallibleSupplier<::std::string::String>,
                    default: ::std::string::String,
                ) -> Self {
                    self.$field.supply($field, default);
                    self
                }
            }
        }
    };
    (@setters $name:ident $attr:ident list $field:ident [$single:ident] ($ty:ty)) => {
        $crate::paste::paste! {
            impl [<$name Builder>] {
                /// Replaces the bulk elements; individually added ones follow them.
                pub fn [<set_ $field>](mut self, $field: ::std::vec::Vec<$ty>) -> Self {
                    self.$field.set($field);
                    self
                }

                pub fn [<set_ $field _with>](
                    mut self,
                    $field: impl $crate::load::FallibleSupplier<::std::vec::Vec<$ty>>,
                ) -> Self {
                    self.$field.supply($field);
                    self
                }

                pub fn [<add_ $single>](mut self, $single: impl ::std::convert::Into<$ty>) -> Self {
                    self.$field.add($single.into());
                    self
                }

                pub fn [<add_ $single _with>](
                    mut self,
                    $single: impl $crate::load::FallibleSupplier<$ty>,
                    default: $ty,
                ) -> Self {
                    self.$field.add_supplied($single, default);
                    self
                }
            }
        }
    };
    (@setters $name:ident $attr:ident map $field:ident [$single:ident] ($ty:ty)) => {
        $crate::paste::paste! {
            impl [<$name Builder>] {
                /// Replaces the bulk entries; individually put ones win on key collision.
                pub fn [<set_ $field>](
                    mut self,
                    $field: ::std::collections::BTreeMap<::std::string::String, $ty>,
                ) -> Self {
                    self.$field.set($field);
                    self
                }

                pub fn [<set_ $field _with>](
                    mut self,
                    $field: impl $crate::load::FallibleSupplier<
                        ::std::collections::BTreeMap<::std::string::String, $ty>,
                    >,
                ) -> Self {
                    self.$field.supply($field);
                    self
                }

                pub fn [<put_ $single>](
                    mut self,
                    key: impl ::std::convert::Into<::std::string::String>,
                    $single: $ty,
                ) -> Self {
                    self.$field.put(key.into(), $single);
                    self
                }

                pub fn [<put_ $single _with>](
                    mut self,
                    key: impl ::std::convert::Into<::std::string::String>,
                    $single: impl $crate::load::FallibleSupplier<$ty>,
                    default: $ty,
                ) -> Self {
                    self.$field.put_supplied(key.into(), $single, default);
                    self
                }
            }
        }
    };
    (@plain_setters $name:ident $field:ident ($ty:ty)) => {
        $crate::paste::paste! {
            impl [<$name Builder>] {
                pub fn [<set_ $field>](mut self, $field: $ty) -> Self {
                    self.$field.set($field);
                    self
                }

                pub fn [<set_ $field _with>](
                    mut self,
                    $field: impl $crate::load::FallibleSupplier<$ty>,
                    default: $ty,
                ) -> Self {
                    self.$field.supply($field, default);
                    self
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident with $attr:ident {
            $(
                $(#[$field_meta:meta])*
                $kind:ident $field:ident $(($single:ident))? : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $crate::def_entity! {
            @normalize [$(#[$meta])*] $name $attr []
            $({ [$(#[$field_meta])*] $kind $field [$($single)?] ($ty) ($($default)?) })*
        }
    };
}
