//! Fault-tolerant construction engine.
//!
//! Builders hold one slot per attribute ([`Attribute`], [`ListAttribute`],
//! [`MapAttribute`]). Every slot accepts plain values and
//! [`FallibleSupplier`]s; a failing supplier is recovered locally by a
//! caller-given default and recorded as a [`LoadException`]. At `build()`
//! time the slots hand their faults to an [`ExceptionCollector`], which yields
//! the instance's [`Provenance`]: an [`LoadExceptionTree`] mirroring the data,
//! addressable by attribute, list index or map key.

pub mod attribute;
pub mod entity;
pub mod exception;
pub mod list;
pub mod map;
pub mod provenance;
pub mod provider;
pub mod report;
pub mod supplier;
pub mod tree;

pub use attribute::Attribute;
pub use entity::Entity;
pub use exception::LoadException;
pub use list::ListAttribute;
pub use map::MapAttribute;
pub use provenance::{ExceptionCollector, Provenance};
pub use provider::LoadExceptionTreeProvider;
pub use report::{LoadDiagnostic, LoadReport};
pub use supplier::FallibleSupplier;
pub use tree::{ExceptionNode, FaultPath, LoadExceptionTree, PathSegment, TreeKey};
