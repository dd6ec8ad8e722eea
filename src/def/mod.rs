//! Workflow definition entities.
//!
//! Every entity comes as an attribute enum, an immutable instance and a
//! builder. Builders accept plain values and fallible suppliers for each
//! attribute; instances expose best-effort values alongside the faults
//! recorded while they were built.

pub mod annotation;
pub mod bounds;
pub mod connection;
pub mod coordinate;
pub mod node;
pub mod port;
pub mod ui_settings;
pub mod workflow;

pub use annotation::{AnnotationAttribute, AnnotationDef, AnnotationDefBuilder};
pub use bounds::{BoundsAttribute, BoundsDef, BoundsDefBuilder};
pub use connection::{ConnectionAttribute, ConnectionDef, ConnectionDefBuilder};
pub use coordinate::{CoordinateAttribute, CoordinateDef, CoordinateDefBuilder};
pub use node::{NodeAttribute, NodeDef, NodeDefBuilder};
pub use port::{PortAttribute, PortDef, PortDefBuilder};
pub use ui_settings::{
    WorkflowUiSettingsAttribute, WorkflowUiSettingsDef, WorkflowUiSettingsDefBuilder,
};
pub use workflow::{
    WorkflowAttribute, WorkflowDef, WorkflowDefBuilder, CURRENT_DEF_VERSION,
    SUPPORTED_DEF_VERSIONS,
};
