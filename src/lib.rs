//! # xworkflow-def: Fault-tolerant Workflow Definitions
//!
//! `xworkflow-def` loads workflow definitions (nodes, ports, connections,
//! annotations and editor settings) without ever giving up on a document.
//! Every attribute is read through a fallible supplier; a failing read is
//! replaced by a default and the failure is kept in a load-exception tree
//! shaped like the data itself.
//!
//! - **Builders**: each entity has a builder accepting plain values or
//!   fallible suppliers with defaults.
//! - **Exception trees**: faults are addressable by attribute, list index and
//!   map key, down to the leaf that failed.
//! - **Readers**: YAML, JSON and TOML documents are mapped onto the builders;
//!   reading never fails, it only records faults.
//! - **Reports**: a flat, serializable list of fault paths for callers that
//!   want diagnostics rather than trees.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xworkflow_def::{read_workflow_file, LoadReport, ReaderConfig};
//!
//! let workflow = read_workflow_file("workflow.yaml", &ReaderConfig::default());
//! for (id, node) in workflow.nodes() {
//!     println!("{id}: {}", node.factory());
//! }
//! for diagnostic in LoadReport::of(&workflow).diagnostics {
//!     eprintln!("{}: {}", diagnostic.path, diagnostic.message);
//! }
//! ```

pub mod def;
pub mod error;
pub mod load;
pub mod reader;

#[doc(hidden)]
pub use paste;

pub use def::{
    AnnotationDef, BoundsDef, ConnectionDef, CoordinateDef, NodeDef, PortDef, WorkflowDef,
    WorkflowUiSettingsDef,
};
pub use error::{ReadError, ReadResult};
pub use load::{
    FallibleSupplier, FaultPath, LoadDiagnostic, LoadException, LoadExceptionTree,
    LoadExceptionTreeProvider, LoadReport, PathSegment,
};
pub use reader::{
    parse_source, read_workflow, read_workflow_file, read_workflow_value, DefFormat, ReaderConfig,
};
