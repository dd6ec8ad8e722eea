//! Maps raw documents onto the definition builders.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use super::config::ReaderConfig;
use super::fields::Fields;
use super::{parse_source, DefFormat};
use crate::def::annotation::DEFAULT_FONT_SIZE;
use crate::def::ui_settings::{DEFAULT_CONNECTION_WIDTH, DEFAULT_GRID_SIZE};
use crate::def::{
    AnnotationDef, BoundsDef, ConnectionDef, CoordinateDef, NodeDef, PortDef, WorkflowDef,
    WorkflowUiSettingsDef,
};
use crate::error::{ReadError, ReadResult};
use crate::load::{LoadException, LoadExceptionTreeProvider, LoadReport};

/// Read a workflow definition from text.
///
/// Never fails: an unparseable document yields the default workflow carrying
/// the parse error as its root-level fault.
pub fn read_workflow(content: &str, format: DefFormat, config: &ReaderConfig) -> WorkflowDef {
    let workflow = match parse_source(content, format) {
        Ok(value) => workflow_from_value(&value, config),
        Err(err) => unreadable(err),
    };
    log_faults(&workflow, config);
    workflow
}

/// Read a workflow definition from an already parsed document.
pub fn read_workflow_value(value: &Value, config: &ReaderConfig) -> WorkflowDef {
    let workflow = workflow_from_value(value, config);
    log_faults(&workflow, config);
    workflow
}

/// Read a workflow definition file; the format follows the file extension.
pub fn read_workflow_file(path: impl AsRef<Path>, config: &ReaderConfig) -> WorkflowDef {
    let path = path.as_ref();
    match load_file(path) {
        Ok((content, format)) => read_workflow(&content, format, config),
        Err(err) => {
            let workflow = unreadable(err);
            log_faults(&workflow, config);
            workflow
        }
    }
}

fn load_file(path: &Path) -> ReadResult<(String, DefFormat)> {
    let format = DefFormat::from_path(path)
        .ok_or_else(|| ReadError::UnknownFormat(path.display().to_string()))?;
    let content = std::fs::read_to_string(path).map_err(|e| ReadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok((content, format))
}

fn unreadable(err: ReadError) -> WorkflowDef {
    WorkflowDef::default().with_load_exception(LoadException::new(err))
}

fn log_faults(workflow: &WorkflowDef, config: &ReaderConfig) {
    if !config.log_faults || !workflow.has_exceptions() {
        return;
    }
    for diagnostic in LoadReport::of(workflow).diagnostics {
        tracing::warn!(
            path = %diagnostic.path,
            error = %diagnostic.message,
            "workflow definition loaded with fault"
        );
    }
}

fn workflow_from_value(value: &Value, config: &ReaderConfig) -> WorkflowDef {
    match Fields::of(value) {
        Ok(fields) => workflow_from_fields(fields, config),
        Err(err) => unreadable(err),
    }
}

fn workflow_from_fields(fields: Fields<'_>, config: &ReaderConfig) -> WorkflowDef {
    let builder = WorkflowDef::builder()
        .set_name_with(|| fields.optional_or("name", String::new()), String::new())
        .set_version_with(
            || read_version(fields, config),
            config.current_version().to_string(),
        )
        .set_tags_with(|| fields.optional_or::<Vec<String>>("tags", Vec::new()))
        .set_ui_settings_with(
            || read_nested(fields, "ui_settings", ui_settings_from_fields),
            WorkflowUiSettingsDef::default(),
        );

    let builder = match fields.optional_entries("nodes") {
        Ok(entries) => entries.into_iter().flatten().fold(builder, |builder, (key, value)| {
            builder.put_node_with(key.clone(), || read_node(value), NodeDef::default())
        }),
        Err(err) => builder.set_nodes_with(|| Err::<BTreeMap<String, NodeDef>, _>(err)),
    };

    let builder = match fields.optional_array("connections") {
        Ok(items) => items.iter().fold(builder, |builder, item| {
            builder.add_connection_with(|| read_connection(item), ConnectionDef::default())
        }),
        Err(err) => builder.set_connections_with(|| Err::<Vec<ConnectionDef>, _>(err)),
    };

    let builder = match fields.optional_entries("annotations") {
        Ok(entries) => entries.into_iter().flatten().fold(builder, |builder, (key, value)| {
            builder.put_annotation_with(key.clone(), || read_annotation(value), AnnotationDef::default())
        }),
        Err(err) => {
            builder.set_annotations_with(|| Err::<BTreeMap<String, AnnotationDef>, _>(err))
        }
    };

    builder.build()
}

fn read_version(fields: Fields<'_>, config: &ReaderConfig) -> ReadResult<String> {
    match fields.optional::<String>("version")? {
        Some(version) if config.supports(&version) => Ok(version),
        Some(version) => Err(ReadError::UnsupportedVersion {
            found: version,
            supported: config.supported_versions.join(", "),
        }),
        None if config.require_version => Err(ReadError::MissingField("version".into())),
        None => Ok(config.current_version().to_string()),
    }
}

/// Reads the object under `name` with `read`; an absent object yields the
/// entity's default.
fn read_nested<T: Default>(
    fields: Fields<'_>,
    name: &str,
    read: impl FnOnce(Fields<'_>) -> T,
) -> ReadResult<T> {
    Ok(fields.optional_object(name)?.map(read).unwrap_or_default())
}

fn read_node(value: &Value) -> ReadResult<NodeDef> {
    let fields = Fields::of(value)?;
    let builder = NodeDef::builder()
        .set_id_with(|| fields.required::<i32>("id"), -1)
        .set_name_with(|| fields.optional_or("name", String::new()), String::new())
        .set_factory_with(|| fields.required::<String>("factory"), String::new())
        .set_bounds_with(
            || read_nested(fields, "bounds", bounds_from_fields),
            BoundsDef::default(),
        )
        .set_annotation_with(
            || Ok::<_, ReadError>(fields.optional_object("annotation")?.map(annotation_from_fields)),
            None,
        )
        .set_locked_with(|| fields.optional_or("locked", false), false);

    let builder = match fields.optional_array("in_ports") {
        Ok(items) => items.iter().fold(builder, |builder, item| {
            builder.add_in_port_with(|| read_port(item), PortDef::default())
        }),
        Err(err) => builder.set_in_ports_with(|| Err::<Vec<PortDef>, _>(err)),
    };
    let builder = match fields.optional_array("out_ports") {
        Ok(items) => items.iter().fold(builder, |builder, item| {
            builder.add_out_port_with(|| read_port(item), PortDef::default())
        }),
        Err(err) => builder.set_out_ports_with(|| Err::<Vec<PortDef>, _>(err)),
    };
    Ok(builder.build())
}

fn read_port(value: &Value) -> ReadResult<PortDef> {
    let fields = Fields::of(value)?;
    Ok(PortDef::builder()
        .set_index_with(|| fields.required::<i32>("index"), 0)
        .set_name_with(|| fields.optional_or("name", String::new()), String::new())
        .set_port_type_with(|| fields.optional::<String>("port_type"), None)
        .build())
}

fn read_connection(value: &Value) -> ReadResult<ConnectionDef> {
    let fields = Fields::of(value)?;
    let builder = ConnectionDef::builder()
        .set_source_id_with(|| fields.required::<i32>("source_id"), -1)
        .set_source_port_with(|| fields.required::<i32>("source_port"), -1)
        .set_dest_id_with(|| fields.required::<i32>("dest_id"), -1)
        .set_dest_port_with(|| fields.required::<i32>("dest_port"), -1)
        .set_deletable_with(|| fields.optional_or("deletable", true), true);

    let builder = match fields.optional_array("bend_points") {
        Ok(items) => items.iter().fold(builder, |builder, item| {
            builder.add_bend_point_with(
                || Fields::of(item).map(coordinate_from_fields),
                CoordinateDef::default(),
            )
        }),
        Err(err) => builder.set_bend_points_with(|| Err::<Vec<CoordinateDef>, _>(err)),
    };
    Ok(builder.build())
}

fn read_annotation(value: &Value) -> ReadResult<AnnotationDef> {
    Fields::of(value).map(annotation_from_fields)
}

fn annotation_from_fields(fields: Fields<'_>) -> AnnotationDef {
    AnnotationDef::builder()
        .set_text_with(|| fields.optional_or("text", String::new()), String::new())
        .set_bounds_with(
            || read_nested(fields, "bounds", bounds_from_fields),
            BoundsDef::default(),
        )
        .set_font_size_with(
            || fields.optional_or("font_size", DEFAULT_FONT_SIZE),
            DEFAULT_FONT_SIZE,
        )
        .build()
}

fn bounds_from_fields(fields: Fields<'_>) -> BoundsDef {
    BoundsDef::builder()
        .set_location_with(
            || read_nested(fields, "location", coordinate_from_fields),
            CoordinateDef::default(),
        )
        .set_width_with(|| fields.required::<i32>("width"), 0)
        .set_height_with(|| fields.required::<i32>("height"), 0)
        .build()
}

fn coordinate_from_fields(fields: Fields<'_>) -> CoordinateDef {
    CoordinateDef::builder()
        .set_x_with(|| fields.required::<i32>("x"), 0)
        .set_y_with(|| fields.required::<i32>("y"), 0)
        .build()
}

fn ui_settings_from_fields(fields: Fields<'_>) -> WorkflowUiSettingsDef {
    WorkflowUiSettingsDef::builder()
        .set_snap_to_grid_with(|| fields.optional_or("snap_to_grid", false), false)
        .set_show_grid_with(|| fields.optional_or("show_grid", false), false)
        .set_grid_x_with(
            || fields.optional_or("grid_x", DEFAULT_GRID_SIZE),
            DEFAULT_GRID_SIZE,
        )
        .set_grid_y_with(
            || fields.optional_or("grid_y", DEFAULT_GRID_SIZE),
            DEFAULT_GRID_SIZE,
        )
        .set_curved_connections_with(|| fields.optional_or("curved_connections", false), false)
        .set_connection_width_with(
            || fields.optional_or("connection_width", DEFAULT_CONNECTION_WIDTH),
            DEFAULT_CONNECTION_WIDTH,
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quiet() -> ReaderConfig {
        ReaderConfig {
            log_faults: false,
            ..ReaderConfig::default()
        }
    }

    #[test]
    fn test_version_accepted() {
        let workflow = read_workflow_value(&json!({"version": "0.9.0"}), &quiet());
        assert_eq!(workflow.version(), "0.9.0");
        assert!(workflow.version_supply_exception().is_none());
    }

    #[test]
    fn test_version_rejected_uses_current() {
        let workflow = read_workflow_value(&json!({"version": "7.0"}), &quiet());
        assert_eq!(workflow.version(), crate::def::CURRENT_DEF_VERSION);
        let fault = workflow.version_supply_exception().unwrap();
        assert!(matches!(
            fault.downcast_cause::<ReadError>(),
            Some(ReadError::UnsupportedVersion { found, .. }) if found == "7.0"
        ));
    }

    #[test]
    fn test_missing_version_when_required() {
        let config = ReaderConfig {
            require_version: true,
            ..quiet()
        };
        let workflow = read_workflow_value(&json!({}), &config);
        assert!(workflow.version_supply_exception().is_some());

        let workflow = read_workflow_value(&json!({}), &quiet());
        assert!(!workflow.has_exceptions());
    }

    #[test]
    fn test_non_object_document() {
        let workflow = read_workflow_value(&json!([1, 2, 3]), &quiet());
        let tree = workflow.load_exception_tree().unwrap();
        assert!(matches!(
            tree.supply_exception().unwrap().downcast_cause::<ReadError>(),
            Some(ReadError::NotAnObject("array"))
        ));
    }

    #[test]
    fn test_bend_point_faults() {
        let connection = read_connection(&json!({
            "source_id": 1, "source_port": 0, "dest_id": 2, "dest_port": 1,
            "bend_points": [{"x": 1, "y": 2}, "oops", {"x": 3}]
        }))
        .unwrap();
        assert_eq!(connection.bend_points().len(), 3);
        let faulty: Vec<usize> = connection.faulty_bend_points().map(|(i, _)| i).collect();
        assert_eq!(faulty, vec![1, 2]);
        assert_eq!(connection.bend_points()[2].x(), 3);
        assert!(connection.bend_points()[2].y_supply_exception().is_some());
    }

    #[test]
    fn test_ports_not_an_array() {
        let node = read_node(&json!({"id": 4, "factory": "f", "in_ports": {"0": {}}})).unwrap();
        assert!(node.in_ports().is_empty());
        let tree = node.in_ports_exception_tree().unwrap();
        assert!(matches!(
            tree.supply_exception().unwrap().downcast_cause::<ReadError>(),
            Some(ReadError::UnexpectedShape { .. })
        ));
    }
}
