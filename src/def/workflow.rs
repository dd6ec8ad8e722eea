//! The workflow root entity.

use super::annotation::AnnotationDef;
use super::connection::ConnectionDef;
use super::node::NodeDef;
use super::ui_settings::WorkflowUiSettingsDef;

/// Current definition format version.
pub const CURRENT_DEF_VERSION: &str = "1.0.0";

/// All definition format versions this crate can read.
pub const SUPPORTED_DEF_VERSIONS: &[&str] = &["0.9.0", "1.0.0"];

crate::def_entity! {
    /// A complete workflow definition.
    ///
    /// Nodes and workflow annotations are keyed by their id in the source
    /// document; connections keep document order.
    pub struct WorkflowDef with WorkflowAttribute {
        text name: String,
        text version: String = CURRENT_DEF_VERSION.to_string(),
        map nodes(node): NodeDef,
        list connections(connection): ConnectionDef,
        map annotations(annotation): AnnotationDef,
        entity ui_settings: WorkflowUiSettingsDef,
        list tags(tag): String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::WorkflowUiSettingsAttribute;

    #[test]
    fn test_default_workflow_is_current_version() {
        let workflow = WorkflowDef::default();
        assert_eq!(workflow.version(), CURRENT_DEF_VERSION);
        assert!(workflow.nodes().is_empty());
        assert!(workflow.load_exception_tree().is_none());
    }

    #[test]
    fn test_faulty_tag_is_reported_by_index() {
        let workflow = WorkflowDef::builder()
            .add_tag("etl")
            .add_tag_with(|| Err::<String, _>(anyhow::anyhow!("not a string")), String::new())
            .build();

        assert_eq!(workflow.tags(), ["etl".to_string(), String::new()]);
        let faulty: Vec<usize> = workflow.faulty_tags().map(|(i, _)| i).collect();
        assert_eq!(faulty, vec![1]);
    }

    #[test]
    fn test_ui_settings_tree_is_typed() {
        let settings = WorkflowUiSettingsDef::builder()
            .set_grid_x_with(|| Err::<i32, _>(anyhow::anyhow!("grid")), 20)
            .build();
        let workflow = WorkflowDef::builder().set_ui_settings(settings).build();

        let tree = workflow.ui_settings_exception_tree().unwrap();
        assert!(tree
            .child_supply_exception(&WorkflowUiSettingsAttribute::GridX)
            .is_some());
        assert!(workflow.faulty_ui_settings().is_some());
        assert_eq!(workflow.node("missing"), None);
    }
}
