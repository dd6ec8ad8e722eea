//! Editor settings stored with a workflow.

pub const DEFAULT_GRID_SIZE: i32 = 20;
pub const DEFAULT_CONNECTION_WIDTH: i32 = 1;

crate::def_entity! {
    pub struct WorkflowUiSettingsDef with WorkflowUiSettingsAttribute {
        value snap_to_grid: bool,
        value show_grid: bool,
        value grid_x: i32 = DEFAULT_GRID_SIZE,
        value grid_y: i32 = DEFAULT_GRID_SIZE,
        value curved_connections: bool,
        value connection_width: i32 = DEFAULT_CONNECTION_WIDTH,
    }
}
