//! Connections between node ports.

use super::coordinate::CoordinateDef;

crate::def_entity! {
    /// A directed link from an output port of one node to an input port of another.
    pub struct ConnectionDef with ConnectionAttribute {
        value source_id: i32 = -1,
        value source_port: i32 = -1,
        value dest_id: i32 = -1,
        value dest_port: i32 = -1,
        value deletable: bool = true,
        list bend_points(bend_point): CoordinateDef,
    }
}
