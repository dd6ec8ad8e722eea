//! Canvas coordinates.

crate::def_entity! {
    /// A point on the workflow canvas.
    pub struct CoordinateDef with CoordinateAttribute {
        value x: i32,
        value y: i32,
    }
}
