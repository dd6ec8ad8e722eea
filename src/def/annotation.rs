//! Free-text annotations on the canvas or attached to nodes.

use super::bounds::BoundsDef;

/// Font size used when an annotation does not declare one.
pub const DEFAULT_FONT_SIZE: i32 = 11;

crate::def_entity! {
    pub struct AnnotationDef with AnnotationAttribute {
        text text: String,
        entity bounds: BoundsDef,
        value font_size: i32 = DEFAULT_FONT_SIZE,
    }
}
