//! Rectangular canvas bounds.

use super::coordinate::CoordinateDef;

crate::def_entity! {
    /// Position and size of a node or annotation.
    pub struct BoundsDef with BoundsAttribute {
        entity location: CoordinateDef,
        value width: i32,
        value height: i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::CoordinateAttribute;
    use crate::load::LoadExceptionTreeProvider;

    #[test]
    fn test_faulty_location_propagates_on_success_path() {
        let location = CoordinateDef::builder()
            .set_x_with(|| Err::<i32, _>(anyhow::anyhow!("bad x")), 0)
            .set_y(4)
            .build();
        let bounds = BoundsDef::builder()
            .set_location_with(|| Ok::<_, anyhow::Error>(location), CoordinateDef::default())
            .set_width(10)
            .build();

        assert!(bounds.has_exceptions());
        assert!(bounds.faulty_location().is_some());
        let tree = bounds.location_exception_tree().unwrap();
        assert!(tree.supply_exception().is_none());
        assert!(tree.child_supply_exception(&CoordinateAttribute::X).is_some());
        assert!(bounds.width_supply_exception().is_none());
    }

    #[test]
    fn test_clean_bounds() {
        let bounds = BoundsDef::builder().set_width(3).set_height(4).build();
        assert!(!bounds.has_exceptions());
        assert!(bounds.load_exception_tree().is_none());
        assert!(bounds.faulty_location().is_none());
        assert_eq!((bounds.width(), bounds.height()), (3, 4));
    }
}
