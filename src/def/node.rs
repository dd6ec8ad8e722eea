//! Workflow nodes.

use super::annotation::AnnotationDef;
use super::bounds::BoundsDef;
use super::port::PortDef;

crate::def_entity! {
    /// One node of a workflow: its identity, placement and ports.
    pub struct NodeDef with NodeAttribute {
        value id: i32 = -1,
        text name: String,
        text factory: String,
        entity bounds: BoundsDef,
        #[serde(skip_serializing_if = "Option::is_none")]
        opt_entity annotation: AnnotationDef,
        list in_ports(in_port): PortDef,
        list out_ports(out_port): PortDef,
        value locked: bool = false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{AnnotationAttribute, PortAttribute};

    #[test]
    fn test_faulty_annotation_default_merges_new_fault() {
        let faulty_default = AnnotationDef::builder()
            .set_text_with(|| Err::<String, _>(anyhow::anyhow!("bad text")), String::new())
            .build();
        let node = NodeDef::builder()
            .set_annotation_with(
                || Err::<Option<AnnotationDef>, _>(anyhow::anyhow!("annotation unreadable")),
                Some(faulty_default),
            )
            .build();

        let tree = node.annotation_exception_tree().unwrap();
        assert_eq!(
            tree.supply_exception().unwrap().to_string(),
            "annotation unreadable"
        );
        assert_eq!(
            tree.child_supply_exception(&AnnotationAttribute::Text)
                .unwrap()
                .to_string(),
            "bad text"
        );
        assert!(node.faulty_annotation().is_some());
    }

    #[test]
    fn test_in_port_faults_indexed_after_bulk() {
        let node = NodeDef::builder()
            .add_in_port_with(
                || Err::<PortDef, _>(anyhow::anyhow!("port 2")),
                PortDef::builder().set_index(2).build(),
            )
            .set_in_ports(vec![
                PortDef::builder().set_index(0).build(),
                PortDef::builder().set_index(1).build(),
            ])
            .build();

        let indices: Vec<i32> = node.in_ports().iter().map(PortDef::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let tree = node.in_ports_exception_tree().unwrap();
        assert!(tree.child_supply_exception(&2).is_some());
        let faulty: Vec<usize> = node.faulty_in_ports().map(|(i, _)| i).collect();
        assert_eq!(faulty, vec![2]);
        assert!(node.out_ports_exception_tree().is_none());
        let port_tree = tree.exception_tree::<PortAttribute>(&2).unwrap();
        assert!(port_tree.child_supply_exception(&PortAttribute::Index).is_none());
    }
}
