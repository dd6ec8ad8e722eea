//! Node ports.

crate::def_entity! {
    /// An input or output port of a node.
    pub struct PortDef with PortAttribute {
        value index: i32,
        text name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        opt_text port_type: String,
    }
}
