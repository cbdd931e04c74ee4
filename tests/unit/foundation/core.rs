use super::*;

#[test]
fn node_id_serializes_as_plain_number() {
    let s = serde_json::to_string(&NodeId(7)).unwrap();
    assert_eq!(s, "7");
    let back: NodeId = serde_json::from_str(&s).unwrap();
    assert_eq!(back, NodeId(7));
}

#[test]
fn node_id_orders_by_document_position() {
    assert!(NodeId(1) < NodeId(2));
    assert_eq!(NodeId(3).index(), 3);
    assert_eq!(NodeId(3).to_string(), "#3");
}
