use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_layout_sorts_and_dedups() {
    let layout = RecordLayout::new(vec!["b".into(), "a".into(), "b".into()]);
    assert_eq!(layout.names().to_vec(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(layout.get_index("a"), Some(0));
    assert_eq!(layout.get_index("b"), Some(1));
    assert_eq!(layout.get_index("c"), None);
    assert_eq!(layout.len(), 2);
}

#[test]
fn test_record_get_field() {
    let r = Record::new("Point", [("y", Value::int(2)), ("x", Value::int(1))]);
    assert_eq!(r.type_name(), "Point");
    assert_eq!(r.get_field("x"), Some(&Value::int(1)));
    assert_eq!(r.get_field("y"), Some(&Value::int(2)));
    assert_eq!(r.get_field("z"), None);
    assert_eq!(r.len(), 2);
}

#[test]
fn test_record_duplicate_field_last_wins() {
    let r = Record::new("P", [("x", Value::int(1)), ("x", Value::int(9))]);
    assert_eq!(r.len(), 1);
    assert_eq!(r.get_field("x"), Some(&Value::int(9)));
}

#[test]
fn test_record_fields_in_layout_order() {
    let r = Record::new("P", [("b", Value::int(2)), ("a", Value::int(1))]);
    let names: Vec<_> = r.fields().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_record_equality_includes_type_name() {
    let a = Record::new("A", [("x", Value::int(1))]);
    let b = Record::new("B", [("x", Value::int(1))]);
    let a2 = Record::new("A", [("x", Value::int(1))]);
    assert_ne!(a, b);
    assert_eq!(a, a2);
}

#[test]
fn test_empty_record_display() {
    let r = Record::new("Unit", Vec::<(String, Value)>::new());
    assert!(r.is_empty());
    assert_eq!(r.to_string(), "Unit");
    assert_eq!(format!("{r:?}"), "Unit");
}
