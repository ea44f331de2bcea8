use super::*;
use crate::variable::VarSupply;
use dive_value::{custom, Record};
use pretty_assertions::assert_eq;

fn mock() -> Value {
    Value::record(Record::new("Mock", [("foo", Value::int(42))]))
}

#[test]
fn test_extractors() {
    let list = Value::list(vec![Value::int(1), Value::int(2)]);
    assert_eq!(Extractor::Field("foo".into()).extract(&mock()), Ok(Value::int(42)));
    assert_eq!(Extractor::Index(-1).extract(&list), Ok(Value::int(2)));
    assert_eq!(
        Extractor::Key("a".into()).extract(&Value::map([("a", Value::Void)])),
        Ok(Value::Void)
    );
    let missing = Extractor::Field("bar".into()).extract(&mock());
    assert!(missing.is_err_and(|fault| fault.is_soft()));
}

#[test]
fn test_get_extractor() {
    let Step::Extract(extractor) = Step::get(|_| Err(custom("nope"))) else {
        panic!("get builds an extract step");
    };
    assert_eq!(extractor.extract(&Value::int(1)), Err(custom("nope")));
}

#[test]
fn test_guards() {
    assert!(Guard::Subtype(TypeTag::Record).admits(&mock()));
    assert!(Guard::Subtype(TypeTag::named("Mock")).admits(&mock()));
    assert!(!Guard::Subtype(TypeTag::named("Other")).admits(&mock()));
    assert!(!Guard::Subtype(TypeTag::Str).admits(&Value::int(1)));
    let Step::Guard(even) = Step::when(|x| x.as_int().is_some_and(|n| n % 2 == 0)) else {
        panic!("when builds a guard step");
    };
    assert!(even.admits(&Value::int(4)));
    assert!(!even.admits(&Value::int(3)));
}

#[test]
fn test_quantifier_presets() {
    assert_eq!(
        Quantifier::FIRST,
        Quantifier::Any {
            must_exist: true,
            only_once: true
        }
    );
    assert!(matches!(Step::some(), Step::Quantify(q) if q == Quantifier::SOME));
    assert!(matches!(Step::each(), Step::Quantify(q) if q == Quantifier::EACH));
    assert!(matches!(Step::any(true, true), Step::Quantify(q) if q == Quantifier::FIRST));
    assert!(matches!(Step::all(), Step::Quantify(Quantifier::All)));
}

#[test]
fn test_display() {
    assert_eq!(Extractor::Field("foo".into()).to_string(), ".foo");
    assert_eq!(Extractor::Index(-2).to_string(), "[-2]");
    assert_eq!(Extractor::Key("k".into()).to_string(), "[\"k\"]");
    let get = Step::get_labeled("len", |_| Ok(Value::Void));
    assert_eq!(Pattern::from(get).to_string(), "get(len)");
    assert_eq!(Guard::Subtype(TypeTag::named("Mock")).to_string(), "is Mock");
    let when = Step::when_labeled("even", |_| true);
    assert_eq!(when.then(Pattern::nothing()).to_string(), "if(even) -> nothing");
    assert_eq!(Quantifier::FIRST.to_string(), "first");
    assert_eq!(Quantifier::SOME.to_string(), "some");
    assert_eq!(Quantifier::EACH.to_string(), "each");
    assert_eq!(Quantifier::All.to_string(), "all");
    assert_eq!(
        Quantifier::Any {
            must_exist: false,
            only_once: true
        }
        .to_string(),
        "any(must_exist: false, only_once: true)"
    );
}

#[test]
fn test_then_builds_matching_node() {
    assert!(matches!(
        Step::field("foo").then(Pattern::anything()).kind(),
        PatternKind::Extract { extractor: Extractor::Field(name), .. } if name == "foo"
    ));
    assert!(matches!(
        Step::subtype(TypeTag::Int).then(Pattern::anything()).kind(),
        PatternKind::Guard { guard: Guard::Subtype(TypeTag::Int), .. }
    ));
    assert!(matches!(
        Step::first().then(Pattern::anything()).kind(),
        PatternKind::Quantify { quantifier: Quantifier::FIRST, .. }
    ));
}

#[test]
fn test_bind_step_is_conjunction() {
    let v = VarSupply::new().fresh();
    let into = Pattern::nothing();
    let pattern = Step::from(&v).then(&into);
    let PatternKind::And(first, second) = pattern.kind() else {
        panic!("bind step builds a conjunction");
    };
    assert!(matches!(first.kind(), PatternKind::Variable(var) if var.same(&v)));
    assert!(second.ptr_eq(&into));
}

#[test]
fn test_open_step_closes_with_anything() {
    let pattern = Pattern::from(Step::index(0));
    let PatternKind::Extract { into, .. } = pattern.kind() else {
        panic!("index builds an extract step");
    };
    assert!(matches!(into.kind(), PatternKind::Anything));
    assert_eq!(pattern.to_string(), "[0]");
}
