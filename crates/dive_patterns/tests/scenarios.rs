//! End-to-end matching scenarios against record-shaped values.

use std::cell::RefCell;

use dive_patterns::{
    and, anything, chain, constant, nothing, or, Fault, Pattern, Step, VarSupply, Variable,
};
use dive_value::{Record, Value};
use pretty_assertions::assert_eq;

fn mock(foo: i64) -> Value {
    Value::record(Record::new("Mock", [("foo", Value::int(foo))]))
}

/// `MockMock { bar: [1, 2, 3], foo: 42, mock: Mock { foo: 42 } }`
fn mock_mock() -> Value {
    Value::record(Record::new(
        "MockMock",
        [
            ("foo", Value::int(42)),
            ("bar", Value::list(vec![Value::int(1), Value::int(2), Value::int(3)])),
            ("mock", mock(42)),
        ],
    ))
}

/// Bindings of `vars` at every success, in order.
fn solutions(pattern: &Pattern, value: &Value, vars: &[&Variable]) -> Result<Vec<Vec<Value>>, Fault> {
    let seen = RefCell::new(Vec::new());
    pattern.unify_silently(value, || {
        let row = vars.iter().map(|v| v.value().unwrap_or(Value::Void)).collect();
        seen.borrow_mut().push(row);
        Ok(())
    })?;
    Ok(seen.into_inner())
}

#[test]
fn test_mock_mock_display() {
    assert_eq!(
        mock_mock().to_string(),
        "MockMock { bar: [1, 2, 3], foo: 42, mock: Mock { foo: 42 } }"
    );
}

#[test]
fn test_nested_lookup() -> Result<(), Fault> {
    let mut vars = VarSupply::new();
    let v1 = vars.fresh();
    let pattern = chain([Step::field("bar"), Step::index(1)], &v1);
    assert_eq!(solutions(&pattern, &mock_mock(), &[&v1])?, vec![vec![Value::int(2)]]);
    Ok(())
}

#[test]
fn test_cross_field_conjunction() -> Result<(), Fault> {
    let mut vars = VarSupply::new();
    let v1 = vars.fresh();
    let v2 = vars.fresh();
    let bar = chain([Step::field("bar"), Step::index(1)], &v1);
    let pattern = bar
        .and(Step::field("foo").then(&v2))
        .and(chain([Step::field("mock"), Step::field("foo")], &v2));
    assert_eq!(
        solutions(&pattern, &mock_mock(), &[&v1, &v2])?,
        vec![vec![Value::int(2), Value::int(42)]]
    );
    assert!(!v1.is_bound() && !v2.is_bound());
    Ok(())
}

#[test]
fn test_shared_variable_forces_equality() -> Result<(), Fault> {
    let v = VarSupply::new().fresh();
    // bar[1] is 2 but foo is 42, so one variable cannot hold both.
    let pattern = chain([Step::field("bar"), Step::index(1)], &v).and(Step::field("foo").then(&v));
    assert!(!pattern.matches(&mock_mock())?);
    // foo and mock.foo agree.
    let agreeing = Step::field("foo")
        .then(&v)
        .and(chain([Step::field("mock"), Step::field("foo")], &v));
    assert!(agreeing.matches(&mock_mock())?);
    Ok(())
}

#[test]
fn test_or_across_shapes() -> Result<(), Fault> {
    let v = VarSupply::new().fresh();
    let pattern = or(
        Step::field("foo").then(&v),
        Step::index(0).then(&v),
    );
    assert_eq!(solutions(&pattern, &mock(7), &[&v])?, vec![vec![Value::int(7)]]);
    let list = Value::list(vec![Value::int(9)]);
    assert_eq!(solutions(&pattern, &list, &[&v])?, vec![vec![Value::int(9)]]);
    Ok(())
}

#[test]
fn test_search_records_in_list() -> Result<(), Fault> {
    let v = VarSupply::new().fresh();
    let records = Value::list(vec![mock(1), Value::int(5), mock(3), mock(8)]);
    let pattern = chain(
        [
            Step::some(),
            Step::subtype(dive_value::TypeTag::named("Mock")),
            Step::field("foo"),
            Step::when(|x| x.as_int().is_some_and(|n| n > 2)),
        ],
        &v,
    );
    assert_eq!(
        solutions(&pattern, &records, &[&v])?,
        vec![vec![Value::int(3)], vec![Value::int(8)]]
    );
    Ok(())
}

#[test]
fn test_nested_quantifiers_join() -> Result<(), Fault> {
    let mut vars = VarSupply::new();
    let x = vars.fresh();
    let y = vars.fresh();
    let grid = Value::list(vec![
        Value::list(vec![Value::int(1), Value::int(2)]),
        Value::list(vec![Value::int(3)]),
    ]);
    // Every (row, element) pair, with the row's first element bound to x.
    let pattern = chain([Step::each()], and(Step::index(0).then(&x), chain([Step::each()], &y)));
    assert_eq!(
        solutions(&pattern, &grid, &[&x, &y])?,
        vec![
            vec![Value::int(1), Value::int(1)],
            vec![Value::int(1), Value::int(2)],
            vec![Value::int(3), Value::int(3)],
        ]
    );
    Ok(())
}

#[test]
fn test_map_entries_by_key() -> Result<(), Fault> {
    let mut vars = VarSupply::new();
    let key = vars.fresh();
    let value = vars.fresh();
    let map = Value::map([("y", Value::int(2)), ("x", Value::int(1)), ("z", Value::int(3))]);
    let pattern = chain(
        [Step::each()],
        and(
            Step::index(0).then(&key),
            Step::index(1).then(Step::when(|x| x.as_int() != Some(2)).then(&value)),
        ),
    );
    assert_eq!(
        solutions(&pattern, &map, &[&key, &value])?,
        vec![
            vec![Value::string("x"), Value::int(1)],
            vec![Value::string("z"), Value::int(3)],
        ]
    );
    Ok(())
}

#[test]
fn test_first_failure_is_innermost() -> Result<(), Fault> {
    let inner = constant(3);
    let pattern = chain([Step::field("bar"), Step::index(0)], &inner);
    let failures = RefCell::new(Vec::new());
    pattern.unify(
        &mock_mock(),
        || Ok(()),
        |failed: &Pattern, at: &Value| {
            failures.borrow_mut().push((failed.ptr_eq(&inner), at.clone()));
            Ok(())
        },
    )?;
    assert_eq!(failures.into_inner(), vec![(true, Value::int(1))]);
    Ok(())
}

#[test]
fn test_patterns_are_reusable() -> Result<(), Fault> {
    let v = VarSupply::new().fresh();
    let pattern = Step::field("foo").then(&v);
    for n in [1, 2, 3] {
        assert_eq!(solutions(&pattern, &mock(n), &[&v])?, vec![vec![Value::int(n)]]);
    }
    Ok(())
}

#[test]
fn test_strings_are_indexable_and_iterable() -> Result<(), Fault> {
    let s = Value::string("dive");
    assert!(Step::index(-1).then(constant('e')).matches(&s)?);
    assert_eq!(Step::each().then(anything()).count_matches(&s)?, 4);
    assert!(!Step::some().then(constant('x')).matches(&s)?);
    Ok(())
}

#[test]
fn test_deep_chain_and_tower() -> Result<(), Fault> {
    let depth = 2_000;
    let tower = (0..depth).fold(anything(), |acc, n| {
        if n % 2 == 0 {
            acc.and(anything())
        } else {
            or(nothing(), acc)
        }
    });
    assert_eq!(tower.count_matches(&Value::int(1))?, 1);
    let path = chain((0..depth).map(|_| Step::field("next")), constant(0));
    let mut value = Value::int(0);
    for _ in 0..depth {
        value = Value::record(Record::new("Node", [("next", value)]));
    }
    assert!(path.matches(&value)?);
    Ok(())
}
