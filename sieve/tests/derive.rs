//! `#[derive(IntoValue)]` output and matching on derived values.

use sieve::{__, Value, match_value, pattern, select, value};
use sieve_macros::IntoValue;

#[derive(IntoValue)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(IntoValue)]
struct User {
    name: String,
    #[sieve(rename = "isAdmin")]
    admin: bool,
    #[sieve(skip)]
    #[allow(dead_code)]
    password: String,
    tags: Vec<String>,
    nickname: Option<String>,
    home: Point,
}

#[derive(IntoValue)]
struct Pair(u8, &'static str);

#[derive(IntoValue)]
struct Marker;

#[derive(IntoValue)]
struct Wrapper<T> {
    inner: T,
}

#[derive(IntoValue)]
enum Shape {
    Empty,
    #[sieve(rename = "circle")]
    Circle {
        radius: f64,
    },
    Rect(f64, f64),
    Tagged(&'static str),
}

#[derive(IntoValue)]
struct Keyword {
    r#type: &'static str,
}

#[test]
fn test_named_struct_becomes_record() {
    let value = Value::from(Point { x: 1, y: 2 });
    assert_eq!(value, value!({ "x" => 1, "y" => 2 }));
}

#[test]
fn test_rename_skip_and_nesting() {
    let user = User {
        name: "ada".to_string(),
        admin: true,
        password: "secret".to_string(),
        tags: vec!["math".to_string()],
        nickname: None,
        home: Point { x: 0, y: 0 },
    };

    let value = Value::from(user);
    assert_eq!(
        value,
        value!({
            "name" => "ada",
            "isAdmin" => true,
            "tags" => value!(["math"]),
            "nickname" => (),
            "home" => value!({ "x" => 0, "y" => 0 }),
        })
    );
    assert!(value.get("password").is_none());
}

#[test]
fn test_tuple_and_unit_structs() {
    assert_eq!(Value::from(Pair(3, "three")), value!([3, "three"]));
    assert_eq!(Value::from(Marker), Value::Nil);
}

#[test]
fn test_generic_struct() {
    let value = Value::from(Wrapper { inner: Point { x: 5, y: 6 } });
    assert_eq!(value["inner"]["y"], Value::from(6));

    assert_eq!(Value::from(Wrapper { inner: 3 }), value!({ "inner" => 3 }));
    assert_eq!(
        Value::from(Wrapper { inner: Pair(1, "one") }),
        value!({ "inner" => value!([1, "one"]) })
    );
}

#[derive(IntoValue)]
enum Either<L, R> {
    Left(L),
    Right { value: R },
}

#[test]
fn test_generic_enum() {
    assert_eq!(
        Value::from(Either::<i32, &str>::Left(1)),
        value!({ "type" => "Left", "value" => 1 })
    );
    assert_eq!(
        Value::from(Either::<i32, &str>::Right { value: "r" }),
        value!({ "type" => "Right", "value" => "r" })
    );
}

#[test]
fn test_raw_identifier_key() {
    assert_eq!(
        Value::from(Keyword { r#type: "ok" }),
        value!({ "type" => "ok" })
    );
}

#[test]
fn test_enum_variants() {
    assert_eq!(Value::from(Shape::Empty), Value::from("Empty"));
    assert_eq!(
        Value::from(Shape::Circle { radius: 1.5 }),
        value!({ "type" => "circle", "radius" => 1.5 })
    );
    assert_eq!(
        Value::from(Shape::Rect(2.0, 3.0)),
        value!({ "type" => "Rect", "values" => value!([2, 3]) })
    );
    assert_eq!(
        Value::from(Shape::Tagged("x")),
        value!({ "type" => "Tagged", "value" => "x" })
    );
}

fn area(shape: Shape) -> f64 {
    match_value(shape)
        .with(pattern!({ "type" => "circle", "radius" => select("r") }), |v| {
            let r = v.decode_key::<f64>("r").unwrap_or_default();
            std::f64::consts::PI * r * r
        })
        .with(
            pattern!({ "type" => "Rect", "values" => pattern!([select("w"), select("h")]) }),
            |v| {
                let w = v.decode_key::<f64>("w").unwrap_or_default();
                let h = v.decode_key::<f64>("h").unwrap_or_default();
                w * h
            },
        )
        .with(__, |_| 0.0)
        .exhaustive()
        .unwrap_or_default()
}

#[test]
fn test_match_on_derived_enum() {
    assert_eq!(area(Shape::Rect(2.0, 3.0)), 6.0);
    assert_eq!(area(Shape::Circle { radius: 1.0 }), std::f64::consts::PI);
    assert_eq!(area(Shape::Empty), 0.0);
    assert_eq!(area(Shape::Tagged("t")), 0.0);
}
