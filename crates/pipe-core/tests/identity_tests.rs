use pipe_core::{FnCallable, Outputs, ParamSpec, PipeError, Pipe};
use serde_json::{json, Value};

fn measure() -> FnCallable {
    FnCallable::new("measure", vec![ParamSpec::with_default("x", json!(1))], |p| {
        Ok(Outputs::single(p.require("x")?.clone()))
    })
}

#[test]
fn identity_collisions_get_incrementing_suffixes() {
    let mut pipe = Pipe::new();
    let a = pipe.add(measure());
    let b = pipe.add(measure());
    let c = pipe.add(measure());
    assert_eq!(a, "measure");
    assert_eq!(b, "measure_0");
    assert_eq!(c, "measure_1");

    let ids: Vec<&str> = pipe.identities().collect();
    assert_eq!(ids, vec!["measure", "measure_0", "measure_1"]);
}

#[test]
fn suffixed_identity_survives_explicit_collision() {
    let mut pipe = Pipe::new();
    pipe.add(measure());
    pipe.add(FnCallable::new("measure_0", vec![ParamSpec::with_default("x", json!(1))], |_| {
                 Ok(Outputs::single(Value::Null))
             }));
    // El siguiente "measure" colisiona con ambos: measure y measure_0.
    let id = pipe.add(measure());
    assert_eq!(id, "measure_1");
}

#[test]
fn rename_preserves_position_and_contents() {
    let mut pipe = Pipe::new();
    pipe.add(measure());
    pipe.add(FnCallable::new("other", vec![ParamSpec::with_default("y", json!(2))], |_| {
                 Ok(Outputs::single(Value::Null))
             }));

    pipe.get_mut("measure")
        .expect("measure registered")
        .set_param("x", json!(42))
        .expect("x declared");
    pipe.rename("first", "measure").expect("rename should succeed");

    let ids: Vec<&str> = pipe.identities().collect();
    assert_eq!(ids, vec!["first", "other"]);
    let node = pipe.get("first").expect("renamed node present");
    assert_eq!(node.identity(), "first");
    assert_eq!(node.name(), "measure");
    assert_eq!(node.param("x").expect("x declared").record_value(), json!(42));
}

#[test]
fn rename_to_taken_identity_leaves_registry_unchanged() {
    let mut pipe = Pipe::new();
    pipe.add(measure());
    pipe.add(FnCallable::new("other", vec![ParamSpec::with_default("y", json!(2))], |_| {
                 Ok(Outputs::single(Value::Null))
             }));

    let err = pipe.rename("other", "measure").unwrap_err();
    assert!(matches!(err, PipeError::DuplicateIdentity(_)));
    let ids: Vec<&str> = pipe.identities().collect();
    assert_eq!(ids, vec!["measure", "other"]);
}

#[test]
fn rename_of_missing_identity_fails() {
    let mut pipe = Pipe::new();
    pipe.add(measure());
    let err = pipe.rename("anything", "ghost").unwrap_err();
    assert!(matches!(err, PipeError::UnknownIdentity(_)));
}

#[test]
fn lookup_of_missing_identity_fails() {
    let pipe = Pipe::new();
    assert!(matches!(pipe.get("ghost").unwrap_err(), PipeError::UnknownIdentity(_)));
}
