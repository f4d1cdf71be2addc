use pipe_core::{FnCallable, Outputs, ParamSpec, Pipe};
use serde_json::{json, Value};

fn sample_pipe() -> Pipe {
    let mut pipe = Pipe::new();
    pipe.add(FnCallable::new("load", vec![ParamSpec::required("path"), ParamSpec::with_default("channel", json!(0))],
                             |p| Ok(Outputs::single(p.require("path")?.clone()))));
    pipe.add(FnCallable::new("scale",
                             vec![ParamSpec::required("input"), ParamSpec::with_default("factor", json!(2))],
                             |p| Ok(Outputs::single(p.require("input")?.clone()))));
    pipe
}

#[test]
fn record_keys_match_registry_identities_in_order() {
    let pipe = sample_pipe();
    let record = pipe.to_record();
    let keys: Vec<&String> = record.keys().collect();
    assert_eq!(keys, vec!["load", "scale"]);
    assert_eq!(record["load"].name, "load");
    assert_eq!(record["load"].parameters["path"], Value::Null);
    assert_eq!(record["load"].parameters["channel"], json!(0));
}

#[test]
fn json_roundtrip_preserves_identities_and_parameters() {
    let mut pipe = sample_pipe();
    pipe.get_mut("load")
        .expect("load registered")
        .set_param("path", json!("stacks/pair_007.tif"))
        .expect("path declared");

    let text = pipe.to_json().expect("record should serialize");
    let parsed: Value = serde_json::from_str(&text).expect("record should parse back");
    let object = parsed.as_object().expect("record is an object");

    let keys: Vec<&String> = object.keys().collect();
    assert_eq!(keys.len(), pipe.len());
    for identity in pipe.identities() {
        assert!(object.contains_key(identity), "missing identity {identity}");
    }
    assert_eq!(parsed["load"]["Parameters"]["path"], json!("stacks/pair_007.tif"));
    assert_eq!(parsed["scale"]["name"], json!("scale"));
    assert_eq!(parsed["scale"]["Parameters"]["factor"], json!(2));
}

#[test]
fn pending_markers_export_as_structured_references() {
    let mut pipe = sample_pipe();
    pipe.connect("load", "scale", 0, 0).expect("forward wiring");
    let record = pipe.to_record();
    assert_eq!(record["scale"].parameters["input"],
               json!({ "$pending": { "provider": "load", "output": 0 } }));
}

#[test]
fn dump_creates_or_truncates_the_file() {
    let mut pipe = sample_pipe();
    pipe.get_mut("load")
        .expect("load registered")
        .set_param("path", json!("stacks/pair_001.tif"))
        .expect("path declared");

    let path = std::env::temp_dir().join(format!("pipe_record_{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, "stale content").expect("seed stale file");
    pipe.dump(&path).expect("dump should overwrite");

    let text = std::fs::read_to_string(&path).expect("dump file readable");
    let parsed: Value = serde_json::from_str(&text).expect("dump file is JSON");
    assert_eq!(parsed["load"]["Parameters"]["path"], json!("stacks/pair_001.tif"));
    std::fs::remove_file(&path).expect("cleanup");
}

#[test]
fn node_record_exports_and_dumps_standalone() {
    let mut pipe = sample_pipe();
    pipe.get_mut("load")
        .expect("load registered")
        .set_param("path", json!("stacks/pair_003.tif"))
        .expect("path declared");
    let node = pipe.get("load").expect("load registered");

    let text = node.to_json().expect("node record should serialize");
    let parsed: Value = serde_json::from_str(&text).expect("node record should parse back");
    assert_eq!(parsed["name"], json!("load"));
    assert_eq!(parsed["Parameters"]["path"], json!("stacks/pair_003.tif"));

    let path = std::env::temp_dir().join(format!("node_record_{}.json", uuid::Uuid::new_v4()));
    node.dump(&path).expect("dump node record");
    let text = std::fs::read_to_string(&path).expect("dump file readable");
    let dumped: Value = serde_json::from_str(&text).expect("dump file is JSON");
    assert_eq!(dumped, parsed);
    std::fs::remove_file(&path).expect("cleanup");
}

#[test]
fn record_fingerprint_is_stable_and_parameter_sensitive() {
    let pipe = sample_pipe();
    let fp1 = pipe.record_fingerprint().expect("fingerprint");
    let fp2 = pipe.record_fingerprint().expect("fingerprint");
    assert_eq!(fp1, fp2);

    let mut changed = sample_pipe();
    changed.get_mut("scale")
           .expect("scale registered")
           .set_param("factor", json!(5))
           .expect("factor declared");
    let fp3 = changed.record_fingerprint().expect("fingerprint");
    assert_ne!(fp1, fp3);
}
