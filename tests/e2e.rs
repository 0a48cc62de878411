use cell_placeholder_fill as cpf;
use cpf::{Context, ResolveError};
use serde::Serialize;

#[derive(Serialize)]
struct Foo {
    id: i32,
    name: String,
}

fn sample_context() -> Context {
    let mut ctx = Context::new();
    ctx.insert("key1", "111");
    ctx.insert("key2", "222");
    ctx.insert_serialized("foo", &Foo { id: 13, name: "kvn".into() })
        .unwrap();
    ctx
}

#[test]
fn test_plain_keys() {
    let out = cpf::resolve("${key1} and ${key2}", &sample_context()).unwrap();
    assert_eq!(out, "111 and 222");
}

#[test]
fn test_path_marker_replaces_whole_text() {
    let out = cpf::resolve("foo.name is ${foo.name}", &sample_context()).unwrap();
    assert_eq!(out, "kvn");
}

#[test]
fn test_numeric_attribute() {
    let out = cpf::resolve("id=${foo.id}", &sample_context()).unwrap();
    assert_eq!(out, "13");
}

#[test]
fn test_text_without_markers_passes_through() {
    let ctx = sample_context();
    for s in ["", "plain text", "cost: $5 {approx}", "${}", "$ {key1}", "#{foo.name}"] {
        assert_eq!(cpf::resolve(s, &ctx).unwrap(), s);
    }
}

#[test]
fn test_surrounding_whitespace_kept_in_plain_phase() {
    let out = cpf::resolve("  ${key1}\t", &sample_context()).unwrap();
    assert_eq!(out, "  111\t");
}

#[test]
fn test_missing_key() {
    let err = cpf::resolve("${missing}", &Context::new()).unwrap_err();
    assert_eq!(err, ResolveError::UnresolvedKey("missing".into()));
    assert_eq!(err.to_string(), "unresolved key: missing");
}

#[test]
fn test_resolve_is_idempotent_on_output() {
    let ctx = sample_context();
    let once = cpf::resolve("this is ${key1} and that is ${key2}", &ctx).unwrap();
    let twice = cpf::resolve(&once, &ctx).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_context_from_json() {
    let ctx = Context::from_json_str(r#"{"who":"Ada","org":{"name":"ACME"}}"#).unwrap();
    assert_eq!(cpf::resolve("hello ${who}", &ctx).unwrap(), "hello Ada");
    assert_eq!(cpf::resolve("${org.name}", &ctx).unwrap(), "ACME");
}
