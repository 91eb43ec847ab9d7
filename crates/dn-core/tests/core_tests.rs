use serde_json::json;

use dn_core::path::Address;
use dn_core::{Error, Navigator, append_values, dispatch, remove_matching, smart_cast};

#[test]
fn resolve_replace_roundtrip() {
    let doc = json!({"a": {"b": [1, 2, 3], "c": true}});
    for text in ["a", "a/b/1", "a/c"] {
        let addr = Address::parse(text);
        let next = dn_core::replace(&doc, &addr, json!("marker")).unwrap();
        assert_eq!(dn_core::resolve(&next, &addr).unwrap(), &json!("marker"));
    }
    // empty address replaces the whole document
    let next = dn_core::replace(&doc, &Address::root(), json!(42)).unwrap();
    assert_eq!(next, json!(42));
    // siblings of the touched path are carried over verbatim
    let next = dn_core::replace(&doc, &Address::parse("a/b/0"), json!(9)).unwrap();
    assert_eq!(next, json!({"a": {"b": [9, 2, 3], "c": true}}));
}

#[test]
fn unresolvable_addresses_fail_and_leave_input_alone() {
    let doc = json!({"a": {"b": 1}});
    let before = doc.clone();
    for bad in ["x", "a/x", "a/b/c", "a/0"] {
        let addr = Address::parse(bad);
        assert!(matches!(
            dn_core::resolve(&doc, &addr),
            Err(Error::Navigation { .. })
        ));
        assert!(dn_core::replace(&doc, &addr, json!(0)).is_err());
    }
    assert_eq!(doc, before);

    // the first failing segment is the one named
    let Err(Error::Navigation { segment, .. }) =
        dn_core::resolve(&doc, &Address::parse("a/x/y"))
    else {
        panic!("expected a navigation error");
    };
    assert_eq!(segment, "x");
}

#[test]
fn smart_cast_is_total() {
    assert_eq!(smart_cast("true"), json!(true));
    assert_eq!(smart_cast("FALSE"), json!(false));
    assert_eq!(smart_cast("yes"), json!(true));
    assert_eq!(smart_cast("off"), json!(false));
    assert_eq!(smart_cast("null"), json!(null));
    assert_eq!(smart_cast("42"), json!(42));
    assert_eq!(smart_cast("-7"), json!(-7));
    assert_eq!(smart_cast("3.5"), json!(3.5));
    assert_eq!(smart_cast("{\"a\": 1}"), json!({"a": 1}));
    assert_eq!(smart_cast("[1, 2]"), json!([1, 2]));
    assert_eq!(smart_cast("hello"), json!("hello"));
    assert_eq!(smart_cast("{not json"), json!("{not json"));
    assert_eq!(smart_cast("12 monkeys"), json!("12 monkeys"));
    assert_eq!(smart_cast(""), json!(""));
}

#[test]
fn append_combines_by_shape() {
    assert_eq!(
        append_values(json!({"a": 1}), json!({"b": 2})).unwrap(),
        json!({"a": 1, "b": 2})
    );
    // new keys win on conflict
    assert_eq!(
        append_values(json!({"a": 1}), json!({"a": 9})).unwrap(),
        json!({"a": 9})
    );
    assert_eq!(
        append_values(json!([1, 2]), json!([3])).unwrap(),
        json!([1, 2, 3])
    );
    assert_eq!(append_values(json!(1), json!(2)).unwrap(), json!(3));
    assert_eq!(append_values(json!("1"), json!(2)).unwrap(), json!("12"));
    assert_eq!(append_values(json!(1), json!("2")).unwrap(), json!("12"));
    assert_eq!(append_values(json!(1.5), json!(2)).unwrap(), json!(3.5));
    assert!(matches!(
        append_values(json!({"a": 1}), json!([1])),
        Err(Error::Append { .. })
    ));
    assert!(matches!(
        append_values(json!(true), json!(1)),
        Err(Error::Append { .. })
    ));
    assert!(matches!(
        append_values(json!(null), json!("x")),
        Err(Error::Append { .. })
    ));
}

#[test]
fn edit_session_end_to_end() {
    let mut nav = Navigator::new(json!({"x": {"y": 1}}), "doc.json".into(), false);
    dispatch(&mut nav, "flag literal on");
    assert!(nav.literal());
    dispatch(&mut nav, "cd x");
    dispatch(&mut nav, "cd y");
    dispatch(&mut nav, "set 5");
    assert_eq!(nav.doc(), &json!({"x": {"y": 5}}));
    dispatch(&mut nav, "cd ..");
    dispatch(&mut nav, "append {\"z\": 9}");
    assert_eq!(nav.doc(), &json!({"x": {"y": 5, "z": 9}}));
    assert_eq!(dispatch(&mut nav, "exit"), dn_core::Outcome::Exit);
}

#[test]
fn cd_rejects_bad_segments_and_keeps_position() {
    let mut nav = Navigator::new(json!({"a": {"b": [10, 20]}}), "doc.json".into(), false);
    assert!(matches!(nav.step(".."), Err(Error::Navigation { .. })));
    assert!(nav.cwd().is_root());
    nav.step("a").unwrap();
    nav.step("b").unwrap();
    nav.step("1").unwrap();
    assert_eq!(nav.current().unwrap(), &json!(20));
    // scalars have no children
    assert!(nav.step("anything").is_err());
    assert_eq!(nav.cwd().to_string(), "/a/b/1");
    nav.step("/").unwrap();
    assert!(nav.cwd().is_root());
    let before = nav.cwd().clone();
    assert!(nav.step("nope").is_err());
    assert_eq!(nav.cwd(), &before);
}

#[test]
fn delete_by_key_and_value() {
    let mut nav = Navigator::new(json!({"a": 1, "b": 2}), "doc.json".into(), true);
    dispatch(&mut nav, "del-val 1");
    assert_eq!(nav.doc(), &json!({"b": 2}));
    // nonexistent key: diagnostic, mapping unchanged
    dispatch(&mut nav, "del-key missing");
    assert_eq!(nav.doc(), &json!({"b": 2}));
    dispatch(&mut nav, "del-key b");
    assert_eq!(nav.doc(), &json!({}));

    let mut nav = Navigator::new(json!([1, 2, 1, 3]), "doc.json".into(), true);
    dispatch(&mut nav, "del-val 1");
    assert_eq!(nav.doc(), &json!([2, 3]));
    dispatch(&mut nav, "del-key 0");
    assert_eq!(nav.doc(), &json!([3]));
}

#[test]
fn remove_matching_filters_all_occurrences() {
    assert_eq!(
        remove_matching(json!({"a": 1, "b": 2, "c": 1}), &json!(1)),
        Some(json!({"b": 2}))
    );
    assert_eq!(remove_matching(json!("scalar"), &json!(1)), None);
}

#[test]
fn only_boolean_flags_toggle() {
    let mut nav = Navigator::new(json!({}), "doc.json".into(), false);
    nav.set_flag("literal", true).unwrap();
    assert!(nav.literal());
    assert!(matches!(nav.set_flag("path", true), Err(Error::Flag(_))));
    assert!(matches!(nav.set_flag("bogus", true), Err(Error::Flag(_))));
}

#[test]
fn temporary_literal_restores_the_flag() {
    let mut nav = Navigator::new(json!("old"), "doc.json".into(), false);
    dispatch(&mut nav, "+l set 5");
    assert_eq!(nav.doc(), &json!(5));
    assert!(!nav.literal());
    // plain set stays uncast
    dispatch(&mut nav, "set 5");
    assert_eq!(nav.doc(), &json!("5"));
    // restored even when the wrapped command fails
    dispatch(&mut nav, "+l cd nowhere");
    assert!(!nav.literal());
}

#[test]
fn cast_and_uncast_retype_nodes() {
    let mut nav = Navigator::new(
        json!({"n": "42", "t": "yes", "s": "plain"}),
        "doc.json".into(),
        false,
    );
    dispatch(&mut nav, "cast n");
    dispatch(&mut nav, "cast t");
    dispatch(&mut nav, "cast s");
    assert_eq!(nav.doc(), &json!({"n": 42, "t": true, "s": "plain"}));
    dispatch(&mut nav, "uncast n");
    assert_eq!(nav.doc(), &json!({"n": "42", "t": true, "s": "plain"}));
    // `.` targets the current node
    nav.step("t").unwrap();
    dispatch(&mut nav, "uncast .");
    assert_eq!(nav.doc(), &json!({"n": "42", "t": "true", "s": "plain"}));
}

#[test]
fn object_key_order_survives_edits() {
    let mut nav = Navigator::new(json!({"z": 1, "a": 2, "m": 3}), "doc.json".into(), true);
    dispatch(&mut nav, "del-key a");
    let keys: Vec<String> = nav.doc().as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["z", "m"]);
    dispatch(&mut nav, "append {\"a\": 4}");
    let keys: Vec<String> = nav.doc().as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["z", "m", "a"]);
}

#[test]
fn json_and_yaml_adapters_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let doc = json!({"x": {"y": 5, "z": [1, 2]}, "name": "demo"});

    let jpath = dir.path().join("doc.json");
    dn_core::fs::save(&jpath, &doc).unwrap();
    assert_eq!(dn_core::fs::load(&jpath).unwrap(), doc);

    let ypath = dir.path().join("doc.yaml");
    dn_core::fs::save(&ypath, &doc).unwrap();
    assert_eq!(dn_core::fs::load(&ypath).unwrap(), doc);
}

#[test]
fn unsupported_and_missing_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let toml = dir.path().join("doc.toml");
    std::fs::write(&toml, "x = 1").unwrap();
    assert!(matches!(dn_core::fs::load(&toml), Err(Error::Format(_))));
    assert!(matches!(
        dn_core::fs::save(&toml, &json!(1)),
        Err(Error::Format(_))
    ));
    let gone = dir.path().join("gone.json");
    assert!(matches!(dn_core::fs::load(&gone), Err(Error::MissingFile(_))));
    let noext = dir.path().join("plain");
    assert!(matches!(dn_core::fs::load(&noext), Err(Error::Format(_))));
}

#[test]
fn save_and_restart_roundtrip_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("doc.json");
    dn_core::fs::save(&p, &json!({"a": 1})).unwrap();
    let mut nav = Navigator::new(dn_core::fs::load(&p).unwrap(), p.clone(), true);
    dispatch(&mut nav, "set {\"a\": 2}");
    assert_eq!(nav.doc(), &json!({"a": 2}));
    dispatch(&mut nav, "restart");
    assert_eq!(nav.doc(), &json!({"a": 1}));
    dispatch(&mut nav, "set {\"a\": 3}");
    dispatch(&mut nav, "save");
    assert_eq!(dn_core::fs::load(&p).unwrap(), json!({"a": 3}));
}

#[test]
fn restart_never_leaves_a_dangling_address() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("doc.json");
    dn_core::fs::save(&p, &json!({"x": {"y": 1}})).unwrap();
    let mut nav = Navigator::new(dn_core::fs::load(&p).unwrap(), p.clone(), false);
    nav.step("x").unwrap();
    dn_core::fs::save(&p, &json!({"other": 1})).unwrap();
    dispatch(&mut nav, "restart");
    assert!(nav.cwd().is_root());
    assert_eq!(nav.doc(), &json!({"other": 1}));
}

#[test]
fn backup_writes_a_zip_and_keeps_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("doc.json");
    std::fs::write(&p, "{\"a\": 1}").unwrap();
    let dest = dn_core::fs::backup_file(&p).unwrap();
    assert!(dest.exists());
    assert_eq!(dest.extension().and_then(|s| s.to_str()), Some("zip"));
    assert_eq!(std::fs::read_to_string(&p).unwrap(), "{\"a\": 1}");
}

#[test]
fn command_aliases_resolve_to_the_same_kind() {
    use dn_core::Command;
    assert_eq!(Command::parse("exit"), Command::parse("quit"));
    assert_eq!(Command::parse("ls"), Command::parse("list"));
    assert_eq!(Command::parse("cls"), Command::parse("clear"));
    assert_eq!(Command::parse("+l"), Some(Command::TempLiteral));
    assert_eq!(Command::parse("!"), Some(Command::Shell));
    assert_eq!(Command::parse("bogus"), None);
}
