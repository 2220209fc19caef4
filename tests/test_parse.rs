use remap::{BorrowedSourceMap, Error, Segment, SourceMap};
use std::borrow::Cow;

#[test]
fn test_parse_errors() {
    assert!(matches!(
        SourceMap::from(b"".to_vec()),
        Err(Error::Syntax(..))
    ));

    assert!(matches!(
        SourceMap::from(b"{}".to_vec()),
        Err(Error::MissingRequiredKey("sources"))
    ));

    assert!(matches!(
        SourceMap::from(br#"{"version":3,"sources":[],"mappings":""}"#.to_vec()),
        Err(Error::MissingRequiredKey("names"))
    ));

    assert!(matches!(
        SourceMap::from(br#"{"version":3,"sources":[],"names":[]}"#.to_vec()),
        Err(Error::MissingRequiredKey("mappings"))
    ));

    assert!(matches!(
        SourceMap::from(br#"{"version":2,"sources":[],"names":[],"mappings":""}"#.to_vec()),
        Err(Error::UnsupportedVersion(2))
    ));

    assert!(matches!(
        SourceMap::from(
            br#"{"version":3,"sources":["a.js"],"sourcesContent":[],"names":[],"mappings":""}"#
                .to_vec()
        ),
        Err(Error::MismatchSourcesContent { .. })
    ));

    // a mapping referencing a source the envelope does not carry
    assert!(matches!(
        SourceMap::from(br#"{"version":3,"sources":[],"names":[],"mappings":"AAAA"}"#.to_vec()),
        Err(Error::UnknownSourceReference(0))
    ));
}

#[test]
fn test_parse_tolerant_keys() {
    // version may be absent, unknown keys are ignored
    let sm = SourceMap::from(
        br#"{"sources":["a.js"],"names":[],"mappings":"AAAA","x_facebook_sources":[null]}"#
            .to_vec(),
    )
    .unwrap();
    assert_eq!(sm.sources(), [Cow::Borrowed("a.js")]);
}

#[test]
fn test_parse() {
    let buf = br#"{
        "version": 3,
        "file": "bundle.js",
        "sourceRoot": "webpack://",
        "sources": ["../project/index.ts", "../project/sum.ts"],
        "sourcesContent": ["export {};\n", null],
        "names": ["sum", "data"],
        "mappings": "AAAA,SAAKA;;ACALC,IAAM"
    }"#
    .to_vec();

    let sm = SourceMap::from(buf.clone()).unwrap();

    assert_eq!(sm.file().as_deref(), Some("bundle.js"));
    assert_eq!(sm.source_root().as_deref(), Some("webpack://"));
    assert_eq!(
        sm.sources(),
        [
            Cow::Borrowed("../project/index.ts"),
            Cow::Borrowed("../project/sum.ts")
        ]
    );
    assert_eq!(sm.sources_content().len(), 2);

    let mappings = sm.mappings();
    assert_eq!(mappings.len(), 3);
    assert_eq!(
        mappings[0][0],
        Segment::new(1, 1).with_source(0, 1, 1)
    );
    assert_eq!(
        mappings[0][1],
        Segment::new(1, 10).with_source(0, 1, 6).with_name(0)
    );
    assert_eq!(
        mappings[2][0],
        Segment::new(3, 1).with_source(1, 1, 1).with_name(1)
    );
}

#[test]
fn test_write_stable_key_order() {
    let buf = br#"{"version":3,"file":"out.js","sources":["a.js"],"sourcesContent":[null],"names":["x"],"mappings":"AAAAA","sourceRoot":"/root"}"#.to_vec();
    let sm = SourceMap::from(buf).unwrap();

    insta::assert_snapshot!(
        sm.to_string().unwrap(),
        @r###"{"version":3,"file":"out.js","names":["x"],"sources":["a.js"],"mappings":"AAAAA","sourcesContent":[null],"sourceRoot":"/root"}"###
    );
}

#[test]
fn test_write_parse_roundtrip() {
    let buf = br#"{
        "version": 3,
        "sources": ["a.js", "b.js"],
        "names": ["top", "name"],
        "mappings": "SAAKA,GAAOC;;QACXA,CAAC;"
    }"#
    .to_vec();

    let first = SourceMap::from(buf).unwrap().to_vec().unwrap();
    let second = SourceMap::from(first.clone()).unwrap().to_vec().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_write_emits_valid_json() {
    let buf = br#"{"version":3,"file":"out.js","sources":["a.js"],"names":[],"mappings":"AAAA"}"#
        .to_vec();
    let sm = SourceMap::from(buf).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&sm.to_vec().unwrap()).unwrap();
    assert_eq!(value["version"], 3);
    assert_eq!(value["file"], "out.js");
    assert_eq!(value["mappings"], "AAAA");
    assert!(value["sourcesContent"].as_array().is_some());
    assert!(value.get("sourceRoot").is_none());
}

#[test]
fn test_borrowed_matches_owned() {
    let buf = br#"{"version":3,"sources":["a.js"],"sourcesContent":["let x;"],"names":[],"mappings":"AAAA;AACA"}"#.to_vec();

    let owned = SourceMap::from(buf.clone()).unwrap();
    let mut borrowed_buf = buf;
    let borrowed = BorrowedSourceMap::from_slice(&mut borrowed_buf).unwrap();

    assert_eq!(owned.to_vec().unwrap(), borrowed.to_vec().unwrap());
}
