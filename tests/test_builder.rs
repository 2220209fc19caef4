use remap::{Error, Frame, Mappings, Segment, SourceMap};
use std::borrow::Cow;

#[test]
fn test_sourcemap_builder() {
    let sm = SourceMap::builder()
        .with_file(Cow::Borrowed("test.file"))
        .with_sources(vec![Cow::Borrowed("a.js")])
        .with_sources_content(vec![None])
        .with_mappings(
            Mappings::from_frames(vec![Frame::from(vec![
                Segment::new(1, 1).with_source(0, 2, 3)
            ])])
            .unwrap(),
        )
        .build()
        .unwrap()
        .to_string()
        .unwrap();
    insta::assert_snapshot!(sm, @r###"{"version":3,"file":"test.file","names":[],"sources":["a.js"],"mappings":"AACE","sourcesContent":[null]}"###);

    let err = SourceMap::builder()
        .with_sources(vec![Cow::Borrowed("a.js")])
        .with_sources_content(vec![None, None])
        .build();
    assert!(matches!(err, Err(Error::MismatchSourcesContent { .. })));
}

#[test]
fn test_builder_pads_missing_content() {
    let sm = SourceMap::builder()
        .with_sources(vec![Cow::Borrowed("a.js"), Cow::Borrowed("b.js")])
        .build()
        .unwrap();
    assert_eq!(sm.sources_content(), [None, None]);
}

#[test]
fn test_builder_rejects_dangling_references() {
    let err = SourceMap::builder()
        .with_sources(vec![Cow::Borrowed("a.js")])
        .with_mappings(
            Mappings::from_frames(vec![Frame::from(vec![
                Segment::new(1, 1).with_source(3, 1, 1)
            ])])
            .unwrap(),
        )
        .build();
    assert!(matches!(err, Err(Error::UnknownSourceReference(3))));

    let err = SourceMap::builder()
        .with_sources(vec![Cow::Borrowed("a.js")])
        .with_mappings(
            Mappings::from_frames(vec![Frame::from(vec![
                Segment::new(1, 1).with_source(0, 1, 1).with_name(0)
            ])])
            .unwrap(),
        )
        .build();
    assert!(matches!(err, Err(Error::UnknownNameReference(0))));
}
