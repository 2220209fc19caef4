use remap::{Bias, Error, SourceMap};
use std::borrow::Cow;

fn map_a() -> SourceMap {
    SourceMap::from(
        br#"{"version":3,"sources":["a.js"],"sourcesContent":["let a;"],"names":["x"],"mappings":"AAAA"}"#
            .to_vec(),
    )
    .unwrap()
}

fn map_b() -> SourceMap {
    SourceMap::from(
        br#"{"version":3,"sources":["b.js"],"names":["y"],"mappings":"AAAA,AAAA"}"#.to_vec(),
    )
    .unwrap()
}

fn map_c() -> SourceMap {
    SourceMap::from(
        br#"{"version":3,"sources":["c.js"],"names":["z"],"mappings":"EAAAA"}"#.to_vec(),
    )
    .unwrap()
}

#[test]
fn test_concat_shifts_mappings() {
    let mut sm = map_a();
    sm.concat([map_b()]).unwrap();

    assert_eq!(sm.sources(), [Cow::Borrowed("a.js"), Cow::Borrowed("b.js")]);
    assert_eq!(sm.mappings().encode_to_string().unwrap(), "AAAA;ACAA,AAAA");

    // the appended frame landed on the next generated line, pointing into
    // the appended source
    let found = sm.position_by_generated(2, 1, Bias::Exact).unwrap();
    assert_eq!(found.source, "b.js");
    assert_eq!(found.source_index, 1);
    assert_eq!(found.original.line, 1);
}

#[test]
fn test_concat_shifts_names() {
    let mut sm = map_a();
    sm.concat([map_c()]).unwrap();

    let found = sm.position_by_generated(2, 3, Bias::Exact).unwrap();
    assert_eq!(found.source, "c.js");
    // map_c's name #0 now lives behind map_a's single name
    assert_eq!(found.name, Some("z"));

    // shifts compose when the appended map was itself concatenated
    let mut sm = map_a();
    let mut inner = map_b();
    inner.concat([map_c()]).unwrap();
    sm.concat([inner]).unwrap();
    let found = sm.position_by_generated(3, 3, Bias::Exact).unwrap();
    assert_eq!(found.name, Some("z"));
}

#[test]
fn test_concat_preserves_content_arity() {
    let mut sm = map_a();
    sm.concat([map_b()]).unwrap();

    // the right-hand map carried no content; padding keeps the arrays
    // aligned and the left-hand entries untouched
    assert_eq!(sm.sources_content().len(), sm.sources().len());
    assert_eq!(sm.sources_content()[0].as_deref(), Some("let a;"));
    assert_eq!(sm.sources_content()[1], None);

    sm.validate().unwrap();
}

#[test]
fn test_concat_order_matters() {
    let chained = {
        let mut sm = map_a();
        sm.concat([map_b()]).unwrap();
        sm.concat([map_c()]).unwrap();
        sm.to_vec().unwrap()
    };
    let batched = {
        let mut sm = map_a();
        sm.concat([map_b(), map_c()]).unwrap();
        sm.to_vec().unwrap()
    };
    assert_eq!(chained, batched);

    let expected = "AAAA;ACAA,AAAA;ECAAE";
    let mut sm = map_a();
    sm.concat([map_b(), map_c()]).unwrap();
    assert_eq!(sm.mappings().encode_to_string().unwrap(), expected);
}

#[test]
fn test_concat_empty_is_an_error() {
    let mut sm = map_a();
    let before = sm.to_vec().unwrap();

    assert!(matches!(sm.concat([]), Err(Error::EmptyConcat)));
    assert_eq!(sm.to_vec().unwrap(), before);
}

#[test]
fn test_concat_new_leaves_self_untouched() {
    let sm = map_a();
    let combined = sm.concat_new([map_b()]).unwrap();

    assert_eq!(sm.sources().len(), 1);
    assert_eq!(combined.sources().len(), 2);
    assert_eq!(sm.mappings().encode_to_string().unwrap(), "AAAA");
    combined.validate().unwrap();
}
