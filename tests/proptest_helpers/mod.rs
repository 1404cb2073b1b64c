#![allow(dead_code)]

use std::collections::HashSet;

use imgtag::meta::{FieldValues, TagNode, TagTree};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A single path segment: no separators, no markup, no outer whitespace.
pub fn arb_segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9 ]{0,6}[A-Za-z0-9]")
        .expect("valid segment regex")
}

/// A tag path of 1 to 5 segments, possibly repeating.
pub fn arb_path() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_segment(), 1..=5)
}

/// A tag path whose segments are all distinct.
pub fn arb_unique_path() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set(arb_segment(), 1..=5)
        .prop_map(|set| set.into_iter().collect())
}

pub fn arb_tag_node() -> impl Strategy<Value = TagNode> {
    let leaf = arb_segment().prop_map(TagNode::new);
    leaf.prop_recursive(3, 24, 4, |inner| {
        (arb_segment(), proptest::collection::vec(inner, 0..4))
            .prop_map(|(value, children)| TagNode { value, children })
    })
}

pub fn arb_tag_tree() -> impl Strategy<Value = TagTree> {
    proptest::collection::vec(arb_tag_node(), 0..4).prop_map(TagTree::from_nodes)
}

/// Raw values for a handful of fields, with arbitrary names mixed in.
pub fn arb_field_values() -> impl Strategy<Value = FieldValues> {
    let name = prop_oneof![
        Just("Title".to_string()),
        Just("Caption".to_string()),
        Just("Credit".to_string()),
        Just("Notes".to_string()),
        Just("UserComment".to_string()),
        Just("HierarchicalSubject".to_string()),
        Just("LastKeywordXMP".to_string()),
        Just("Subject".to_string()),
        Just("ImageWidth".to_string()),
        proptest::string::string_regex("[A-Z][a-z]{2,10}").expect("valid name regex"),
    ];
    let value = proptest::string::string_regex("[A-Za-z |/>]{0,24}").expect("valid value regex");

    (
        proptest::string::string_regex("[a-z]{1,8}/[a-z]{1,8}\\.(jpg|png|webp)")
            .expect("valid identifier regex"),
        proptest::collection::vec((name, value), 0..8),
    )
        .prop_map(|(identifier, pairs)| {
            let mut values = FieldValues::new(identifier);
            for (name, value) in pairs {
                values.insert(name, value);
            }
            values
        })
}

/// Pre-order node values without deduplication.
pub fn preorder(tree: &TagTree) -> Vec<String> {
    fn walk(node: &TagNode, out: &mut Vec<String>) {
        out.push(node.value.clone());
        for child in &node.children {
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    for node in tree.nodes() {
        walk(node, &mut out);
    }
    out
}

pub fn has_duplicates(items: &[String]) -> bool {
    let mut seen = HashSet::new();
    items.iter().any(|item| !seen.insert(item))
}
