//! Hierarchical tag trees.
//!
//! Image metadata stores keyword hierarchies in several shapes:
//!
//! - delimited paths such as `Animals|Dogs|Poodle` or `Animals/Dogs`
//! - nested category markup such as
//!   `<Categories><Category>Animals<Category>Dogs</Category></Category></Categories>`
//! - flat keyword lists
//!
//! [`TagTree`] is the single representation all of them parse into. A tree
//! is built per raw value, flattened to a list of tag names and then
//! dropped; it is never kept around as state.

use std::collections::HashSet;
use std::fmt::Write as _;

use roxmltree::{Children, Document, Node};
use thiserror::Error;

use super::field::{split_path, Field};
use crate::error::ImgtagError;

const MARKUP_ROOT: &str = "Categories";
const MARKUP_NODE: &str = "Category";

/// Why a value could not be read as nested category markup.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),

    #[error("root element <{0}> is not <Categories>")]
    UnexpectedRoot(String),
}

/// One segment of a hierarchical tag path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagNode {
    pub value: String,
    pub children: Vec<TagNode>,
}

impl TagNode {
    /// Creates a leaf node.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: TagNode) -> Self {
        self.children.push(child);
        self
    }

    /// Creates a leaf node holding the last segment of a tag path.
    ///
    /// `Animals/Dogs/Poodle` becomes `Poodle`. Input without any segment is
    /// kept as-is.
    pub fn flat(tag: &str) -> Self {
        match split_path(tag).pop() {
            Some(last) => TagNode::new(last),
            None => TagNode::new(tag),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    // Tag paths can be arbitrarily long chains, so traversals keep their
    // own stack instead of recursing.
    fn walk<'a>(&'a self, out: &mut Vec<&'a str>) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if !node.value.is_empty() {
                out.push(&node.value);
            }
            stack.extend(node.children.iter().rev());
        }
    }

    fn write_markup(&self, out: &mut String) {
        enum Step<'a> {
            Open(&'a TagNode),
            Close,
        }

        let mut stack = vec![Step::Open(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(node) => {
                    write!(out, "<{MARKUP_NODE}>{}", xml_escape(&node.value))
                        .expect("write to string");
                    stack.push(Step::Close);
                    stack.extend(node.children.iter().rev().map(Step::Open));
                }
                Step::Close => write!(out, "</{MARKUP_NODE}>").expect("write to string"),
            }
        }
    }
}

impl Drop for TagNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// An ordered forest of [`TagNode`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagTree {
    nodes: Vec<TagNode>,
}

impl TagTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<TagNode>) -> Self {
        Self { nodes }
    }

    /// Builds a linear chain from a delimited tag path.
    ///
    /// Each segment becomes a node whose only child is the next segment.
    /// Empty or whitespace-only text yields an empty tree; text without any
    /// separator yields a single node.
    pub fn from_delimited(text: &str) -> Self {
        let chain = split_path(text)
            .into_iter()
            .rev()
            .fold(None, |child: Option<TagNode>, segment| {
                let node = TagNode::new(segment);
                Some(match child {
                    Some(child) => node.with_child(child),
                    None => node,
                })
            });

        Self {
            nodes: chain.into_iter().collect(),
        }
    }

    /// Parses nested category markup into a branching tree.
    ///
    /// The root element must be `<Categories>`. Every `<Category>` child of
    /// it becomes a top-level node, `<Category>` children of those become
    /// their children, and so on. Other elements are ignored. A node's value
    /// is its own text content, trimmed.
    pub fn from_markup(xml: &str) -> Result<Self, MarkupError> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        if root.tag_name().name() != MARKUP_ROOT {
            return Err(MarkupError::UnexpectedRoot(root.tag_name().name().to_string()));
        }

        let nodes = root
            .children()
            .filter(is_category)
            .map(node_from_element)
            .collect();
        Ok(Self { nodes })
    }

    /// Parses one raw value of a hierarchical field.
    ///
    /// Markup is tried first. Input that is not markup falls back to
    /// delimited text, which may not contain `<`; anything that starts to
    /// look like markup but is not well-formed category markup is reported
    /// as [`ImgtagError::UnrecognizedFormat`].
    pub fn parse(field: Field, raw: &str) -> Result<Self, ImgtagError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::new());
        }

        match Self::from_markup(raw) {
            Ok(tree) => Ok(tree),
            Err(MarkupError::Xml(_)) if !raw.contains('<') => Ok(Self::from_delimited(raw)),
            Err(err) => Err(ImgtagError::UnrecognizedFormat {
                field: field.name().to_string(),
                message: format!("invalid nested markup: {err}"),
            }),
        }
    }

    pub fn nodes(&self) -> &[TagNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree has no top-level nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest path length in the tree, zero when empty.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(TagNode::depth).max().unwrap_or(0)
    }

    /// Appends the top-level nodes of `other` after this tree's own.
    pub fn extend(&mut self, other: TagTree) {
        self.nodes.extend(other.nodes);
    }

    /// Flattens the tree to a duplicate-free list of tag names.
    ///
    /// Depth-first pre-order: every node's value is emitted, not only the
    /// leaves. The first occurrence of a value wins. This throws away the
    /// parent/child structure on purpose.
    pub fn flatten(&self) -> Vec<String> {
        let mut all = Vec::new();
        for node in &self.nodes {
            node.walk(&mut all);
        }
        dedup_preserving_order(all)
    }

    /// Builds leaf-only nodes from already normalized tags.
    ///
    /// Only the final path segment of each tag is kept, so the result is a
    /// flat list of single nodes, never a nested tree.
    pub fn flatten_to_tags<S: AsRef<str>>(tags: &[S]) -> Vec<TagNode> {
        tags.iter().map(|tag| TagNode::flat(tag.as_ref())).collect()
    }

    /// Renders the tree as nested category markup.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write!(out, "<{MARKUP_ROOT}>").expect("write to string");
        for node in &self.nodes {
            node.write_markup(&mut out);
        }
        write!(out, "</{MARKUP_ROOT}>").expect("write to string");
        out
    }
}

fn is_category(node: &Node<'_, '_>) -> bool {
    node.is_element() && node.tag_name().name() == MARKUP_NODE
}

fn own_text(element: Node<'_, '_>) -> String {
    let value: String = element
        .children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect();
    value.trim().to_string()
}

fn open_category<'a, 'input>(element: Node<'a, 'input>) -> (TagNode, Children<'a, 'input>) {
    (TagNode::new(own_text(element)), element.children())
}

/// Builds the subtree under one `<Category>` element, depth-first.
fn node_from_element(element: Node<'_, '_>) -> TagNode {
    let mut stack = vec![open_category(element)];
    let mut built = TagNode::default();

    while let Some((_, children)) = stack.last_mut() {
        if let Some(child) = children.find(is_category) {
            stack.push(open_category(child));
            continue;
        }
        let Some((done, _)) = stack.pop() else { break };
        match stack.last_mut() {
            Some((parent, _)) => parent.children.push(done),
            None => built = done,
        }
    }
    built
}

/// Removes repeated strings, keeping the first occurrence of each.
pub fn dedup_preserving_order<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(|item| {
            let item = item.as_ref();
            seen.insert(item.to_string()).then(|| item.to_string())
        })
        .collect()
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
