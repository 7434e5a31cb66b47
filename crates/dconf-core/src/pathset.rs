//! Hierarchical set of paths with prefix closure
//!
//! A [`PathSet`] holds paths such as `["org", "gnome", "desktop"]`. Adding a
//! path adds everything beneath it: after `add(["a"])`, `["a", "b"]` is a
//! member. Adding `["a", "b"]` does not make `["a"]` a member.
//!
//! # Examples
//!
//! ```
//! use dconf_core::PathSet;
//!
//! let mut set = PathSet::<String>::new();
//! set.add(["org", "gnome"]);
//!
//! assert!(set.contains(["org", "gnome"]));
//! assert!(set.contains(["org", "gnome", "desktop", "interface"]));
//! assert!(!set.contains(["org"]));
//! assert_eq!(set.to_string(), "org\n  gnome\n    *");
//! ```

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Marker printed for a node whose whole subtree is a member
pub const ALL_MARKER: &str = "*";

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node<T> {
    /// Only the listed children (and their closures) are members
    Branch(BTreeMap<T, Node<T>>),
    /// Everything at and below this node is a member
    All,
}

impl<T> Node<T> {
    fn empty() -> Self {
        Node::Branch(BTreeMap::new())
    }
}

/// A set of paths closed under extension.
///
/// Each node of the tree either lists its member children or is terminal,
/// meaning its entire subtree is in the set. A terminal node swallows any
/// longer path added beneath it, and adding a shorter path replaces the
/// children it had accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet<T = String> {
    root: Node<T>,
}

impl<T> Default for PathSet<T> {
    fn default() -> Self {
        Self { root: Node::empty() }
    }
}

impl<T: Ord> PathSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `path` and every path that extends it.
    ///
    /// Adding the empty path makes the set universal.
    pub fn add<I>(&mut self, path: I)
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        let mut node = &mut self.root;
        for segment in path {
            match node {
                // Already covered by a shorter path
                Node::All => return,
                Node::Branch(children) => {
                    node = children.entry(segment.into()).or_insert_with(Node::empty);
                }
            }
        }
        *node = Node::All;
    }

    /// Check whether `path`, or some prefix of it, was added.
    pub fn contains<'a, I, Q>(&self, path: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        Q: Ord + ?Sized + 'a,
        T: Borrow<Q>,
    {
        let mut node = &self.root;
        for segment in path {
            match node {
                Node::All => return true,
                Node::Branch(children) => match children.get(segment) {
                    Some(child) => node = child,
                    None => return false,
                },
            }
        }
        matches!(node, Node::All)
    }

    /// True when nothing has been added.
    pub fn is_empty(&self) -> bool {
        matches!(&self.root, Node::Branch(children) if children.is_empty())
    }

    /// True when the empty path has been added, so every path is a member.
    pub fn is_universal(&self) -> bool {
        matches!(self.root, Node::All)
    }
}

impl<T: fmt::Display> PathSet<T> {
    /// Render the tree for diagnostics.
    ///
    /// Segments are listed depth first in sorted order, one per line and
    /// indented two spaces per level, with [`ALL_MARKER`] under every
    /// terminal node. An empty set renders as `""` and a universal set as
    /// just the marker.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        render_node(&self.root, 0, &mut lines);
        lines.join("\n")
    }
}

fn render_node<T: fmt::Display>(node: &Node<T>, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    match node {
        Node::All => lines.push(format!("{indent}{ALL_MARKER}")),
        Node::Branch(children) => {
            for (segment, child) in children {
                lines.push(format!("{indent}{segment}"));
                render_node(child, depth + 1, lines);
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for PathSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<T, P> Extend<P> for PathSet<T>
where
    T: Ord,
    P: IntoIterator,
    P::Item: Into<T>,
{
    fn extend<I: IntoIterator<Item = P>>(&mut self, paths: I) {
        for path in paths {
            self.add(path);
        }
    }
}

impl<T, P> FromIterator<P> for PathSet<T>
where
    T: Ord,
    P: IntoIterator,
    P::Item: Into<T>,
{
    fn from_iter<I: IntoIterator<Item = P>>(paths: I) -> Self {
        let mut set = Self::new();
        set.extend(paths);
        set
    }
}
