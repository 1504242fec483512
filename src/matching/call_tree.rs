//! Multi-hop invocation chains between operations.
//!
//! A [`CallTree`] is an arena of [`CallTreeNode`]s addressed by [`NodeId`].
//! Each node records one edge of the call graph: the calling operation, the
//! operation it invokes and the call site. Parent and child links are arena
//! indices, so node equality and hashing only look at the edge payload and
//! the same edge reached through different paths compares equal.
//!
//! Invocation resolution is supplied by the caller through
//! [`InvocationResolver`]; the tree only records what the resolver returns.

use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};

use crate::core::model::{Invocation, Operation};

/// Handle of a node inside its [`CallTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One call-graph edge plus its position in the tree
#[derive(Debug, Clone)]
pub struct CallTreeNode<'a> {
    original_operation: &'a Operation,
    invoked_operation: &'a Operation,
    invocation: &'a Invocation,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<'a> CallTreeNode<'a> {
    #[must_use]
    pub fn new(
        original_operation: &'a Operation,
        invoked_operation: &'a Operation,
        invocation: &'a Invocation,
    ) -> Self {
        Self {
            original_operation,
            invoked_operation,
            invocation,
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn original_operation(&self) -> &'a Operation {
        self.original_operation
    }

    #[must_use]
    pub fn invoked_operation(&self) -> &'a Operation {
        self.invoked_operation
    }

    #[must_use]
    pub fn invocation(&self) -> &'a Invocation {
        self.invocation
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl PartialEq for CallTreeNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.invocation == other.invocation
            && self.invoked_operation == other.invoked_operation
            && self.original_operation == other.original_operation
    }
}

impl Eq for CallTreeNode<'_> {}

impl Hash for CallTreeNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.invocation.hash(state);
        self.invoked_operation.hash(state);
        self.original_operation.hash(state);
    }
}

/// Resolves a call site inside `caller` to the operation it invokes
pub trait InvocationResolver<'a> {
    fn resolve(&self, caller: &'a Operation, invocation: &'a Invocation) -> Option<&'a Operation>;
}

/// Resolves against a fixed candidate list by name and arity
impl<'a> InvocationResolver<'a> for [&'a Operation] {
    fn resolve(&self, _caller: &'a Operation, invocation: &'a Invocation) -> Option<&'a Operation> {
        self.iter()
            .copied()
            .find(|op| invocation.matches_operation(op))
    }
}

/// Rooted tree of call-graph edges
#[derive(Debug, Clone)]
pub struct CallTree<'a> {
    nodes: Vec<CallTreeNode<'a>>,
}

impl<'a> CallTree<'a> {
    /// Tree containing only `root`
    #[must_use]
    pub fn new(root: CallTreeNode<'a>) -> Self {
        Self {
            nodes: vec![CallTreeNode {
                parent: None,
                children: Vec::new(),
                ..root
            }],
        }
    }

    /// Grow a tree from `root` by repeatedly resolving the invocations of
    /// each invoked operation. Depth is bounded by `max_depth` edges below
    /// the root; an operation already on the path to the root or among the
    /// current node's children is not expanded again.
    pub fn generate<R>(root: CallTreeNode<'a>, resolver: &R, max_depth: usize) -> Self
    where
        R: InvocationResolver<'a> + ?Sized,
    {
        let mut tree = Self::new(root);
        let mut queue = VecDeque::from([(tree.root(), 0usize)]);

        while let Some((id, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            let caller = tree.node(id).invoked_operation;
            for invocation in &caller.invocations {
                let Some(invoked) = resolver.resolve(caller, invocation) else {
                    continue;
                };
                if tree.contains_in_path_to_root_or_sibling(id, invoked) {
                    continue;
                }
                let child = tree.add_child(id, CallTreeNode::new(caller, invoked, invocation));
                queue.push_back((child, depth + 1));
            }
        }

        tracing::trace!(
            root = %tree.node(tree.root()).invoked_operation.name,
            nodes = tree.len(),
            "Generated call tree"
        );
        tree
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &CallTreeNode<'a> {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `child` under `parent`, returning its handle
    pub fn add_child(&mut self, parent: NodeId, child: CallTreeNode<'a>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(CallTreeNode {
            parent: Some(parent),
            children: Vec::new(),
            ..child
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Parent, grandparent, ... up to and including the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// All nodes below `id`, depth first in child order
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id.0].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }
        out
    }

    /// Every node, level by level from the root
    #[must_use]
    pub fn nodes_in_breadth_first_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([self.root()]);
        while let Some(id) = queue.pop_front() {
            out.push(id);
            queue.extend(self.nodes[id.0].children.iter().copied());
        }
        out
    }

    /// True if `invoked` is already reached by `parent`, one of its
    /// ancestors, or one of its children
    #[must_use]
    pub fn contains_in_path_to_root_or_sibling(&self, parent: NodeId, invoked: &Operation) -> bool {
        let on_path = std::iter::once(parent)
            .chain(self.ancestors(parent))
            .any(|id| self.nodes[id.0].invoked_operation == invoked);
        on_path
            || self.nodes[parent.0]
                .children
                .iter()
                .any(|c| self.nodes[c.0].invoked_operation == invoked)
    }

    /// Handle of the first node equal to `edge`, ignoring tree position
    #[must_use]
    pub fn find(&self, edge: &CallTreeNode<'a>) -> Option<NodeId> {
        self.nodes.iter().position(|n| n == edge).map(NodeId)
    }
}

/// Call trees keyed by their root edge, so each root is expanded once per run
#[derive(Debug, Default)]
pub struct CallTreeCache<'a> {
    trees: HashMap<CallTreeNode<'a>, CallTree<'a>>,
}

impl<'a> CallTreeCache<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
        }
    }

    pub fn get_or_generate<R>(
        &mut self,
        root: CallTreeNode<'a>,
        resolver: &R,
        max_depth: usize,
    ) -> &CallTree<'a>
    where
        R: InvocationResolver<'a> + ?Sized,
    {
        self.trees
            .entry(root.clone())
            .or_insert_with(|| CallTree::generate(root, resolver, max_depth))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Parameter;
    use std::collections::hash_map::DefaultHasher;

    fn call(name: &str) -> Invocation {
        Invocation::new(name)
    }

    fn op(name: &str, calls: &[&str]) -> Operation {
        let mut op = Operation::new(name);
        op.invocations = calls.iter().map(|c| call(c)).collect();
        op
    }

    fn hash_of(node: &CallTreeNode<'_>) -> u64 {
        let mut hasher = DefaultHasher::new();
        node.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_node_equality_ignores_position() {
        let caller = op("a", &["b"]);
        let callee = op("b", &[]);
        let other = op("c", &[]);
        let site = call("b");

        let mut tree = CallTree::new(CallTreeNode::new(&caller, &caller, &site));
        let root = tree.root();
        let left = tree.add_child(root, CallTreeNode::new(&caller, &other, &site));
        let first = tree.add_child(root, CallTreeNode::new(&caller, &callee, &site));
        let second = tree.add_child(left, CallTreeNode::new(&caller, &callee, &site));

        assert_ne!(tree.parent(first), tree.parent(second));
        assert_eq!(tree.node(first), tree.node(second));
        assert_eq!(hash_of(tree.node(first)), hash_of(tree.node(second)));
        assert_eq!(
            tree.find(&CallTreeNode::new(&caller, &callee, &site)),
            Some(first)
        );
    }

    #[test]
    fn test_ancestors_and_descendants() {
        let a = op("a", &[]);
        let site = call("x");
        let mut tree = CallTree::new(CallTreeNode::new(&a, &a, &site));
        let root = tree.root();
        let c1 = tree.add_child(root, CallTreeNode::new(&a, &a, &site));
        let c2 = tree.add_child(root, CallTreeNode::new(&a, &a, &site));
        let g1 = tree.add_child(c1, CallTreeNode::new(&a, &a, &site));

        assert_eq!(tree.ancestors(g1).collect::<Vec<_>>(), vec![c1, root]);
        assert_eq!(tree.ancestors(root).count(), 0);
        assert_eq!(tree.descendants(root), vec![c1, g1, c2]);
        assert_eq!(tree.nodes_in_breadth_first_order(), vec![root, c1, c2, g1]);
    }

    #[test]
    fn test_generate_follows_invocations() {
        let root_op = op("process", &["helper"]);
        let helper = op("helper", &["leaf", "helper"]);
        let leaf = op("leaf", &[]);
        let site = call("helper");
        let added: Vec<&Operation> = vec![&helper, &leaf];

        let tree = CallTree::generate(
            CallTreeNode::new(&root_op, &root_op, &site),
            added.as_slice(),
            3,
        );

        let invoked: Vec<&str> = tree
            .nodes_in_breadth_first_order()
            .into_iter()
            .map(|id| tree.node(id).invoked_operation().name.as_str())
            .collect();
        assert_eq!(invoked, vec!["process", "helper", "leaf"]);
    }

    #[test]
    fn test_generate_respects_depth() {
        let a = op("a", &["b"]);
        let b = op("b", &["c"]);
        let c = op("c", &[]);
        let site = call("a");
        let added: Vec<&Operation> = vec![&b, &c];

        let tree = CallTree::generate(CallTreeNode::new(&a, &a, &site), added.as_slice(), 1);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_guard_blocks_recursion() {
        let mut a = op("a", &["a"]);
        a.parameters.push(Parameter::new("n", "int"));
        a.invocations[0].arguments.push("n - 1".to_string());
        let site = call("a");
        let added: Vec<&Operation> = vec![&a];

        let tree = CallTree::generate(CallTreeNode::new(&a, &a, &site), added.as_slice(), 10);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_cache_reuses_tree() {
        let a = op("a", &["b"]);
        let b = op("b", &[]);
        let site = call("a");
        let added: Vec<&Operation> = vec![&b];
        let mut cache = CallTreeCache::new();

        let first = cache
            .get_or_generate(CallTreeNode::new(&a, &a, &site), added.as_slice(), 3)
            .len();
        let second = cache
            .get_or_generate(CallTreeNode::new(&a, &a, &site), added.as_slice(), 3)
            .len();
        assert_eq!(first, 2);
        assert_eq!(second, 2);
        assert_eq!(cache.len(), 1);
    }
}
