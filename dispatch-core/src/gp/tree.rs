#[cfg(test)]
#[path = "../../tests/unit/gp/tree_test.rs"]
mod tree_test;

use super::*;
use moea::prelude::GenericResult;
use std::fmt::{Display, Formatter};

/// An expression tree stored as a pre-order arena: every internal node is immediately followed by
/// its left subtree and then by its right subtree. A subtree rooted at index `i` occupies the
/// contiguous range `i..subtree_end(i)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GpTree {
    role: Role,
    nodes: Vec<GpNode>,
}

impl GpTree {
    /// Creates a single node tree.
    pub fn terminal(feature: Feature) -> Self {
        Self { role: feature.role(), nodes: vec![GpNode::Terminal(feature)] }
    }

    /// Creates a tree from an operator and two subtrees of the same role.
    pub fn internal(operator: Operator, left: GpTree, right: GpTree) -> GenericResult<Self> {
        if left.role != right.role {
            return Err(format!("cannot combine '{left}' and '{right}': role mismatch").into());
        }

        let mut nodes = Vec::with_capacity(1 + left.size() + right.size());
        nodes.push(GpNode::Internal(operator));
        nodes.extend(left.nodes);
        nodes.extend(right.nodes);

        Ok(Self { role: left.role, nodes })
    }

    /// Creates a tree from pre-order nodes validating its structure and terminal roles.
    pub fn from_nodes(role: Role, nodes: Vec<GpNode>) -> GenericResult<Self> {
        let mut open = 1_usize;
        for (index, node) in nodes.iter().enumerate() {
            if open == 0 {
                return Err(format!("unexpected node after complete tree at index {index}").into());
            }

            if let GpNode::Terminal(feature) = node {
                if feature.role() != role {
                    return Err(format!("terminal '{feature}' does not match tree role '{}'", role.tag()).into());
                }
            }

            open = open - 1 + node.arity();
        }

        if open != 0 {
            return Err(format!("incomplete tree: {open} missing node(s)").into());
        }

        Ok(Self { role, nodes })
    }

    /// Creates a tree from pre-order nodes which are known to be well formed.
    pub(crate) fn from_nodes_unchecked(role: Role, nodes: Vec<GpNode>) -> Self {
        debug_assert!(Self::from_nodes(role, nodes.clone()).is_ok());

        Self { role, nodes }
    }

    /// Returns tree role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns nodes in pre-order.
    pub fn nodes(&self) -> &[GpNode] {
        self.nodes.as_slice()
    }

    /// Returns amount of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Returns tree depth, a single node tree has depth one.
    pub fn depth(&self) -> usize {
        self.depth_at(0).0
    }

    /// Returns an exclusive end of the subtree rooted at `index`.
    pub fn subtree_end(&self, index: usize) -> usize {
        let mut open = 1_usize;
        let mut end = index;

        while open > 0 {
            open = open - 1 + self.nodes[end].arity();
            end += 1;
        }

        end
    }

    /// Returns a copy of the subtree rooted at `index`.
    pub fn subtree(&self, index: usize) -> GpTree {
        Self { role: self.role, nodes: self.nodes[index..self.subtree_end(index)].to_vec() }
    }

    /// Returns a new tree where the subtree rooted at `index` is replaced by `replacement`.
    pub fn replace_subtree(&self, index: usize, replacement: &GpTree) -> GpTree {
        debug_assert_eq!(self.role, replacement.role);

        let end = self.subtree_end(index);
        let mut nodes = Vec::with_capacity(self.size() - (end - index) + replacement.size());
        nodes.extend_from_slice(&self.nodes[..index]);
        nodes.extend_from_slice(&replacement.nodes);
        nodes.extend_from_slice(&self.nodes[end..]);

        Self { role: self.role, nodes }
    }

    /// Returns a new tree where the node at `index` is replaced by another node of the same arity.
    pub(crate) fn with_node(&self, index: usize, node: GpNode) -> GpTree {
        debug_assert_eq!(self.nodes[index].arity(), node.arity());

        let mut nodes = self.nodes.clone();
        nodes[index] = node;

        Self { role: self.role, nodes }
    }

    /// Returns a new tree where left and right children of the internal node at `index` are
    /// swapped, none if node is a terminal.
    pub(crate) fn with_swapped_children(&self, index: usize) -> Option<GpTree> {
        if self.nodes[index].arity() == 0 {
            return None;
        }

        let left_start = index + 1;
        let right_start = self.subtree_end(left_start);
        let end = self.subtree_end(right_start);

        let mut nodes = Vec::with_capacity(self.size());
        nodes.extend_from_slice(&self.nodes[..left_start]);
        nodes.extend_from_slice(&self.nodes[right_start..end]);
        nodes.extend_from_slice(&self.nodes[left_start..right_start]);
        nodes.extend_from_slice(&self.nodes[end..]);

        Some(Self { role: self.role, nodes })
    }

    /// Returns indices of internal nodes.
    pub fn internal_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().enumerate().filter(|(_, node)| node.arity() > 0).map(|(index, _)| index)
    }

    /// Evaluates the tree using given function to get terminal values.
    pub fn evaluate_with<F>(&self, terminal_fn: &F) -> f64
    where
        F: Fn(Feature) -> f64,
    {
        self.evaluate_at(0, terminal_fn).0
    }

    fn evaluate_at<F>(&self, index: usize, terminal_fn: &F) -> (f64, usize)
    where
        F: Fn(Feature) -> f64,
    {
        match self.nodes[index] {
            GpNode::Terminal(feature) => (terminal_fn(feature), index + 1),
            GpNode::Internal(operator) => {
                let (left, right_start) = self.evaluate_at(index + 1, terminal_fn);
                let (right, end) = self.evaluate_at(right_start, terminal_fn);

                (operator.apply(left, right), end)
            }
        }
    }

    fn depth_at(&self, index: usize) -> (usize, usize) {
        match self.nodes[index] {
            GpNode::Terminal(_) => (1, index + 1),
            GpNode::Internal(_) => {
                let (left, right_start) = self.depth_at(index + 1);
                let (right, end) = self.depth_at(right_start);

                (1 + left.max(right), end)
            }
        }
    }

    fn fmt_at(&self, index: usize, f: &mut Formatter<'_>) -> Result<usize, std::fmt::Error> {
        match self.nodes[index] {
            GpNode::Terminal(feature) => {
                write!(f, "{feature}")?;
                Ok(index + 1)
            }
            GpNode::Internal(operator) => {
                write!(f, "({} ", operator.name())?;
                let right_start = self.fmt_at(index + 1, f)?;
                write!(f, " ")?;
                let end = self.fmt_at(right_start, f)?;
                write!(f, ")")?;

                Ok(end)
            }
        }
    }
}

impl Display for GpTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_at(0, f).map(|_| ())
    }
}
