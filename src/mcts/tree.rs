//! Arena-based MCTS tree.
//!
//! Nodes are stored in a flat vector and referenced by `NodeId` indices.

use super::node::{MctsNode, NodeId};

#[derive(Clone, Debug)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,
}

impl MctsTree {
    pub fn new(root: MctsNode) -> Self {
        let mut nodes = Vec::with_capacity(1024);
        nodes.push(root);
        Self { nodes }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.index()]
    }

    /// Adds `node` and links it under its parent.
    pub fn alloc(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        if let (Some(parent), Some(column)) = (node.parent, node.column) {
            self.nodes[parent.index()].children.push((column, id));
        }
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visit count of every expanded root child, by column.
    pub fn root_child_visits(&self) -> Vec<(usize, u32)> {
        self.get(self.root())
            .children
            .iter()
            .map(|(column, id)| (*column, self.get(*id).visits))
            .collect()
    }

    /// Most visited child of `id`. Ties go to the leftmost expanded child.
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for (_, child) in self.get(id).children.iter() {
            match best {
                Some(current) if self.get(current).visits >= self.get(*child).visits => {}
                _ => best = Some(*child),
            }
        }
        best
    }

    /// Child of `id` with the highest UCB1 value.
    pub fn best_ucb1_child(&self, id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let parent_visits = self.get(id).visits;
        let mut best: Option<(NodeId, f64)> = None;
        for (_, child) in self.get(id).children.iter() {
            let value = self.get(*child).ucb1(parent_visits, exploration_constant);
            match best {
                Some((_, best_value)) if best_value >= value => {}
                _ => best = Some((*child, value)),
            }
        }
        best.map(|(child, _)| child)
    }
}
