//! Search tree nodes.
//!
//! Each node exclusively owns its children, so the tree is a plain owned
//! structure: dropping a node drops its whole subtree, and promoting a child
//! to root is a move out of its parent's child list.
//!
//! Values are stored from the point of view of the player who made the move
//! leading to the node. A parent choosing among its children therefore
//! maximizes the children's mean values directly.

use crate::hive_move::Move;

#[derive(Debug, Clone)]
pub struct Node {
    mv: Move,
    action: usize,
    prior: f32,
    visit_count: u32,
    value_sum: f32,
    expanded: bool,
    terminal: bool,
    /// Game result for terminal nodes, oracle estimate otherwise. Both from
    /// the node's own point of view. Reused when a childless node is reached
    /// again.
    leaf_value: f32,
    children: Vec<Node>,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self::child(Move::Pass, 0, 1.0)
    }

    pub(crate) fn child(mv: Move, action: usize, prior: f32) -> Self {
        Self {
            mv,
            action,
            prior,
            visit_count: 0,
            value_sum: 0.0,
            expanded: false,
            terminal: false,
            leaf_value: 0.0,
            children: Vec::new(),
        }
    }

    /// The move that leads from the parent to this node.
    pub fn mv(&self) -> Move {
        self.mv
    }

    pub fn action(&self) -> usize {
        self.action
    }

    pub fn prior(&self) -> f32 {
        self.prior
    }

    pub fn visit_count(&self) -> u32 {
        self.visit_count
    }

    pub fn value_sum(&self) -> f32 {
        self.value_sum
    }

    /// Q value, 0 for an unvisited node.
    pub fn mean_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f32
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn leaf_value(&self) -> f32 {
        self.leaf_value
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// `Q + c * P * sqrt(N_parent) / (1 + N)`
    #[inline]
    pub fn puct_score(&self, parent_visits_sqrt: f32, c_puct: f32) -> f32 {
        let exploration = c_puct * self.prior * parent_visits_sqrt / (1.0 + self.visit_count as f32);
        self.mean_value() + exploration
    }

    /// Index of the child with the highest PUCT score; ties go to the
    /// earliest child.
    pub(crate) fn select_child(&self, c_puct: f32) -> Option<usize> {
        let parent_visits_sqrt = (self.visit_count as f32).sqrt();
        let mut best: Option<(usize, f32)> = None;
        for (index, child) in self.children.iter().enumerate() {
            let score = child.puct_score(parent_visits_sqrt, c_puct);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((index, score)),
            }
        }
        best.map(|(index, _)| index)
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> &mut Node {
        &mut self.children[index]
    }

    pub(crate) fn expand(&mut self, children: Vec<Node>, value: f32) {
        self.children = children;
        self.leaf_value = value;
        self.expanded = true;
    }

    pub(crate) fn mark_terminal(&mut self, value: f32) {
        self.children.clear();
        self.leaf_value = value;
        self.expanded = true;
        self.terminal = true;
    }

    pub(crate) fn record(&mut self, value: f32) {
        self.visit_count += 1;
        self.value_sum += value;
    }

    pub(crate) fn set_prior(&mut self, prior: f32) {
        self.prior = prior;
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Detaches and returns the child at `index`, dropping its siblings.
    pub(crate) fn into_child(mut self, index: usize) -> Option<Node> {
        if index < self.children.len() {
            Some(self.children.swap_remove(index))
        } else {
            None
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_size).sum::<usize>()
    }
}

/// Adds `leaf_value` to the node at the end of `path` and alternating signs
/// to each of its ancestors, counting one visit on each.
pub(crate) fn backpropagate(root: &mut Node, path: &[usize], leaf_value: f32) {
    let mut value = if path.len() % 2 == 0 {
        leaf_value
    } else {
        -leaf_value
    };
    let mut node = root;
    node.record(value);
    for &index in path {
        value = -value;
        node = node.child_mut(index);
        node.record(value);
    }
}
