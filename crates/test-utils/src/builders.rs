#![allow(dead_code)]

use techdag::graph::{GraphStore, Node};

/// Builder for `Node` to simplify test setup.
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            node: Node::new(id, "/images/default.png"),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.node.name = name.to_string();
        self
    }

    pub fn image(mut self, image: &str) -> Self {
        self.node.image = image.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.node.description = description.to_string();
        self
    }

    pub fn depends_on(mut self, dep: &str) -> Self {
        self.node.dependencies.push(dep.to_string());
        self
    }

    pub fn done(mut self, val: bool) -> Self {
        self.node.done = val;
        self
    }

    pub fn waiting(mut self, val: bool) -> Self {
        self.node.waiting = val;
        self
    }

    pub fn hidden(mut self, val: bool) -> Self {
        self.node.hidden = val;
        self
    }

    pub fn job(mut self, val: bool) -> Self {
        self.node.job = val;
        self
    }

    pub fn visible_days(mut self, days: &[u8]) -> Self {
        self.node.visible_days = Some(days.to_vec());
        self
    }

    pub fn window(mut self, start: u16, end: u16) -> Self {
        self.node.start_time = Some(start);
        self.node.end_time = Some(end);
        self
    }

    pub fn build(self) -> Node {
        self.node
    }
}

/// Builder for a whole `GraphStore`.
pub struct GraphBuilder {
    nodes: Vec<Node>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Shorthand for a plain node with the given dependencies.
    pub fn with_plain(self, id: &str, deps: &[&str]) -> Self {
        let mut builder = NodeBuilder::new(id);
        for dep in deps {
            builder = builder.depends_on(dep);
        }
        self.with_node(builder.build())
    }

    pub fn build(self) -> GraphStore {
        GraphStore::from_nodes(self.nodes)
    }

    pub fn build_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
