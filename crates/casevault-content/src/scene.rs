//! Scene graphs: the directed graph of narrative nodes for one case.
//!
//! A graph is immutable once constructed. All referential integrity is
//! checked at construction so a dead-end can never surface mid-playback.

use std::collections::HashMap;

use serde::Deserialize;

use casevault_core::error::DomainError;
use casevault_core::ids::NodeId;

/// One selectable action leading out of a node. Display order is
/// selection order.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Label shown to the reader.
    pub label: String,
    /// The node this choice leads to.
    pub target: NodeId,
}

/// Terminal payload of a case: what completing it unlocks.
#[derive(Debug, Clone, Deserialize)]
pub struct Ending {
    /// Name of the archive material unlocked on completion.
    pub unlock_reward: String,
}

/// One unit of displayed text plus its outgoing choices or terminal unlock.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneNode {
    /// Unique identifier within the graph.
    pub id: NodeId,
    /// Short display label.
    pub title: String,
    /// Full text revealed character by character.
    #[serde(default)]
    pub body: String,
    /// Outgoing choices; empty for terminal nodes.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Present exactly when the node is terminal.
    #[serde(default)]
    pub ending: Option<Ending>,
}

impl SceneNode {
    /// Whether this node ends the case.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.ending.is_some()
    }

    /// Body length in characters (the unit the reveal ticks in).
    #[must_use]
    pub fn body_chars(&self) -> usize {
        self.body.chars().count()
    }
}

/// Raw graph definition as it appears in a case pack.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneGraphDef {
    /// The designated entry node.
    pub entry: NodeId,
    /// All nodes of the graph.
    pub nodes: Vec<SceneNode>,
}

impl SceneGraphDef {
    /// Validates the definition and builds an immutable graph.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGraph` if validation fails.
    pub fn build(self) -> Result<SceneGraph, DomainError> {
        SceneGraph::new(self.entry, self.nodes)
    }
}

/// A validated, read-only scene graph.
#[derive(Debug)]
pub struct SceneGraph {
    entry: NodeId,
    nodes: HashMap<NodeId, SceneNode>,
}

impl SceneGraph {
    /// Builds a graph, validating its referential integrity.
    ///
    /// Checked invariants:
    /// - node ids are unique;
    /// - the entry id names an existing node;
    /// - every node has choices XOR an ending (never both, never neither);
    /// - every choice target resolves to an existing node.
    ///
    /// Cycles are legal; revisiting a node is a normal traversal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGraph` naming the offending node when
    /// any invariant is violated.
    pub fn new(entry: NodeId, nodes: Vec<SceneNode>) -> Result<Self, DomainError> {
        let mut map = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let id = node.id.clone();
            if map.insert(id.clone(), node).is_some() {
                return Err(DomainError::InvalidGraph(format!("duplicate node id: {id}")));
            }
        }

        if !map.contains_key(&entry) {
            return Err(DomainError::InvalidGraph(format!(
                "entry node does not exist: {entry}"
            )));
        }

        for node in map.values() {
            match (node.choices.is_empty(), node.is_terminal()) {
                (false, true) => {
                    return Err(DomainError::InvalidGraph(format!(
                        "node {} has both choices and an ending",
                        node.id
                    )));
                }
                (true, false) => {
                    return Err(DomainError::InvalidGraph(format!(
                        "node {} has neither choices nor an ending",
                        node.id
                    )));
                }
                _ => {}
            }
            for choice in &node.choices {
                if !map.contains_key(&choice.target) {
                    return Err(DomainError::InvalidGraph(format!(
                        "node {} references unknown target: {}",
                        node.id, choice.target
                    )));
                }
            }
        }

        Ok(Self { entry, nodes: map })
    }

    /// The designated entry node id.
    #[must_use]
    pub fn entry(&self) -> &NodeId {
        &self.entry
    }

    /// Looks up a node by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownNode` for an absent id. Unreachable in
    /// normal operation once the graph is validated.
    pub fn lookup(&self, id: &NodeId) -> Result<&SceneNode, DomainError> {
        self.nodes
            .get(id)
            .ok_or_else(|| DomainError::UnknownNode(id.clone()))
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes. Always false for a validated graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, choices: &[(&str, &str)], reward: Option<&str>) -> SceneNode {
        SceneNode {
            id: NodeId::from(id),
            title: format!("Scene {id}"),
            body: "REPORT".to_owned(),
            choices: choices
                .iter()
                .map(|(label, target)| Choice {
                    label: (*label).to_owned(),
                    target: NodeId::from(*target),
                })
                .collect(),
            ending: reward.map(|r| Ending {
                unlock_reward: r.to_owned(),
            }),
        }
    }

    #[test]
    fn test_valid_graph_resolves_every_choice_target() {
        let graph = SceneGraph::new(
            NodeId::from("start"),
            vec![
                node("start", &[("Go", "end"), ("Stay", "start")], None),
                node("end", &[], Some("R1")),
            ],
        )
        .unwrap();

        for id in ["start", "end"] {
            let n = graph.lookup(&NodeId::from(id)).unwrap();
            for choice in &n.choices {
                graph.lookup(&choice.target).unwrap();
            }
        }
    }

    #[test]
    fn test_terminal_nodes_carry_reward_and_no_choices() {
        let graph = SceneGraph::new(
            NodeId::from("start"),
            vec![node("start", &[("Go", "end")], None), node("end", &[], Some("R1"))],
        )
        .unwrap();

        let end = graph.lookup(&NodeId::from("end")).unwrap();
        assert!(end.is_terminal());
        assert!(end.choices.is_empty());
        assert_eq!(end.ending.as_ref().unwrap().unlock_reward, "R1");

        let start = graph.lookup(&NodeId::from("start")).unwrap();
        assert!(!start.is_terminal());
        assert!(!start.choices.is_empty());
    }

    #[test]
    fn test_dangling_target_is_rejected_at_construction() {
        let result = SceneGraph::new(
            NodeId::from("start"),
            vec![node("start", &[("Go", "missing")], None)],
        );

        match result.unwrap_err() {
            DomainError::InvalidGraph(msg) => assert!(msg.contains("missing")),
            other => panic!("expected InvalidGraph, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_entry_is_rejected() {
        let result = SceneGraph::new(NodeId::from("nowhere"), vec![node("end", &[], Some("R1"))]);
        assert!(matches!(result, Err(DomainError::InvalidGraph(_))));
    }

    #[test]
    fn test_duplicate_node_id_is_rejected() {
        let result = SceneGraph::new(
            NodeId::from("start"),
            vec![node("start", &[], Some("R1")), node("start", &[], Some("R2"))],
        );
        assert!(matches!(result, Err(DomainError::InvalidGraph(_))));
    }

    #[test]
    fn test_node_with_both_choices_and_ending_is_rejected() {
        let result = SceneGraph::new(
            NodeId::from("start"),
            vec![node("start", &[("Loop", "start")], Some("R1"))],
        );
        assert!(matches!(result, Err(DomainError::InvalidGraph(_))));
    }

    #[test]
    fn test_node_with_neither_choices_nor_ending_is_rejected() {
        let result = SceneGraph::new(NodeId::from("start"), vec![node("start", &[], None)]);
        assert!(matches!(result, Err(DomainError::InvalidGraph(_))));
    }

    #[test]
    fn test_cycles_are_legal() {
        // Two prior nodes both route back through the same field-report node.
        let graph = SceneGraph::new(
            NodeId::from("start"),
            vec![
                node("start", &[("A", "report"), ("B", "detour")], None),
                node("detour", &[("Back", "report")], None),
                node("report", &[("Loop", "start"), ("Done", "end")], None),
                node("end", &[], Some("R1")),
            ],
        );
        assert!(graph.is_ok());
    }

    #[test]
    fn test_lookup_unknown_id_fails() {
        let graph = SceneGraph::new(NodeId::from("start"), vec![node("start", &[], Some("R1"))])
            .unwrap();
        match graph.lookup(&NodeId::from("ghost")).unwrap_err() {
            DomainError::UnknownNode(id) => assert_eq!(id.as_str(), "ghost"),
            other => panic!("expected UnknownNode, got {other:?}"),
        }
    }

    #[test]
    fn test_body_chars_counts_characters_not_bytes() {
        let mut n = node("start", &[], Some("R1"));
        n.body = "déjà vu".to_owned();
        assert_eq!(n.body_chars(), 7);
    }
}
