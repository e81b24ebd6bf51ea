//! Connector routing.
//!
//! Orthogonal "T" routing between a parent and its children: a vertical drop
//! out of the parent, a horizontal bridge spanning the first to the last
//! child at mid-level, and a vertical drop into each child. Connectors are
//! derived from node positions on demand and hold no state of their own.

use serde::Serialize;

use crate::layout::{LayoutMetrics, NodePositions, Point};
use crate::member::{Gender, MemberId};
use crate::tree::FamilyTreeNode;
use crate::viewport::Viewport;

/// Role of a connector segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    /// Parent's lower edge down to the bridge level
    ParentDrop,
    /// Horizontal line joining the first and last child
    SiblingBridge,
    /// Bridge level down into a child's top edge
    ChildDrop,
}

/// One straight connector segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub kind: ConnectorKind,
    pub from: Point,
    pub to: Point,
    /// Gender whose accent colours the segment
    pub gender: Gender,
    pub parent: MemberId,
    /// Set on child drops only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Option<MemberId>,
}

impl Connector {
    /// The same segment under the viewport transform.
    pub fn project(&self, viewport: &Viewport) -> Connector {
        Connector {
            from: viewport.to_screen(self.from),
            to: viewport.to_screen(self.to),
            ..self.clone()
        }
    }

    /// SVG path data for the segment, e.g. `M0,75 L0,112.5`.
    pub fn svg_path(&self) -> String {
        format!(
            "M{},{} L{},{}",
            self.from.x, self.from.y, self.to.x, self.to.y
        )
    }

    pub fn is_vertical(&self) -> bool {
        self.from.x == self.to.x
    }
}

/// Routes every parent-child link of `tree` in world space.
///
/// Links whose endpoints have no position are skipped.
pub fn route(
    tree: &FamilyTreeNode,
    positions: &NodePositions,
    metrics: &LayoutMetrics,
) -> Vec<Connector> {
    let mut out = Vec::new();
    route_node(tree, positions, metrics, &mut out);
    out
}

/// Routes the tree and projects it to screen space.
pub fn route_on_screen(
    tree: &FamilyTreeNode,
    positions: &NodePositions,
    metrics: &LayoutMetrics,
    viewport: &Viewport,
) -> Vec<Connector> {
    route(tree, positions, metrics)
        .iter()
        .map(|connector| connector.project(viewport))
        .collect()
}

fn route_node(
    node: &FamilyTreeNode,
    positions: &NodePositions,
    metrics: &LayoutMetrics,
    out: &mut Vec<Connector>,
) {
    let Some(parent_pos) = positions.get(node.id()) else {
        return;
    };
    let placed: Vec<(&FamilyTreeNode, Point)> = node
        .children
        .iter()
        .filter_map(|child| positions.get(child.id()).map(|p| (child, p)))
        .collect();

    if let Some(&(_, first)) = placed.first() {
        let from = Point::new(parent_pos.x, parent_pos.y + metrics.node_height / 2.0);
        let mid_y = from.y + (first.y - from.y) / 2.0;
        let parent = node.id().clone();
        let gender = node.member.gender;

        out.push(Connector {
            kind: ConnectorKind::ParentDrop,
            from,
            to: Point::new(from.x, mid_y),
            gender,
            parent: parent.clone(),
            child: None,
        });

        if node.children.len() > 1 {
            if let Some(&(_, last)) = placed.last() {
                out.push(Connector {
                    kind: ConnectorKind::SiblingBridge,
                    from: Point::new(first.x, mid_y),
                    to: Point::new(last.x, mid_y),
                    gender,
                    parent: parent.clone(),
                    child: None,
                });
            }
        }

        for (child, child_pos) in &placed {
            out.push(Connector {
                kind: ConnectorKind::ChildDrop,
                from: Point::new(child_pos.x, mid_y),
                to: *child_pos,
                gender: child.member.gender,
                parent: parent.clone(),
                child: Some(child.id().clone()),
            });
        }
    }

    for child in &node.children {
        route_node(child, positions, metrics, out);
    }
}
