//! Node placement.
//!
//! A deliberately simple, deterministic layout: every generation sits on its
//! own horizontal band and every sibling group is spread symmetrically under
//! its parent. There is no collision pass, so wide subtrees can overlap
//! their cousins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_DESKTOP_HORIZONTAL_SPACING, DEFAULT_DESKTOP_NODE_HEIGHT, DEFAULT_DESKTOP_NODE_WIDTH,
    DEFAULT_DESKTOP_VERTICAL_SPACING, DEFAULT_TOUCH_HORIZONTAL_SPACING,
    DEFAULT_TOUCH_NODE_HEIGHT, DEFAULT_TOUCH_NODE_WIDTH, DEFAULT_TOUCH_VERTICAL_SPACING,
    TOUCH_BREAKPOINT_WIDTH,
};
use crate::member::MemberId;
use crate::tree::FamilyTreeNode;

/// A point in world (layout) or screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Target display class. Each one carries its own spacing and zoom presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayPreset {
    #[default]
    Desktop,
    Touch,
}

impl DisplayPreset {
    /// Picks the preset for a container of the given width.
    pub fn for_width(width: f64) -> Self {
        if width < TOUCH_BREAKPOINT_WIDTH {
            DisplayPreset::Touch
        } else {
            DisplayPreset::Desktop
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DisplayPreset::Desktop => "desktop",
            DisplayPreset::Touch => "touch",
        }
    }

    /// Spacing and node size for this preset.
    pub fn metrics(&self) -> LayoutMetrics {
        match self {
            DisplayPreset::Desktop => LayoutMetrics {
                horizontal_spacing: DEFAULT_DESKTOP_HORIZONTAL_SPACING,
                vertical_spacing: DEFAULT_DESKTOP_VERTICAL_SPACING,
                node_width: DEFAULT_DESKTOP_NODE_WIDTH,
                node_height: DEFAULT_DESKTOP_NODE_HEIGHT,
            },
            DisplayPreset::Touch => LayoutMetrics {
                horizontal_spacing: DEFAULT_TOUCH_HORIZONTAL_SPACING,
                vertical_spacing: DEFAULT_TOUCH_VERTICAL_SPACING,
                node_width: DEFAULT_TOUCH_NODE_WIDTH,
                node_height: DEFAULT_TOUCH_NODE_HEIGHT,
            },
        }
    }
}

impl std::str::FromStr for DisplayPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(DisplayPreset::Desktop),
            "touch" | "mobile" => Ok(DisplayPreset::Touch),
            other => Err(format!("unknown display preset '{}'", other)),
        }
    }
}

/// Spacing between nodes and the size of a node box, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Distance between neighbouring siblings
    pub horizontal_spacing: f64,
    /// Height of one generation band
    pub vertical_spacing: f64,
    pub node_width: f64,
    pub node_height: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        DisplayPreset::Desktop.metrics()
    }
}

/// Axis-aligned extent of a layout, node boxes included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Computed position of every member in a tree.
///
/// A node's position is the top-centre of its box. Ids are also kept in
/// depth-first order so renderers draw deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodePositions {
    positions: HashMap<MemberId, Point>,
    order: Vec<MemberId>,
}

impl NodePositions {
    pub fn get(&self, id: &MemberId) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Positions in depth-first order.
    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, Point)> {
        self.order
            .iter()
            .filter_map(|id| self.positions.get(id).map(|p| (id, *p)))
    }

    /// Extent of all node boxes, or `None` for an empty layout.
    pub fn bounds(&self, metrics: &LayoutMetrics) -> Option<Bounds> {
        let half_width = metrics.node_width / 2.0;
        self.iter().fold(None, |acc, (_, p)| {
            let node = Bounds {
                min: Point::new(p.x - half_width, p.y),
                max: Point::new(p.x + half_width, p.y + metrics.node_height),
            };
            Some(match acc {
                None => node,
                Some(b) => Bounds {
                    min: Point::new(b.min.x.min(node.min.x), b.min.y.min(node.min.y)),
                    max: Point::new(b.max.x.max(node.max.x), b.max.y.max(node.max.y)),
                },
            })
        })
    }

    /// Records a position. A member reached again through another path is
    /// moved to the later placement and keeps its first draw slot.
    fn insert(&mut self, id: &MemberId, p: Point) {
        if self.positions.insert(id.clone(), p).is_none() {
            self.order.push(id.clone());
        }
    }
}

/// Lays out a whole tree, root at the origin.
pub fn layout(tree: &FamilyTreeNode, metrics: &LayoutMetrics) -> NodePositions {
    let mut positions = NodePositions::default();
    place(tree, Slot::ROOT, 0.0, metrics, &mut positions);
    positions
}

/// Where a node sits among its siblings.
#[derive(Debug, Clone, Copy)]
struct Slot {
    level: usize,
    index: usize,
    count: usize,
}

impl Slot {
    const ROOT: Slot = Slot {
        level: 0,
        index: 0,
        count: 1,
    };
}

/// Horizontal offset of sibling `index` out of `count` from the parent.
///
/// Offsets are symmetric: three siblings at spacing 200 get -200, 0, +200.
pub fn sibling_offset(index: usize, count: usize, horizontal_spacing: f64) -> f64 {
    (index as f64 - (count as f64 - 1.0) / 2.0) * horizontal_spacing
}

fn place(
    node: &FamilyTreeNode,
    slot: Slot,
    parent_x: f64,
    metrics: &LayoutMetrics,
    out: &mut NodePositions,
) {
    let x = if slot.level == 0 {
        0.0
    } else {
        parent_x + sibling_offset(slot.index, slot.count, metrics.horizontal_spacing)
    };
    let y = slot.level as f64 * metrics.vertical_spacing;
    out.insert(node.id(), Point::new(x, y));

    let count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        let child_slot = Slot {
            level: slot.level + 1,
            index,
            count,
        };
        place(child, child_slot, x, metrics, out);
    }
}
