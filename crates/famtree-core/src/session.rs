//! Family session: the single owner of family data and its derived views.
//!
//! Every mutation goes through the session, which rebuilds the tree and the
//! node positions in full afterwards. Front-ends read the derived state and
//! forward pointer, zoom and selection input back here.

use std::fmt;

use tracing::{debug, info, warn};

use crate::config::{Config, DisplayConfig};
use crate::connector::{self, Connector};
use crate::layout::{layout, DisplayPreset, LayoutMetrics, NodePositions, Point};
use crate::member::{Gender, Member, MemberId, MemberPatch};
use crate::store::FamilyStore;
use crate::tree::{FamilyTreeNode, TreeError};
use crate::viewport::{PointerEvent, RawPointer, Viewport};

/// Callback invoked when a member is selected.
pub type SelectHandler = Box<dyn FnMut(&MemberId)>;

/// Family data plus everything derived from it for display.
pub struct FamilySession {
    store: FamilyStore,
    display: DisplayConfig,
    preset: DisplayPreset,
    metrics: LayoutMetrics,
    max_depth: usize,
    viewport: Viewport,
    tree: Option<FamilyTreeNode>,
    positions: NodePositions,
    tree_error: Option<TreeError>,
    selected: Option<MemberId>,
    on_select: Option<SelectHandler>,
}

impl FamilySession {
    /// Creates a session over `store`.
    ///
    /// A configured root overrides the store's own root when it resolves.
    pub fn new(mut store: FamilyStore, config: &Config) -> Self {
        if let Some(root) = config.tree.root.as_deref() {
            if !store.set_root(&MemberId::from(root)) {
                warn!(root, "configured root not found, keeping data set root");
            }
        }

        let preset = config.display.preset;
        let mut session = Self {
            store,
            display: config.display.clone(),
            preset,
            metrics: config.display.metrics_for(preset),
            max_depth: config.tree.max_depth,
            viewport: Viewport::new(config.display.zoom_for(preset)),
            tree: None,
            positions: NodePositions::default(),
            tree_error: None,
            selected: None,
            on_select: None,
        };
        session.rebuild();
        session
    }

    /// A session over the built-in seed family.
    pub fn seeded(config: &Config) -> Self {
        Self::new(FamilyStore::seeded(), config)
    }

    pub fn store(&self) -> &FamilyStore {
        &self.store
    }

    pub fn preset(&self) -> DisplayPreset {
        self.preset
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Switches display preset: spacing, node size and zoom range change,
    /// the current pan is kept.
    pub fn set_preset(&mut self, preset: DisplayPreset) {
        if preset == self.preset {
            return;
        }
        self.preset = preset;
        self.metrics = self.display.metrics_for(preset);
        self.viewport
            .set_zoom_settings(self.display.zoom_for(preset));
        info!(preset = preset.display_name(), "display preset changed");
        self.rebuild();
    }

    // --- Mutations -------------------------------------------------------

    /// Adds a member. The first member added to an empty session becomes
    /// the root.
    pub fn add(&mut self, member: Member) -> bool {
        let id = member.id.clone();
        if !self.store.add(member) {
            return false;
        }
        if self.store.root_id().is_none() {
            self.store.set_root(&id);
        }
        self.rebuild();
        true
    }

    /// Adds a new child under `parent_id`, returning the generated id.
    pub fn add_child(
        &mut self,
        parent_id: &MemberId,
        name: impl Into<String>,
        gender: Gender,
    ) -> Option<MemberId> {
        if !self.store.contains(parent_id) {
            return None;
        }
        let child = Member::new(name, gender).with_parents([parent_id.clone()]);
        let id = child.id.clone();
        self.add(child).then_some(id)
    }

    /// Adds a new spouse of `member_id`, returning the generated id.
    pub fn add_spouse(
        &mut self,
        member_id: &MemberId,
        name: impl Into<String>,
        gender: Gender,
    ) -> Option<MemberId> {
        if !self.store.contains(member_id) {
            return None;
        }
        let spouse = Member::new(name, gender).with_spouses([member_id.clone()]);
        let id = spouse.id.clone();
        self.add(spouse).then_some(id)
    }

    pub fn update(&mut self, id: &MemberId, patch: MemberPatch) -> bool {
        let updated = self.store.update(id, patch);
        if updated {
            self.rebuild();
        }
        updated
    }

    /// Deletes a member, clearing the selection if it pointed at it.
    pub fn delete(&mut self, id: &MemberId) -> Option<Member> {
        let removed = self.store.delete(id)?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.rebuild();
        Some(removed)
    }

    pub fn set_root(&mut self, id: &MemberId) -> bool {
        let changed = self.store.set_root(id);
        if changed {
            self.rebuild();
        }
        changed
    }

    // --- Derived state ---------------------------------------------------

    /// The current tree, `None` when there is no root or the build failed.
    pub fn tree(&self) -> Option<&FamilyTreeNode> {
        self.tree.as_ref()
    }

    pub fn positions(&self) -> &NodePositions {
        &self.positions
    }

    /// Structural error from the last rebuild, if any.
    pub fn tree_error(&self) -> Option<&TreeError> {
        self.tree_error.as_ref()
    }

    /// Connectors of the current tree in world space.
    pub fn connectors(&self) -> Vec<Connector> {
        match &self.tree {
            Some(tree) => connector::route(tree, &self.positions, &self.metrics),
            None => Vec::new(),
        }
    }

    /// Connectors of the current tree under the viewport transform.
    pub fn screen_connectors(&self) -> Vec<Connector> {
        match &self.tree {
            Some(tree) => {
                connector::route_on_screen(tree, &self.positions, &self.metrics, &self.viewport)
            }
            None => Vec::new(),
        }
    }

    // --- Viewport --------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Feeds raw mouse or touch input to the viewport.
    pub fn pointer(&mut self, raw: &RawPointer) -> bool {
        self.viewport.handle_raw(raw)
    }

    /// Feeds an already normalized pointer event to the viewport.
    pub fn pointer_event(&mut self, event: PointerEvent) -> bool {
        self.viewport.handle(event)
    }

    pub fn pan_by(&mut self, delta: Point) {
        self.viewport.pan_by(delta);
    }

    pub fn on_zoom_in(&mut self) -> f64 {
        self.viewport.zoom_in()
    }

    pub fn on_zoom_out(&mut self) -> f64 {
        self.viewport.zoom_out()
    }

    pub fn on_reset_view(&mut self, container_width: f64) {
        self.viewport.reset(container_width);
    }

    /// Member under a screen point.
    pub fn member_at(&self, screen: Point) -> Option<&MemberId> {
        self.viewport
            .hit_test(&self.positions, &self.metrics, screen)
    }

    // --- Selection -------------------------------------------------------

    /// Registers the selection callback, replacing any previous one.
    pub fn set_select_handler(&mut self, handler: impl FnMut(&MemberId) + 'static) {
        self.on_select = Some(Box::new(handler));
    }

    /// Selects a member and notifies the registered callback.
    ///
    /// Unknown ids are ignored.
    pub fn on_select_member(&mut self, id: &MemberId) -> bool {
        if !self.store.contains(id) {
            debug!(%id, "selection ignored: unknown member");
            return false;
        }
        self.selected = Some(id.clone());
        if let Some(handler) = self.on_select.as_mut() {
            handler(id);
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected member, if it still exists.
    pub fn selected(&self) -> Option<&Member> {
        self.selected
            .as_ref()
            .and_then(|id| self.store.get_by_id(id))
    }

    /// Replaces the derived tree and positions from the store.
    fn rebuild(&mut self) {
        self.tree = None;
        self.tree_error = None;
        self.positions = NodePositions::default();

        let Some(root) = self.store.root_id().cloned() else {
            debug!("no root, tree cleared");
            return;
        };

        match self.store.build_tree(&root, self.max_depth) {
            Ok(tree) => {
                if let Some(tree) = &tree {
                    self.positions = layout(tree, &self.metrics);
                }
                self.tree = tree;
            }
            Err(err) => {
                warn!(%err, "tree rebuild failed");
                self.tree_error = Some(err);
            }
        }
        debug!(%root, nodes = self.positions.len(), "tree rebuilt");
    }
}

impl fmt::Debug for FamilySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FamilySession")
            .field("members", &self.store.len())
            .field("root", &self.store.root_id())
            .field("preset", &self.preset)
            .field("nodes", &self.positions.len())
            .field("tree_error", &self.tree_error)
            .field("selected", &self.selected)
            .finish()
    }
}
