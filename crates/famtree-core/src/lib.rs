pub mod config;
pub mod connector;
pub mod layout;
pub mod member;
pub mod session;
pub mod store;
pub mod tree;
pub mod viewport;

pub use config::{Config, ConfigError, DisplayConfig, LoggingConfig, TreeConfig};
pub use connector::{Connector, ConnectorKind};
pub use layout::{Bounds, DisplayPreset, LayoutMetrics, NodePositions, Point};
pub use member::{Accent, Gender, Member, MemberId, MemberPatch};
pub use session::FamilySession;
pub use store::{FamilyStore, Link, MemberLookup, SymmetryViolation, SEED_ROOT_ID};
pub use tree::{FamilyTreeNode, TreeError};
pub use viewport::{DragState, PointerEvent, PointerSource, RawPointer, Viewport, ZoomSettings};
