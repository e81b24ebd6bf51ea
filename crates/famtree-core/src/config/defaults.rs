//! Default values for famtree configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Layout Defaults
// ============================================================================

/// Containers narrower than this use the touch preset.
pub const TOUCH_BREAKPOINT_WIDTH: f64 = 768.0;

/// Desktop distance between neighbouring siblings.
pub const DEFAULT_DESKTOP_HORIZONTAL_SPACING: f64 = 200.0;
/// Desktop height of one generation band.
pub const DEFAULT_DESKTOP_VERTICAL_SPACING: f64 = 150.0;
pub const DEFAULT_DESKTOP_NODE_WIDTH: f64 = 120.0;
pub const DEFAULT_DESKTOP_NODE_HEIGHT: f64 = 150.0;

/// Touch distance between neighbouring siblings.
pub const DEFAULT_TOUCH_HORIZONTAL_SPACING: f64 = 150.0;
/// Touch height of one generation band.
pub const DEFAULT_TOUCH_VERTICAL_SPACING: f64 = 120.0;
pub const DEFAULT_TOUCH_NODE_WIDTH: f64 = 90.0;
pub const DEFAULT_TOUCH_NODE_HEIGHT: f64 = 120.0;

// ============================================================================
// Viewport Defaults
// ============================================================================

/// Zoom change per zoom-in/zoom-out step.
pub const DEFAULT_ZOOM_STEP: f64 = 0.1;

// Desktop
pub const DEFAULT_DESKTOP_SCALE: f64 = 1.0;
pub const DEFAULT_DESKTOP_MIN_SCALE: f64 = 0.4;
pub const DEFAULT_DESKTOP_MAX_SCALE: f64 = 2.0;
/// Vertical pan offset after a desktop view reset.
pub const DEFAULT_DESKTOP_RESET_TOP: f64 = 100.0;

// Touch
pub const DEFAULT_TOUCH_SCALE: f64 = 0.8;
pub const DEFAULT_TOUCH_MIN_SCALE: f64 = 0.3;
pub const DEFAULT_TOUCH_MAX_SCALE: f64 = 1.8;
/// Vertical pan offset after a touch view reset.
pub const DEFAULT_TOUCH_RESET_TOP: f64 = 80.0;

// ============================================================================
// Tree Defaults
// ============================================================================

/// Deepest generation the tree builder will expand before giving up.
pub const DEFAULT_MAX_TREE_DEPTH: usize = 200;

/// Upper bound for `tree.max_depth`. Building, layout and connector routing
/// recurse once per generation, so deeper limits could exhaust the stack.
pub const MAX_TREE_DEPTH_LIMIT: usize = 512;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Default tracing filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// File Locations
// ============================================================================

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "famtree.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "famtree";

/// File name inside [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";
