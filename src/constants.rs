//! Scene-wide constants and default values
//!
//! Centralized location for the fixed geometry used by the port layout,
//! containment and routing code. Runtime-tunable values are mirrored in
//! [`crate::config::SceneConfig`], which takes its defaults from here.

/// Port glyph and connector stub geometry
pub mod port {
    /// Diameter of a port circle
    pub const SIZE: f32 = 16.0;

    /// Radius of a port circle
    pub const RADIUS: f32 = SIZE / 2.0;

    /// Horizontal inset of the first and last port in vertical mode
    pub const VERTICAL_MARGIN: f32 = 20.0;

    /// Offset of the stub start relative to the node's bottom edge (vertical mode)
    pub const VERTICAL_STUB_OFFSET: f32 = -10.0;

    /// Length of the stub line in vertical mode
    pub const VERTICAL_STUB_LENGTH: f32 = 30.0;

    /// Fan radius in horizontal mode
    pub const FAN_RADIUS: f32 = 80.0;

    /// Angle between neighbouring fan ports, in degrees
    pub const FAN_ANGLE_STEP_DEG: f32 = 20.0;
}

/// Default and minimum node sizes per kind, as `[width, height]`
pub mod node {
    pub const TEXT_DEFAULT_SIZE: [f32; 2] = [200.0, 100.0];
    pub const TEXT_MIN_SIZE: [f32; 2] = [200.0, 100.0];

    pub const CAPABILITY_DEFAULT_SIZE: [f32; 2] = [350.0, 50.0];
    pub const CAPABILITY_MIN_SIZE: [f32; 2] = [350.0, 50.0];

    pub const CONTAINER_DEFAULT_SIZE: [f32; 2] = [400.0, 300.0];
    pub const CONTAINER_MIN_SIZE: [f32; 2] = [200.0, 150.0];
}

/// Container interior insets
pub mod container {
    /// Inset on the left, right and bottom sides
    pub const MARGIN: f32 = 10.0;

    /// Inset on the top side, clearing the container header
    pub const HEADER: f32 = 40.0;
}

/// Edge routing defaults
pub mod routing {
    /// Name of the orthogonal router edges are drawn with
    pub const ROUTER: &str = "manhattan";

    /// Clearance the router keeps around node bodies
    pub const PADDING: f32 = 20.0;
}

/// Connection drag constants
pub mod snap {
    /// Distance within which a dragged connection snaps onto a port
    pub const RADIUS: f32 = 20.0;
}
