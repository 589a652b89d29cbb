//! Reference values from the style specification.
//!
//! Only the specification version is consumed here. Full schema validation
//! lives outside this workspace.

/// The style specification version every merged document must declare.
pub const LATEST_VERSION: u32 = 8;
