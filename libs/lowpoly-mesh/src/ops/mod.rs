//! # Mesh Operations
//!
//! Profile sweeps along paths and flat polygon extrusion.

pub mod extrude;
pub mod sweep;

pub use extrude::{extrude_polygon, Polygon2D, PolygonExtrudeParams};
pub use sweep::{sweep, Cap, PathFrames, SideOrientation, Station, SweepParams};
