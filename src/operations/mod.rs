pub mod outline;
pub mod triangulation;

pub use outline::{OutlineCache, OutlineTessellator, PathSegment, TessellatedOutline, contours_from_path};
