//! Visual node tree produced by scenes, and its SVG form.

pub mod icons;
pub mod node;
pub mod svg;
pub mod text;

pub use icons::Icon;
pub use node::{FontFamily, ImageSource, Node, TextAnchor};
pub use svg::{ImageResolver, NoImages, to_svg};
