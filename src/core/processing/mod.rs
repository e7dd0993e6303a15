pub mod alpha;
pub mod background;
pub mod canvas;
pub mod crop;
pub mod overlay;
pub mod pipeline;
pub mod resize;
pub mod segment;
pub mod slice;
