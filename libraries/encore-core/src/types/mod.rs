mod ids;
mod media;

pub use ids::MediaId;
pub use media::{MediaItem, MediaKind};
