/// Media domain type
use crate::error::{EncoreError, Result};
use crate::types::MediaId;
use serde::{Deserialize, Serialize};
use url::Url;

/// Kind of playable media
///
/// Determines how the rendering layer handles the item (audio element vs video element).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Audio track
    Song,
    /// Music video
    Video,
}

/// One playable unit
///
/// `source_url` is always a fully-qualified URL: constructors and deserialization
/// both reject relative locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMediaItem")]
pub struct MediaItem {
    /// Song or video
    pub kind: MediaKind,

    /// Identifier, unique within `kind`
    pub id: MediaId,

    /// Absolute location of the media bytes
    pub source_url: Url,

    /// Display title
    pub title: String,

    /// Display artist name
    pub artist_name: String,

    /// Absolute location of the artwork image, if any
    pub artwork_url: Option<Url>,
}

impl MediaItem {
    /// Create a media item from an absolute source URL
    ///
    /// # Errors
    /// Returns an error if `source_url` is relative or cannot serve as a media location
    pub fn new(
        kind: MediaKind,
        id: impl Into<MediaId>,
        source_url: &str,
        title: impl Into<String>,
        artist_name: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            kind,
            id: id.into(),
            source_url: parse_absolute(source_url)?,
            title: title.into(),
            artist_name: artist_name.into(),
            artwork_url: None,
        })
    }

    /// Attach an artwork location
    ///
    /// # Errors
    /// Returns an error if `artwork_url` is relative
    pub fn with_artwork(mut self, artwork_url: &str) -> Result<Self> {
        self.artwork_url = Some(parse_absolute(artwork_url)?);
        Ok(self)
    }

    /// Whether both items refer to the same media (same kind and id)
    ///
    /// Display fields are ignored, so a re-fetched item with an updated title
    /// still matches its queued copy.
    pub fn same_media(&self, other: &MediaItem) -> bool {
        self.kind == other.kind && self.id == other.id
    }
}

fn parse_absolute(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(EncoreError::NotAbsolute(raw.to_string()));
    }
    Ok(url)
}

#[derive(Deserialize)]
struct RawMediaItem {
    kind: MediaKind,
    id: MediaId,
    source_url: String,
    title: String,
    artist_name: String,
    #[serde(default)]
    artwork_url: Option<String>,
}

impl TryFrom<RawMediaItem> for MediaItem {
    type Error = EncoreError;

    fn try_from(raw: RawMediaItem) -> Result<Self> {
        let item = MediaItem::new(
            raw.kind,
            raw.id,
            &raw.source_url,
            raw.title,
            raw.artist_name,
        )?;
        match raw.artwork_url {
            Some(artwork) => item.with_artwork(&artwork),
            None => Ok(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str) -> MediaItem {
        MediaItem::new(
            MediaKind::Song,
            id,
            &format!("https://cdn.example.com/{}.mp3", id),
            "Title",
            "Artist",
        )
        .unwrap()
    }

    #[test]
    fn rejects_relative_source() {
        let result = MediaItem::new(MediaKind::Song, "a", "/uploads/a.mp3", "T", "A");
        assert!(matches!(result, Err(EncoreError::InvalidUrl(_))));
    }

    #[test]
    fn rejects_non_base_source() {
        let result = MediaItem::new(MediaKind::Video, "a", "mailto:someone@example.com", "T", "A");
        assert!(matches!(result, Err(EncoreError::NotAbsolute(_))));
    }

    #[test]
    fn artwork_must_be_absolute() {
        assert!(song("a").with_artwork("cover.jpg").is_err());
        let item = song("a").with_artwork("https://cdn.example.com/a.jpg").unwrap();
        assert_eq!(
            item.artwork_url.unwrap().as_str(),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn same_media_ignores_display_fields() {
        let a = song("a");
        let mut renamed = a.clone();
        renamed.title = "Renamed".to_string();
        assert!(a.same_media(&renamed));
        assert_ne!(a, renamed);

        let mut video = a.clone();
        video.kind = MediaKind::Video;
        assert!(!a.same_media(&video));
    }

    #[test]
    fn deserialization_validates_urls() {
        let ok = serde_json::json!({
            "kind": "video",
            "id": "v1",
            "source_url": "https://cdn.example.com/v1.mp4",
            "title": "Clip",
            "artist_name": "Band"
        });
        let item: MediaItem = serde_json::from_value(ok).unwrap();
        assert_eq!(item.kind, MediaKind::Video);

        let bad = serde_json::json!({
            "kind": "song",
            "id": "s1",
            "source_url": "songs/s1.mp3",
            "title": "Song",
            "artist_name": "Band"
        });
        assert!(serde_json::from_value::<MediaItem>(bad).is_err());
    }
}
