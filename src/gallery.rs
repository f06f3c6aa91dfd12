use std::collections::BTreeSet;

use crate::models::Photo;

pub const ALL_TAG: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFilter {
    All,
    Tag(String),
}

impl TagFilter {
    /// Absent, blank and "All" all mean no filtering.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") | Some(ALL_TAG) => TagFilter::All,
            Some(tag) => TagFilter::Tag(tag.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TagFilter::All => ALL_TAG,
            TagFilter::Tag(tag) => tag,
        }
    }

    pub fn matches(&self, photo: &Photo) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => photo.tags.iter().any(|t| t == tag),
        }
    }
}

/// Photos passing `filter`, newest first.
pub fn filter_photos<'a>(photos: &'a [Photo], filter: &TagFilter) -> Vec<&'a Photo> {
    let mut filtered: Vec<&Photo> = photos.iter().filter(|p| filter.matches(p)).collect();
    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered
}

/// Filter chip labels: "All" then every distinct tag, sorted.
pub fn filter_labels(photos: &[Photo]) -> Vec<String> {
    let tags: BTreeSet<&str> = photos
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .collect();
    std::iter::once(ALL_TAG)
        .chain(tags)
        .map(str::to_string)
        .collect()
}

/// Case-insensitive match on title, caption, location and tags.
pub fn matches_query(photo: &Photo, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || photo.title.to_lowercase().contains(&needle)
        || photo.caption.to_lowercase().contains(&needle)
        || photo.location.to_lowercase().contains(&needle)
        || photo.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

/// "f/8 • 1/125s • ISO 200 • 24mm", skipping blank settings.
pub fn format_exif(photo: &Photo) -> String {
    let s = &photo.settings;
    let iso = (!s.iso.is_empty()).then(|| format!("ISO {}", s.iso));
    [
        Some(s.aperture.clone()),
        Some(s.shutter.clone()),
        iso,
        Some(s.focal_length.clone()),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" • ")
}

/// Open lightbox over a filtered set of `len` photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lightbox {
    index: usize,
    len: usize,
}

impl Lightbox {
    /// Returns `None` for an empty set or an out-of-range index.
    pub fn open(index: usize, len: usize) -> Option<Self> {
        (index < len).then_some(Self { index, len })
    }

    /// Opens on the photo with `id`, if it is part of `filtered`.
    pub fn open_on(filtered: &[&Photo], id: &str) -> Option<Self> {
        let index = filtered.iter().position(|p| p.id == id)?;
        Self::open(index, filtered.len())
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(self) -> Self {
        Self {
            index: (self.index + 1) % self.len,
            ..self
        }
    }

    pub fn previous(self) -> Self {
        Self {
            index: (self.index + self.len - 1) % self.len,
            ..self
        }
    }

    /// Applies a key press; `None` means the lightbox closed.
    pub fn handle(self, action: KeyAction) -> Option<Self> {
        match action {
            KeyAction::Close => None,
            KeyAction::Previous => Some(self.previous()),
            KeyAction::Next => Some(self.next()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Close,
    Previous,
    Next,
}

impl KeyAction {
    pub const BINDINGS: [(&'static str, KeyAction); 3] = [
        ("Escape", KeyAction::Close),
        ("ArrowLeft", KeyAction::Previous),
        ("ArrowRight", KeyAction::Next),
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::BINDINGS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, action)| *action)
    }

    /// Name used for the lightbox link this action follows.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyAction::Close => "close",
            KeyAction::Previous => "prev",
            KeyAction::Next => "next",
        }
    }
}
