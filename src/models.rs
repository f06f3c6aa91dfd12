use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Date formats accepted in content files: ISO first, then the long form
/// older posts were written with ("Jan 15, 2025").
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y"];

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn de_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("unparseable date {raw:?}")))
}

pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct FrontMatter {
    #[serde(alias = "slug")]
    pub id: String,
    pub title: String,
    pub excerpt: String,
    #[serde(deserialize_with = "de_date")]
    pub date: NaiveDate,
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub external_link: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub preview_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Rendered body; `None` when the post only points elsewhere.
    pub content_html: Option<String>,
    pub external_link: Option<String>,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub author: String,
    pub read_time: String,
    pub featured_image: Option<String>,
    pub preview_image: Option<String>,
}

impl BlogPost {
    pub fn is_external(&self) -> bool {
        self.external_link.is_some()
    }

    /// Where a listing card should send the reader.
    pub fn href(&self) -> String {
        match &self.external_link {
            Some(link) => link.clone(),
            None => format!("/blog/{}", self.id),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ExposureSettings {
    #[serde(default)]
    pub aperture: String,
    #[serde(default)]
    pub shutter: String,
    #[serde(default)]
    pub iso: String,
    #[serde(default)]
    pub focal_length: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub image_url: String,
    pub thumbnail_url: String,
    #[serde(deserialize_with = "de_date")]
    pub date: NaiveDate,
    pub tags: Vec<String>,
    #[serde(default)]
    pub camera: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub settings: ExposureSettings,
}

/// Shape of `photos.toml`.
#[derive(Deserialize, Debug, Default)]
pub struct PhotoFile {
    #[serde(default)]
    pub photos: Vec<Photo>,
}
