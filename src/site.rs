//! Site-wide copy and metadata, read from `site.toml`.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct SiteConfig {
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    pub hero: Hero,
    pub about: About,
    #[serde(default)]
    pub services: Vec<Service>,
    pub footer: Footer,
    pub seo: Seo,
    pub contact: ContactPage,
    pub navigation: Navigation,
}

impl SiteConfig {
    /// Initials of the site owner, used by the logo mark.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn page_title(&self, page: &str) -> String {
        format!("{} - {}", page, self.name)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
    pub primary_cta: String,
    pub secondary_cta: String,
    #[serde(default)]
    pub background_image: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct About {
    pub headline: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Service {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Footer {
    /// Rendered after "© {year} ".
    pub copyright: String,
    #[serde(default)]
    pub links: Vec<NavLink>,
    pub newsletter: Newsletter,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Newsletter {
    pub title: String,
    pub description: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Seo {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default = "default_twitter_card")]
    pub twitter_card: String,
    #[serde(default)]
    pub theme_color: Option<String>,
}

fn default_twitter_card() -> String {
    "summary_large_image".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct ContactPage {
    pub title: String,
    pub description: String,
    pub form: FormSchema,
    #[serde(default)]
    pub info: Vec<InfoItem>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FormSchema {
    pub fields: Vec<FormField>,
    pub submit_text: String,
    pub success_message: String,
    pub error_message: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Textarea,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct InfoItem {
    #[serde(default)]
    pub icon: String,
    pub label: String,
    pub value: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NavLink {
    pub text: String,
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Navigation {
    pub main: Vec<NavLink>,
    pub mobile: Vec<NavLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_site_config_parses() {
        let site: SiteConfig = toml::from_str(include_str!("../content/site.toml")).unwrap();
        assert_eq!(site.contact.form.fields.len(), 4);
        assert!(site.contact.form.fields.iter().all(|f| f.required));
        assert_eq!(site.navigation.mobile.len(), 4);
        assert!(!site.seo.keywords.is_empty());
    }

    #[test]
    fn initials_from_name() {
        let mut site: SiteConfig = toml::from_str(include_str!("../content/site.toml")).unwrap();
        site.name = "ada king lovelace".to_string();
        assert_eq!(site.initials(), "AKL");
    }
}
