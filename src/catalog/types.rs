use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::Language;
use crate::content::{ImageSource, RichText};

/// A document keyed by top-level language code (`{"en": ..., "de": ...}`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Localized<T>(pub HashMap<String, T>);

impl<T> Localized<T> {
    pub fn get(&self, lang: Language) -> Option<&T> {
        self.0.get(lang.key())
    }
}

/// Title and description applied to the document head.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HeaderPage {
    #[serde(default)]
    pub images: Vec<ImageSource>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SocialImage {
    pub filename: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SocialLink {
    pub href: String,
    pub image: SocialImage,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    #[serde(default)]
    pub slideshow_images: Vec<ImageSource>,
    #[serde(default)]
    pub content_rich_text: RichText,
    #[serde(default)]
    pub social_media_images: Vec<SocialLink>,
    #[serde(default)]
    pub page: Option<PageMeta>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryRef {
    pub name: String,
}

/// Prices come either as a number or as a pre-formatted label.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Label(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(v) => write!(f, "{v:.2}"),
            Price::Label(s) => f.write_str(s),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub images: Vec<ImageSource>,
    /// Rich-text description. The field name predates the rich-text format.
    #[serde(rename = "contentHtml", default)]
    pub content: RichText,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProductsDoc {
    #[serde(default)]
    pub docs: Vec<Product>,
    #[serde(default)]
    pub page: Option<PageMeta>,
}

impl ProductsDoc {
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.docs.iter().find(|p| p.id == id)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CategoriesDoc {
    #[serde(default)]
    pub docs: Vec<Category>,
}
