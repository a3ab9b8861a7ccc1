//! Image descriptor decoding and rendering.
//!
//! Image payloads arrive in a few shapes: a single file, a file with a
//! per-breakpoint `sizes` record, or either of those wrapped one level down
//! in an `image` field. [`ImageSource::from_payload`] settles the shape once
//! at ingestion so rendering never has to sniff JSON again.
//!
//! Catalog documents ingest leniently: a payload with no image data becomes
//! [`ImageSource::Invalid`] so one bad image cannot fail the whole document.
//! The violation is reported when that image is rendered.

use std::fmt;

use log::error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::view::markup::{Element, Markup};

/// Cascading `sizes` rule set, smallest width first, largest as the default.
pub const SIZES_ATTR: &str = "(max-width: 640px) 640px, (max-width: 768px) 768px, \
    (max-width: 1024px) 1024px, (max-width: 1366px) 1366px, (max-width: 1600px) 1600px, 1920px";

/// Named image resolution tiers, widest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    W1920,
    W1600,
    W1366,
    W1024,
    W768,
    W640,
}

impl Breakpoint {
    /// All breakpoints in `srcset` order (descending width).
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::W1920,
        Breakpoint::W1600,
        Breakpoint::W1366,
        Breakpoint::W1024,
        Breakpoint::W768,
        Breakpoint::W640,
    ];

    pub fn width(self) -> u32 {
        match self {
            Breakpoint::W1920 => 1920,
            Breakpoint::W1600 => 1600,
            Breakpoint::W1366 => 1366,
            Breakpoint::W1024 => 1024,
            Breakpoint::W768 => 768,
            Breakpoint::W640 => 640,
        }
    }

    /// Key of this breakpoint inside a payload's `sizes` record.
    pub fn key(self) -> &'static str {
        match self {
            Breakpoint::W1920 => "img1920",
            Breakpoint::W1600 => "img1600",
            Breakpoint::W1366 => "img1366",
            Breakpoint::W1024 => "img1024",
            Breakpoint::W768 => "img768",
            Breakpoint::W640 => "img640",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Single {
        filename: String,
        alt: Option<String>,
    },
    Responsive {
        /// Original upload, listed last in `srcset` without a width.
        filename: Option<String>,
        /// Non-empty breakpoint variants in descending width order.
        variants: Vec<(Breakpoint, String)>,
        alt: Option<String>,
    },
    /// Payload that violated the image contract, kept for reporting.
    Invalid(ImageError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Payload has neither usable size data nor a filename. Carries the JSON dump.
    MissingImageData(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::MissingImageData(payload) => {
                write!(f, "{payload} does not contain image properties")
            }
        }
    }
}

impl std::error::Error for ImageError {}

fn non_null<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn string_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl ImageSource {
    /// Decodes an image payload, unwrapping a nested `image` reference when
    /// the outer object carries no size data.
    pub fn from_payload(payload: &Value) -> Result<ImageSource, ImageError> {
        let mut obj = payload;
        if non_null(obj, "sizes").is_none()
            && let Some(inner) = non_null(obj, "image")
        {
            obj = inner;
        }

        let filename = string_field(obj, "filename");
        let alt = string_field(obj, "alt");

        if let Some(sizes) = non_null(obj, "sizes") {
            let variants: Vec<(Breakpoint, String)> = Breakpoint::ALL
                .iter()
                .filter_map(|bp| {
                    sizes
                        .get(bp.key())
                        .and_then(|record| string_field(record, "filename"))
                        .map(|file| (*bp, file))
                })
                .collect();
            if variants.is_empty() && filename.is_none() {
                return Err(ImageError::MissingImageData(payload.to_string()));
            }
            return Ok(ImageSource::Responsive {
                filename,
                variants,
                alt,
            });
        }

        match filename {
            Some(filename) => Ok(ImageSource::Single { filename, alt }),
            None => Err(ImageError::MissingImageData(payload.to_string())),
        }
    }

    /// Like [`from_payload`](Self::from_payload), but keeps a contract
    /// violation as [`ImageSource::Invalid`] instead of failing.
    pub fn ingest(payload: &Value) -> ImageSource {
        ImageSource::from_payload(payload).unwrap_or_else(ImageSource::Invalid)
    }

    pub fn error(&self) -> Option<&ImageError> {
        match self {
            ImageSource::Invalid(e) => Some(e),
            _ => None,
        }
    }

    /// Builds the `srcset` value; `None` for single-file and invalid images.
    pub fn srcset(&self, base_dir: &str) -> Option<String> {
        match self {
            ImageSource::Single { .. } | ImageSource::Invalid(_) => None,
            ImageSource::Responsive {
                filename, variants, ..
            } => {
                let mut entries: Vec<String> = variants
                    .iter()
                    .map(|(bp, file)| format!("{base_dir}{file} {}w", bp.width()))
                    .collect();
                if let Some(original) = filename {
                    entries.push(format!("{base_dir}{original}"));
                }
                Some(entries.join(", "))
            }
        }
    }

    pub fn to_markup(&self, base_dir: &str) -> Markup {
        match self {
            ImageSource::Single { filename, alt } => Element::new("img")
                .attr("src", format!("{base_dir}{filename}"))
                .attr_opt("alt", alt.clone())
                .into(),
            ImageSource::Responsive { alt, .. } => Element::new("img")
                .attr("srcset", self.srcset(base_dir).unwrap_or_default())
                .attr("sizes", SIZES_ATTR)
                .attr_opt("alt", alt.clone())
                .into(),
            ImageSource::Invalid(e) => {
                error!("Skipping image: {}", e);
                Markup::empty()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ImageSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(ImageSource::ingest(&value))
    }
}

/// Renders a decoded image as an `<img>` element string.
pub fn render(image: &ImageSource, base_dir: &str) -> String {
    image.to_markup(base_dir).to_html()
}

/// Decodes and renders a raw payload in one step.
pub fn render_payload(payload: &Value, base_dir: &str) -> Result<String, ImageError> {
    let image = ImageSource::from_payload(payload)?;
    Ok(render(&image, base_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_srcset_skips_empty_breakpoints() {
        let payload = json!({
            "sizes": {
                "img1920": { "filename": "a.jpg" },
                "img1600": {},
                "img1366": {},
                "img1024": { "filename": "c.jpg" },
                "img768": {},
                "img640": {}
            },
            "filename": "orig.jpg"
        });
        let html = render_payload(&payload, "/img/").unwrap();
        assert!(html.contains("/img/a.jpg 1920w"));
        assert!(!html.contains("1600w"));
        assert!(html.contains(r#"srcset="/img/a.jpg 1920w, /img/c.jpg 1024w, /img/orig.jpg""#));
        assert!(html.contains(SIZES_ATTR));
    }

    #[test]
    fn test_srcset_ends_with_unqualified_original() {
        let image = ImageSource::from_payload(&json!({
            "sizes": { "img640": { "filename": "s.jpg" } },
            "filename": "orig.jpg"
        }))
        .unwrap();
        let srcset = image.srcset("").unwrap();
        assert!(srcset.ends_with("orig.jpg"));
        assert!(!srcset.ends_with(", "));
    }

    #[test]
    fn test_single_file_renders_src() {
        let html = render_payload(&json!({ "filename": "one.png" }), "/assets/img/").unwrap();
        assert_eq!(html, r#"<img src="/assets/img/one.png">"#);
    }

    #[test]
    fn test_nested_image_reference_is_unwrapped() {
        let image = ImageSource::from_payload(&json!({
            "href": "https://example.com",
            "image": { "filename": "logo.svg", "alt": "logo" }
        }))
        .unwrap();
        assert_eq!(
            image,
            ImageSource::Single {
                filename: "logo.svg".into(),
                alt: Some("logo".into())
            }
        );
    }

    #[test]
    fn test_outer_sizes_wins_over_nested_image() {
        let image = ImageSource::from_payload(&json!({
            "sizes": { "img768": { "filename": "m.jpg" } },
            "filename": "outer.jpg",
            "image": { "filename": "inner.jpg" }
        }))
        .unwrap();
        assert!(matches!(image, ImageSource::Responsive { ref filename, .. } if filename.as_deref() == Some("outer.jpg")));
    }

    #[test]
    fn test_empty_payload_is_contract_violation() {
        let err = render_payload(&json!({}), "/img/").unwrap_err();
        assert_eq!(err, ImageError::MissingImageData("{}".to_string()));
        assert!(err.to_string().contains("does not contain image properties"));
    }

    #[test]
    fn test_sizes_without_any_file_is_contract_violation() {
        let payload = json!({
            "sizes": { "img1920": {}, "img1024": { "filename": "" }, "img640": {} },
            "alt": "nothing here"
        });
        assert!(matches!(
            ImageSource::from_payload(&payload),
            Err(ImageError::MissingImageData(_))
        ));
        assert!(render_payload(&payload, "/img/").is_err());
    }

    #[test]
    fn test_sizes_with_only_original_still_renders() {
        let image = ImageSource::from_payload(&json!({
            "sizes": { "img1920": {} },
            "filename": "orig.jpg"
        }))
        .unwrap();
        assert_eq!(image.srcset("/img/").as_deref(), Some("/img/orig.jpg"));
    }

    #[test]
    fn test_deserialize_keeps_shapeless_payload_as_invalid() {
        let image: ImageSource = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert!(matches!(image.error(), Some(ImageError::MissingImageData(_))));
        assert_eq!(image.to_markup("/img/").to_html(), "");
        assert_eq!(render(&image, "/img/"), "");
    }
}
