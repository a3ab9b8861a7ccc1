//! # Content
//!
//! Decoders and renderers for authored content: rich-text documents and
//! the image descriptors embedded in them and in catalog data.

pub mod image;
pub mod richtext;

pub use image::{Breakpoint, ImageError, ImageSource};
pub use richtext::{Marks, Node, RichText, TextLeaf};
