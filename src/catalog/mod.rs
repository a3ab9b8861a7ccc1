pub mod source;
pub mod store;
pub mod types;

pub use source::{CatalogSource, FetchError, HttpSource};
pub use store::{CatalogStore, DataUrls, Resource};
pub use types::{
    CategoriesDoc, Category, HeaderPage, HomePage, Localized, PageMeta, Price, Product,
    ProductsDoc, SocialLink,
};
