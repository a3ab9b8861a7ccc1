//! Page templates, one per [`Page`] variant.
//!
//! Templates are synchronous: by the time one runs, the shell has already
//! awaited the route's data. Absent data means "not yet available" and the
//! template returns the loading placeholder instead of failing.

use crate::catalog::{PageMeta, Product};
use crate::content::ImageSource;
use crate::core::route::{Page, RouteEntry};
use crate::core::state::App;
use crate::view::markup::{Element, Markup};

/// Body markup plus optional head metadata for the document.
pub struct PageView {
    pub body: Markup,
    pub meta: Option<PageMeta>,
}

impl PageView {
    fn body(body: impl Into<Markup>) -> Self {
        Self {
            body: body.into(),
            meta: None,
        }
    }

    fn with_meta(mut self, meta: Option<PageMeta>) -> Self {
        self.meta = meta;
        self
    }
}

pub fn loading() -> Markup {
    Element::new("span").text("Loading...").into()
}

pub fn render_page(app: &App, route: &RouteEntry) -> PageView {
    match route.page {
        Page::Home => home(app),
        Page::Shop => shop(app),
        Page::Cart => cart(app),
        Page::Product => product(app),
        Page::NotFound => not_found(app, route),
        Page::Sale | Page::Manufacture | Page::Lookbook | Page::About | Page::Sizes | Page::Agb => {
            PageView::body(Markup::empty())
        }
    }
}

fn images(list: &[ImageSource], img_dir: &str) -> Vec<Markup> {
    list.iter().map(|img| img.to_markup(img_dir)).collect()
}

fn home(app: &App) -> PageView {
    let Some(page) = app.store.home(app.language) else {
        return PageView::body(loading());
    };
    let img_dir = &app.paths.img;

    let gallery = Element::new("un-gallery")
        .attr("arrows", "false")
        .attr("bullets", "true")
        .attr("thumbnails", "0")
        .attr("slide", "true")
        .attr("page", app.router.location())
        .children(images(&page.slideshow_images, img_dir));

    let social = page.social_media_images.iter().map(|link| {
        Element::new("a")
            .attr("href", link.href.clone())
            .child(
                Element::new("img")
                    .attr("src", format!("{img_dir}{}", link.image.filename))
                    .attr_opt("alt", link.image.name.clone()),
            )
            .into()
    });

    let article = Element::new("article")
        .child(Element::new("h1").child(Element::new("a").attr("href", "/shop").text("Onlineshop")))
        .child(
            Element::new("section")
                .attr("class", "rt-content")
                .child(Markup::Raw(page.content_rich_text.render(img_dir))),
        )
        .child(
            Element::new("section")
                .attr("class", "social-media-links")
                .children(social),
        );

    PageView::body(Markup::Fragment(vec![gallery.into(), article.into()]))
        .with_meta(page.page.clone())
}

fn product_card(product: &Product, img_dir: &str) -> Markup {
    let mut link = Element::new("a").attr("href", format!("/product?id={}", product.id));
    if let Some(first) = product.images.first() {
        link = link.child(first.to_markup(img_dir));
    }
    link = link.child(Element::new("span").attr("class", "product__name").text(product.name.clone()));
    if let Some(price) = &product.price {
        link = link.child(Element::new("span").attr("class", "product__price").text(price.to_string()));
    }
    Element::new("li").child(link).into()
}

fn shop(app: &App) -> PageView {
    let (Some(products), Some(categories)) = (
        app.store.products(app.language),
        app.store.categories(app.language),
    ) else {
        return PageView::body(loading());
    };
    let img_dir = &app.paths.img;

    let category_list = Element::new("ul").attr("class", "categories").children(
        categories
            .docs
            .iter()
            .map(|c| Element::new("li").attr("data-category", c.id.clone()).text(c.name.clone()).into()),
    );
    let product_list = Element::new("ul")
        .attr("class", "products")
        .children(products.docs.iter().map(|p| product_card(p, img_dir)));

    let shop = Element::new("un-shop")
        .attr("img-dir", img_dir.clone())
        .attr("lang", app.language.key())
        .attr("page", app.router.location())
        .attr("ui", "search-name, search-description, select-category, categories")
        .child(category_list)
        .child(product_list);

    PageView::body(shop).with_meta(products.page.clone())
}

fn cart(app: &App) -> PageView {
    let items = app.cart.iter().map(|product| {
        let mut item = Element::new("li").text(product.name.clone());
        if let Some(price) = &product.price {
            item = item.child(Element::new("span").attr("class", "product__price").text(price.to_string()));
        }
        item.into()
    });
    let cart = Element::new("un-shop-cart")
        .attr("img-dir", app.paths.img.clone())
        .attr("count", app.cart.len().to_string())
        .child(Element::new("ul").children(items));
    PageView::body(cart)
}

fn product(app: &App) -> PageView {
    if app.store.products(app.language).is_none() {
        return PageView::body(loading());
    }
    let id = app.router.query_param("id").unwrap_or_default();
    let Some(product) = app.store.product(app.language, &id) else {
        return PageView::body(Markup::Fragment(vec![
            Markup::Text("PRODUCT NOT FOUND: ".to_string()),
            Element::new("b").text(id).into(),
        ]));
    };
    let img_dir = &app.paths.img;

    let aside = Element::new("aside").attr("class", "product__img").child(
        Element::new("un-gallery")
            .attr("thumbnails", "4")
            .attr("bullets", "false")
            .attr("arrows", "true")
            .attr("orientation", "vertical")
            .attr("page", app.router.location())
            .children(images(&product.images, img_dir)),
    );

    let category = product
        .category
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_default();
    let price = product
        .price
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_default();

    let article = Element::new("article")
        .child(Element::new("h1").attr("class", "product__title").text(product.name.clone()))
        .child(Element::new("p").attr("class", "product__category").text(category))
        .child(
            Element::new("div")
                .attr("class", "product__desc")
                .child(Markup::Raw(product.content.render(img_dir))),
        )
        .child(Element::new("div").attr("class", "product__price").text(price))
        .child(
            Element::new("button")
                .attr("class", "add-to-cart")
                .attr("data-action", "add-to-cart")
                .attr("data-product-id", product.id.clone()),
        );

    PageView::body(Markup::Fragment(vec![aside.into(), article.into()])).with_meta(Some(PageMeta {
        title: product.name.clone(),
        description: category_description(product),
    }))
}

fn category_description(product: &Product) -> String {
    match &product.category {
        Some(c) => format!("{} | {}", product.name, c.name),
        None => product.name.clone(),
    }
}

fn not_found(app: &App, route: &RouteEntry) -> PageView {
    let body = Markup::Fragment(vec![
        Markup::Text("PAGE NOT FOUND: ".to_string()),
        Element::new("b")
            .attr("style", "color: darkblue")
            .text(app.router.location())
            .into(),
    ]);
    PageView::body(body).with_meta(Some(PageMeta {
        title: route.title.clone().unwrap_or_default(),
        description: route.description.clone().unwrap_or_default(),
    }))
}
