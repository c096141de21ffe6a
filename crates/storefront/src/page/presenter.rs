//! Pure mapping from [`ViewState`] to what the page shows.
//!
//! Three mutually exclusive views: loading, not found, loaded. All display
//! strings (price formatting, badges, fallbacks) are decided here so the
//! templates stay logic-free.

use vitrina_core::Product;

use super::state::ViewState;

const NO_CATEGORY: &str = "Sin categoría";
const SOLD_OUT: &str = "Agotado";
const ADD_TO_CART: &str = "Agregar al carrito";

/// Navigation targets the page links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    /// Default route for "back" and "not found" actions.
    pub home_href: String,
}

impl Default for PageLinks {
    fn default() -> Self {
        Self {
            home_href: "/".to_string(),
        }
    }
}

/// The page's visual state.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Loading,
    NotFound { home_href: String },
    Loaded(Box<ProductDetailView>),
}

/// Display data for a loaded product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub description: String,
    /// `None` renders the "no image" placeholder.
    pub image: Option<ImageView>,
    /// Badge text, with a fallback when the product has no category.
    pub category_label: String,
    /// Raw category for the details list (empty when absent).
    pub category: String,
    pub stock: u32,
    pub in_stock: bool,
    pub stock_badge: String,
    pub price: String,
    pub rating: Option<String>,
    /// Rendered only when the product is in stock.
    pub quantity: Option<QuantitySelectorView>,
    pub add_to_cart: CartButtonView,
    pub home_href: String,
}

/// Image display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Quantity input bounds and current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantitySelectorView {
    pub product_id: String,
    pub value: u32,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartButtonView {
    pub enabled: bool,
    pub label: String,
}

/// Map the current state to its view.
#[must_use]
pub fn present(state: &ViewState, links: &PageLinks) -> PageView {
    if state.loading {
        return PageView::Loading;
    }

    match &state.product {
        None => PageView::NotFound {
            home_href: links.home_href.clone(),
        },
        Some(product) => PageView::Loaded(Box::new(detail(product, state, links))),
    }
}

fn detail(product: &Product, state: &ViewState, links: &PageLinks) -> ProductDetailView {
    let in_stock = product.in_stock();

    let image = if state.image_load_failed {
        None
    } else {
        product.image.as_ref().map(|url| ImageView {
            url: url.clone(),
            alt: product.name.clone(),
        })
    };

    ProductDetailView {
        id: product.id.to_string(),
        name: product.name.clone(),
        description: product.description.clone(),
        image,
        category_label: product
            .category
            .clone()
            .unwrap_or_else(|| NO_CATEGORY.to_string()),
        category: product.category.clone().unwrap_or_default(),
        stock: product.stock,
        in_stock,
        stock_badge: if in_stock {
            format!("{} en stock", product.stock)
        } else {
            SOLD_OUT.to_string()
        },
        price: product.unit_price().display(),
        rating: product
            .rating
            .filter(|rating| *rating > 0.0)
            .map(|rating| rating.to_string()),
        quantity: in_stock.then(|| quantity_selector(product, state.quantity)),
        add_to_cart: CartButtonView {
            enabled: in_stock,
            label: if in_stock { ADD_TO_CART } else { SOLD_OUT }.to_string(),
        },
        home_href: links.home_href.clone(),
    }
}

/// Quantity selector for `product` showing `value`.
#[must_use]
pub fn quantity_selector(product: &Product, value: u32) -> QuantitySelectorView {
    QuantitySelectorView {
        product_id: product.id.to_string(),
        value,
        min: 1,
        max: product.stock.max(1),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use vitrina_core::ProductId;

    use super::*;

    fn product(stock: u32) -> Product {
        Product {
            id: ProductId::new(1),
            name: "A".to_string(),
            description: "Una cosa".to_string(),
            price: Decimal::from_str("10.005").unwrap(),
            stock,
            category: Some("hogar".to_string()),
            image: Some("https://cdn.example.com/a.jpg".to_string()),
            rating: Some(4.5),
        }
    }

    fn loaded(product: Product) -> ViewState {
        ViewState {
            loading: false,
            product: Some(product),
            image_load_failed: false,
            quantity: 1,
        }
    }

    fn detail_of(view: PageView) -> ProductDetailView {
        match view {
            PageView::Loaded(detail) => *detail,
            other => panic!("expected loaded view, got {other:?}"),
        }
    }

    #[test]
    fn test_loading_wins_over_everything() {
        let mut state = loaded(product(3));
        state.loading = true;
        assert_eq!(present(&state, &PageLinks::default()), PageView::Loading);
        assert_eq!(
            present(&ViewState::initial(), &PageLinks::default()),
            PageView::Loading
        );
    }

    #[test]
    fn test_not_found_links_home() {
        let state = ViewState {
            loading: false,
            ..ViewState::initial()
        };
        let links = PageLinks {
            home_href: "/tienda".to_string(),
        };
        assert_eq!(
            present(&state, &links),
            PageView::NotFound {
                home_href: "/tienda".to_string()
            }
        );
    }

    #[test]
    fn test_loaded_in_stock() {
        let detail = detail_of(present(&loaded(product(3)), &PageLinks::default()));

        assert_eq!(detail.id, "1");
        assert_eq!(detail.price, "$10.01");
        assert_eq!(detail.stock_badge, "3 en stock");
        assert!(detail.in_stock);
        assert_eq!(detail.category_label, "hogar");
        assert_eq!(detail.rating.as_deref(), Some("4.5"));
        assert_eq!(
            detail.image,
            Some(ImageView {
                url: "https://cdn.example.com/a.jpg".to_string(),
                alt: "A".to_string(),
            })
        );
        assert_eq!(
            detail.quantity,
            Some(QuantitySelectorView {
                product_id: "1".to_string(),
                value: 1,
                min: 1,
                max: 3,
            })
        );
        assert!(detail.add_to_cart.enabled);
        assert_eq!(detail.add_to_cart.label, "Agregar al carrito");
        assert_eq!(detail.home_href, "/");
    }

    #[test]
    fn test_sold_out_hides_selector_and_disables_cart() {
        let detail = detail_of(present(&loaded(product(0)), &PageLinks::default()));

        assert!(!detail.in_stock);
        assert_eq!(detail.stock_badge, "Agotado");
        assert!(detail.quantity.is_none());
        assert!(!detail.add_to_cart.enabled);
        assert_eq!(detail.add_to_cart.label, "Agotado");
    }

    #[test]
    fn test_image_failure_shows_placeholder() {
        let mut state = loaded(product(3));
        state.image_load_failed = true;
        assert!(detail_of(present(&state, &PageLinks::default())).image.is_none());
    }

    #[test]
    fn test_optional_fields_fall_back() {
        let mut bare = product(2);
        bare.category = None;
        bare.image = None;
        bare.rating = None;

        let detail = detail_of(present(&loaded(bare), &PageLinks::default()));
        assert_eq!(detail.category_label, "Sin categoría");
        assert_eq!(detail.category, "");
        assert!(detail.image.is_none());
        assert!(detail.rating.is_none());
    }

    #[test]
    fn test_zero_rating_is_hidden() {
        let mut unrated = product(2);
        unrated.rating = Some(0.0);
        let detail = detail_of(present(&loaded(unrated), &PageLinks::default()));
        assert!(detail.rating.is_none());
    }

    #[test]
    fn test_selector_reflects_current_quantity() {
        let mut state = loaded(product(5));
        state.quantity = 4;
        let detail = detail_of(present(&state, &PageLinks::default()));
        assert_eq!(detail.quantity.map(|q| q.value), Some(4));
    }
}
