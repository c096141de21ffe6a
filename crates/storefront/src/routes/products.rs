//! Product route handlers.
//!
//! The page shell renders the loading state and lets HTMX fetch the panel.
//! Each request builds its own [`ProductPageController`], so every subject
//! identifier starts from a fresh view state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;
use vitrina_core::ProductId;

use crate::error::{AppError, Result};
use crate::page::presenter::{QuantitySelectorView, quantity_selector};
use crate::page::{PageView, ProductDetailView, ProductPageController, present};
use crate::state::AppState;

/// Panel query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PanelQuery {
    /// Set by the image's `error` event; renders the placeholder instead.
    #[serde(default)]
    pub image_failed: bool,
    /// Quantity already chosen on the page, kept across a panel reload.
    pub quantity: Option<String>,
}

/// Quantity form data (raw input, clamped server-side).
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    #[serde(default)]
    pub quantity: String,
}

/// Product page shell.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductPageTemplate {
    /// Panel to load; `None` when the identifier can never match.
    pub panel_href: Option<String>,
    pub home_href: String,
}

/// Loading state fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_loading.html")]
pub struct ProductLoadingTemplate;

/// Not-found state fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_not_found.html")]
pub struct ProductNotFoundTemplate {
    pub home_href: String,
}

/// Loaded state fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_detail.html")]
pub struct ProductDetailTemplate {
    pub product: ProductDetailView,
}

/// Quantity selector fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/quantity_selector.html")]
pub struct QuantitySelectorTemplate {
    pub quantity: QuantitySelectorView,
}

/// Add-to-cart confirmation fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_notice.html")]
pub struct CartNoticeTemplate {
    pub quantity: u32,
    pub product_name: String,
}

/// Render whichever of the three page states `view` is.
#[must_use]
pub fn render_view(view: PageView) -> Response {
    match view {
        PageView::Loading => ProductLoadingTemplate.into_response(),
        PageView::NotFound { home_href } => ProductNotFoundTemplate { home_href }.into_response(),
        PageView::Loaded(product) => ProductDetailTemplate { product: *product }.into_response(),
    }
}

/// Display the product page shell.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let panel_href =
        ProductId::parse_identifier(&id).map(|product_id| format!("/products/{product_id}/panel"));

    ProductPageTemplate {
        panel_href,
        home_href: state.config().home_path.clone(),
    }
}

/// Run one load cycle and render the resulting state (HTMX fragment).
#[instrument(skip(state))]
pub async fn panel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PanelQuery>,
) -> Response {
    let page = state.product_page();
    page.load(Some(&id)).await;
    if query.image_failed {
        page.report_image_load_failure();
    }
    if let Some(quantity) = &query.quantity {
        page.set_quantity_input(quantity);
    }

    render_view(present(&page.snapshot(), &state.page_links()))
}

/// Clamp a quantity edit and re-render the selector (HTMX).
#[instrument(skip(state))]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<QuantityForm>,
) -> Result<QuantitySelectorTemplate> {
    let page = load_product(&state, &id).await?;
    page.set_quantity_input(&form.quantity);

    let snapshot = page.snapshot();
    let product = snapshot
        .product
        .as_ref()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    if !product.in_stock() {
        return Err(AppError::OutOfStock(product.name.clone()));
    }

    Ok(QuantitySelectorTemplate {
        quantity: quantity_selector(product, snapshot.quantity),
    })
}

/// Record an add-to-cart intent (HTMX).
///
/// Returns a confirmation fragment and triggers `cart-updated` for any
/// downstream cart widgets.
#[instrument(skip(state))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<QuantityForm>,
) -> Result<Response> {
    let page = load_product(&state, &id).await?;
    page.set_quantity_input(&form.quantity);

    let intent = page.add_to_cart().ok_or_else(|| {
        let name = page
            .snapshot()
            .product
            .map_or_else(|| id.clone(), |product| product.name);
        AppError::OutOfStock(name)
    })?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartNoticeTemplate {
            quantity: intent.quantity,
            product_name: intent.product_name,
        },
    )
        .into_response())
}

/// Load `id` for a command, failing when there is nothing to act on.
async fn load_product(state: &AppState, id: &str) -> Result<ProductPageController> {
    ProductId::parse_identifier(id)
        .ok_or_else(|| AppError::BadRequest(format!("invalid product id: {id}")))?;

    let page = state.product_page();
    page.load(Some(id)).await;
    if page.snapshot().product.is_none() {
        return Err(AppError::NotFound(format!("product {id}")));
    }
    Ok(page)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use vitrina_core::Product;

    use super::*;
    use crate::page::ViewState;
    use crate::page::presenter::PageLinks;

    fn product(stock: u32) -> Product {
        Product {
            id: ProductId::new(1),
            name: "A".to_string(),
            description: "Descripción <b>segura</b>".to_string(),
            price: Decimal::from_str("10.005").unwrap(),
            stock,
            category: None,
            image: Some("https://cdn.example.com/a.jpg".to_string()),
            rating: Some(4.5),
        }
    }

    fn render_loaded(state: &ViewState) -> String {
        match present(state, &PageLinks::default()) {
            PageView::Loaded(product) => ProductDetailTemplate { product: *product }.render().unwrap(),
            other => panic!("expected loaded view, got {other:?}"),
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

    #[test]
    fn test_detail_renders_price_and_selector() {
        let html = render_loaded(&loaded(product(3)));

        assert!(html.contains("$10.01"));
        assert!(html.contains("3 en stock"));
        assert!(html.contains("Sin categoría"));
        assert!(html.contains("id=\"quantity\""));
        assert!(html.contains("max=\"3\""));
        assert!(html.contains("Agregar al carrito"));
        assert!(html.contains("Calificación"));
        assert!(html.contains("image_failed=true"));
        assert!(html.contains("hx-include=\"#quantity\""));
    }

    #[test]
    fn test_detail_escapes_catalog_text() {
        let html = render_loaded(&loaded(product(3)));
        assert!(!html.contains("<b>segura</b>"));
        assert!(html.contains("&#60;b&#62;segura&#60;/b&#62;"));
    }

    #[test]
    fn test_sold_out_renders_disabled_button_without_selector() {
        let html = render_loaded(&loaded(product(0)));

        assert!(!html.contains("id=\"quantity\""));
        assert!(html.contains("disabled"));
        assert!(html.contains("Agotado"));
    }

    #[test]
    fn test_image_failure_renders_placeholder() {
        let mut state = loaded(product(3));
        state.image_load_failed = true;
        let html = render_loaded(&state);

        assert!(html.contains("Sin imagen disponible"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_not_found_and_loading_fragments() {
        let html = ProductNotFoundTemplate {
            home_href: "/".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Producto no encontrado"));
        assert!(html.contains("href=\"/\""));

        let html = ProductLoadingTemplate.render().unwrap();
        assert!(html.contains("Cargando producto..."));
    }

    #[test]
    fn test_shell_without_panel_renders_not_found() {
        let html = ProductPageTemplate {
            panel_href: None,
            home_href: "/".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Producto no encontrado"));
        assert!(!html.contains("hx-trigger=\"load\""));

        let html = ProductPageTemplate {
            panel_href: Some("/products/1/panel".to_string()),
            home_href: "/".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("hx-get=\"/products/1/panel\""));
        assert!(html.contains("Cargando producto..."));
    }
}
