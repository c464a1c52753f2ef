use std::sync::Arc;

use axum::{
    extract::{Extension, Form},
    response::Response,
};

use catalog_products::ProductId;

use crate::app::dto::{self, ListProductsParams};
use crate::app::services::AppServices;
use crate::app::web::{PageRenderer, PageState, ProductForm};

/// `GET /`: the empty administration page.
pub async fn index(Extension(page): Extension<Arc<PageRenderer>>) -> Response {
    page.render(&PageState::default())
}

/// `POST /`: perform the pressed button's action and re-render.
pub async fn submit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(page): Extension<Arc<PageRenderer>>,
    Form(form): Form<ProductForm>,
) -> Response {
    tracing::info!(action = %form.action, "web form submitted");

    let state = match form.action.as_str() {
        "create" => create(&services, form).await,
        "retrieve" => retrieve(&services, form).await,
        "update" => update(&services, form).await,
        "delete" => delete(&services, form).await,
        "search" => search(&services, form).await,
        "clear" => PageState::default(),
        other => {
            let flash = format!("Unknown action: {other}");
            PageState::with_flash(form, flash)
        }
    };

    page.render(&state)
}

async fn create(services: &AppServices, form: ProductForm) -> PageState {
    match services.products_create(&form.to_document()).await {
        Ok(product) => PageState::with_flash(ProductForm::from_product(&product), dto::SUCCESS),
        Err(e) => PageState::with_flash(form, e.to_string()),
    }
}

async fn retrieve(services: &AppServices, form: ProductForm) -> PageState {
    let id = match parse_form_id(&form) {
        Ok(id) => id,
        Err(state) => return state,
    };

    match services.products_get(id).await {
        Ok(Some(product)) => PageState::with_flash(ProductForm::from_product(&product), dto::SUCCESS),
        Ok(None) => PageState::with_flash(ProductForm::default(), not_found_message(id)),
        Err(e) => PageState::with_flash(form, e.to_string()),
    }
}

async fn update(services: &AppServices, form: ProductForm) -> PageState {
    let id = match parse_form_id(&form) {
        Ok(id) => id,
        Err(state) => return state,
    };

    match services.products_update(id, &form.to_document()).await {
        Ok(Some(product)) => PageState::with_flash(ProductForm::from_product(&product), dto::SUCCESS),
        Ok(None) => PageState::with_flash(form, not_found_message(id)),
        Err(e) => PageState::with_flash(form, e.to_string()),
    }
}

async fn delete(services: &AppServices, form: ProductForm) -> PageState {
    let id = match parse_form_id(&form) {
        Ok(id) => id,
        Err(state) => return state,
    };

    match services.products_delete(id).await {
        Ok(_) => PageState::with_flash(ProductForm::default(), dto::DELETED),
        Err(e) => PageState::with_flash(form, e.to_string()),
    }
}

/// Search by the non-blank form fields, with the same filter rules as
/// `GET /products`; the first hit is copied into the form.
async fn search(services: &AppServices, form: ProductForm) -> PageState {
    let params = ListProductsParams {
        name: Some(form.name.clone()),
        category: Some(form.category.clone()),
        available: Some(form.available.clone()),
    };
    let Some(query) = params.to_query() else {
        return PageState {
            form,
            flash: dto::SUCCESS.to_string(),
            results: Some(Vec::new()),
        };
    };

    match services.products_list(&query).await {
        Ok(products) => {
            let form = products
                .first()
                .map(ProductForm::from_product)
                .unwrap_or(form);
            PageState {
                form,
                flash: dto::SUCCESS.to_string(),
                results: Some(products),
            }
        }
        Err(e) => PageState::with_flash(form, e.to_string()),
    }
}

fn parse_form_id(form: &ProductForm) -> Result<ProductId, PageState> {
    form.id.trim().parse::<ProductId>().map_err(|_| {
        let flash = format!("Product id '{}' is not a valid id.", form.id.trim());
        PageState::with_flash(form.clone(), flash)
    })
}

fn not_found_message(id: ProductId) -> String {
    format!("Product with id '{id}' was not found.")
}
