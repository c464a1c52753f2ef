//! Server-rendered administration page.
//!
//! The page is a single HTML form. Every button submits the whole form back
//! to `POST /` with `action` set to the button's name; the handler performs
//! the operation and renders the page again with the outcome in the flash
//! message. Element ids follow fixed conventions that the acceptance suite
//! relies on: `product_<field>` for inputs, `<action>-btn` for buttons,
//! `flash_message` and `search_results`.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use catalog_products::{Category, Product};

pub const PAGE_TITLE: &str = "Product Catalog Administration";

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Values of the page form, exactly as the browser submits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    /// `""`, `"true"` or `"false"`.
    pub available: String,
    /// `""` or a category variant name.
    pub category: String,
    /// Name of the pressed button.
    #[serde(skip_serializing)]
    pub action: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price: product.price().to_string(),
            available: product.available().to_string(),
            category: product.category().as_str().to_string(),
            action: String::new(),
        }
    }

    /// The form as a product document, validated by the same rules as the
    /// REST API. Blank dropdowns stay strings so validation rejects them.
    pub fn to_document(&self) -> Value {
        let available = match self.available.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => Value::String(other.to_string()),
        };
        json!({
            "name": self.name,
            "description": self.description,
            "price": self.price,
            "available": available,
            "category": self.category,
        })
    }
}

/// Everything a render needs.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub form: ProductForm,
    pub flash: String,
    /// `None` hides the results table.
    pub results: Option<Vec<Product>>,
}

impl PageState {
    pub fn with_flash(form: ProductForm, flash: impl Into<String>) -> Self {
        Self {
            form,
            flash: flash.into(),
            results: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct SelectOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct ResultRow {
    id: String,
    name: String,
    description: String,
    category: &'static str,
    available: &'static str,
    price: String,
}

impl From<&Product> for ResultRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id().to_string(),
            name: p.name().to_string(),
            description: p.description().to_string(),
            category: p.category().label(),
            available: if p.available() { "True" } else { "False" },
            price: p.price().to_string(),
        }
    }
}

fn available_options(selected: &str) -> Vec<SelectOption> {
    [("", ""), ("true", "True"), ("false", "False")]
        .into_iter()
        .map(|(value, label)| SelectOption {
            value,
            label,
            selected: value == selected,
        })
        .collect()
}

fn category_options(selected: &str) -> Vec<SelectOption> {
    let blank = SelectOption {
        value: "",
        label: "",
        selected: selected.is_empty(),
    };
    std::iter::once(blank)
        .chain(Category::ALL.into_iter().map(|c| SelectOption {
            value: c.as_str(),
            label: c.label(),
            selected: c.as_str() == selected,
        }))
        .collect()
}

/// Template environment holding the page.
#[derive(Debug)]
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_html(&self, state: &PageState) -> Result<String, minijinja::Error> {
        let results = state
            .results
            .as_ref()
            .map(|products| products.iter().map(ResultRow::from).collect::<Vec<_>>());

        self.env.get_template("index.html")?.render(context! {
            title => PAGE_TITLE,
            flash => &state.flash,
            form => &state.form,
            available_options => available_options(&state.form.available),
            category_options => category_options(&state.form.category),
            results => results,
        })
    }

    pub fn render(&self, state: &PageState) -> Response {
        match self.render_html(state) {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "failed to render page");
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
            }
        }
    }
}
