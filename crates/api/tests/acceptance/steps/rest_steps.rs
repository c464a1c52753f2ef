//! REST API steps.

use anyhow::{Context, Result, ensure};
use cucumber::{then, when};
use serde_json::{Value, json};

use crate::{ApiResponse, CatalogWorld};

async fn record(world: &mut CatalogWorld, res: reqwest::Response) -> Result<()> {
    let status = res.status().as_u16();
    let text = res.text().await?;
    let body = serde_json::from_str(&text).unwrap_or(Value::Null);
    world.response = Some(ApiResponse { status, body });
    Ok(())
}

fn last(world: &CatalogWorld) -> Result<&ApiResponse> {
    world.response.as_ref().context("no request has been sent")
}

fn listed(world: &CatalogWorld) -> Result<&Vec<Value>> {
    last(world)?.body["results"]
        .as_array()
        .context("response has no results")
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[when(expr = "I send a GET request to {string}")]
async fn send_get(world: &mut CatalogWorld, path: String) -> Result<()> {
    let res = world.client.get(world.url(&path)).send().await?;
    record(world, res).await
}

#[when(expr = "I create a product named {string} with content type {string}")]
async fn create_with_content_type(
    world: &mut CatalogWorld,
    name: String,
    content_type: String,
) -> Result<()> {
    let document = json!({
        "name": name,
        "description": format!("{name} for testing"),
        "price": "12.50",
        "available": true,
        "category": "TOOLS",
    });
    let res = world
        .client
        .post(world.url("/products"))
        .header("Content-Type", content_type)
        .body(document.to_string())
        .send()
        .await?;
    record(world, res).await
}

#[then(expr = "the response status should be {int}")]
fn status_is(world: &mut CatalogWorld, status: u16) -> Result<()> {
    let actual = last(world)?.status;
    ensure!(actual == status, "expected status {status}, got {actual}");
    Ok(())
}

#[then(expr = "the response message should be {string}")]
fn message_is(world: &mut CatalogWorld, message: String) -> Result<()> {
    let actual = as_text(&last(world)?.body["message"]);
    ensure!(actual == message, "expected message {message:?}, got {actual:?}");
    Ok(())
}

#[then(expr = "the response should list {int} product(s)")]
fn lists_count(world: &mut CatalogWorld, count: usize) -> Result<()> {
    let actual = listed(world)?.len();
    ensure!(actual == count, "expected {count} products, got {actual}");
    Ok(())
}

#[then(expr = "every listed product should have {string} set to {string}")]
fn every_listed_has(world: &mut CatalogWorld, key: String, value: String) -> Result<()> {
    for product in listed(world)? {
        let actual = as_text(&product[key.as_str()]);
        ensure!(actual == value, "{key} is {actual:?} in {product}");
    }
    Ok(())
}
