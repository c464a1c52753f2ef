//! Background data loading through the REST API.

use std::collections::HashMap;

use anyhow::{Context, Result, ensure};
use cucumber::{gherkin::Step, given};
use serde_json::{Value, json};

use crate::CatalogWorld;

fn column<'a>(record: &HashMap<&str, &'a str>, key: &str) -> Result<&'a str> {
    record
        .get(key)
        .copied()
        .with_context(|| format!("data table has no {key} column"))
}

/// Replace the whole catalog with the products in the step's table.
///
/// The table header names the columns: `name`, `description`, `price`,
/// `available` (`True`/`False`) and `category`.
#[given("the following products")]
async fn load_products(world: &mut CatalogWorld, step: &Step) -> Result<()> {
    let table = step.table.as_ref().context("step has no data table")?;
    let collection = world.url("/products");

    let listing: Value = world
        .client
        .get(&collection)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let existing = listing["results"]
        .as_array()
        .context("list response has no results")?;
    for product in existing {
        let id = product["id"].as_i64().context("listed product has no id")?;
        let res = world
            .client
            .delete(format!("{collection}/{id}"))
            .send()
            .await?;
        ensure!(res.status().as_u16() == 200, "delete {id} returned {}", res.status());
    }

    let mut rows = table.rows.iter();
    let header = rows.next().context("data table has no header row")?;
    for row in rows {
        let record: HashMap<&str, &str> = header
            .iter()
            .map(String::as_str)
            .zip(row.iter().map(String::as_str))
            .collect();
        let document = json!({
            "name": column(&record, "name")?,
            "description": column(&record, "description")?,
            "price": column(&record, "price")?,
            "available": column(&record, "available")?.eq_ignore_ascii_case("true"),
            "category": column(&record, "category")?,
        });
        let res = world.client.post(&collection).json(&document).send().await?;
        ensure!(
            res.status().as_u16() == 201,
            "create {document} returned {}",
            res.status()
        );
    }
    Ok(())
}
