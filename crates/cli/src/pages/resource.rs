// Resource pages and actions
//
// List, detail and form screens shared by every resource, plus the mutations
// triggered from them. Each function performs the service calls it needs and
// returns a Document; errors are left for the app to toast.

use anyhow::{Context, Result};
use backoffice_client::ApiClient;
use backoffice_core::{Page, Resource};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use super::views::{ParseId, Tabular};
use super::Document;
use crate::components::{PageMeta, Switch};
use crate::output::{field, table_header, table_row};
use crate::routes::Route;

/// `/{resource}?page=&size=`
pub async fn list_page<R>(client: &ApiClient, page: u32, size: u32) -> Result<Document>
where
    R: Resource,
    R::Item: Tabular,
{
    let result = client.service::<R>().list(page, size).await?;
    let lines = list_lines::<R>(&result);
    let meta = PageMeta::new(R::KIND.title()).with_description(format!(
        "Page {} of {} · {} total",
        u64::from(result.number) + 1,
        result.total_pages.max(1),
        result.total_elements
    ));
    Ok(Document::new(meta, lines, serde_json::to_value(&result)?))
}

fn list_lines<R>(page: &Page<R::Item>) -> Vec<String>
where
    R: Resource,
    R::Item: Tabular,
{
    if page.empty {
        return vec![format!("No {} found", R::plural())];
    }

    let columns = <R::Item as Tabular>::COLUMNS;
    let mut lines = vec![table_header(columns)];
    for item in page {
        let row = item.row();
        let cells: Vec<(&str, usize)> = row
            .iter()
            .zip(columns)
            .map(|(value, (_, width))| (value.as_str(), *width))
            .collect();
        lines.push(table_row(&cells));
    }

    // Server flags can disagree with `number`; no link past either end of u32
    let prev = page
        .has_previous()
        .then(|| page.number.checked_sub(1))
        .flatten();
    let next = page.has_next().then(|| page.number.checked_add(1)).flatten();
    let link = |label: &str, number: u32| {
        format!(
            "{}: {}",
            label,
            Route::List {
                kind: R::KIND,
                page: number,
                size: page.size
            }
        )
    };

    let mut nav = Vec::new();
    nav.extend(prev.map(|number| link("prev", number)));
    nav.extend(next.map(|number| link("next", number)));
    if !nav.is_empty() {
        lines.push(String::new());
        lines.push(nav.join("  "));
    }
    lines
}

/// `/{resource}/{id}`
pub async fn detail_page<R>(client: &ApiClient, id: &str) -> Result<Document>
where
    R: Resource,
    R::Id: ParseId,
    R::Item: Tabular,
{
    let id = R::Id::parse_id(id)?;
    let item = client.service::<R>().get(&id).await?;
    detail_document::<R>(&item, None)
}

/// Detail layout for an item already in hand
pub fn detail_document<R>(item: &R::Item, switch: Option<&Switch>) -> Result<Document>
where
    R: Resource,
    R::Item: Tabular,
{
    let data = serde_json::to_value(item)?;
    let mut lines: Vec<String> = item
        .fields()
        .into_iter()
        .map(|(label, value)| field(label, &value))
        .collect();

    if let Some((name, label)) = <R::Item as Tabular>::SWITCH {
        let switch = match switch {
            Some(switch) => switch.clone(),
            None => Switch::new(label, data[name].as_bool().unwrap_or(false)),
        };
        lines.push(String::new());
        lines.push(switch.render());
    }

    let meta = PageMeta::new(format!("{} {}", R::singular(), item.id_string()));
    Ok(Document::new(meta, lines, data))
}

/// `/{resource}/new`
pub fn new_page<R>() -> Document
where
    R: Resource,
    R::Item: Tabular,
{
    let lines = form_lines(<R::Item as Tabular>::FORM_FIELDS, &Value::Null);
    let meta = PageMeta::new(format!("New {}", R::singular()))
        .with_description(format!("Create with `{} create --file <path>`", R::KIND));
    let blank: Map<String, Value> = <R::Item as Tabular>::FORM_FIELDS
        .iter()
        .map(|name| (name.to_string(), Value::Null))
        .collect();
    Document::new(meta, lines, Value::Object(blank))
}

/// `/{resource}/{id}/edit`
pub async fn edit_page<R>(client: &ApiClient, id: &str) -> Result<Document>
where
    R: Resource,
    R::Id: ParseId,
    R::Item: Tabular,
{
    let parsed = R::Id::parse_id(id)?;
    let item = client.service::<R>().get(&parsed).await?;
    let data = serde_json::to_value(&item)?;
    let lines = form_lines(<R::Item as Tabular>::FORM_FIELDS, &data);
    let meta = PageMeta::new(format!("Edit {} {}", R::singular(), item.id_string()))
        .with_description(format!(
            "Save with `{} update {} --file <path>`",
            R::KIND,
            item.id_string()
        ));
    Ok(Document::new(meta, lines, data))
}

fn form_lines(fields: &[&str], values: &Value) -> Vec<String> {
    let mut lines: Vec<String> = fields
        .iter()
        .map(|name| field(name, &form_value(&values[*name])))
        .collect();
    lines.push(String::new());
    lines.push("[ Save ]".to_string());
    lines
}

fn form_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(form_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Create from a JSON payload; returns the stored item
pub async fn create<R>(client: &ApiClient, payload: Value) -> Result<R::Item>
where
    R: Resource,
    R::Create: DeserializeOwned,
{
    let dto: R::Create = serde_json::from_value(payload)
        .with_context(|| format!("Invalid {} payload", R::singular()))?;
    Ok(client.service::<R>().create(&dto).await?)
}

/// Partial update from a JSON payload
pub async fn update<R>(client: &ApiClient, id: &str, payload: Value) -> Result<R::Item>
where
    R: Resource,
    R::Id: ParseId,
    R::Update: DeserializeOwned,
{
    let id = R::Id::parse_id(id)?;
    let dto: R::Update = serde_json::from_value(payload)
        .with_context(|| format!("Invalid {} payload", R::singular()))?;
    Ok(client.service::<R>().update(&id, &dto).await?)
}

pub async fn delete<R>(client: &ApiClient, id: &str) -> Result<()>
where
    R: Resource,
    R::Id: ParseId,
{
    let id = R::Id::parse_id(id)?;
    Ok(client.service::<R>().delete(&id).await?)
}

/// Flip the switch field of an item and persist the new value.
///
/// The switch emits the requested value; the stored value coming back from
/// the server is fed to it as the new prop.
pub async fn toggle<R>(client: &ApiClient, id: &str) -> Result<(R::Item, Switch)>
where
    R: Resource,
    R::Id: ParseId,
    R::Item: Tabular,
    R::Update: DeserializeOwned,
{
    let Some((name, label)) = <R::Item as Tabular>::SWITCH else {
        anyhow::bail!("{} have no on/off field", R::plural());
    };

    let parsed = R::Id::parse_id(id)?;
    let service = client.service::<R>();
    let item = service.get(&parsed).await?;
    let current = serde_json::to_value(&item)?[name]
        .as_bool()
        .unwrap_or(false);

    let mut switch = Switch::new(label, current);
    let mut requested = current;
    switch.toggle(|value| requested = value);

    let dto: R::Update = serde_json::from_value(json!({ name: requested }))?;
    let updated = service.update(&parsed, &dto).await?;
    let stored = serde_json::to_value(&updated)?[name]
        .as_bool()
        .unwrap_or(requested);
    switch.sync(stored);

    Ok((updated, switch))
}
