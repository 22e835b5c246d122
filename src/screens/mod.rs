//! # Screens
//!
//! One renderer per [`ScreenId`]. Renderers are plain functions from a
//! controller reply to [`Content`]; they never perform I/O and never touch
//! console state, so rendering the same reply twice gives the same screen.
//!
//! Replies are read leniently: a missing or mistyped key renders as empty
//! rather than failing the screen.

mod admin;
mod recipes;
mod statistics;

use serde_json::{Map, Value};

use crate::client::{ActionResponse, Scalar};
use crate::core::content::Content;
use crate::core::form::SelectOption;
use crate::core::registry::RendererRegistry;
use crate::core::screen::ScreenId;

/// Registers a renderer for every screen.
pub fn register_all(registry: &mut RendererRegistry) {
    registry
        .register(ScreenId::ListRecipes, recipes::list_recipes)
        .register(ScreenId::Edit, recipes::edit)
        .register(ScreenId::SingleIngredient, recipes::single_ingredient)
        .register(ScreenId::Statistics, statistics::statistics)
        .register(ScreenId::AdminOverview, admin::overview)
        .register(ScreenId::AdminClean, admin::clean)
        .register(ScreenId::AdminEditPorts, admin::edit_ports)
        .register(ScreenId::AdminCalibrate, admin::calibrate)
        .register(ScreenId::AdminSystem, admin::system)
        .register(ScreenId::AdminRemoveRecipe, admin::remove_recipe);
}

/// A registry with every screen registered.
pub fn registry() -> RendererRegistry {
    let mut registry = RendererRegistry::new();
    register_all(&mut registry);
    registry
}

/// Heading plus the controller's `error`, if any. Every screen starts here.
fn start(screen: ScreenId, heading: &str, data: &ActionResponse) -> Content {
    let mut content = Content::new(screen);
    content.heading(heading).error_notice(data.error());
    content
}

/// Adds the notice for a known `message` code.
fn message_notice(content: &mut Content, data: &ActionResponse, known: &[(&str, &str)]) {
    if let Some(code) = data.str_field("message")
        && let Some((_, text)) = known.iter().find(|(k, _)| *k == code)
    {
        content.notice(*text);
    }
}

fn array<'a>(data: &'a ActionResponse, key: &str) -> &'a [Value] {
    data.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

fn object<'a>(data: &'a ActionResponse, key: &str) -> Option<&'a Map<String, Value>> {
    data.get(key).and_then(Value::as_object)
}

fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn int(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number(value: &Value, key: &str) -> f64 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// JSON scalar as a request parameter value.
fn scalar(value: &Value) -> Scalar {
    match value {
        Value::String(s) => Scalar::Text(s.clone()),
        Value::Bool(b) => Scalar::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Int(i),
            None => Scalar::Float(n.as_f64().unwrap_or(0.0)),
        },
        other => Scalar::Text(other.to_string()),
    }
}

/// Object keys arrive as strings; numeric ones become ints.
fn key_scalar(key: &str) -> Scalar {
    key.parse::<i64>().map(Scalar::Int).unwrap_or_else(|_| Scalar::from(key))
}

/// `-` followed by 1 through 16.
fn amount_options(with_none: bool) -> Vec<SelectOption> {
    let mut options = Vec::with_capacity(17);
    if with_none {
        options.push(none_option());
    }
    options.extend((1..=16).map(|i| SelectOption::new(i, i.to_string())));
    options
}

fn none_option() -> SelectOption {
    SelectOption::new(-1, "-")
}

/// Name of ingredient `iid` in an `ingredients{id → {name}}` map.
fn ingredient_name(ingredients: Option<&Map<String, Value>>, iid: &str) -> String {
    ingredients
        .and_then(|map| map.get(iid))
        .map(|ingredient| text(ingredient, "name"))
        .unwrap_or_else(|| format!("#{iid}"))
}

/// Assigned ports as `(port, iid)`, in numeric port order.
fn assigned_ports(data: &ActionResponse) -> Vec<(i64, String)> {
    let mut ports: Vec<(i64, String)> = object(data, "ports")
        .into_iter()
        .flatten()
        .filter_map(|(port, iid)| {
            let port = port.parse::<i64>().ok()?;
            if iid.is_null() {
                return None;
            }
            let iid = scalar(iid);
            match iid {
                Scalar::Int(i) if i < 0 => None,
                Scalar::Text(ref s) if s.parse::<i64>().is_ok_and(|i| i < 0) => None,
                _ => Some((port, iid.to_string())),
            }
        })
        .collect();
    ports.sort_by_key(|(port, _)| *port);
    ports
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_is_complete() {
        assert!(registry().ensure_complete().is_ok());
    }

    #[test]
    fn test_every_screen_shows_error_field() {
        let registry = registry();
        let data = ActionResponse::from_value(json!({"error": "database locked"}));
        for screen in ScreenId::ALL {
            let content = registry.render(screen, &data);
            assert!(
                content
                    .elements
                    .iter()
                    .any(|e| matches!(e, crate::core::content::Element::Notice(n) if n.contains("database locked"))),
                "{screen} hides the error"
            );
        }
    }

    #[test]
    fn test_every_screen_renders_empty_reply() {
        let registry = registry();
        for screen in ScreenId::ALL {
            let content = registry.render(screen, &ActionResponse::default());
            assert_eq!(content.screen, screen);
        }
    }

    #[test]
    fn test_assigned_ports_skip_negative_and_sort() {
        let data = ActionResponse::from_value(json!({"ports": {"10": 3, "2": -1, "0": "7"}}));
        assert_eq!(
            assigned_ports(&data),
            vec![(0, "7".to_string()), (10, "3".to_string())]
        );
    }

    #[test]
    fn test_scalar_conversion() {
        assert_eq!(scalar(&json!(3)), Scalar::Int(3));
        assert_eq!(scalar(&json!("x")), Scalar::from("x"));
        assert_eq!(key_scalar("12"), Scalar::Int(12));
        assert_eq!(key_scalar("gin"), Scalar::from("gin"));
    }
}
