//! Operator-facing screens: the recipe list, the recipe editor and single
//! ingredient dispensing.

use serde_json::{Map, Value};

use super::{amount_options, array, int, key_scalar, message_notice, none_option, object, scalar, start, text};
use crate::client::{ActionRequest, ActionResponse, Scalar, param};
use crate::core::content::{Command, Content};
use crate::core::form::{ActionForm, FormField, SelectOption};
use crate::core::screen::ScreenId;

const EDIT_MESSAGES: &[(&str, &str)] = &[
    ("created", "New recipe created."),
    ("updated", "Recipe saved."),
    ("nothing_changed", "Recipe was not changed."),
];

pub(super) fn list_recipes(screen: ScreenId, data: &ActionResponse) -> Content {
    let mut content = start(screen, screen.title(), data);
    let recipes = array(data, "recipes");
    if recipes.is_empty() {
        content.text("No recipes yet.");
    }

    for recipe in recipes {
        let id = recipe.get("id").map(scalar).unwrap_or(Scalar::Int(-1));
        let available = recipe.get("available").and_then(Value::as_bool).unwrap_or(false);

        content.heading(text(recipe, "name"));
        for item in recipe.get("items").and_then(Value::as_array).into_iter().flatten() {
            let marker = if item.get("available").and_then(Value::as_bool).unwrap_or(true) {
                ""
            } else {
                " (not available)"
            };
            content.row(vec![text(item, "amount"), format!("{}{marker}", text(item, "name"))]);
        }
        if available {
            content.button(
                "Order",
                Command::dispatch(ActionRequest::new("order").with("id", id.clone())),
            );
        }
        content.button(
            "Edit",
            Command::Navigate {
                screen: ScreenId::Edit,
                params: vec![param("action", "get_recipe"), param("id", id)],
            },
        );
    }
    content
}

/// One `id[]` / `ingredient[]` / `amount[]` group of the recipe editor.
fn item_group(ingredients: Option<&Map<String, Value>>, id: Scalar, iid: Option<i64>, amount: Option<i64>) -> Vec<FormField> {
    let mut ingredient_options = vec![none_option()];
    ingredient_options.extend(
        ingredients
            .into_iter()
            .flatten()
            .map(|(key, ingredient)| SelectOption::new(key_scalar(key), text(ingredient, "name"))),
    );
    vec![
        FormField::hidden("id[]", id),
        FormField::select(
            "ingredient[]",
            "Ingredient",
            ingredient_options,
            iid.map(Scalar::Int).as_ref(),
        ),
        FormField::select("amount[]", "Amount", amount_options(true), amount.map(Scalar::Int).as_ref()),
    ]
}

pub(super) fn edit(screen: ScreenId, data: &ActionResponse) -> Content {
    let ingredients = object(data, "ingredients");
    let recipe = data.get("recipe").filter(|r| r.is_object());

    let heading = if recipe.is_some() { "Edit recipe" } else { "New recipe" };
    let mut content = start(screen, heading, data);
    message_notice(&mut content, data, EDIT_MESSAGES);

    let (rid, name) = match recipe {
        Some(recipe) => (recipe.get("id").map(scalar).unwrap_or(Scalar::Int(-1)), text(recipe, "name")),
        None => (Scalar::Int(-1), String::new()),
    };
    content
        .bind(ActionForm::new("saverecipe"))
        .field(FormField::hidden("rid", rid))
        .field(FormField::text("name", "Name", name));

    let items = recipe
        .and_then(|r| r.get("items"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    if items.is_empty() {
        for field in item_group(ingredients, Scalar::Int(-1), None, None) {
            content.field(field);
        }
    }
    for item in items {
        let id = item.get("id").map(scalar).unwrap_or(Scalar::Int(-1));
        for field in item_group(ingredients, id, int(item, "iid"), int(item, "amount")) {
            content.field(field);
        }
    }

    content
        .button(
            "Add ingredient",
            Command::AppendFields(item_group(ingredients, Scalar::Int(-1), None, None)),
        )
        .submit("Save");
    content
}

pub(super) fn single_ingredient(screen: ScreenId, data: &ActionResponse) -> Content {
    let mut content = start(screen, screen.title(), data);

    let options: Vec<SelectOption> = object(data, "ingredients")
        .into_iter()
        .flatten()
        .filter(|(_, ingredient)| ingredient.get("port").is_some_and(|port| !port.is_null()))
        .map(|(key, ingredient)| {
            let value = ingredient.get("id").map(scalar).unwrap_or_else(|| key_scalar(key));
            SelectOption::new(value, text(ingredient, "name"))
        })
        .collect();

    content
        .bind(ActionForm::new("single_ingredient"))
        .field(FormField::select("ingredient", "Ingredient", options, None))
        .field(FormField::select("amount", "Amount", amount_options(false), None))
        .submit("Dispense");
    content
}
