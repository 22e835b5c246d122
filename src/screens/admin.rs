//! The `admin_` screen family.

use serde_json::Value;

use super::{
    array, assigned_ports, ingredient_name, key_scalar, message_notice, none_option, object, scalar, start, text,
};
use crate::client::{ActionRequest, ActionResponse, Scalar, param};
use crate::core::content::{Command, Content, SystemCommand};
use crate::core::form::{ActionForm, FormField, SelectOption};
use crate::core::screen::ScreenId;

/// Ports at or above this number are special-purpose and not assignable.
const PORT_COUNT: i64 = 12;

const ADMIN_PAGES: [ScreenId; 5] = [
    ScreenId::AdminClean,
    ScreenId::AdminEditPorts,
    ScreenId::AdminCalibrate,
    ScreenId::AdminSystem,
    ScreenId::AdminRemoveRecipe,
];

pub(super) fn overview(screen: ScreenId, data: &ActionResponse) -> Content {
    let mut content = start(screen, screen.title(), data);
    let ingredients = object(data, "ingredients");

    content.row(vec!["Port".into(), "Ingredient".into(), "Calibration".into()]);
    for (port, iid) in assigned_ports(data) {
        let calibration = ingredients
            .and_then(|map| map.get(&iid))
            .map(|ingredient| text(ingredient, "calibration"))
            .unwrap_or_default();
        content.row(vec![port.to_string(), ingredient_name(ingredients, &iid), calibration]);
    }

    for page in ADMIN_PAGES {
        content.button(page.title(), Command::navigate(page));
    }
    content
}

pub(super) fn clean(screen: ScreenId, data: &ActionResponse) -> Content {
    let mut content = start(screen, screen.title(), data);
    content
        .button(
            "Cleaning cycle (left)",
            Command::dispatch(ActionRequest::new("clean_cycle_left")),
        )
        .button(
            "Cleaning cycle (right)",
            Command::dispatch(ActionRequest::new("clean_cycle_right")),
        );
    for port in 0..PORT_COUNT {
        content.button(
            format!("Clean port {}", port + 1),
            Command::dispatch(ActionRequest::new("clean").with("port", port)),
        );
    }
    content
}

pub(super) fn edit_ports(screen: ScreenId, data: &ActionResponse) -> Content {
    let mut content = start(screen, screen.title(), data);
    message_notice(&mut content, data, &[("ports_set", "Ports have been set.")]);

    let mut options = vec![none_option()];
    options.extend(
        object(data, "ingredients")
            .into_iter()
            .flatten()
            .filter(|(_, ingredient)| ingredient.get("type").and_then(Value::as_str) != Some("special"))
            .map(|(key, ingredient)| SelectOption::new(key_scalar(key), text(ingredient, "name"))),
    );

    let mut ports: Vec<(i64, Scalar)> = object(data, "ports")
        .into_iter()
        .flatten()
        .filter_map(|(port, iid)| Some((port.parse::<i64>().ok()?, scalar(iid))))
        .filter(|(port, _)| (0..PORT_COUNT).contains(port))
        .collect();
    ports.sort_by_key(|(port, _)| *port);

    content.bind(ActionForm::new("setports"));
    for (port, iid) in ports {
        content.field(FormField::select(
            &format!("port_{port}"),
            &format!("Port {}", port + 1),
            options.clone(),
            Some(&iid),
        ));
    }
    content.submit("Save");
    content
}

pub(super) fn calibrate(screen: ScreenId, data: &ActionResponse) -> Content {
    let mut content = start(screen, screen.title(), data);
    message_notice(&mut content, data, &[("calibration_set", "Calibration has been set.")]);
    let ingredients = object(data, "ingredients");

    let mut ports = vec![none_option()];
    ports.extend(
        assigned_ports(data)
            .into_iter()
            .map(|(port, iid)| SelectOption::new(port, format!("{port}: {}", ingredient_name(ingredients, &iid)))),
    );

    content
        .bind(ActionForm::new("setcalibration").locked())
        .field(FormField::select("port", "Port", ports, None))
        .button(
            "Start pump",
            Command::Dispatch {
                request: ActionRequest::new("calibrate"),
                carry: vec!["port".to_string()],
                unlocks_submit: true,
            },
        )
        .field(FormField::text("calibration", "Calibration", ""))
        .submit("Save calibration");
    content
}

pub(super) fn system(screen: ScreenId, data: &ActionResponse) -> Content {
    let mut content = start(screen, screen.title(), data);
    for command in SystemCommand::ALL {
        content.button(command.label(), Command::System(command));
    }
    content
}

pub(super) fn remove_recipe(screen: ScreenId, data: &ActionResponse) -> Content {
    let mut content = start(screen, screen.title(), data);
    message_notice(&mut content, data, &[("recipe_removed", "Recipe removed.")]);

    for recipe in array(data, "recipes") {
        let name = text(recipe, "name");
        let id = recipe.get("id").map(scalar).unwrap_or(Scalar::Int(-1));
        content.text(name.clone()).button(
            "Remove",
            Command::Confirm {
                prompt: format!("Really remove recipe \"{name}\"?"),
                then: Box::new(Command::Navigate {
                    screen: ScreenId::AdminRemoveRecipe,
                    params: vec![param("action", "remove_recipe"), param("id", id)],
                }),
            },
        );
    }
    content
}
