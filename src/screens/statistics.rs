use serde_json::Value;

use super::{array, number, start, text};
use crate::client::{ActionResponse, param};
use crate::core::content::{Command, Content};
use crate::core::screen::ScreenId;

pub(super) fn statistics(screen: ScreenId, data: &ActionResponse) -> Content {
    let mut content = start(screen, screen.title(), data);
    let date = data.str_field("date").unwrap_or_default();

    for party in array(data, "parties") {
        let partydate = text(party, "partydate");
        let label = if partydate == date {
            format!("▶ {partydate}")
        } else {
            partydate.clone()
        };
        content.button(
            label,
            Command::Navigate {
                screen: ScreenId::Statistics,
                params: vec![param("date", partydate)],
            },
        );
    }

    let total_count = data.get("total_count").map(number_text).unwrap_or_else(|| "0".to_string());
    let total_amount = (data.f64_field("total_amount").unwrap_or(0.0) * 10.0).round() / 10.0;
    content.row(vec!["Cocktails".to_string(), total_count]);
    content.row(vec!["Liters".to_string(), total_amount.to_string()]);

    content.heading("Cocktails");
    chart(&mut content, array(data, "cocktail_count"), "name", "count");
    content.heading("Ingredients (liters)");
    chart(&mut content, array(data, "ingredients_amount"), "ingredient", "liters");
    content.heading("Cocktails by hour");
    chart(&mut content, array(data, "cocktails_by_time"), "hour", "count");
    content
}

/// Bar rows scaled to the largest value, never below 1.
fn chart(content: &mut Content, rows: &[Value], label_key: &str, value_key: &str) {
    let max = rows
        .iter()
        .map(|row| number(row, value_key))
        .fold(1.0_f64, f64::max);
    for row in rows {
        let value = number(row, value_key);
        content.bar(text(row, label_key), text(row, value_key), value / max);
    }
}

fn number_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
