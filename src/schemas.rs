use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub type PersonName = String;

// Dish name -> people who shared it
pub type Assignments = HashMap<String, Vec<PersonName>>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Dish {
    pub name: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub people: Vec<PersonName>,
    #[serde(default)]
    pub assignments: Assignments,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PersonTotal {
    pub name: PersonName,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SplitResult {
    pub results: Vec<PersonTotal>,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BillRecord {
    pub id: String,
    pub results: Vec<PersonTotal>,
    pub total: f64,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub success: bool,
    pub results: Vec<PersonTotal>,
    pub total: f64,
    pub bill_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

// Prices may arrive as JSON numbers or as numeric strings like "300"
fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("price `{}` is not a number", number))),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("price `{}` is not a number", text))),
        other => Err(de::Error::custom(format!(
            "price must be a number, got `{}`",
            other
        ))),
    }
}
