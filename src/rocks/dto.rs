use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::repo::User;
use crate::types::repo::RockType;

use super::error::ApiError;
use super::repo::{Rock, RockWithRelations};

/// POST /rocks body. `weight` and `type_id` arrive as free-form JSON because
/// clients send them both as numbers and as numeric strings.
#[derive(Debug, Deserialize)]
pub struct CreateRockRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub type_id: Option<Value>,
}

/// Fully validated create payload.
#[derive(Debug)]
pub struct NewRock {
    pub name: String,
    pub weight: f64,
    pub type_id: i64,
}

impl CreateRockRequest {
    /// Typed parse step. Presence is checked for all three fields before any
    /// conversion, so an incomplete payload always reports missing fields
    /// even when another field is also malformed.
    pub fn validate(self) -> Result<NewRock, ApiError> {
        let name = self.name.filter(|n| !n.is_empty());
        let weight = self.weight.filter(|w| !is_blank(w));
        let type_id = self.type_id.filter(|t| !is_blank(t));

        let (Some(name), Some(weight), Some(type_id)) = (name, weight, type_id) else {
            return Err(ApiError::MissingFields);
        };

        let weight = as_f64(&weight).ok_or(ApiError::WeightNotNumeric)?;
        // An unparseable id cannot name any existing type.
        let type_id = as_i64(&type_id).ok_or(ApiError::TypeNotFound)?;

        Ok(NewRock {
            name,
            weight,
            type_id,
        })
    }
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Nested type shape.
#[derive(Debug, Serialize)]
pub struct RockTypeBody {
    pub label: String,
}

/// Nested user shape, the public identity subset.
#[derive(Debug, Serialize)]
pub struct RockUserBody {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Expanded rock: related records embedded, never referenced by id.
#[derive(Debug, Serialize)]
pub struct RockBody {
    pub id: i64,
    pub name: String,
    pub weight: f64,
    pub user: RockUserBody,
    #[serde(rename = "type")]
    pub kind: RockTypeBody,
}

impl RockBody {
    /// Assemble the expanded shape from separately fetched records.
    pub fn from_parts(rock: Rock, user: User, kind: RockType) -> Self {
        Self {
            id: rock.id,
            name: rock.name,
            weight: rock.weight,
            user: RockUserBody {
                id: user.id,
                first_name: user.first_name,
                last_name: user.last_name,
            },
            kind: RockTypeBody { label: kind.label },
        }
    }
}

impl From<RockWithRelations> for RockBody {
    fn from(row: RockWithRelations) -> Self {
        Self {
            id: row.id,
            name: row.name,
            weight: row.weight,
            user: RockUserBody {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
            },
            kind: RockTypeBody {
                label: row.type_label,
            },
        }
    }
}
