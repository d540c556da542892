use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::remote::Document;

/// A member record. `user_id` correlates with the auth backend's subject id
/// and is distinct from the record's own document id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "$id", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "userID", default)]
    pub user_id: String,
}

impl User {
    pub fn from_document(document: &Document) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(serde_json::to_value(document)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let document: Document = serde_json::from_value(serde_json::json!({
            "$id": "u1",
            "Name": "Rina",
            "phone": "+1 555 0101",
            "email": "rina@example.com",
            "userID": "auth-77",
            "labels": ["admin"]
        }))
        .unwrap();

        let user = User::from_document(&document).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.name, "Rina");
        assert_eq!(user.user_id, "auth-77");

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("labels").is_none());
    }

    #[test]
    fn test_normalize_absent_fields_stay_empty() {
        let document: Document =
            serde_json::from_value(serde_json::json!({ "$id": "u2" })).unwrap();
        let user = User::from_document(&document).unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.user_id, "");
    }
}
