use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::remote::Document;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Internal,
    External,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebitCredit {
    #[default]
    Debit,
    Credit,
}

impl std::str::FromStr for TransactionKind {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_value(Value::String(raw.to_string()))?)
    }
}

impl std::str::FromStr for DebitCredit {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_value(Value::String(raw.to_string()))?)
    }
}

/// Finance ledger entry. The amount's sign is not enforced; direction comes
/// from `debit_credit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "$id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    /// Associated user ids. An older schema revision stored a single user
    /// string; see the migration note in DESIGN.md.
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub debit_credit: DebitCredit,
    /// Owning project id.
    #[serde(default)]
    pub project: String,
}

impl Transaction {
    pub fn from_document(document: &Document) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(serde_json::to_value(document)?)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    pub title: String,
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub users: Vec<String>,
    pub debit_credit: DebitCredit,
    pub project: String,
}

impl NewTransaction {
    pub fn new(title: impl Into<String>, amount: f64, project: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            amount,
            description: String::new(),
            kind: TransactionKind::default(),
            users: Vec::new(),
            debit_credit: DebitCredit::default(),
            project: project.into(),
        }
    }

    pub fn fields(&self) -> Map<String, Value> {
        super::to_fields(self)
    }
}

/// Mutable fields accepted by a transaction update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit_credit: Option<DebitCredit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl TransactionPatch {
    pub fn fields(&self) -> Map<String, Value> {
        super::to_fields(self)
    }
}
