use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// Usuário (armazenado no MongoDB)
///
/// Campos vazios não são gravados nem serializados.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,

    /// Texto plano, sem hash
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

/// The four data fields an update overwrites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFields {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub email: String,
}

impl UserFields {
    /// `$set` covering every field, empty strings included.
    ///
    /// Update is a full replace: a field missing from the request body is
    /// written as `""`, not left untouched.
    pub fn replacement(&self) -> Document {
        doc! {
            "$set": {
                "first_name": self.first_name.as_str(),
                "last_name": self.last_name.as_str(),
                "password": self.password.as_str(),
                "email": self.email.as_str(),
            }
        }
    }
}

/// Request body para criar/atualizar usuário
///
/// Campo ausente ou `null` equivale a vazio.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UserPayload {
    /// Hex ObjectId, honored on create only
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserPayload {
    /// Builds the document to insert. An absent or empty `_id` leaves
    /// identifier assignment to the store.
    pub fn into_user(self) -> Result<User, AppError> {
        let id = match self.id.as_deref() {
            None | Some("") => None,
            Some(hex) => Some(parse_object_id(hex)?),
        };

        let fields = self.into_fields();
        Ok(User {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            password: fields.password,
            email: fields.email,
        })
    }

    pub fn into_fields(self) -> UserFields {
        UserFields {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        }
    }
}

/// Response de usuário (`_id` em hex)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name: u.first_name,
            last_name: u.last_name,
            password: u.password,
            email: u.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InsertResult {
    #[serde(rename = "InsertedID")]
    pub inserted_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateResult {
    #[serde(rename = "MatchedCount")]
    pub matched_count: u64,
    #[serde(rename = "ModifiedCount")]
    pub modified_count: u64,
    #[serde(rename = "UpsertedCount")]
    pub upserted_count: u64,
    #[serde(rename = "UpsertedID")]
    pub upserted_id: Option<String>,
}

impl From<mongodb::results::UpdateResult> for UpdateResult {
    fn from(r: mongodb::results::UpdateResult) -> Self {
        let upserted_id = r.upserted_id.map(|id| match id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        });

        UpdateResult {
            matched_count: r.matched_count,
            modified_count: r.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResult {
    #[serde(rename = "DeletedCount")]
    pub deleted_count: u64,
}

impl From<mongodb::results::DeleteResult> for DeleteResult {
    fn from(r: mongodb::results::DeleteResult) -> Self {
        DeleteResult {
            deleted_count: r.deleted_count,
        }
    }
}

/// Converte o id hex do path em ObjectId
pub fn parse_object_id(hex: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(hex)
        .map_err(|_| AppError::InvalidRequest(format!("invalid user id '{}'", hex)))
}
