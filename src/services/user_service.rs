// ==================== USER DATA ACCESS ====================
// Cada operação abre um handle novo para a collection configurada e roda
// sob um prazo fixo (DB_TIMEOUT). Sem transação entre chamadas.

use crate::{
    database::MongoDB,
    models::{DeleteResult, InsertResult, UpdateResult, User, UserFields},
    utils::error::AppError,
};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson},
    Collection,
};
use std::future::IntoFuture;
use std::time::Duration;

/// Prazo de cada chamada ao banco
pub const DB_TIMEOUT: Duration = Duration::from_secs(10);

/// CRUD operations over the user collection.
///
/// Handlers only see this trait, so they can run against any backing store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users in store-native order.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// `NotFound` when no document has this id.
    async fn get(&self, id: ObjectId) -> Result<User, AppError>;

    async fn create(&self, user: User) -> Result<InsertResult, AppError>;

    /// Overwrites the four data fields. No match is a zero-count result, not an error.
    async fn update(&self, id: ObjectId, fields: UserFields) -> Result<UpdateResult, AppError>;

    /// No match is a zero-count result, not an error.
    async fn delete(&self, id: ObjectId) -> Result<DeleteResult, AppError>;
}

/// Runs a driver call under a deadline; expiry becomes `AppError::Timeout`.
pub async fn with_deadline<T, F>(limit: Duration, operation: &str, fut: F) -> Result<T, AppError>
where
    F: IntoFuture<Output = Result<T, mongodb::error::Error>>,
{
    match tokio::time::timeout(limit, fut.into_future()).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::Timeout(format!(
            "{} exceeded {}s",
            operation,
            limit.as_secs_f64()
        ))),
    }
}

// O prazo cobre a query e a iteração do cursor
async fn find_all(collection: Collection<User>) -> mongodb::error::Result<Vec<User>> {
    let cursor = collection.find(doc! {}).await?;
    cursor.try_collect().await
}

#[derive(Clone)]
pub struct MongoUserService {
    db: MongoDB,
    db_name: String,
    collection_name: String,
    timeout: Duration,
}

impl MongoUserService {
    pub fn new(db: MongoDB, db_name: impl Into<String>, collection_name: impl Into<String>) -> Self {
        Self {
            db,
            db_name: db_name.into(),
            collection_name: collection_name.into(),
            timeout: DB_TIMEOUT,
        }
    }

    fn collection(&self) -> Collection<User> {
        self.db.collection::<User>(&self.db_name, &self.collection_name)
    }
}

#[async_trait]
impl UserStore for MongoUserService {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let collection = self.collection();

        // O prazo cobre a query e a iteração do cursor
        with_deadline(self.timeout, "list users", find_all(collection)).await
    }

    async fn get(&self, id: ObjectId) -> Result<User, AppError> {
        let collection = self.collection();

        with_deadline(self.timeout, "get user", collection.find_one(doc! { "_id": id }))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", id.to_hex())))
    }

    async fn create(&self, user: User) -> Result<InsertResult, AppError> {
        let collection = self.collection();

        let result = with_deadline(self.timeout, "create user", collection.insert_one(&user)).await?;

        let inserted_id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };

        log::debug!("💾 Inserted user {}", inserted_id);
        Ok(InsertResult { inserted_id })
    }

    async fn update(&self, id: ObjectId, fields: UserFields) -> Result<UpdateResult, AppError> {
        let collection = self.collection();

        let result = with_deadline(
            self.timeout,
            "update user",
            collection.update_one(doc! { "_id": { "$eq": id } }, fields.replacement()),
        )
        .await?;

        Ok(UpdateResult::from(result))
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteResult, AppError> {
        let collection = self.collection();

        let result = with_deadline(
            self.timeout,
            "delete user",
            collection.delete_one(doc! { "_id": { "$eq": id } }),
        )
        .await?;

        Ok(DeleteResult::from(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deadline_passes_result_through() {
        let result = with_deadline(Duration::from_millis(100), "noop", async { Ok::<_, mongodb::error::Error>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_deadline_expiry_is_timeout() {
        let result: Result<(), AppError> = with_deadline(Duration::from_millis(10), "slow", async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, mongodb::error::Error>(())
        })
        .await;

        match result {
            Err(AppError::Timeout(msg)) => assert!(msg.starts_with("slow exceeded")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_crud_against_mongodb() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri).await.unwrap();
        let collection_name = format!("users_test_{}", ObjectId::new().to_hex());
        let service = MongoUserService::new(db.clone(), "user_service_tests", collection_name.clone());

        let created = service
            .create(User {
                first_name: "Ann".into(),
                email: "a@x.com".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = ObjectId::parse_str(&created.inserted_id).unwrap();

        let fetched = service.get(id).await.unwrap();
        assert_eq!(fetched.first_name, "Ann");
        assert_eq!(fetched.email, "a@x.com");
        assert_eq!(service.list().await.unwrap().len(), 1);

        let fields = UserFields { last_name: "Lee".into(), ..Default::default() };
        let updated = service.update(id, fields.clone()).await.unwrap();
        assert_eq!(updated.matched_count, 1);

        let fetched = service.get(id).await.unwrap();
        assert_eq!(fetched.first_name, "");
        assert_eq!(fetched.last_name, "Lee");

        assert_eq!(service.delete(id).await.unwrap().deleted_count, 1);
        assert!(matches!(service.get(id).await, Err(AppError::NotFound(_))));
        assert_eq!(service.update(id, fields).await.unwrap().matched_count, 0);
        assert_eq!(service.delete(id).await.unwrap().deleted_count, 0);

        db.collection::<User>("user_service_tests", &collection_name)
            .drop()
            .await
            .unwrap();
    }
}
