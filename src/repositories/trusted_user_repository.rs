use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::TrustedUser,
    repositories::filters::equals_ignore_case,
};

#[async_trait]
pub trait TrustedUserRepository: Send + Sync {
    async fn find_by_email_lower(&self, email_lower: &str) -> AppResult<Option<TrustedUser>>;
    /// Scan for legacy records that predate `emailLower`.
    async fn find_by_email_ignore_case(&self, email: &str) -> AppResult<Option<TrustedUser>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoTrustedUserRepository {
    collection: Collection<TrustedUser>,
}

impl MongoTrustedUserRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl TrustedUserRepository for MongoTrustedUserRepository {
    async fn find_by_email_lower(&self, email_lower: &str) -> AppResult<Option<TrustedUser>> {
        let user = self
            .collection
            .find_one(doc! { "emailLower": email_lower })
            .await?;
        Ok(user)
    }

    async fn find_by_email_ignore_case(&self, email: &str) -> AppResult<Option<TrustedUser>> {
        let user = self
            .collection
            .find_one(doc! { "email": equals_ignore_case(email) })
            .await?;
        Ok(user)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for trusted users collection");

        // Sparse so legacy records without emailLower do not collide on null.
        let email_lower_index = IndexModel::builder()
            .keys(doc! { "emailLower": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name("emailLower_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(email_lower_index).await?;

        log::info!("Successfully created indexes for trusted users collection");
        Ok(())
    }
}
