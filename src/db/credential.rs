use async_trait::async_trait;
use bson::{Document, doc};
use mongodb::Database;

use super::CredentialStore;
use super::prelude::*;
use crate::model::employee::Employee;
use crate::utils::errors::ExcavatorError;

///
/// Employee credentials held in the Employees collection.
///
/// Every query filters on the is_active soft-delete flag, so an inactive record can never
/// be found here - and therefore can never authenticate, regardless of its secret.
///
pub struct MongoCredentialStore {
    db: Database,
}

impl MongoCredentialStore {
    pub fn new(db: Database) -> Self {
        MongoCredentialStore { db }
    }
}

#[async_trait]
impl CredentialStore for MongoCredentialStore {
    async fn find_active_by_username(&self, username: &str) -> Result<Option<Employee>, ExcavatorError> {
        let filter = doc!{ "authorization.username": username, "is_active": true };

        Ok(self.db.collection::<Employee>(EMPLOYEES).find_one(filter, None).await?)
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<Employee>, ExcavatorError> {
        let filter = doc!{ "personal.email": email, "is_active": true };

        Ok(self.db.collection::<Employee>(EMPLOYEES).find_one(filter, None).await?)
    }

    async fn update_password(&self, email: &str, phc: &str) -> Result<bool, ExcavatorError> {
        let filter = doc!{ "personal.email": email, "is_active": true };

        let update = doc!{
            "$set": {
                "authorization.password": phc,
                "updated_date": bson::DateTime::now(),
            }
        };

        let result = self.db.collection::<Document>(EMPLOYEES).update_one(filter, update, None).await?;

        Ok(result.matched_count > 0)
    }

    async fn ping(&self) -> Result<(), ExcavatorError> {
        super::mongo::ping(&self.db).await?;
        Ok(())
    }
}
