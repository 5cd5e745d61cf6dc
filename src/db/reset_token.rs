use async_trait::async_trait;
use bson::doc;
use chrono::{DateTime, Utc};
use mongodb::Database;

use super::ResetTokenLedger;
use super::prelude::*;
use crate::model::reset_token::{ResetToken, TokenOutcome};
use crate::utils::errors::ExcavatorError;

///
/// Reset tokens held in the Auth collection.
///
pub struct MongoResetTokenLedger {
    db: Database,
}

impl MongoResetTokenLedger {
    pub fn new(db: Database) -> Self {
        MongoResetTokenLedger { db }
    }
}

#[async_trait]
impl ResetTokenLedger for MongoResetTokenLedger {
    async fn issue(&self, email: &str, expiry_time: DateTime<Utc>) -> Result<String, ExcavatorError> {
        let token = ResetToken::new(email, expiry_time);

        self.db.collection::<ResetToken>(AUTH).insert_one(&token, None).await?;

        Ok(token.key)
    }

    async fn consume(&self, key: &str, now: DateTime<Utc>) -> Result<TokenOutcome, ExcavatorError> {
        let filter = doc!{ "key": key };

        // find_one_and_delete makes the lookup atomic - two concurrent completion attempts
        // cannot both spend the same token, and once consumed (or found expired) the record
        // is gone so any later lookup is Invalid.
        let token = self.db.collection::<ResetToken>(AUTH).find_one_and_delete(filter, None).await?;

        match token {
            None => Ok(TokenOutcome::Invalid),
            Some(token) if token.expired(now) => Ok(TokenOutcome::Expired),
            Some(token) => Ok(TokenOutcome::Valid { email: token.email }),
        }
    }
}
