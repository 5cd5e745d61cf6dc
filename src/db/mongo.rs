use std::fs;
use bson::{Document, doc};
use mongodb::{Client, Database, options::ClientOptions};
use tracing::{debug, info};

use super::prelude::*;
use crate::utils::config::Configuration;
use crate::utils::errors::{ErrorCode, ExcavatorError};

///
/// Run any schema-like updates against MongoDB that haven't been run yet.
///
pub async fn update_mongo(db: &Database) -> Result<(), ExcavatorError> {
    create_init_indexes(db).await?;
    Ok(())
}

async fn create_init_indexes(db: &Database) -> Result<(), ExcavatorError> {
    // Note: the current driver doesn't yet support creating indexes on collections, so the dbcommand must be used instead.
    // https://docs.mongodb.com/manual/reference/command/createIndexes/#createindexes

    // Login lookups go through the username. Sparse, because documents created before the
    // credential sub-document is populated have no username.
    db.run_command(doc! { "createIndexes": EMPLOYEES, "indexes": [
        { "key": { "authorization.username": 1 }, "name": "idx_username", "unique": true, "sparse": true } ] }, None).await?;

    // Reset keys must be unique across active records, and MongoDB reaps expired tokens
    // itself so the collection never accumulates dead records.
    db.run_command(doc! { "createIndexes": AUTH, "indexes": [
        { "key": { "key": 1 },         "name": "idx_key",    "unique": true },
        { "key": { "expiry_time": 1 }, "name": "idx_expiry", "expireAfterSeconds": 0 } ] }, None).await?;

    Ok(())
}

pub async fn get_mongo_db(app_name: &str, config: &Configuration) -> Result<Database, ExcavatorError> {

    let uri = match &config.mongo_credentials {
        Some(filename) => {
            debug!("Loading MongoDB credentials from secrets file {}", filename);

            // Read username and password from a secrets file.
            let credentials = fs::read_to_string(filename)
                .map_err(|err| ExcavatorError::new(ErrorCode::UnableToReadCredentials, &format!("Unable to read credentials from {}: {}", filename, err)))?;
            let mut credentials = credentials.lines();
            let uri = config.mongo_uri.replace("$USERNAME", credentials.next().unwrap_or_default());
            uri.replace("$PASSWORD", credentials.next().unwrap_or_default())
        },
        None => config.mongo_uri.clone(),
    };

    // Parse the uri now.
    let mut client_options = ClientOptions::parse(&uri).await?;

    // Manually set an option.
    client_options.app_name = Some(app_name.to_string());

    // Get a handle to the deployment.
    let client = Client::with_options(client_options)?;

    info!("Connecting to MongoDB...");

    let db = client.database(&config.db_name);
    ping(&db).await?;

    info!("Connected to MongoDB");
    Ok(db)
}

pub async fn ping(db: &Database) -> Result<Document, ExcavatorError> {
    Ok(db.run_command(doc! { "ping": 1 }, None).await?)
}
