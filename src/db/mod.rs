use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ReadPreference, SelectionCriteria, ServerApi, ServerApiVersion},
    Client, Collection,
};
use secrecy::ExposeSecret;

use crate::{config::Config, errors::AppResult};

const APP_NAME: &str = "quiz-results-server";
const MIN_POOL_SIZE: u32 = 2;
const MAX_POOL_SIZE: u32 = 10;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle on the results database. Every query here is a read, so reads may
/// be served by a secondary when the primary is busy.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

async fn client_options(config: &Config) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(config.mongo_conn_string.expose_secret()).await?;

    options.app_name = Some(APP_NAME.to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.min_pool_size = Some(MIN_POOL_SIZE);
    options.max_pool_size = Some(MAX_POOL_SIZE);
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(config.request_timeout().min(CONNECT_TIMEOUT));
    options.selection_criteria = Some(SelectionCriteria::ReadPreference(
        ReadPreference::PrimaryPreferred {
            options: Default::default(),
        },
    ));

    Ok(options)
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Client::with_options(client_options(config).await?)?;

        client
            .database(&config.mongo_db_name)
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!(
            "MongoDB ready: database '{}', pool {}-{}",
            config.mongo_db_name,
            MIN_POOL_SIZE,
            MAX_POOL_SIZE
        );

        Ok(Self {
            client,
            db_name: config.mongo_db_name.clone(),
        })
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client.database(&self.db_name).collection(collection_name)
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}
