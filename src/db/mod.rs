use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const APP_NAME: &str = "wiki-quiz-server";
const POOL_SIZE: (u32, u32) = (1, 10);
const TIMEOUT: Duration = Duration::from_secs(5);

/// Handle on the quiz database. Only built when `QUIZ_STORE=mongo`.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let options = client_options(&config.mongo_conn_string).await?;
        let client = Client::with_options(options)?;

        let db = Self {
            client,
            db_name: config.mongo_db_name.clone(),
        };
        db.health_check().await?;

        log::info!("Quizzes are stored in MongoDB database '{}'", db.db_name);
        Ok(db)
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }

    /// Pings the quiz database itself, not `admin`.
    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

/// Options for a small pool that fails fast when the server is unreachable.
async fn client_options(conn_string: &str) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(conn_string).await.map_err(|e| {
        AppError::DatabaseError(format!("invalid MONGO_CONN_STRING: {}", e))
    })?;

    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.app_name = Some(APP_NAME.to_string());
    options.min_pool_size = Some(POOL_SIZE.0);
    options.max_pool_size = Some(POOL_SIZE.1);
    // Timeouts given in the connection string win.
    options.connect_timeout.get_or_insert(TIMEOUT);
    options.server_selection_timeout.get_or_insert(TIMEOUT);

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_options_fail_fast() {
        let options = client_options("mongodb://localhost:27017")
            .await
            .expect("plain URI parses without a server");

        assert_eq!(options.app_name.as_deref(), Some(APP_NAME));
        assert_eq!(options.max_pool_size, Some(10));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(5)));
        assert!(options.server_api.is_some());
    }

    #[tokio::test]
    async fn test_bad_connection_string_is_database_error() {
        let err = client_options("postgres://localhost/quizzes")
            .await
            .expect_err("scheme is not mongodb");

        assert!(matches!(err, AppError::DatabaseError(ref msg) if msg.contains("MONGO_CONN_STRING")));
    }

    #[tokio::test]
    async fn test_connect_reports_unreachable_server() {
        let mut config = Config::test_config();
        config.mongo_conn_string =
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200".to_string();

        let err = Database::connect(&config)
            .await
            .err()
            .expect("nothing listens on port 1");
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}
