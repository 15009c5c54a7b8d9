use log::{error, info};
use mongodb::bson::doc;
use mongodb::{Client, options::ClientOptions};
use std::error::Error;

pub struct Database {
    pub client: Client,
}

impl Database {
    pub async fn init() -> Result<Self, Box<dyn Error>> {
        let mongo_uri =
            std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let mut client_options = ClientOptions::parse(&mongo_uri).await?;
        client_options.app_name = Some("blog-api".to_string());

        let client = Client::with_options(client_options)?;

        // Ping the server to confirm the connection before serving requests
        client.database("admin").run_command(doc! { "ping": 1 }).await?;

        info!("MongoDB connected");

        Ok(Self { client })
    }
}

// This function is a convenience wrapper around Database::init()
pub async fn connect_to_mongo() -> Result<Client, Box<dyn Error>> {
    let database = Database::init().await.map_err(|e| {
        error!("Failed to initialize database: {e:?}");
        e
    })?;
    Ok(database.client)
}
