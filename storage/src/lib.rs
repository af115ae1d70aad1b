//storage holds the MongoDB schema & async CRUD for generated layouts

pub mod models;

use crate::models::LayoutDoc;
use bson::doc;
use futures_util::stream::TryStreamExt;
use log::debug;
use mongodb::{Client, Collection, IndexModel, options::ClientOptions};

pub use mongodb::error::{Error as StorageError, Result as StorageResult};

pub struct LayoutStorage {
    col: Collection<LayoutDoc>,
}

impl LayoutStorage {
    // Initialize the MongoDB collection
    pub async fn init(uri: &str, db_name: &str, col_name: &str) -> mongodb::error::Result<Self> {
        let mut opts = ClientOptions::parse(uri).await?;
        opts.app_name = Some("LandscapeStorage".to_string());
        let client = Client::with_options(opts)?;
        let col = client.database(db_name).collection(col_name);

        // One layout per (name, seed)
        let index_model = IndexModel::builder()
            .keys(doc! { "name": 1, "seed": 1 })
            .build();
        col.create_index(index_model).await?;

        Ok(Self { col })
    }

    pub async fn list_names(&self) -> mongodb::error::Result<Vec<String>> {
        let mut cursor = self.col.find(doc! {}).await?;
        let mut names = Vec::new();
        while let Some(layout) = cursor.try_next().await? {
            names.push(layout.name);
        }
        Ok(names)
    }

    pub async fn read_by_name(&self, name: &str) -> mongodb::error::Result<Option<LayoutDoc>> {
        self.col.find_one(doc! { "name": name }).await
    }

    // Insert a layout, replacing any existing one with the same name and seed
    pub async fn create(&self, layout: LayoutDoc) -> mongodb::error::Result<()> {
        let filter = doc! {
            "name": &layout.name,
            "seed": layout.seed,
        };
        let removed = self.col.delete_one(filter).await?;
        debug!(
            "storing layout '{}' (seed {}), replaced {}",
            layout.name, layout.seed, removed.deleted_count
        );

        self.col.insert_one(layout).await?;
        Ok(())
    }

    pub async fn read_by_seed(&self, seed: i64) -> mongodb::error::Result<Option<LayoutDoc>> {
        self.col.find_one(doc! { "seed": seed }).await
    }

    // Delete by seed (for clean-up).
    pub async fn delete_by_seed(&self, seed: i64) -> mongodb::error::Result<()> {
        self.col.delete_one(doc! { "seed": seed }).await?;
        Ok(())
    }
}
