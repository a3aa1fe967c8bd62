//! Integration test harness.
//!
//! [`TestContext`] owns everything a suite run needs: the running server, an
//! HTTP client, and a direct connection to the test database for seeding,
//! teardown and assertions. It is built once, handed to every scenario, and
//! stopped once at the end.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use blog_api::BlogServer;
use blog_api::config::test_database_url;
use blog_core::domain::BlogPost;
use blog_core::ports::{BaseRepository, PostRepository};
use blog_infra::database::{self, DatabaseConfig};
use blog_infra::SqlPostRepository;
use sea_orm::DbConn;
use serde::Serialize;
use tempfile::TempDir;
use uuid::Uuid;

use super::fixtures;

/// Posts inserted before every scenario.
pub const SEED_COUNT: usize = 10;

pub struct TestContext {
    pub server: BlogServer,
    pub client: reqwest::Client,
    /// Direct access to the test database, bypassing HTTP.
    pub posts: Arc<dyn PostRepository>,
    db: Option<Arc<DbConn>>,
    _scratch: Option<TempDir>,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,blog_api=info,posts_api=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

impl TestContext {
    /// Start the server against `TEST_DATABASE_URL`, or a throwaway SQLite
    /// file when it is unset.
    pub async fn start() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        init_tracing();

        let (url, scratch) = match test_database_url() {
            Some(url) => (url, None),
            None => {
                let dir = tempfile::tempdir().context("creating scratch directory")?;
                let path = dir.path().join("test-blog-app.db");
                (format!("sqlite://{}?mode=rwc", path.display()), Some(dir))
            }
        };

        let server = BlogServer::start(&url)
            .await
            .context("starting blog server")?;

        let config = DatabaseConfig::new(url);
        let (posts, db): (Arc<dyn PostRepository>, Option<Arc<DbConn>>) = if config.is_in_memory() {
            // a second pool would open a different, empty database
            (server.state().posts.clone(), None)
        } else {
            let db = Arc::new(
                database::connect(&config)
                    .await
                    .context("connecting to test database")?,
            );
            (Arc::new(SqlPostRepository::new(Arc::clone(&db))), Some(db))
        };

        Ok(Self {
            server,
            client: reqwest::Client::new(),
            posts,
            db,
            _scratch: scratch,
        })
    }

    /// Stop the server and close the harness connection.
    pub async fn stop(self) -> anyhow::Result<()> {
        self.server.stop().await.context("stopping blog server")?;
        if let Some(db) = self.db {
            db.close_by_ref().await.context("closing test database")?;
        }
        Ok(())
    }

    /// Insert [`SEED_COUNT`] generated posts.
    pub async fn seed(&self) -> anyhow::Result<Vec<BlogPost>> {
        tracing::info!("Seeding blog post data");
        let posts = (0..SEED_COUNT)
            .map(|_| BlogPost::create(fixtures::blog_post_data()))
            .collect();
        Ok(self.posts.insert_many(posts).await?)
    }

    /// Remove every post from the test database.
    pub async fn tear_down(&self) -> anyhow::Result<()> {
        tracing::warn!("Deleting database!");
        self.posts.delete_all().await?;
        Ok(())
    }

    /// Run one scenario: seed, act and assert, tear down.
    ///
    /// Teardown runs whenever the scenario returns, including with an error.
    /// Scenarios check with `ensure!` rather than `assert!`, since a panic
    /// unwinds past teardown.
    pub async fn run<'a, F, Fut>(&'a self, name: &str, scenario: F) -> anyhow::Result<()>
    where
        F: FnOnce(&'a TestContext) -> Fut,
        Fut: Future<Output = anyhow::Result<()>> + 'a,
    {
        tracing::info!(scenario = name, "Running scenario");
        self.seed()
            .await
            .with_context(|| format!("seeding before `{name}`"))?;

        let outcome = scenario(self).await;

        self.tear_down()
            .await
            .with_context(|| format!("tearing down after `{name}`"))?;
        outcome.with_context(|| format!("scenario `{name}` failed"))
    }

    /// Some stored post.
    pub async fn any_post(&self) -> anyhow::Result<BlogPost> {
        self.posts
            .find_all()
            .await?
            .into_iter()
            .next()
            .context("test database holds no posts")
    }

    /// Direct database lookup.
    pub async fn find_post(&self, id: Uuid) -> anyhow::Result<Option<BlogPost>> {
        Ok(self.posts.find_by_id(id).await?)
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(self.server.url(path)).send().await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<reqwest::Response> {
        self.client.post(self.server.url(path)).json(body).send().await
    }

    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<reqwest::Response> {
        self.client.put(self.server.url(path)).json(body).send().await
    }

    pub async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.delete(self.server.url(path)).send().await
    }
}
