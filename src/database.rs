use mongodb::{bson::doc, options::IndexOptions, Client, IndexModel};
use tracing::info;

use crate::config::AdminConfig;
use crate::models::Admin;
use crate::repository::{
    AdminRepo, ArticleRepo, CinemaRepo, ComboRepo, MovieRepo, NewsRepo, NotificationRepo,
    ReviewRepo, SeatRepo, ShowtimeRepo, TicketRepo, UserRepo,
};

/// Handle to the document store. One collection per entity; repositories are
/// cheap views over the shared client.
#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    pub async fn new(url: &str, db_name: &str) -> mongodb::error::Result<Self> {
        let client = Client::with_uri_str(url).await?;
        Ok(Database {
            db: client.database(db_name),
        })
    }

    /// Startup task: indexes the lookups rely on.
    pub async fn ensure_indexes(&self) -> mongodb::error::Result<()> {
        info!("Ensuring database indexes...");
        let unique_username = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.db
            .collection::<Admin>("admins")
            .create_index(unique_username)
            .await?;
        info!("Indexes ready");
        Ok(())
    }

    /// Seed a default admin account when the collection is empty.
    pub async fn seed_default_admin(&self, config: &AdminConfig) -> mongodb::error::Result<()> {
        let admins = self.admins();
        if admins.count().await? > 0 {
            return Ok(());
        }
        let mut admin = Admin::new(
            config.default_username.clone(),
            config.default_password.clone(),
        );
        admin.full_name = Some("Administrator".to_string());
        admin.email = Some(config.default_email.clone());
        admin.role = Some("super_admin".to_string());
        admin.notes = Some("Default system admin".to_string());
        admins.insert(admin).await?;
        info!("Seeded default admin account '{}'", config.default_username);
        Ok(())
    }

    pub fn movies(&self) -> MovieRepo {
        MovieRepo::new(&self.db)
    }

    pub fn cinemas(&self) -> CinemaRepo {
        CinemaRepo::new(&self.db)
    }

    pub fn showtimes(&self) -> ShowtimeRepo {
        ShowtimeRepo::new(&self.db)
    }

    pub fn seats(&self) -> SeatRepo {
        SeatRepo::new(&self.db)
    }

    pub fn tickets(&self) -> TicketRepo {
        TicketRepo::new(&self.db)
    }

    pub fn users(&self) -> UserRepo {
        UserRepo::new(&self.db)
    }

    pub fn admins(&self) -> AdminRepo {
        AdminRepo::new(&self.db)
    }

    pub fn reviews(&self) -> ReviewRepo {
        ReviewRepo::new(&self.db)
    }

    pub fn articles(&self) -> ArticleRepo {
        ArticleRepo::new(&self.db)
    }

    pub fn news(&self) -> NewsRepo {
        NewsRepo::new(&self.db)
    }

    pub fn notifications(&self) -> NotificationRepo {
        NotificationRepo::new(&self.db)
    }

    pub fn combos(&self) -> ComboRepo {
        ComboRepo::new(&self.db)
    }
}
