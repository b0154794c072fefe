//! App Context

use std::sync::Arc;

use emporium::pricing::PricingPolicy;
use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        brands::{BrandsService, PgBrandsService},
        carts::{CartsService, PgCartsService},
        categories::{CategoriesService, PgCategoriesService},
        features::{FeaturesService, PgFeaturesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        specifications::{PgSpecificationsService, SpecificationsService},
        subcategories::{PgSubcategoriesService, SubcategoriesService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Every service the HTTP layer talks to.
#[derive(Clone)]
pub struct AppContext {
    pub categories: Arc<dyn CategoriesService>,
    pub subcategories: Arc<dyn SubcategoriesService>,
    pub brands: Arc<dyn BrandsService>,
    pub specifications: Arc<dyn SpecificationsService>,
    pub features: Arc<dyn FeaturesService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub users: Arc<dyn UsersService>,
    pub orders: Arc<dyn OrdersService>,

    /// Rates the cart and order services price with.
    pub pricing: PricingPolicy,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        session_ttl: SignedDuration,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with_limit(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), session_ttl))
    }

    /// Wire the Postgres-backed services to an existing pool.
    pub fn from_db(db: Db, session_ttl: SignedDuration) -> Self {
        let policy = PricingPolicy::default();

        Self {
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            subcategories: Arc::new(PgSubcategoriesService::new(db.clone())),
            brands: Arc::new(PgBrandsService::new(db.clone())),
            specifications: Arc::new(PgSpecificationsService::new(db.clone())),
            features: Arc::new(PgFeaturesService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::with_policy(db.clone(), policy)),
            users: Arc::new(PgUsersService::with_session_ttl(db.clone(), session_ttl)),
            orders: Arc::new(PgOrdersService::with_policy(db, policy)),
            pricing: policy,
        }
    }
}
