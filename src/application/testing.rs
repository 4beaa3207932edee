use std::sync::Arc;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::SeaOrmRepositoryProvider;

/// Cheapest work factor bcrypt accepts.
pub(crate) const BCRYPT_COST: u32 = 4;

pub(crate) async fn repos() -> Arc<dyn RepositoryProvider> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(SeaOrmRepositoryProvider::new(db))
}

pub(crate) fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".into(),
        expiration_hours: 1,
        issuer: "shop-service".into(),
    }
}
