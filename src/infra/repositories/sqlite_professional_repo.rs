use crate::domain::{models::professional::Professional, ports::ProfessionalRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteProfessionalRepo {
    pool: SqlitePool,
}

impl SqliteProfessionalRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfessionalRepository for SqliteProfessionalRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Professional>, AppError> {
        sqlx::query_as::<_, Professional>("SELECT * FROM professionals WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
