//! Program directory lookups
//!
//! Info reports must reference a listed program by its display label; the
//! validator checks drafts against this lookup.

use crate::orm::programs;
use crate::reports::store::StoreError;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Read access to the program listing.
#[async_trait]
pub trait ProgramDirectory: Send + Sync {
    /// Display labels of the currently active programs.
    async fn active_labels(&self) -> Result<Vec<String>, StoreError>;
}

/// SeaORM-backed directory over the `programs` table.
pub struct DbProgramDirectory {
    db: DatabaseConnection,
}

impl DbProgramDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProgramDirectory for DbProgramDirectory {
    async fn active_labels(&self) -> Result<Vec<String>, StoreError> {
        let rows = programs::Entity::find()
            .filter(programs::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;

        Ok(rows.iter().map(programs::Model::label).collect())
    }
}
