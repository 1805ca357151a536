//! SeaORM Entity for the programs table
//!
//! The program directory listing. The report validator checks info-report
//! submissions against the display labels of active programs.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "programs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub organization: String,
    pub location: String,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl Model {
    /// Display label shown in listings and referenced by info reports.
    pub fn label(&self) -> String {
        format!("{} — {}", self.title, self.organization)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
