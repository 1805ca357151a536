//! SeaORM Entity for the reports table
//!
//! One row per report, keyed by the generated report id. Enums are stored
//! as plain strings and category-specific fields as nullable columns; the
//! typed view lives in `crate::reports`.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub report_type: String,
    pub report_details: String,
    pub status: String,
    pub priority: Option<String>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    // info reports
    pub internship: Option<String>,
    pub incorrect_info_type: Option<String>,
    pub correct_info: Option<String>,
    // bug reports
    pub bug_title: Option<String>,
    pub bug_description: Option<String>,
    pub bug_steps: Option<String>,
    pub bug_severity: Option<String>,
    // other reports
    pub other_subject: Option<String>,
    pub other_description: Option<String>,
    pub resolved_at: Option<chrono::NaiveDateTime>,
    pub rejected_at: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
