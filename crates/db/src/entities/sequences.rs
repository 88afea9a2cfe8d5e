//! `SeaORM` Entity for the sequences counter table.
//!
//! One row per code family (CLI, SUP, PRO, PUR, SAL). Allocation locks
//! the row, bumps `last_number`, and formats the code, so codes stay
//! gapless per family even under concurrent writers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sequences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub entity: String,
    pub last_number: i64,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
