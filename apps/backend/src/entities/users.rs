use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trials::Entity")]
    Trials,
}

impl Related<super::trials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
