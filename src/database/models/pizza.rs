use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, ModelTrait, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::restaurant;
use super::restaurant_pizza;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pizzas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Freeform, comma separated.
    pub ingredients: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::restaurant_pizza::Entity")]
    RestaurantPizza,
}

impl Related<restaurant_pizza::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantPizza.def()
    }
}

impl Related<restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        restaurant_pizza::Relation::Restaurant.def()
    }

    fn via() -> Option<RelationDef> {
        Some(restaurant_pizza::Relation::Pizza.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Restaurants that have this pizza on their menu.
    pub async fn restaurants<C>(&self, db: &C) -> Result<Vec<restaurant::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(restaurant::Entity)
            .order_by_asc(restaurant::Column::Id)
            .all(db)
            .await
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct PizzaSummary {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

impl From<&Model> for PizzaSummary {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            ingredients: model.ingredients.clone(),
        }
    }
}

pub async fn list<C>(db: &C) -> Result<Vec<PizzaSummary>, DbErr>
where
    C: ConnectionTrait,
{
    let pizzas = Entity::find().order_by_asc(Column::Id).all(db).await?;
    Ok(pizzas.iter().map(PizzaSummary::from).collect())
}

pub async fn delete_cascade(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let txn = db.begin().await?;

    let Some(pizza) = Entity::find_by_id(id).one(&txn).await? else {
        txn.rollback().await?;
        return Ok(false);
    };

    let removed =
        restaurant_pizza::delete_owned_by(&txn, restaurant_pizza::Column::PizzaId, id).await?;
    pizza.delete(&txn).await?;
    txn.commit().await?;

    log::info!("Deleted pizza {} together with {} restaurant_pizzas", id, removed);
    Ok(true)
}
