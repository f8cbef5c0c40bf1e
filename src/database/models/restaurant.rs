use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DatabaseConnection, ModelTrait, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::pizza;
use super::restaurant_pizza::{self, RestaurantPizzaEntry};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
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

// restaurants <-> pizzas through restaurant_pizzas
impl Related<pizza::Entity> for Entity {
    fn to() -> RelationDef {
        restaurant_pizza::Relation::Pizza.def()
    }

    fn via() -> Option<RelationDef> {
        Some(restaurant_pizza::Relation::Restaurant.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Pizzas served here, derived from this restaurant's associations.
    pub async fn pizzas<C>(&self, db: &C) -> Result<Vec<pizza::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(pizza::Entity)
            .order_by_asc(pizza::Column::Id)
            .all(db)
            .await
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RestaurantSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
}

impl From<&Model> for RestaurantSummary {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            address: model.address.clone(),
        }
    }
}

/// Restaurant with its associations, each carrying the pizza it prices.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RestaurantDetail {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaEntry>,
}

pub async fn list<C>(db: &C) -> Result<Vec<RestaurantSummary>, DbErr>
where
    C: ConnectionTrait,
{
    let restaurants = Entity::find().order_by_asc(Column::Id).all(db).await?;
    Ok(restaurants.iter().map(RestaurantSummary::from).collect())
}

pub async fn load_detail<C>(db: &C, id: i32) -> Result<Option<RestaurantDetail>, DbErr>
where
    C: ConnectionTrait,
{
    let Some(restaurant) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let rows = restaurant
        .find_related(restaurant_pizza::Entity)
        .find_also_related(pizza::Entity)
        .order_by_asc(restaurant_pizza::Column::Id)
        .all(db)
        .await?;

    let restaurant_pizzas = rows
        .iter()
        .filter_map(|(entry, pizza)| {
            pizza
                .as_ref()
                .map(|pizza| RestaurantPizzaEntry::new(entry, pizza))
        })
        .collect();

    Ok(Some(RestaurantDetail {
        id: restaurant.id,
        name: restaurant.name,
        address: restaurant.address,
        restaurant_pizzas,
    }))
}

/// Deletes the restaurant and its associations in one transaction.
///
/// Returns `false` without writing anything when the restaurant does not exist.
pub async fn delete_cascade(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let txn = db.begin().await?;

    let Some(restaurant) = Entity::find_by_id(id).one(&txn).await? else {
        txn.rollback().await?;
        return Ok(false);
    };

    let removed =
        restaurant_pizza::delete_owned_by(&txn, restaurant_pizza::Column::RestaurantId, id)
            .await?;
    restaurant.delete(&txn).await?;
    txn.commit().await?;

    log::info!(
        "Deleted restaurant {} together with {} restaurant_pizzas",
        id,
        removed
    );
    Ok(true)
}
