use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, NotSet, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::pizza::{self, PizzaSummary};
use super::restaurant::{self, RestaurantSummary};

pub const MIN_PRICE: i32 = 1;
pub const MAX_PRICE: i32 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Price must have a value between 1 and 30, got {0}")]
    PriceOutOfRange(i64),

    #[error("Price is required")]
    MissingPrice,
}

/// Price of a pizza at a given restaurant. Only values in `1..=30` exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Price(i32);

impl Price {
    pub fn value(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Price {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        i32::try_from(value)
            .ok()
            .filter(|price| (MIN_PRICE..=MAX_PRICE).contains(price))
            .map(Price)
            .ok_or(ValidationError::PriceOutOfRange(value))
    }
}

impl TryFrom<i32> for Price {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Price::try_from(i64::from(value))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant_pizzas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pizza::Entity",
        from = "Column::PizzaId",
        to = "super::pizza::Column::Id",
        on_delete = "Cascade"
    )]
    Pizza,
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id",
        on_delete = "Cascade"
    )]
    Restaurant,
}

impl Related<pizza::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pizza.def()
    }
}

impl Related<restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl ActiveModel {
    /// Unsaved association. Taking a [`Price`] keeps out-of-range values
    /// from ever reaching the store through this path.
    pub fn build(price: Price, pizza_id: i32, restaurant_id: i32) -> Self {
        Self {
            id: NotSet,
            price: Set(price.value()),
            pizza_id: Set(pizza_id),
            restaurant_id: Set(restaurant_id),
        }
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Re-checks the price on every insert and update, whatever built the model.
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        match &self.price {
            ActiveValue::Set(price) | ActiveValue::Unchanged(price) => {
                Price::try_from(*price).map_err(|e| DbErr::Custom(e.to_string()))?;
            }
            ActiveValue::NotSet if insert => {
                return Err(DbErr::Custom(ValidationError::MissingPrice.to_string()));
            }
            ActiveValue::NotSet => {}
        }
        Ok(self)
    }
}

/// Association as listed under its restaurant.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RestaurantPizzaEntry {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
}

impl RestaurantPizzaEntry {
    pub fn new(model: &Model, pizza: &pizza::Model) -> Self {
        Self {
            id: model.id,
            price: model.price,
            pizza_id: model.pizza_id,
            restaurant_id: model.restaurant_id,
            pizza: PizzaSummary::from(pizza),
        }
    }
}

/// Association with both ends. The nested restaurant is a summary, so its
/// own association list is never serialized.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RestaurantPizzaDetail {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

impl RestaurantPizzaDetail {
    pub fn new(model: &Model, pizza: &pizza::Model, restaurant: &restaurant::Model) -> Self {
        Self {
            id: model.id,
            price: model.price,
            pizza_id: model.pizza_id,
            restaurant_id: model.restaurant_id,
            pizza: PizzaSummary::from(pizza),
            restaurant: RestaurantSummary::from(restaurant),
        }
    }
}

/// Inserts one association between existing rows and returns its projection.
pub async fn create<C>(
    db: &C,
    price: Price,
    pizza: &pizza::Model,
    restaurant: &restaurant::Model,
) -> Result<RestaurantPizzaDetail, DbErr>
where
    C: ConnectionTrait,
{
    let created = ActiveModel::build(price, pizza.id, restaurant.id)
        .insert(db)
        .await?;
    Ok(RestaurantPizzaDetail::new(&created, pizza, restaurant))
}

/// Deletes every association whose `owner_column` equals `owner_id`.
pub async fn delete_owned_by<C>(db: &C, owner_column: Column, owner_id: i32) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let result = Entity::delete_many()
        .filter(owner_column.eq(owner_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
