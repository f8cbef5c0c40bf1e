//! Shared setup: an in-memory SQLite database with the sample data loaded.
//!
//! Seeded rows (ids are assigned in insertion order):
//! - restaurants 1..=3, pizzas 1..=3
//! - restaurant_pizzas 1 (r1, p1, $1), 2 (r2, p2, $4), 3 (r3, p3, $5)

#![allow(dead_code)]

use pizza_restaurants::config::DatabaseSettings;
use pizza_restaurants::database::models::restaurant_pizza;
use pizza_restaurants::database::{self, schema, seed};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

pub async fn seeded_db() -> DatabaseConnection {
    let db = empty_db().await;
    seed::seed(&db).await.expect("seed sample data");
    db
}

pub async fn empty_db() -> DatabaseConnection {
    let db = database::connect_with_settings(&DatabaseSettings::in_memory())
        .await
        .expect("connect to in-memory sqlite");
    schema::create_tables(&db).await.expect("create tables");
    db
}

pub async fn restaurant_pizza_count(db: &DatabaseConnection) -> u64 {
    restaurant_pizza::Entity::find()
        .count(db)
        .await
        .expect("count restaurant_pizzas")
}

pub async fn restaurant_pizza_count_for_restaurant(db: &DatabaseConnection, id: i32) -> u64 {
    restaurant_pizza::Entity::find()
        .filter(restaurant_pizza::Column::RestaurantId.eq(id))
        .count(db)
        .await
        .expect("count restaurant_pizzas for restaurant")
}
