//! Table creation straight from the entity definitions.
//!
//! There is no migration history: tables are created when missing and left
//! alone otherwise.

use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};

use crate::database::models::{pizza, restaurant, restaurant_pizza};

fn create_statement<E>(schema: &Schema, entity: E) -> TableCreateStatement
where
    E: EntityTrait,
{
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    stmt
}

/// Creates `restaurants`, `pizzas` and `restaurant_pizzas`, parents first.
pub async fn create_tables<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        create_statement(&schema, restaurant::Entity),
        create_statement(&schema, pizza::Entity),
        create_statement(&schema, restaurant_pizza::Entity),
    ];

    for stmt in &statements {
        db.execute(backend.build(stmt)).await?;
    }

    log::debug!("Ensured tables restaurants, pizzas, restaurant_pizzas");
    Ok(())
}

/// Removes every row, associations first.
pub async fn clear_tables<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    restaurant_pizza::Entity::delete_many().exec(db).await?;
    restaurant::Entity::delete_many().exec(db).await?;
    pizza::Entity::delete_many().exec(db).await?;
    Ok(())
}
