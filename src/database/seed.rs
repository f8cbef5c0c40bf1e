use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};

use crate::database::models::{Price, pizza, restaurant, restaurant_pizza};

const RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const MENU: [(usize, usize, i64); 3] = [(0, 0, 1), (1, 1, 4), (2, 2, 5)];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Inserts the sample restaurants, pizzas and menu. Existing rows are kept.
pub async fn seed<C>(db: &C) -> Result<SeedSummary, DbErr>
where
    C: ConnectionTrait,
{
    let mut restaurants = Vec::with_capacity(RESTAURANTS.len());
    for (name, address) in RESTAURANTS {
        let created = restaurant::ActiveModel {
            name: Set(name.to_string()),
            address: Set(address.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        restaurants.push(created);
    }

    let mut pizzas = Vec::with_capacity(PIZZAS.len());
    for (name, ingredients) in PIZZAS {
        let created = pizza::ActiveModel {
            name: Set(name.to_string()),
            ingredients: Set(ingredients.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        pizzas.push(created);
    }

    for (restaurant_idx, pizza_idx, price) in MENU {
        let price = Price::try_from(price).map_err(|e| DbErr::Custom(e.to_string()))?;
        restaurant_pizza::create(db, price, &pizzas[pizza_idx], &restaurants[restaurant_idx])
            .await?;
    }

    let summary = SeedSummary {
        restaurants: restaurants.len(),
        pizzas: pizzas.len(),
        restaurant_pizzas: MENU.len(),
    };
    log::info!("Seeded {:?}", summary);
    Ok(summary)
}
