use clap::{Parser, Subcommand, ValueEnum};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use serde::Serialize;

use pizza_restaurants::config::Config;
use pizza_restaurants::database::models::{
    PizzaSummary, RestaurantSummary, pizza, restaurant, restaurant_pizza,
};
use pizza_restaurants::database::{self, schema, seed};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, verbatim_doc_comment)]
/// Command line administration for the pizza restaurants database.
/// Creates and seeds tables, inspects data and edits menu prices.
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Schema and bulk data commands.
    Db {
        #[command(subcommand)]
        db_command: DbCommand,
    },
    /// Menu price commands.
    Price {
        #[command(subcommand)]
        price_command: PriceCommand,
    },
    /// Pizza commands.
    Pizza {
        #[command(subcommand)]
        pizza_command: PizzaCommand,
    },
    /// Lists the pizzas a restaurant serves.
    Menu {
        #[arg(short, long)]
        restaurant_id: i32,
    },
    /// Lists the restaurants serving a pizza.
    Stockists {
        #[arg(short, long)]
        pizza_id: i32,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommand {
    /// Creates the tables if they do not exist yet.
    Init,
    /// Creates the tables, removes all rows and inserts the sample data.
    Seed,
    /// Removes all rows from every table. Use with care!
    Wipe,
    /// Prints every row of a table as JSON.
    Query {
        #[arg(short, long, value_enum)]
        table: Table,
    },
}

#[derive(Subcommand, Debug)]
enum PriceCommand {
    /// Changes the price of one restaurant_pizza (1..=30).
    Set {
        #[arg(long)]
        id: i32,

        #[arg(short, long)]
        price: i32,
    },
}

#[derive(Subcommand, Debug)]
enum PizzaCommand {
    /// Deletes a pizza and every restaurant_pizza that references it.
    Delete {
        #[arg(long)]
        id: i32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Table {
    Restaurants,
    Pizzas,
    RestaurantPizzas,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn query_table(db: &DatabaseConnection, table: Table) -> Result<(), Box<dyn std::error::Error>> {
    match table {
        Table::Restaurants => print_json(
            &restaurant::Entity::find()
                .order_by_asc(restaurant::Column::Id)
                .all(db)
                .await?,
        ),
        Table::Pizzas => print_json(
            &pizza::Entity::find()
                .order_by_asc(pizza::Column::Id)
                .all(db)
                .await?,
        ),
        Table::RestaurantPizzas => print_json(
            &restaurant_pizza::Entity::find()
                .order_by_asc(restaurant_pizza::Column::Id)
                .all(db)
                .await?,
        ),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let config = Config::from_env()?;
    let cli = Cli::parse();
    let db = database::connect_with_settings(&config.database_settings()).await?;

    match cli.command {
        Commands::Db { db_command } => match db_command {
            DbCommand::Init => {
                schema::create_tables(&db).await?;
                println!("Tables are ready.");
            }
            DbCommand::Seed => {
                schema::create_tables(&db).await?;
                schema::clear_tables(&db).await?;
                let summary = seed::seed(&db).await?;
                println!(
                    "Seeded {} restaurants, {} pizzas and {} restaurant_pizzas.",
                    summary.restaurants, summary.pizzas, summary.restaurant_pizzas
                );
            }
            DbCommand::Wipe => {
                schema::clear_tables(&db).await?;
                println!("All rows removed.");
            }
            DbCommand::Query { table } => query_table(&db, table).await?,
        },
        Commands::Price { price_command } => match price_command {
            PriceCommand::Set { id, price } => {
                let Some(existing) = restaurant_pizza::Entity::find_by_id(id).one(&db).await? else {
                    return Err(format!("restaurant_pizza with id = {} not found", id).into());
                };
                let mut active = existing.into_active_model();
                active.price = Set(price);
                // rejected by the model hook when outside 1..=30
                let updated = active.update(&db).await?;
                print_json(&updated)?;
            }
        },
        Commands::Pizza { pizza_command } => match pizza_command {
            PizzaCommand::Delete { id } => {
                if pizza::delete_cascade(&db, id).await? {
                    println!("Pizza {} deleted.", id);
                } else {
                    return Err(format!("pizza with id = {} not found", id).into());
                }
            }
        },
        Commands::Menu { restaurant_id } => {
            let Some(restaurant) = restaurant::Entity::find_by_id(restaurant_id).one(&db).await? else {
                return Err(format!("restaurant with id = {} not found", restaurant_id).into());
            };
            let pizzas: Vec<PizzaSummary> = restaurant
                .pizzas(&db)
                .await?
                .iter()
                .map(PizzaSummary::from)
                .collect();
            print_json(&pizzas)?;
        }
        Commands::Stockists { pizza_id } => {
            let Some(pizza) = pizza::Entity::find_by_id(pizza_id).one(&db).await? else {
                return Err(format!("pizza with id = {} not found", pizza_id).into());
            };
            let restaurants: Vec<RestaurantSummary> = pizza
                .restaurants(&db)
                .await?
                .iter()
                .map(RestaurantSummary::from)
                .collect();
            print_json(&restaurants)?;
        }
    }

    Ok(())
}
