//! Print a cost and margin report for every stored recipe

use plateprofit::build_info::BuildInfo;
use plateprofit::config;
use plateprofit::costing::{calculate_all, format_currency, format_percent, MarginHealth, ProfitOverview};
use plateprofit::db::{Database, Store};
use plateprofit::models::CalculatedRecipe;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = config::database_path();
    if !db_path.exists() {
        println!("No database at {}", db_path.display());
        return Ok(());
    }

    let store = Store::open(Database::new(&db_path)?)?;
    let ingredients = store.get_ingredients()?;
    let recipes = store.get_recipes()?;
    let calculated = calculate_all(&recipes, &ingredients);

    println!("PlateProfit cost report ({})", BuildInfo::current().label());
    println!("Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M"));
    println!("Database: {}", db_path.display());
    println!(
        "{} ingredient(s), {} recipe(s)",
        ingredients.len(),
        calculated.len()
    );
    println!();

    if calculated.is_empty() {
        println!("No recipes yet.");
        return Ok(());
    }

    println!(
        "{:<28} {:>8} {:>12} {:>12} {:>12} {:>12} {:>8}  {}",
        "Recipe", "Servings", "Total", "Per serving", "Price", "Profit", "Margin", "Health"
    );
    for calc in &calculated {
        println!("{}", recipe_row(calc));
    }

    if let Some(overview) = ProfitOverview::from_recipes(&calculated) {
        println!();
        println!(
            "Average margin: {} ({})",
            format_percent(overview.average_margin),
            overview.health.as_str()
        );
        println!(
            "Average cost per serving: {}",
            format_currency(overview.average_cost_per_serving)
        );
        if let (Some(best), Some(worst)) = (&overview.most_profitable, &overview.least_profitable) {
            println!("Most profitable: {} ({})", best.name, format_percent(best.profit_margin));
            println!("Least profitable: {} ({})", worst.name, format_percent(worst.profit_margin));
        }
    }

    Ok(())
}

fn recipe_row(calc: &CalculatedRecipe) -> String {
    format!(
        "{:<28} {:>8} {:>12} {:>12} {:>12} {:>12} {:>8}  {}",
        truncate(&calc.name, 28),
        calc.servings,
        format_currency(calc.total_cost),
        format_currency(calc.cost_per_serving),
        format_currency(calc.selling_price),
        format_currency(calc.profit_per_serving),
        format_percent(calc.profit_margin),
        MarginHealth::from_margin(calc.profit_margin).as_str(),
    )
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(width - 3).collect();
        short.push_str("...");
        short
    }
}
