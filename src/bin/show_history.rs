//! Utility to print the meal history and catalog summary to stdout

use bju::config::DataPaths;
use bju::store::{Catalog, Ledger};
use bju::tools::meals::EMPTY_HISTORY;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let paths = DataPaths::from_env();
    println!("Data directory: {}", paths.data_dir.display());

    let catalog = Catalog::new(&paths.products_file);
    let products = catalog.load()?;
    println!("Catalog: {} product(s)", products.len());
    for (name, n) in &products {
        println!("  {} - Б: {} Ж: {} У: {}", name, n.protein, n.fat, n.carb);
    }

    println!();
    let ledger = Ledger::new(&paths.meals_file);
    match ledger.read_all()? {
        Some(history) => print!("{}", history),
        None => println!("{}", EMPTY_HISTORY),
    }

    Ok(())
}
