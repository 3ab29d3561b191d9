// Catalog listings

use bea_core::{Category, Operator, StateTable};

/// Print the state catalog, optionally restricted to one tier.
pub fn list_states(category: Option<Category>) -> anyhow::Result<()> {
    let table = StateTable::canonical()?;

    println!("{:>3}  {:<14} {:<11} {:<13} {:>9}", "id", "name", "tier", "affect", "intensity");
    for state in table
        .states()
        .iter()
        .filter(|s| category.map_or(true, |c| s.category == c))
    {
        println!(
            "{:>3}  {:<14} {:<11} {:<13} {:>9}",
            state.id,
            state.name,
            state.category,
            state.affect,
            state.intensity
        );
    }
    Ok(())
}

/// Print each operator with its glyph and accepted tokens.
pub fn list_operators() {
    for op in Operator::ALL {
        let synonyms: Vec<&str> = op.synonyms().collect();
        println!("{} {:<11} {}", op.symbol(), op.name(), synonyms.join(", "));
    }
}
