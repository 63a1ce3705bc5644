//! Browse command - list medicines by category

use crate::context::AppContext;
use anyhow::Result;
use medfinder_cli::output::{format_count, print_json};
use medfinder_cli::Status;
use medfinder_search::Category;
use owo_colors::OwoColorize;

/// List catalog medicines in `category`, or the categories when none is given
pub async fn run(ctx: &AppContext, category: Option<&str>) -> Result<()> {
    let finder = ctx.finder().await?;

    let Some(tag) = category else {
        let counts: Vec<(Category, usize)> = Category::KNOWN
            .into_iter()
            .map(|c| {
                let n = finder.browse(&c).len();
                (c, n)
            })
            .collect();

        if ctx.format.is_json() {
            let rows: Vec<_> = counts
                .iter()
                .map(|(c, n)| serde_json::json!({ "id": c.id(), "label": c.label(), "medicines": n }))
                .collect();
            print_json(&rows)?;
            return Ok(());
        }

        Status::header("Categories");
        for (c, n) in counts {
            println!("  {:<12} {:<16} {}", c.id().cyan(), c.label(), format_count(n, "medicine", "medicines").dimmed());
        }
        return Ok(());
    };

    let category = Category::from(tag.trim().to_lowercase());
    let medicines = finder.browse(&category);

    if ctx.format.is_json() {
        print_json(&medicines)?;
        return Ok(());
    }

    if medicines.is_empty() {
        Status::info(&format!("No medicines in category '{}'", category.id()));
        return Ok(());
    }

    Status::header(category.label());
    for medicine in medicines {
        if medicine.aliases.is_empty() {
            println!("  {}", medicine.name);
        } else {
            println!("  {}  {}", medicine.name, medicine.aliases.join(", ").dimmed());
        }
    }
    Ok(())
}
