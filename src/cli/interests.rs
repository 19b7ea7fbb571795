use crate::interests::{all_tags, INTEREST_CATEGORIES};

pub fn execute() -> anyhow::Result<()> {
    println!("Interest categories:\n");
    for category in INTEREST_CATEGORIES {
        println!("{}", category.name);
        println!("  tags: {}", category.tags.join(", "));
    }
    println!("\n{} tags total", all_tags().len());
    Ok(())
}
