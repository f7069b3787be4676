//! Example: Converting Chorus source into a normalized sequence
//!
//! This example parses a small document, walks the resulting stages and
//! prints the JSON a renderer would consume.

use chorus::{SequenceBuilder, Stage};

const SOURCE: &str = r#"
title Checkout
terminators bar

Shopper -> Store: place order
if paid
  Store -> Bank: charge card
  Bank --> Store: ok
else
  Store --> Shopper: payment required
end

note over Store: order recorded
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Parsing sequence...\n");

    let builder = SequenceBuilder::default();
    let sequence = builder.parse(SOURCE)?;

    println!("Title: {}", sequence.meta.title);
    println!("Agents: {}", sequence.agents.join(", "));
    println!("Stages:");
    for stage in &sequence.stages {
        match stage {
            Stage::Connection(connection) => println!(
                "  {} -> {}: {}",
                connection.agents[0], connection.agents[1], connection.label
            ),
            Stage::Block(block) => println!("  block with {} section(s)", block.sections.len()),
            other => println!("  {other:?}"),
        }
    }

    println!("\n{}", builder.render_json(&sequence)?);
    Ok(())
}
