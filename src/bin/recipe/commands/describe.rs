//! `recipe describe` command

use anyhow::Result;

use super::{load_recipe, resolve_platform};
use crate::cli::DescribeArgs;
use recipe::core::ComponentId;
use recipe::ops::describe;

pub fn execute(args: DescribeArgs) -> Result<()> {
    let (recipe, version) = load_recipe(&args.recipe)?;
    let platform = resolve_platform(&args.platform)?;
    let descriptor = describe(recipe.name(), &version, &platform);

    let Some(component) = &args.component else {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
        return Ok(());
    };

    let id: ComponentId = component.parse()?;
    let order = descriptor.link_order(id)?;
    let order: Vec<&str> = order.iter().map(|c| c.as_str()).collect();

    println!("components:  {}", order.join(" "));
    println!("libs:        {}", descriptor.transitive_libs(id)?.join(" "));
    println!("system_libs: {}", descriptor.transitive_system_libs(id)?.join(" "));

    Ok(())
}
