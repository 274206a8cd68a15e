//! Catalog listing and category commands.

use anyhow::Result;
use storefront_commerce::catalog::Product;
use storefront_commerce::search::CatalogQuery;

use super::CatalogArgs;
use crate::context::Context;

/// Build a catalog query from command-line arguments.
pub fn build_query(args: &CatalogArgs) -> CatalogQuery {
    let mut query = CatalogQuery::new().with_category(args.category.as_deref());
    if let Some(text) = &args.query {
        query = query.with_query(text.as_str());
    }
    if let Some(size) = &args.size {
        query = query.with_size(size.as_str());
    }
    query
}

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let query = build_query(&args);
    let products = catalog.search(&query);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("{} catalog", ctx.config.store.name));
    if products.is_empty() {
        ctx.output.info("No products match");
        return Ok(());
    }

    print_products(&products, ctx);
    ctx.output.info(&format!(
        "{} of {} product(s)",
        products.len(),
        catalog.len()
    ));
    Ok(())
}

/// Run the categories command.
pub fn run_categories(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let categories = catalog.categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output.kv(&category.name, &category.product_count.to_string());
    }
    Ok(())
}

fn print_products(products: &[&Product], ctx: &Context) {
    let widths = [6, 24, 14, 12, 14];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "SIZES"], &widths);
    for product in products {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.category,
                &product.price.display(),
                &product.sizes_label(),
            ],
            &widths,
        );
        if ctx.output.is_verbose() && !product.description.is_empty() {
            ctx.output.kv("description", &product.description);
        }
    }
}
