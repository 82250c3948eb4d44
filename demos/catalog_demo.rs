//! Catalog walkthrough over a JSON product list
//!
//! This example demonstrates:
//! - Loading products and configuration from files
//! - Rendering while the fetch is pending, then after it settles
//! - Category selection, sort toggling and paging through a session
//!
//! Run with `RUST_LOG=catalog=debug` to see cache hits and misses.

use catalog::prelude::*;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn print_page(title: &str, page: &CatalogPage<Product>) {
    println!("\n== {} ==", title);
    println!(
        "category: {} | sort: {} | page {}/{} | items {}-{} of {}",
        page.selected_category,
        page.sort
            .entries()
            .iter()
            .map(|e| format!("{} {:?}", e.column, e.direction))
            .collect::<Vec<_>>()
            .join(", "),
        page.meta.page,
        page.meta.total_pages,
        page.meta.range.start,
        page.meta.range.end,
        page.meta.range.total,
    );
    for product in &page.items {
        println!(
            "  #{:<3} {:<15} {:<10} {:>8.2}  stock {}",
            product.id, product.name, product.category, product.price, product.stock
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("catalog=info")),
        )
        .init();

    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let service = InMemoryDataService::<Product>::from_json_file(dir.join("products.json"))?;

    let catalog = Catalog::builder()
        .with_data_service(service.clone())
        .with_config_file(dir.join("catalog.yaml"))?
        .build()?;
    let mut session = CatalogSession::new(Arc::new(catalog));

    if session.render().is_pending() {
        println!("Loading catalog...");
    }

    let page = session.render_settled().await?;
    println!("Categories: {}", page.categories.join(", "));
    print_page("Initial view", &page);

    session.go_to_next();
    print_page("Next page", &session.render_settled().await?);

    session.set_category("Furniture");
    session.toggle_sort("price", false)?;
    session.toggle_sort("price", false)?;
    session.toggle_sort("name", true)?;
    print_page("Furniture by price desc, then name", &session.render_settled().await?);

    if let Err(e) = session.toggle_sort("stock", false) {
        println!("\nRejected toggle: {}", e);
    }

    session.set_category("all");
    session.go_to_page(99);
    print_page("Page 99 clamps to the last page", &session.render_settled().await?);

    println!("\nData service was called {} time(s)", service.fetch_count());

    Ok(())
}
