//! Catalog listing.

use std::fmt::Write;

use mockshop_core::Catalog;

/// Render the demo catalog as a table.
#[must_use]
pub fn render() -> String {
    render_catalog(&Catalog::demo())
}

fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for product in catalog.products() {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{:<4} {:<28} {:>9}",
            product.id.as_str(),
            product.name,
            product.price.to_string()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_product() {
        let out = render();
        assert_eq!(out.lines().count(), Catalog::demo().len());
        assert!(out.lines().any(|line| line.starts_with("p5")
            && line.contains("Linen Apron")
            && line.ends_with("$27.99")));
    }
}
