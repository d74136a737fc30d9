//! CSV export of the current filtered/sorted view.

use crate::api::Product;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

/// Prefixed to the output so spreadsheet tools detect the encoding.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Serialize products to CSV bytes: a UTF-8 BOM, a header row, then one row
/// per product. Text fields are quoted with internal quotes doubled; images
/// are joined by `", "` into a single field. Errors on an empty list so the
/// caller can show a notice instead of writing a header-only file.
pub fn export_csv(products: &[Product]) -> Result<Vec<u8>> {
    if products.is_empty() {
        bail!("there are no products to export");
    }

    let mut out = Vec::from(UTF8_BOM);
    {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::NonNumeric)
            .from_writer(&mut out);

        writer
            .write_record(["ID", "Title", "Price", "Description", "Category", "Images"])
            .context("Failed to write CSV header")?;

        for product in products {
            writer
                .write_record([
                    product.id.to_string(),
                    product.title.clone(),
                    product.price.to_string(),
                    product.description.clone().unwrap_or_default(),
                    product.category.name.clone(),
                    product.images.join(", "),
                ])
                .with_context(|| format!("Failed to write CSV row for product {}", product.id))?;
        }
        writer.flush().context("Failed to flush CSV output")?;
    }

    Ok(out)
}

/// Default export filename, dated: `products_2026-08-26.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("products_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_an_error() {
        assert!(export_csv(&[]).is_err());
    }

    #[test]
    fn filename_includes_the_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        assert_eq!(export_filename(date), "products_2026-08-26.csv");
    }
}
