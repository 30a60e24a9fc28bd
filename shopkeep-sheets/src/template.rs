//! Purchase-order template rows.

use shopkeep_core::Sku;

use crate::error::SheetsError;

/// Column headers the template must carry, exactly as they appear in the
/// shared spreadsheet.
const SKU_COLUMN: &str = "SKU";
const EXPIRY_COLUMN: &str = "Expiry Date";
const PRICE_COLUMN: &str = "Price";

/// One row of the purchase-order template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrderRow {
    pub sku: Sku,
    /// Expiry stamp as entered in the sheet (`YYYYMMDD`).
    pub expiry_date: String,
    /// Price exactly as entered; converted to cents only when the
    /// catalog payload is rewritten, so a malformed price fails the run
    /// there and names the row.
    pub price: String,
}

/// Parse the CSV export of a purchase-order template.
///
/// Blank lines are skipped by the reader; any present row must carry a
/// valid 9-digit SKU and a non-empty expiry date. Line numbers in errors
/// are 1-based spreadsheet rows (the header is row 1).
pub fn parse_rows(csv_text: &str) -> Result<Vec<PurchaseOrderRow>, SheetsError> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());

    let headers = reader.headers()?.clone();
    let sku_idx = column_index(&headers, SKU_COLUMN)?;
    let expiry_idx = column_index(&headers, EXPIRY_COLUMN)?;
    let price_idx = column_index(&headers, PRICE_COLUMN)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = i + 2;

        let raw_sku = record.get(sku_idx).unwrap_or("").trim();
        let sku = Sku::parse(raw_sku).ok_or_else(|| SheetsError::BadRow {
            line,
            message: format!("{raw_sku:?} is not a 9-digit SKU"),
        })?;

        let expiry_date = record.get(expiry_idx).unwrap_or("").trim().to_owned();
        if expiry_date.is_empty() {
            return Err(SheetsError::BadRow {
                line,
                message: "missing expiry date".to_owned(),
            });
        }

        let price = record.get(price_idx).unwrap_or("").trim().to_owned();
        if price.is_empty() {
            return Err(SheetsError::BadRow {
                line,
                message: "missing price".to_owned(),
            });
        }

        rows.push(PurchaseOrderRow {
            sku,
            expiry_date,
            price,
        });
    }

    Ok(rows)
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, SheetsError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(SheetsError::MissingColumn(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "\
SKU,Expiry Date,Price
123456789,20261231,19.99
987654321,20270115,4.5
";

    #[test]
    fn parses_well_formed_rows() {
        let rows = parse_rows(GOOD).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sku.as_str(), "123456789");
        assert_eq!(rows[0].expiry_date, "20261231");
        assert_eq!(rows[0].price, "19.99");
        assert_eq!(rows[1].price, "4.5");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let text = "\
Supplier,SKU,Expiry Date,Price,Notes
Acme,123456789,20261231,12,reorder
";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, "12");
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let text = "SKU,Price\n123456789,19.99\n";
        match parse_rows(text) {
            Err(SheetsError::MissingColumn(col)) => assert_eq!(col, "Expiry Date"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn bad_sku_names_the_spreadsheet_row() {
        let text = "SKU,Expiry Date,Price\n123456789,20261231,10\n12345,20261231,10\n";
        match parse_rows(text) {
            Err(SheetsError::BadRow { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("12345"));
            }
            other => panic!("expected BadRow, got {other:?}"),
        }
    }

    #[test]
    fn empty_expiry_or_price_is_rejected() {
        let no_expiry = "SKU,Expiry Date,Price\n123456789,,10\n";
        assert!(matches!(
            parse_rows(no_expiry),
            Err(SheetsError::BadRow { line: 2, .. })
        ));

        let no_price = "SKU,Expiry Date,Price\n123456789,20261231,\n";
        assert!(matches!(
            parse_rows(no_price),
            Err(SheetsError::BadRow { line: 2, .. })
        ));
    }

    #[test]
    fn header_only_template_yields_no_rows() {
        let rows = parse_rows("SKU,Expiry Date,Price\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let text = "SKU ,Expiry Date,Price\n 123456789 , 20261231 , 19.99 \n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows[0].sku.as_str(), "123456789");
        assert_eq!(rows[0].expiry_date, "20261231");
        assert_eq!(rows[0].price, "19.99");
    }
}
