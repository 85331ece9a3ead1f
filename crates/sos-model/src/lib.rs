//! Data model for service orders: line items, header fields, validation
//! issues, and the export snapshot consumed by the document composer.

pub mod error;
pub mod header;
pub mod item;
pub mod money;
pub mod snapshot;

pub use error::{FieldIssue, summarize_issues};
pub use header::{IdDocumentKind, OrderHeader, TaxIdKind, parse_header_date, validate_header};
pub use item::{ItemId, LineItem};
pub use money::{MIN_AMOUNT, round2};
pub use snapshot::ExportSnapshot;

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_header() -> OrderHeader {
        OrderHeader {
            customer_name: "Maria Souza".to_string(),
            entry_date: "2024-03-01".to_string(),
            ..OrderHeader::default()
        }
    }

    #[test]
    fn header_with_name_and_parsable_date_passes() {
        assert!(validate_header(&valid_header()).is_empty());
    }

    #[test]
    fn short_name_is_reported() {
        let header = OrderHeader {
            customer_name: "Jo".to_string(),
            ..OrderHeader::default()
        };
        let issues = validate_header(&header);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "customer_name");
    }

    #[test]
    fn unparsable_date_is_reported() {
        let header = OrderHeader {
            entry_date: "03/01/2024".to_string(),
            ..valid_header()
        };
        let issues = validate_header(&header);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "entry_date");
    }

    #[test]
    fn empty_dates_are_accepted() {
        let header = OrderHeader {
            entry_date: String::new(),
            exit_date: String::new(),
            ..valid_header()
        };
        assert!(validate_header(&header).is_empty());
    }

    #[test]
    fn mileage_coerces_from_string() {
        let header: OrderHeader =
            serde_json::from_str(r#"{"customer_name":"Maria Souza","mileage_km":"123456"}"#)
                .expect("deserialize header");
        assert_eq!(header.mileage_km, Some(123456.0));
    }

    #[test]
    fn empty_mileage_string_is_absent() {
        let header: OrderHeader =
            serde_json::from_str(r#"{"customer_name":"Maria Souza","mileage_km":""}"#)
                .expect("deserialize header");
        assert_eq!(header.mileage_km, None);
    }

    #[test]
    fn header_round_trips_through_json() {
        let header = valid_header();
        let json = serde_json::to_string(&header).expect("serialize header");
        let round: OrderHeader = serde_json::from_str(&json).expect("deserialize header");
        assert_eq!(round, header);
    }

    #[test]
    fn line_item_total_is_derived() {
        let mut item = LineItem::with_defaults(ItemId::new(1));
        item.quantity = 2.0;
        item.unit_price = 10.0;
        item.recompute_total();
        assert_eq!(item.total, 20.0);
    }
}
