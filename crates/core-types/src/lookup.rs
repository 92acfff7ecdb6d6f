use crate::structs::CategoryCode;

/// A table row keyed by a sector category code.
pub trait CategoryKeyed {
    fn category_code(&self) -> Option<&CategoryCode>;
}

/// Returns the first row whose category code equals `code`.
///
/// Matching is exact equality of the canonical string form. Rows without a code
/// never match, and later duplicates are ignored.
pub fn first_match<'a, T: CategoryKeyed>(rows: &'a [T], code: &CategoryCode) -> Option<&'a T> {
    rows.iter().find(|row| row.category_code() == Some(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SectorParameters;
    use rust_decimal_macros::dec;

    fn row(code: &str, wacc: rust_decimal::Decimal) -> SectorParameters {
        SectorParameters {
            category_code: Some(CategoryCode::from(code)),
            wacc: Some(wacc),
            ..Default::default()
        }
    }

    #[test]
    fn first_duplicate_wins() {
        let rows = vec![row("B", dec!(0.09)), row("A", dec!(0.08)), row("A", dec!(0.12))];
        let found = first_match(&rows, &CategoryCode::from("A")).unwrap();
        assert_eq!(found.wacc, Some(dec!(0.08)));
    }

    #[test]
    fn no_fuzzy_matching() {
        let rows = vec![row("A1", dec!(0.08)), row(" A", dec!(0.08))];
        assert!(first_match(&rows, &CategoryCode::from("A")).is_none());
    }

    #[test]
    fn rows_without_code_never_match() {
        let rows = vec![SectorParameters::default()];
        assert!(first_match(&rows, &CategoryCode::from("")).is_none());
    }
}
