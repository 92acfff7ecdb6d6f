//! Lenient field decoders for records that come out of spreadsheets and CSV
//! imports, where a numeric column can hold blanks, text or nulls.
//!
//! Use them with `#[serde(default, deserialize_with = "...")]`.

use crate::structs::CategoryCode;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(Decimal),
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Text(String),
    Number(Decimal),
    Other(IgnoredAny),
}

/// Decodes a number or numeric string. Anything else becomes `None`.
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Number(value)) => Some(value),
        Some(RawNumber::Text(text)) => Decimal::from_str(text.trim()).ok(),
        Some(RawNumber::Other(_)) | None => None,
    };
    Ok(value)
}

/// Decodes a calendar year from a whole number or numeric string, e.g. `2023`,
/// `2023.0` or `"2023"`. Fractions and anything else become `None`.
pub fn optional_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Number(value)) => Some(value),
        Some(RawNumber::Text(text)) => Decimal::from_str(text.trim()).ok(),
        Some(RawNumber::Other(_)) | None => None,
    };
    Ok(number.filter(|n| n.fract().is_zero()).and_then(|n| n.to_i32()))
}

/// Decodes free text, treating blanks and non-string values as missing.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawCode>::deserialize(deserializer)? {
        Some(RawCode::Text(text)) if !text.trim().is_empty() => Some(text),
        Some(RawCode::Number(number)) => Some(number.normalize().to_string()),
        _ => None,
    };
    Ok(value)
}

/// Decodes a sector key from either a string or a number.
///
/// Strings are kept verbatim. Numbers are normalised so that `5`, `5.0` and
/// `"5"` all produce the key `"5"`.
pub fn optional_category_code<'de, D>(deserializer: D) -> Result<Option<CategoryCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<RawCode>::deserialize(deserializer)? {
        Some(RawCode::Text(text)) => Some(CategoryCode::from(text)),
        Some(RawCode::Number(number)) => Some(CategoryCode::from(number)),
        Some(RawCode::Other(_)) | None => None,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use crate::{CompanyRecord, FinancialStatement};
    use rust_decimal_macros::dec;

    #[test]
    fn numeric_strings_and_numbers_decode() {
        let record: CompanyRecord =
            serde_json::from_str(r#"{"revenue": 1200.5, "ebit": "300", "cash": " 12 "}"#).unwrap();
        assert_eq!(record.revenue, Some(dec!(1200.5)));
        assert_eq!(record.ebit, Some(dec!(300)));
        assert_eq!(record.cash, Some(dec!(12)));
    }

    #[test]
    fn junk_values_decode_as_missing() {
        let record: CompanyRecord = serde_json::from_str(
            r#"{"revenue": "n/a", "ebit": null, "cash": true, "capex": "", "lt_debt": {"x": 1}}"#,
        )
        .unwrap();
        assert_eq!(record.revenue, None);
        assert_eq!(record.ebit, None);
        assert_eq!(record.cash, None);
        assert_eq!(record.capex, None);
        assert_eq!(record.lt_debt, None);
        assert_eq!(record.sh_equity, None);
    }

    #[test]
    fn zero_is_not_missing() {
        let record: CompanyRecord = serde_json::from_str(r#"{"sh_equity": 0}"#).unwrap();
        assert_eq!(record.sh_equity, Some(dec!(0)));
    }

    #[test]
    fn numeric_category_codes_normalise() {
        let a: CompanyRecord = serde_json::from_str(r#"{"category_code": 5}"#).unwrap();
        let b: CompanyRecord = serde_json::from_str(r#"{"category_code": 5.0}"#).unwrap();
        let c: CompanyRecord = serde_json::from_str(r#"{"category_code": "5"}"#).unwrap();
        assert_eq!(a.category_code, b.category_code);
        assert_eq!(b.category_code, c.category_code);
        assert_eq!(c.category_code.unwrap().as_str(), "5");
    }

    #[test]
    fn statement_years_decode_leniently() {
        let statements: Vec<FinancialStatement> = serde_json::from_str(
            r#"[
                {"year": "2023", "operating_revenue": 10},
                {"year": 2022.0},
                {"year": "last year"},
                {"year": 2021.5},
                {"year": null},
                {}
            ]"#,
        )
        .unwrap();
        let years: Vec<_> = statements.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![Some(2023), Some(2022), None, None, None, None]);
        assert_eq!(statements[0].operating_revenue, Some(dec!(10)));
    }

    #[test]
    fn text_category_codes_are_verbatim() {
        let record: CompanyRecord = serde_json::from_str(r#"{"category_code": "C 10"}"#).unwrap();
        assert_eq!(record.category_code.unwrap().as_str(), "C 10");
    }
}
