use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::database::{SqlValue, Statement};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(format!("unknown invoice status `{}`", other)),
        }
    }
}

/// A validated invoice form, ready to become one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub customer_id: String,
    pub amount: Decimal,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

impl InvoiceDraft {
    pub fn insert(&self, date: NaiveDate) -> Statement {
        Statement::new(
            r#"
            INSERT INTO invoices (customer_id, amount, status, date)
            VALUES ($1::uuid, $2, $3, $4)
            "#,
            vec![
                SqlValue::Text(self.customer_id.clone()),
                SqlValue::Int(self.amount_in_cents),
                SqlValue::Text(self.status.as_str().to_string()),
                SqlValue::Date(date),
            ],
        )
    }

    pub fn update(&self, id: &str) -> Statement {
        Statement::new(
            r#"
            UPDATE invoices
            SET customer_id = $1::uuid, amount = $2, status = $3
            WHERE id = $4::uuid
            "#,
            vec![
                SqlValue::Text(self.customer_id.clone()),
                SqlValue::Int(self.amount_in_cents),
                SqlValue::Text(self.status.as_str().to_string()),
                SqlValue::Text(id.to_string()),
            ],
        )
    }
}

pub fn delete_by_id(id: &str) -> Statement {
    Statement::new(
        r#"
        DELETE FROM invoices WHERE id = $1::uuid
        "#,
        vec![SqlValue::Text(id.to_string())],
    )
}

/// Coerces a submitted amount the way a browser form number does: blank is zero.
pub fn coerce_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Decimal::ZERO);
    }

    if !raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }

    // f64 decides what is numeric; Decimal keeps the exact digits when it can
    let approx = raw.parse::<f64>().ok().filter(|value| value.is_finite())?;

    if let Ok(exact) = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        return Some(exact);
    }

    if approx == 0.0 {
        return Some(Decimal::ZERO);
    }

    // outside Decimal's range: smallest step for tiny values, MAX for huge ones
    let magnitude = if approx.abs() < 1.0 {
        Decimal::new(1, 28)
    } else {
        Decimal::MAX
    };

    Some(if approx < 0.0 { -magnitude } else { magnitude })
}

/// `round(amount * 100)`, or `None` when it does not fit the column.
pub fn minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::new(100, 0))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(amount: &str) -> InvoiceDraft {
        let amount = coerce_amount(amount).unwrap();

        InvoiceDraft {
            customer_id: "c1".to_string(),
            amount,
            amount_in_cents: minor_units(amount).unwrap(),
            status: InvoiceStatus::Pending,
        }
    }

    #[test]
    fn amounts_coerce_like_form_numbers() {
        assert_eq!(coerce_amount(" 10 "), Some(Decimal::new(10, 0)));
        assert_eq!(coerce_amount(""), Some(Decimal::ZERO));
        assert_eq!(coerce_amount("12.34"), Some(Decimal::new(1234, 2)));
        assert_eq!(coerce_amount("1e3"), Some(Decimal::new(1000, 0)));
        assert_eq!(coerce_amount("ten"), None);
        assert_eq!(coerce_amount("1_000"), None);
        assert_eq!(coerce_amount("0x10"), None);
        assert_eq!(coerce_amount("1e-400"), Some(Decimal::ZERO));
    }

    #[test]
    fn out_of_range_amounts_keep_their_sign() {
        let tiny = coerce_amount("1e-30").unwrap();
        assert!(tiny > Decimal::ZERO);
        assert_eq!(minor_units(tiny), Some(0));

        assert!(coerce_amount("-1e-30").unwrap() < Decimal::ZERO);
        assert_eq!(coerce_amount("1e40").and_then(minor_units), None);
    }

    #[test]
    fn minor_units_round_to_the_nearest_cent() {
        assert_eq!(minor_units(Decimal::new(10, 0)), Some(1000));
        assert_eq!(minor_units(Decimal::new(1999, 2)), Some(1999));
        assert_eq!(minor_units(Decimal::new(10005, 3)), Some(1001));
        assert_eq!(minor_units(Decimal::new(1234, 4)), Some(12));
        assert_eq!(minor_units(Decimal::MAX), None);
    }

    #[test]
    fn insert_binds_values_positionally() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let statement = draft("10").insert(date);

        assert_eq!(statement.verb(), "INSERT");
        assert!(!statement.sql.contains("c1"));
        assert_eq!(
            statement.params,
            vec![
                SqlValue::Text("c1".to_string()),
                SqlValue::Int(1000),
                SqlValue::Text("pending".to_string()),
                SqlValue::Date(date),
            ]
        );
    }

    #[test]
    fn update_targets_the_given_id() {
        let statement = draft("2.5").update("inv-1");

        assert_eq!(statement.verb(), "UPDATE");
        assert_eq!(statement.params[1], SqlValue::Int(250));
        assert_eq!(statement.params[3], SqlValue::Text("inv-1".to_string()));
    }

    #[test]
    fn status_parses_only_known_values() {
        assert_eq!("paid".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert!("overdue".parse::<InvoiceStatus>().is_err());
        assert!("Paid".parse::<InvoiceStatus>().is_err());
    }
}
