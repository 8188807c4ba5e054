use validator::{ValidationError, ValidationErrors};
use validator_derive::Validate;

use super::FormFields;
use crate::messages::{CODE_INVALID_AMOUNT, CODE_INVALID_STATUS};
use crate::models::invoice::{coerce_amount, minor_units, InvoiceDraft, InvoiceStatus};

/// The mutable invoice fields. `id` and `date` never come from this form.
#[derive(Validate, Debug, Default)]
pub struct RequestInvoice {
    #[validate(required, length(min = 1))]
    pub customer_id: Option<String>,
    #[validate(custom = "validate_amount")]
    pub amount: String,
    #[validate(required, custom = "validate_status")]
    pub status: Option<String>,
}

#[derive(Validate, Debug, Default)]
pub struct RequestDeleteInvoice {
    #[validate(required, length(min = 1))]
    pub id: Option<String>,
}

impl RequestInvoice {
    pub fn from_fields(fields: &FormFields) -> Self {
        RequestInvoice {
            customer_id: fields.get("customerId").cloned(),
            amount: fields.get("amount").cloned().unwrap_or_default(),
            status: fields.get("status").cloned(),
        }
    }

    /// Validates every field at once and converts the form into a draft.
    pub fn into_draft(self) -> Result<InvoiceDraft, ValidationErrors> {
        validator::Validate::validate(&self)?;

        let amount = coerce_amount(&self.amount);
        let amount_in_cents = amount.and_then(minor_units);
        let status = self.status.as_deref().and_then(|s| s.parse::<InvoiceStatus>().ok());

        match (self.customer_id, amount, amount_in_cents, status) {
            (Some(customer_id), Some(amount), Some(amount_in_cents), Some(status)) => {
                Ok(InvoiceDraft {
                    customer_id,
                    amount,
                    amount_in_cents,
                    status,
                })
            }
            // validate() already rejects every combination that lands here
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("amount", ValidationError::new(CODE_INVALID_AMOUNT));
                Err(errors)
            }
        }
    }
}

impl RequestDeleteInvoice {
    pub fn from_fields(fields: &FormFields) -> Self {
        RequestDeleteInvoice {
            id: fields.get("id").cloned(),
        }
    }

    pub fn into_id(self) -> Result<String, ValidationErrors> {
        validator::Validate::validate(&self)?;

        Ok(self.id.unwrap_or_default())
    }
}

fn validate_amount(amount: &str) -> Result<(), ValidationError> {
    match coerce_amount(amount) {
        Some(value) if value.is_sign_positive() && !value.is_zero() => {
            if minor_units(value).is_some() {
                return Ok(());
            }
        }
        _ => (),
    }

    Err(ValidationError::new(CODE_INVALID_AMOUNT))
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if status.parse::<InvoiceStatus>().is_ok() {
        return Ok(());
    }

    Err(ValidationError::new(CODE_INVALID_STATUS))
}
