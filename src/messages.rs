use serde::Deserialize;

/// Language used for every message returned to the dashboard.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

/// The mutation an invoice message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceAction {
    Create,
    Update,
    Delete,
}

// codes attached to `validator::ValidationError`s by the request schemas
pub const CODE_REQUIRED: &str = "required";
pub const CODE_LENGTH: &str = "length";
pub const CODE_INVALID_AMOUNT: &str = "invalid_amount";
pub const CODE_INVALID_STATUS: &str = "invalid_status";

impl Locale {
    /// Message for a violation of `code` on the form field `field`.
    pub fn field_message(&self, field: &str, code: &str) -> String {
        let message = match (self, field) {
            (Locale::En, "customerId") => "Please select a customer.",
            (Locale::Ja, "customerId") => "顧客IDを入力してください",
            (Locale::En, "amount") => "Please enter an amount greater than 0.",
            (Locale::Ja, "amount") => "請求金額は0円より大きくなければなりません",
            (Locale::En, "status") => "Please select an invoice status.",
            (Locale::Ja, "status") => "請求書のステータスを入力してください",
            (Locale::En, "id") => "Invoice id is required.",
            (Locale::Ja, "id") => "請求書IDを入力してください",
            (Locale::En, _) => return format!("Invalid {} ({}).", field, code),
            (Locale::Ja, _) => return format!("{}が無効です ({})", field, code),
        };

        message.to_string()
    }

    /// Summary attached to a rejected form.
    pub fn validation_failed(&self, action: InvoiceAction) -> String {
        match (self, action) {
            (Locale::En, InvoiceAction::Create) => "Missing Fields. Failed to Create Invoice.",
            (Locale::En, InvoiceAction::Update) => "Missing Fields. Failed to Update Invoice.",
            (Locale::En, InvoiceAction::Delete) => "Missing Fields. Failed to Delete Invoice.",
            (Locale::Ja, InvoiceAction::Create) => "請求書は作成できませんでした",
            (Locale::Ja, InvoiceAction::Update) => "請求書は更新できませんでした",
            (Locale::Ja, InvoiceAction::Delete) => "請求書は削除できませんでした",
        }
        .to_string()
    }

    /// Generic message for a failed statement. Never carries the driver error.
    pub fn database_failed(&self, action: InvoiceAction) -> String {
        match (self, action) {
            (Locale::En, InvoiceAction::Create) => "Database Error: creation failed".to_string(),
            (Locale::En, InvoiceAction::Update) => "Database Error: update failed".to_string(),
            (Locale::En, InvoiceAction::Delete) => "Database Error: deletion failed".to_string(),
            (Locale::Ja, action) => format!("Database Error: {}", self.validation_failed(action)),
        }
    }

    pub fn invoice_deleted(&self) -> String {
        match self {
            Locale::En => "Deleted Invoice.",
            Locale::Ja => "請求書は削除されました",
        }
        .to_string()
    }
}
