use chrono::Utc;

use super::{ActionOutcome, Actions, DASHBOARD_INVOICES};
use crate::database::Statement;
use crate::errors::field_errors;
use crate::logger::Logger;
use crate::messages::InvoiceAction;
use crate::models::invoice::{delete_by_id, InvoiceDraft};
use crate::models::requests::invoice::{RequestDeleteInvoice, RequestInvoice};
use crate::models::requests::FormFields;
use crate::models::responses::ActionState;

impl Actions {
    pub async fn create_invoice(&self, fields: &FormFields) -> ActionOutcome {
        let draft = match self.validate_invoice(fields, InvoiceAction::Create) {
            Ok(draft) => draft,
            Err(outcome) => return outcome,
        };

        let date = Utc::now().date_naive();

        if let Err(outcome) = self.run(&draft.insert(date), InvoiceAction::Create).await {
            return outcome;
        }

        self.cache.invalidate(DASHBOARD_INVOICES).await;

        ActionOutcome::Redirect {
            to: DASHBOARD_INVOICES.to_string(),
        }
    }

    /// `id` comes from the route, not the form, and is not re-validated.
    pub async fn update_invoice(&self, id: &str, fields: &FormFields) -> ActionOutcome {
        let draft = match self.validate_invoice(fields, InvoiceAction::Update) {
            Ok(draft) => draft,
            Err(outcome) => return outcome,
        };

        if let Err(outcome) = self.run(&draft.update(id), InvoiceAction::Update).await {
            return outcome;
        }

        self.cache.invalidate(DASHBOARD_INVOICES).await;

        ActionOutcome::Redirect {
            to: DASHBOARD_INVOICES.to_string(),
        }
    }

    pub async fn delete_invoice(&self, fields: &FormFields) -> ActionOutcome {
        let id = match RequestDeleteInvoice::from_fields(fields).into_id() {
            Ok(id) => id,
            Err(err) => {
                tracing::debug!(?err, "delete invoice rejected");

                return ActionOutcome::Rejected(ActionState::invalid(
                    field_errors(&err, self.locale),
                    self.locale.validation_failed(InvoiceAction::Delete),
                ));
            }
        };

        if let Err(outcome) = self.run(&delete_by_id(&id), InvoiceAction::Delete).await {
            return outcome;
        }

        self.cache.invalidate(DASHBOARD_INVOICES).await;

        ActionOutcome::Completed(ActionState::message(self.locale.invoice_deleted()))
    }

    fn validate_invoice(
        &self,
        fields: &FormFields,
        action: InvoiceAction,
    ) -> Result<InvoiceDraft, ActionOutcome> {
        let validated = RequestInvoice::from_fields(fields).into_draft();
        tracing::debug!(?action, ?validated, "invoice form validated");

        validated.map_err(|err| {
            ActionOutcome::Rejected(ActionState::invalid(
                field_errors(&err, self.locale),
                self.locale.validation_failed(action),
            ))
        })
    }

    async fn run(
        &self,
        statement: &Statement,
        action: InvoiceAction,
    ) -> Result<(), ActionOutcome> {
        match self.db.execute(statement).await {
            Ok(rows) => {
                let verb = statement.verb();
                tracing::debug!(?action, verb, rows, "invoice statement executed");
                Ok(())
            }
            Err(err) => {
                Logger::new(format!("{:?} invoice: {:?}", action, err)).log();

                Err(ActionOutcome::Failed(ActionState::message(
                    self.locale.database_failed(action),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::database::{RecordingPersistence, SqlValue};
    use crate::messages::Locale;
    use crate::repositories::credentials::{CredentialsProvider, MemoryUsers};
    use crate::repositories::page_cache::MemoryPageCache;

    struct Harness {
        actions: Actions,
        db: RecordingPersistence,
        cache: MemoryPageCache,
    }

    fn harness(db: RecordingPersistence) -> Harness {
        let cache = MemoryPageCache::new();
        let verifier = CredentialsProvider::new(MemoryUsers::default(), "k".to_string());
        let actions = Actions::new(
            Arc::new(db.clone()),
            Arc::new(cache.clone()),
            Arc::new(verifier),
        );

        Harness { actions, db, cache }
    }

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn invoice(amount: &str, status: &str) -> FormFields {
        fields(&[("customerId", "c1"), ("amount", amount), ("status", status)])
    }

    #[tokio::test]
    async fn create_inserts_then_invalidates_then_redirects() {
        let h = harness(RecordingPersistence::new());

        let outcome = h.actions.create_invoice(&invoice("10", "pending")).await;

        assert_eq!(
            outcome,
            ActionOutcome::Redirect {
                to: "/dashboard/invoices".to_string()
            }
        );

        let statements = h.db.statements();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].verb(), "INSERT");
        assert_eq!(
            statements[0].params,
            vec![
                SqlValue::Text("c1".to_string()),
                SqlValue::Int(1000),
                SqlValue::Text("pending".to_string()),
                SqlValue::Date(Utc::now().date_naive()),
            ]
        );
        assert_eq!(h.cache.invalidated(), vec!["/dashboard/invoices"]);
    }

    #[tokio::test]
    async fn invalid_amounts_never_reach_the_database() {
        for amount in ["0", "-1", "abc", ""] {
            let h = harness(RecordingPersistence::new());

            let created = h.actions.create_invoice(&invoice(amount, "paid")).await;
            let updated = h.actions.update_invoice("inv-1", &invoice(amount, "paid")).await;

            for outcome in [created, updated] {
                let state = match outcome {
                    ActionOutcome::Rejected(state) => state,
                    other => panic!("expected rejection for {:?}, got {:?}", amount, other),
                };
                let errors = state.errors.unwrap();
                assert_eq!(errors.len(), 1);
                assert!(errors.contains_key("amount"));
            }

            assert!(h.db.statements().is_empty());
            assert!(h.cache.invalidated().is_empty());
        }
    }

    #[tokio::test]
    async fn unknown_status_is_rejected_for_create_and_update() {
        let h = harness(RecordingPersistence::new());

        let created = h.actions.create_invoice(&invoice("10", "overdue")).await;
        let updated = h.actions.update_invoice("inv-1", &invoice("10", "")).await;

        for outcome in [created, updated] {
            let errors = outcome.state().and_then(|s| s.errors.clone()).unwrap();
            assert_eq!(errors["status"], vec!["Please select an invoice status."]);
        }
        assert!(h.db.statements().is_empty());
    }

    #[tokio::test]
    async fn rejection_carries_every_field_and_a_summary() {
        let h = harness(RecordingPersistence::new());

        let outcome = h.actions.create_invoice(&FormFields::new()).await;
        let state = outcome.state().unwrap();

        let errors = state.errors.as_ref().unwrap();
        assert_eq!(
            errors.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["amount", "customerId", "status"]
        );
        assert_eq!(
            state.message.as_deref(),
            Some("Missing Fields. Failed to Create Invoice.")
        );
    }

    #[tokio::test]
    async fn update_sets_fields_for_the_route_id() {
        let h = harness(RecordingPersistence::new());

        let outcome = h.actions.update_invoice("inv-7", &invoice("12.345", "paid")).await;

        assert!(matches!(outcome, ActionOutcome::Redirect { .. }));
        let statements = h.db.statements();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].verb(), "UPDATE");
        assert_eq!(
            statements[0].params,
            vec![
                SqlValue::Text("c1".to_string()),
                SqlValue::Int(1235),
                SqlValue::Text("paid".to_string()),
                SqlValue::Text("inv-7".to_string()),
            ]
        );
        assert_eq!(h.cache.invalidated(), vec!["/dashboard/invoices"]);
    }

    #[tokio::test]
    async fn database_failure_skips_cache_and_redirect() {
        let h = harness(RecordingPersistence::failing());

        let created = h.actions.create_invoice(&invoice("10", "pending")).await;
        let updated = h.actions.update_invoice("inv-1", &invoice("10", "pending")).await;

        assert_eq!(
            created,
            ActionOutcome::Failed(ActionState::message(
                "Database Error: creation failed".to_string()
            ))
        );
        assert_eq!(
            updated,
            ActionOutcome::Failed(ActionState::message(
                "Database Error: update failed".to_string()
            ))
        );
        assert_eq!(h.db.statements().len(), 2);
        assert!(h.cache.invalidated().is_empty());
    }

    #[tokio::test]
    async fn delete_is_reachable() {
        let h = harness(RecordingPersistence::new());

        let outcome = h.actions.delete_invoice(&fields(&[("id", "inv-1")])).await;

        assert_eq!(
            outcome,
            ActionOutcome::Completed(ActionState::message("Deleted Invoice.".to_string()))
        );
        let statements = h.db.statements();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].verb(), "DELETE");
        assert_eq!(statements[0].params, vec![SqlValue::Text("inv-1".to_string())]);
        assert_eq!(h.cache.invalidated(), vec!["/dashboard/invoices"]);
    }

    #[tokio::test]
    async fn delete_with_empty_id_is_rejected() {
        let h = harness(RecordingPersistence::new());

        let outcome = h.actions.delete_invoice(&fields(&[("id", "")])).await;

        let errors = match outcome {
            ActionOutcome::Rejected(state) => state.errors.unwrap(),
            other => panic!("expected rejection, got {:?}", other),
        };
        assert_eq!(errors["id"], vec!["Invoice id is required."]);
        assert!(h.db.statements().is_empty());
        assert!(h.cache.invalidated().is_empty());
    }

    #[tokio::test]
    async fn delete_failure_is_reported_without_invalidation() {
        let h = harness(RecordingPersistence::failing());

        let outcome = h.actions.delete_invoice(&fields(&[("id", "inv-1")])).await;

        assert_eq!(
            outcome,
            ActionOutcome::Failed(ActionState::message(
                "Database Error: deletion failed".to_string()
            ))
        );
        assert!(h.cache.invalidated().is_empty());
    }

    #[tokio::test]
    async fn messages_follow_the_locale() {
        let h = harness(RecordingPersistence::new());
        let actions = h.actions.with_locale(Locale::Ja);

        let outcome = actions.create_invoice(&invoice("0", "pending")).await;
        let state = outcome.state().unwrap();

        assert_eq!(state.message.as_deref(), Some("請求書は作成できませんでした"));
        assert_eq!(
            state.errors.as_ref().unwrap()["amount"],
            vec!["請求金額は0円より大きくなければなりません"]
        );
    }
}
