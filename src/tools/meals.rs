//! Meal tools
//!
//! Log a meal (aggregate, append to the ledger, optionally email the summary)
//! and show the meal history.

use serde::Serialize;

use crate::email::MailSender;
use crate::models::{MealLine, MealRecord};
use crate::nutrition::aggregate;
use crate::store::{Catalog, Ledger};

/// Shown when no meal has ever been logged
pub const EMPTY_HISTORY: &str = "Meal history is empty.";

/// Default subject for emailed summaries
const SUMMARY_SUBJECT: &str = "BJU meal summary";

/// Outcome of the optional email step of log_meal
#[derive(Debug, Serialize)]
pub struct EmailOutcome {
    pub sent: bool,
    pub detail: String,
}

/// Response for log_meal
#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub logged_at: String,
    /// Totals rounded to two decimals
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
    /// The ledger block exactly as appended
    pub block: String,
    /// Present when email delivery was requested
    pub email: Option<EmailOutcome>,
}

/// Response for meal_history
#[derive(Debug, Serialize)]
pub struct MealHistoryResponse {
    pub history: String,
    pub empty: bool,
}

/// Aggregate the lines against the catalog, append the result to the ledger,
/// then optionally email the appended block.
///
/// Validation failures abort before anything is written. A mail failure is
/// reported in the response but the meal stays persisted (the ledger append
/// happens first).
pub fn log_meal(
    catalog: &Catalog,
    ledger: &Ledger,
    mailer: Option<&MailSender>,
    lines: Vec<MealLine>,
    email_to: Option<Vec<String>>,
    email_subject: Option<String>,
) -> Result<LogMealResponse, String> {
    let products = catalog
        .load()
        .map_err(|e| format!("Failed to load catalog: {}", e))?;

    let meal = aggregate(&products, &lines).map_err(|e| e.to_string())?;

    let record = MealRecord::new(meal.lines, meal.totals);
    let block = ledger
        .append(&record)
        .map_err(|e| format!("Failed to append meal to history: {}", e))?;

    let totals = record.totals.rounded();
    tracing::info!(
        protein = totals.protein,
        fat = totals.fat,
        carb = totals.carb,
        "Meal logged"
    );

    let email = email_to.map(|recipients| {
        let subject = email_subject.as_deref().unwrap_or(SUMMARY_SUBJECT);
        send_summary(mailer, &recipients, subject, &block)
    });

    Ok(LogMealResponse {
        logged_at: record.logged_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        protein: totals.protein,
        fat: totals.fat,
        carb: totals.carb,
        block,
        email,
    })
}

fn send_summary(
    mailer: Option<&MailSender>,
    recipients: &[String],
    subject: &str,
    body: &str,
) -> EmailOutcome {
    let Some(mailer) = mailer else {
        return EmailOutcome {
            sent: false,
            detail: "Email is not configured (set BJU_SMTP_* variables)".to_string(),
        };
    };

    match mailer.send_summary(recipients, subject, body) {
        Ok(()) => EmailOutcome {
            sent: true,
            detail: format!("Summary sent to {} recipient(s)", recipients.len()),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Meal summary email failed");
            EmailOutcome {
                sent: false,
                detail: format!("Email failed: {}", e),
            }
        }
    }
}

/// Full meal history text, or the empty-history message
pub fn meal_history(ledger: &Ledger) -> Result<MealHistoryResponse, String> {
    let history = ledger
        .read_all()
        .map_err(|e| format!("Failed to read meal history: {}", e))?;

    Ok(match history {
        Some(text) => MealHistoryResponse {
            history: text,
            empty: false,
        },
        None => MealHistoryResponse {
            history: EMPTY_HISTORY.to_string(),
            empty: true,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrition;
    use tempfile::TempDir;

    fn stores(dir: &TempDir) -> (Catalog, Ledger) {
        let catalog = Catalog::new(dir.path().join("products.txt"));
        let ledger = Ledger::new(dir.path().join("meals.txt"));
        (catalog, ledger)
    }

    #[test]
    fn test_log_meal_appends_and_reports_rounded_totals() {
        let dir = TempDir::new().unwrap();
        let (catalog, ledger) = stores(&dir);
        catalog.upsert("apple", Nutrition::new(0.3, 0.2, 14.0)).unwrap();

        let response = log_meal(
            &catalog,
            &ledger,
            None,
            vec![MealLine::new("apple", "200")],
            None,
            None,
        )
        .unwrap();

        assert_eq!(response.protein, 0.6);
        assert_eq!(response.fat, 0.4);
        assert_eq!(response.carb, 28.0);
        assert!(response.block.contains("Итого: Б: 0.60 Ж: 0.40 У: 28.00"));
        assert!(response.email.is_none());

        let history = meal_history(&ledger).unwrap();
        assert!(!history.empty);
        assert_eq!(history.history, response.block);
    }

    #[test]
    fn test_log_meal_validation_failure_persists_nothing() {
        let dir = TempDir::new().unwrap();
        let (catalog, ledger) = stores(&dir);

        let err = log_meal(
            &catalog,
            &ledger,
            None,
            vec![MealLine::new("unknown", "50")],
            None,
            None,
        )
        .unwrap_err();
        assert!(err.contains("unknown"));
        assert!(ledger.read_all().unwrap().is_none());
    }

    #[test]
    fn test_log_meal_unconfigured_email_still_persists() {
        let dir = TempDir::new().unwrap();
        let (catalog, ledger) = stores(&dir);
        catalog.upsert("apple", Nutrition::new(0.3, 0.2, 14.0)).unwrap();

        let response = log_meal(
            &catalog,
            &ledger,
            None,
            vec![MealLine::new("apple", "100")],
            Some(vec!["someone@example.com".to_string()]),
            None,
        )
        .unwrap();

        let email = response.email.unwrap();
        assert!(!email.sent);
        assert!(email.detail.contains("not configured"));
        assert!(ledger.read_all().unwrap().is_some());
    }

    #[test]
    fn test_meal_history_empty_message() {
        let dir = TempDir::new().unwrap();
        let (_, ledger) = stores(&dir);

        let history = meal_history(&ledger).unwrap();
        assert!(history.empty);
        assert_eq!(history.history, EMPTY_HISTORY);
    }
}
