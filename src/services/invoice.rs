//! Invoice numbering.
//!
//! Invoice numbers look like `INV18102026-007`: the UTC date as `DDMMYYYY`
//! followed by a running number that restarts at `001` every day. The
//! running number is at least three digits wide and keeps growing past 999.
//!
//! Generation reads the highest number already issued for the day and adds
//! one. To keep that read-then-insert step safe under concurrent writers the
//! caller's database transaction first takes a transaction-scoped advisory
//! lock keyed on the date prefix; the UNIQUE constraint on
//! `transactions.invoice_number` backs this up.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Connection, PgConnection};

/// `INV{DDMMYYYY}-` for the given day.
pub fn invoice_prefix(date: NaiveDate) -> String {
    format!("INV{}-", date.format("%d%m%Y"))
}

pub fn format_invoice_number(prefix: &str, sequence: u32) -> String {
    format!("{prefix}{sequence:03}")
}

/// Running number of `invoice_number` if it belongs to `prefix`.
pub fn parse_sequence(invoice_number: &str, prefix: &str) -> Option<u32> {
    invoice_number.strip_prefix(prefix)?.parse().ok()
}

/// Suffix used when the latest invoice of the day cannot be read.
fn fallback_sequence(now: DateTime<Utc>) -> u32 {
    now.timestamp_subsec_millis() % 1000
}

/// Generate the next invoice number for `now`'s date.
///
/// Must run inside the database transaction that inserts the row; the
/// advisory lock is held until that transaction ends. If the lookup query
/// fails it is rolled back to a savepoint and a timestamp-derived suffix is
/// used instead.
pub async fn next_invoice_number(
    conn: &mut PgConnection,
    now: DateTime<Utc>,
) -> Result<String, sqlx::Error> {
    let prefix = invoice_prefix(now.date_naive());

    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(&prefix)
        .execute(&mut *conn)
        .await?;

    let mut savepoint = conn.begin().await?;
    let latest = sqlx::query_scalar::<_, String>(
        r#"
        SELECT invoice_number
        FROM transactions
        WHERE invoice_number LIKE $1
        ORDER BY LENGTH(invoice_number) DESC, invoice_number DESC
        LIMIT 1
        "#,
    )
    .bind(format!("{prefix}%"))
    .fetch_optional(&mut *savepoint)
    .await;

    let sequence = match latest {
        Ok(latest) => {
            savepoint.commit().await?;
            latest
                .as_deref()
                .and_then(|invoice| parse_sequence(invoice, &prefix))
                .map_or(1, |sequence| sequence + 1)
        }
        Err(e) => {
            tracing::warn!(error = %e, prefix = %prefix, "latest invoice lookup failed, using timestamp suffix");
            savepoint.rollback().await?;
            fallback_sequence(now)
        }
    };

    Ok(format_invoice_number(&prefix, sequence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn prefix_uses_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2023, 8, 17).unwrap();
        assert_eq!(invoice_prefix(date), "INV17082023-");
    }

    #[test]
    fn sequence_is_zero_padded_to_three_digits() {
        assert_eq!(format_invoice_number("INV17082023-", 1), "INV17082023-001");
        assert_eq!(format_invoice_number("INV17082023-", 42), "INV17082023-042");
        assert_eq!(format_invoice_number("INV17082023-", 1000), "INV17082023-1000");
    }

    #[test]
    fn parse_sequence_round_trips() {
        let prefix = "INV17082023-";
        for sequence in [1, 9, 10, 999, 1000, 12345] {
            let invoice = format_invoice_number(prefix, sequence);
            assert_eq!(parse_sequence(&invoice, prefix), Some(sequence));
        }
    }

    #[test]
    fn parse_sequence_rejects_other_days_and_garbage() {
        assert_eq!(parse_sequence("INV18082023-005", "INV17082023-"), None);
        assert_eq!(parse_sequence("INV17082023-abc", "INV17082023-"), None);
        assert_eq!(parse_sequence("INV17082023-", "INV17082023-"), None);
    }

    #[test]
    fn sequences_sort_numerically_by_length_then_text() {
        // Mirrors the ORDER BY used to find the latest invoice of the day.
        let prefix = "INV17082023-";
        let mut invoices: Vec<String> = [2, 999, 1000, 10]
            .into_iter()
            .map(|sequence| format_invoice_number(prefix, sequence))
            .collect();
        invoices.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| b.cmp(a)));
        assert_eq!(parse_sequence(&invoices[0], prefix), Some(1000));
    }

    #[test]
    fn fallback_sequence_fits_three_digits() {
        let now = Utc.with_ymd_and_hms(2023, 8, 17, 10, 0, 0).unwrap()
            + chrono::Duration::milliseconds(734);
        assert_eq!(fallback_sequence(now), 734);
        assert_eq!(
            format_invoice_number(&invoice_prefix(now.date_naive()), fallback_sequence(now)),
            "INV17082023-734"
        );
    }
}
