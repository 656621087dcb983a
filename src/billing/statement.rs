use super::domain::{Invoice, PlayCatalog, PlayType, StatementError};
use super::pricing::PricingSchedule;
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementLine {
    pub play_id: String,
    pub play_name: String,
    pub play_type: PlayType,
    pub audience: u32,
    pub amount: u64,
    pub volume_credits: u64,
}

/// Priced invoice, ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementResult {
    pub customer: String,
    pub lines: Vec<StatementLine>,
    pub total_amount: u64,
    pub total_volume_credits: u64,
}

/// Prices every performance of `invoice` under the standard schedule.
pub fn aggregate<C>(invoice: &Invoice, catalog: &C) -> Result<StatementResult, StatementError>
where
    C: PlayCatalog + ?Sized,
{
    aggregate_with(&PricingSchedule::standard(), invoice, catalog)
}

/// Like [`aggregate`], with an explicit pricing schedule.
///
/// Lines keep invoice order. The first unknown play or play type aborts the
/// whole statement.
pub fn aggregate_with<C>(
    schedule: &PricingSchedule,
    invoice: &Invoice,
    catalog: &C,
) -> Result<StatementResult, StatementError>
where
    C: PlayCatalog + ?Sized,
{
    let mut lines = Vec::with_capacity(invoice.performances.len());
    let mut total_amount: u64 = 0;
    let mut total_volume_credits: u64 = 0;

    for performance in &invoice.performances {
        let play = catalog.lookup(&performance.play_id).ok_or_else(|| {
            warn!(
                play_id = %performance.play_id,
                customer = %invoice.customer,
                "play missing from catalog"
            );
            StatementError::UnknownPlay {
                play_id: performance.play_id.clone(),
            }
        })?;

        let priced = schedule.price(play, performance).inspect_err(|err| {
            warn!(play_id = %performance.play_id, error = %err, "unable to price performance");
        })?;

        total_amount = total_amount.checked_add(priced.amount).ok_or_else(|| {
            StatementError::AmountOverflow {
                play_id: performance.play_id.clone(),
            }
        })?;
        total_volume_credits = total_volume_credits.saturating_add(priced.volume_credits);

        debug!(
            play_id = %performance.play_id,
            audience = performance.audience,
            amount = priced.amount,
            volume_credits = priced.volume_credits,
            "priced performance"
        );

        lines.push(StatementLine {
            play_id: performance.play_id.clone(),
            play_name: play.name.clone(),
            play_type: priced.play_type,
            audience: performance.audience,
            amount: priced.amount,
            volume_credits: priced.volume_credits,
        });
    }

    info!(
        customer = %invoice.customer,
        performances = lines.len(),
        total_amount,
        total_volume_credits,
        "statement aggregated"
    );

    Ok(StatementResult {
        customer: invoice.customer.clone(),
        lines,
        total_amount,
        total_volume_credits,
    })
}
