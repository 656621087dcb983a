use super::domain::{Performance, Play, PlayType, StatementError};

/// Rates driving the per-performance charge and loyalty credits.
///
/// Monetary values are in cents. Audience thresholds are exclusive: the
/// overflow surcharge starts at `threshold + 1` seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingSchedule {
    pub tragedy_base: u64,
    pub tragedy_threshold: u32,
    pub tragedy_over_per_person: u64,
    pub comedy_base: u64,
    pub comedy_threshold: u32,
    pub comedy_over_flat: u64,
    pub comedy_over_per_person: u64,
    pub comedy_per_audience: u64,
    pub volume_credit_threshold: u32,
    pub comedy_credit_divisor: u32,
}

impl PricingSchedule {
    pub const fn standard() -> Self {
        Self {
            tragedy_base: 40_000,
            tragedy_threshold: 30,
            tragedy_over_per_person: 1_000,
            comedy_base: 30_000,
            comedy_threshold: 20,
            comedy_over_flat: 10_000,
            comedy_over_per_person: 500,
            comedy_per_audience: 300,
            volume_credit_threshold: 30,
            comedy_credit_divisor: 5,
        }
    }

    /// Charge in cents, or `None` if it does not fit in a `u64`.
    pub fn amount(&self, play_type: PlayType, audience: u32) -> Option<u64> {
        let seats = u64::from(audience);
        match play_type {
            PlayType::Tragedy => {
                let mut amount = self.tragedy_base;
                if audience > self.tragedy_threshold {
                    let overflow = seats - u64::from(self.tragedy_threshold);
                    let surcharge = self.tragedy_over_per_person.checked_mul(overflow)?;
                    amount = amount.checked_add(surcharge)?;
                }
                Some(amount)
            }
            PlayType::Comedy => {
                let mut amount = self.comedy_base;
                if audience > self.comedy_threshold {
                    let overflow = seats - u64::from(self.comedy_threshold);
                    let surcharge = self
                        .comedy_over_per_person
                        .checked_mul(overflow)?
                        .checked_add(self.comedy_over_flat)?;
                    amount = amount.checked_add(surcharge)?;
                }
                amount.checked_add(self.comedy_per_audience.checked_mul(seats)?)
            }
        }
    }

    pub fn volume_credits(&self, play_type: PlayType, audience: u32) -> u64 {
        let mut credits = u64::from(audience.saturating_sub(self.volume_credit_threshold));
        if play_type == PlayType::Comedy {
            credits += u64::from(audience.checked_div(self.comedy_credit_divisor).unwrap_or(0));
        }
        credits
    }

    /// Resolves the play type once and computes both quantities from it.
    pub fn price(
        &self,
        play: &Play,
        performance: &Performance,
    ) -> Result<PricedPerformance, StatementError> {
        let play_type = resolve_play_type(play, performance)?;
        let amount = self.amount(play_type, performance.audience).ok_or_else(|| {
            StatementError::AmountOverflow {
                play_id: performance.play_id.clone(),
            }
        })?;

        Ok(PricedPerformance {
            play_type,
            amount,
            volume_credits: self.volume_credits(play_type, performance.audience),
        })
    }
}

impl Default for PricingSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedPerformance {
    pub play_type: PlayType,
    pub amount: u64,
    pub volume_credits: u64,
}

/// Charge for one performance under the standard schedule.
pub fn calculate_amount(play: &Play, performance: &Performance) -> Result<u64, StatementError> {
    PricingSchedule::standard()
        .price(play, performance)
        .map(|priced| priced.amount)
}

/// Volume credits for one performance under the standard schedule.
pub fn calculate_volume_credits(
    play: &Play,
    performance: &Performance,
) -> Result<u64, StatementError> {
    let play_type = resolve_play_type(play, performance)?;
    Ok(PricingSchedule::standard().volume_credits(play_type, performance.audience))
}

fn resolve_play_type(play: &Play, performance: &Performance) -> Result<PlayType, StatementError> {
    play.play_type()
        .map_err(|err| StatementError::UnknownPlayType {
            play_id: performance.play_id.clone(),
            play_type: err.0,
        })
}
