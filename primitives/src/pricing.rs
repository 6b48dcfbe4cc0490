//! Presale price curve.

use core::marker::PhantomData;
use frame::traits::Get;

/// Deterministic unit price as a function of how many units have already been sold.
///
/// Implementations must be monotonic: `unit_price(n) <= unit_price(n + 1)`.
pub trait PriceCurve {
    fn unit_price(sold: u16) -> u64;

    /// Price of the most recent sale, the next sale and the one after it.
    ///
    /// `last` is zero before anything has been sold.
    fn window(sold: u16) -> (u64, u64, u64) {
        let last = match sold.checked_sub(1) {
            Some(previous) => Self::unit_price(previous),
            None => 0,
        };
        (last, Self::unit_price(sold), Self::unit_price(sold.saturating_add(1)))
    }

    /// Cost of the next `count` units, each priced at the curve value just before it
    /// is sold. `None` if the total does not fit in a `u64`.
    fn batch_cost(sold: u16, count: u16) -> Option<u64> {
        (0..count).try_fold(0u64, |total, offset| {
            let position = sold.checked_add(offset)?;
            total.checked_add(Self::unit_price(position))
        })
    }
}

/// Step function: a base price, a fixed increment every `Interval` sales, and one-off
/// jumps once the sold counter reaches each milestone.
pub struct StepPriceCurve<Start, Interval, Increment, Milestones>(
    PhantomData<(Start, Interval, Increment, Milestones)>,
);

impl<Start, Interval, Increment, Milestones> PriceCurve
    for StepPriceCurve<Start, Interval, Increment, Milestones>
where
    Start: Get<u64>,
    Interval: Get<u16>,
    Increment: Get<u64>,
    Milestones: Get<&'static [(u16, u64)]>,
{
    fn unit_price(sold: u16) -> u64 {
        let steps = u64::from(sold / Interval::get().max(1));
        let base = Start::get().saturating_add(Increment::get().saturating_mul(steps));
        Milestones::get()
            .iter()
            .filter(|(threshold, _)| sold >= *threshold)
            .fold(base, |price, (_, jump)| price.saturating_add(*jump))
    }
}
