use crate::domain::Product;

/// Custom actions for Product entities.
///
/// Each action is applied by the catalog actor as one indivisible step, which
/// is what makes the check-then-change below safe under concurrent callers.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Decrements stock by the given amount only if that much is available.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` and leaves stock untouched otherwise.
    DecrementStock(u32),
    /// Returns previously reserved units to stock.
    Restock(u32),
    /// Writes a review aggregate recomputed from the review store at `revision`.
    ///
    /// Ignored when `revision` is below the last applied one, so an older
    /// snapshot never overwrites a newer one. Withdrawn reviews bump the
    /// revision too, which lets a smaller count replace a larger one.
    UpdateAggregate { rating: f64, count: u32, revision: u64 },
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    /// The product as it stands after the decrement.
    StockReserved(Product),
    Restocked(u32),
    AggregateApplied(bool),
}
