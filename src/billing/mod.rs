//! Pricing, aggregation and rendering of theater billing statements.

pub mod domain;
pub mod pricing;
pub mod render;
mod statement;

pub use domain::{
    Catalog, Invoice, Performance, Play, PlayCatalog, PlayType, StatementError,
    UnrecognizedPlayType,
};
pub use pricing::{
    calculate_amount, calculate_volume_credits, PricedPerformance, PricingSchedule,
};
pub use render::{render_html, render_json, render_text, usd, OutputFormat};
pub use statement::{aggregate, aggregate_with, StatementLine, StatementResult};
