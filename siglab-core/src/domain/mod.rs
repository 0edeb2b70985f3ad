//! Domain types: candles, positions, completed trades.

pub mod candle;
pub mod position;
pub mod trade;

pub use candle::{validate_series, Candle};
pub use position::{Position, Side};
pub use trade::{ExitReason, Trade};
