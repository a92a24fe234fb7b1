//! # Domain Models
//!
//! Value types shared by the router and every adapter.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Quote`] | Resolved price and percent change |
//! | [`Symbol`] | Validated ticker as entered |
//! | [`LooseNumber`] | Number-or-string upstream numeric field |
//! | [`ChangeWindow`] | Parsed timeframe as used by adapters |
//! | [`PricePoint`] | One point of a price series |

mod history;
mod number;
mod quote;
mod symbol;
mod timeframe;

pub use history::{change_over, last_two_change, percent_change, PricePoint};
pub use number::{parse_decimal, LooseNumber};
pub use quote::Quote;
pub use symbol::Symbol;
pub use timeframe::{parse_timeframe, ChangeWindow};
