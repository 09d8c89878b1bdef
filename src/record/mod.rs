//! Record module
//!
//! Turns the loosely-typed records the service returns into [`Item`]s.
//!
//! # Coercion rules
//!
//! | target  | rule                                                        |
//! |---------|-------------------------------------------------------------|
//! | string  | stringify any non-null value; null → `""`                   |
//! | float   | parse as decimal; failure or null → `0.0`                   |
//! | integer | parse as integer; failure or null → `0`                     |
//! | boolean | `"true"` or `"1"` → true; anything else → false             |
//! | date    | first matching layout; no match → `None`                    |

mod item;
mod mapper;
mod value;

pub use item::Item;
pub use mapper::RecordMapper;
pub use value::{parse_timestamp, RawRecord, WireValue};
