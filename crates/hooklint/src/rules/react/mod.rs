//! Rules for React hook usage.

mod no_unstable_context_selector;
mod prefer_use_memo;

pub use no_unstable_context_selector::NoUnstableContextSelector;
pub use prefer_use_memo::PreferUseMemo;
