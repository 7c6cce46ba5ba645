mod diary;
mod rule;
mod selector;

pub use diary::*;
pub use rule::*;
pub use selector::*;
