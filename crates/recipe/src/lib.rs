mod catalog;
mod collection;
mod meal;
mod reading;
mod types;

pub use catalog::*;
pub use collection::*;
pub use meal::*;
pub use reading::*;
pub use types::*;
