pub mod category;
pub mod filters;
pub mod history;
pub mod todo;

pub use category::*;
pub use filters::*;
pub use history::*;
pub use todo::*;
