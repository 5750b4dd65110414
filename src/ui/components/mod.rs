pub mod dialog;
pub mod input;

pub use dialog::ResultDialog;
pub use input::{InputWidget, SelectWidget};
