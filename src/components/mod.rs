pub mod recorder;
pub mod results;
pub mod text_entry;
