pub mod entry;

pub use entry::WorryEntry;
