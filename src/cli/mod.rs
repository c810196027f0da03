pub mod convert;
pub mod setup;
pub mod terminal;
pub mod ui;
