// Application layer: the interactive front end built on the core operations.

pub mod menu;

pub use menu::Menu;
