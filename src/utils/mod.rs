pub mod activity;
pub mod bot;
pub mod completion;
pub mod image;
