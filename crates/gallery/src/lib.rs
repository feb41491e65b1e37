pub mod app;
pub mod catalog;
pub mod command;
pub mod config;
pub mod events;
pub mod page;
pub mod sys;
pub mod view;
