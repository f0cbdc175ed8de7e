//! `todoapp`: terminal to-do list built on reactive task state containers.

pub mod app;
pub mod config;
pub mod dispatch;
pub mod observable;
pub mod repository;
pub mod state;
pub mod ui;
