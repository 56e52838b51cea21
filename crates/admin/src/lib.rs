pub mod abstract_trait;
pub mod config;
pub mod controller;
pub mod di;
pub mod domain;
pub mod handler;
pub mod schema;
pub mod service;
pub mod state;
pub mod view;
