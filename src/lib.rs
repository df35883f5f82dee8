// Library for the binary and for tests to access modules

pub mod cli;
pub mod config;
pub mod docker_repo;
pub mod engine;
pub mod error;
pub mod models;
pub mod poller;
pub mod render;
pub mod sink;
pub mod source;
