pub mod provider;
pub mod remote;
pub mod service;
