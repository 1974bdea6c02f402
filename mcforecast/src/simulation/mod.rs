pub mod config;
pub mod forecast;
pub mod montecarloengine;
pub mod pathset;
pub mod summary;
