pub mod logging;
pub mod settings;
pub mod shared;
pub mod store;
