pub mod event;
pub mod http;
pub mod ui;
pub mod util;
