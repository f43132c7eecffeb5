pub mod dispatch;
pub mod logging;
pub mod session;
pub mod status;
pub mod view;
