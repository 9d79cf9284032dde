pub mod app;
pub mod theme;
pub mod view;

pub const DEFAULT_WIDTH: i32 = 400;
pub const DEFAULT_HEIGHT: i32 = 400;
