pub mod converter;
pub mod mode;
pub mod series;
pub mod trace;
pub mod window;
