pub mod fragment;
pub mod models;
pub mod sync;
pub mod tile;
pub mod viewstate;
