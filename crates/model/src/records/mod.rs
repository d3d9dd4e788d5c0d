pub mod row;
pub mod view;
