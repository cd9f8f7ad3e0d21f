pub mod filter;
pub mod sales;
pub mod view;
