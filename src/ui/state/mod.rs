pub mod view_filters;
