pub mod chart_card;
pub mod dropdown;
