pub mod agency_search;
pub mod suggestion_row;
