pub mod attempt_detail_builder;
pub mod attempt_selection;
pub mod results_service;
