pub mod dashboard;
pub mod day_view;
pub mod scheduled;
pub mod transaction_form;
