pub mod country;
pub mod daily_metric;
pub mod observation;
pub mod request;
