pub mod attempt_detail;
pub mod request;
pub mod response;
