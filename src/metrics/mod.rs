pub mod middleware;
pub mod registry;

pub use registry::{
    API_ERRORS_TOTAL, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS, MAILS_SENT_TOTAL,
};
