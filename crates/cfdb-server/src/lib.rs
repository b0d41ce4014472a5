pub mod pipeline;
pub mod response;
pub mod routes;

pub use pipeline::{UploadError, UploadRequest, UploadService};
pub use response::UploadResponse;
pub use routes::{configure, multipart_config};
