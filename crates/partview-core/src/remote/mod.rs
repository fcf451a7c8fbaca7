//! Access to the backend service that owns the directory and the files.
//!
//! [`http::FileService`] is the seam between the browser and the backend;
//! [`http::HttpFileService`] is the `reqwest` implementation.

pub mod http;
