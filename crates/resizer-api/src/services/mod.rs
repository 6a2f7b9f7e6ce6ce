pub mod issuer;

pub use issuer::UploadUrlIssuer;
