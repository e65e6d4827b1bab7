pub mod application;
pub mod blog;
pub mod career;
pub mod inquiry;
pub mod product;
pub mod quote;
pub mod status;

pub use application::Application;
pub use blog::{BlogPost, Section};
pub use career::JobPosting;
pub use inquiry::CustomerInquiry;
pub use product::Product;
pub use quote::QuoteRequest;
pub use status::{JobStatus, PublishStatus, ReviewStatus};
