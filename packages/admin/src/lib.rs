pub mod blogs;
pub mod careers;
pub mod error;
pub mod images;
pub mod inboxes;
pub mod panel;
pub mod products;

pub use blogs::{slugify, BlogDraft, BlogManager, SectionDraft};
pub use careers::{CareersManager, JobDraft};
pub use error::AdminError;
pub use images::ImageSource;
pub use inboxes::{ApplicationInbox, InquiryInbox, QuotationInbox};
pub use panel::Section;
pub use products::{ProductDraft, ProductManager};
