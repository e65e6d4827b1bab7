pub mod blog;
pub mod careers;
pub mod cart;
pub mod catalog;
pub mod forms;
pub mod search;
pub mod view;

pub use blog::{post_by_slug, BlogList};
pub use careers::CareersBoard;
pub use cart::{CartError, CartItem, CartStore, FileCartStorage, MemoryCartStorage};
pub use catalog::ProductCatalog;
pub use forms::{
    ApplicationForm, ApplicationPipeline, ContactForm, ContactPipeline, FormError, QuoteForm,
    QuotePipeline, SubmitState, Submitter,
};
pub use search::BrandTab;
pub use view::{LiveView, ViewState};
