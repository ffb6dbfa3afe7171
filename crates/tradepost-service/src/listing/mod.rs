//! Listing lifecycle, the posting wizard and marketplace search.

pub mod search;
pub mod service;
pub mod view;
pub mod wizard;

pub use search::{ListingCard, SearchCriteria, SearchResults, SearchService};
pub use service::ListingService;
pub use view::{ListingView, SellerSummary};
pub use wizard::{ListingDraft, ListingInput, ListingWizard, WizardLimits, WizardStep};
